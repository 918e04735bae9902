//! Email delivery abstraction.
//!
//! Signup and password-reset flows hand a message to an [`EmailSender`] and
//! wait for the result before answering the caller; there is no outbox or
//! background delivery, so request latency includes transport latency and a
//! transport failure surfaces directly as a `delivery_error` response.
//!
//! The default sender for local dev is [`LogEmailSender`], which logs the
//! message and returns `Ok(())`. A real SMTP or API transport implements the
//! same trait.

use anyhow::Result;
use tracing::info;

#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

/// Email delivery abstraction used by the auth flows.
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error to fail the calling request.
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Local dev sender that logs the payload instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to_email = %message.to_email,
            subject = %message.subject,
            body = %message.body,
            "email send stub"
        );
        Ok(())
    }
}

/// Message carrying the signup OTP; the expiry line follows the configured
/// TTL rather than hardcoding one.
#[must_use]
pub fn otp_message(to_email: &str, otp: &str, ttl_seconds: i64) -> EmailMessage {
    EmailMessage {
        to_email: to_email.to_string(),
        subject: "Verify your email".to_string(),
        body: format!(
            "Your signup OTP is: {otp}. It expires in {}.",
            human_ttl(ttl_seconds)
        ),
    }
}

fn human_ttl(ttl_seconds: i64) -> String {
    if ttl_seconds >= 60 && ttl_seconds % 60 == 0 {
        let minutes = ttl_seconds / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    } else {
        format!("{ttl_seconds} seconds")
    }
}

/// Message carrying the password-reset link.
#[must_use]
pub fn reset_message(to_email: &str, reset_url: &str) -> EmailMessage {
    EmailMessage {
        to_email: to_email.to_string(),
        subject: "Reset your password".to_string(),
        body: format!(
            "Reset your password here: {reset_url}\n\
             If you did not request this, you can safely ignore this email."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_sender_always_succeeds() {
        let message = otp_message("alice@example.com", "123456", 600);
        assert!(LogEmailSender.send(&message).is_ok());
    }

    #[test]
    fn otp_message_contains_code() {
        let message = otp_message("alice@example.com", "654321", 600);
        assert_eq!(message.to_email, "alice@example.com");
        assert!(message.body.contains("654321"));
    }

    #[test]
    fn otp_message_expiry_follows_ttl() {
        assert!(otp_message("a@example.com", "111111", 600)
            .body
            .contains("10 minutes"));
        assert!(otp_message("a@example.com", "111111", 60)
            .body
            .contains("1 minute."));
        assert!(otp_message("a@example.com", "111111", 90)
            .body
            .contains("90 seconds"));
    }

    #[test]
    fn reset_message_contains_link() {
        let message = reset_message("bob@example.com", "https://reelist.dev/reset#token=abc");
        assert!(message.body.contains("https://reelist.dev/reset#token=abc"));
    }
}
