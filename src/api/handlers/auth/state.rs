//! Auth configuration and shared state.

use std::sync::Arc;

use crate::api::email::EmailSender;

use super::token::TokenIssuer;

const DEFAULT_OTP_TTL_SECONDS: i64 = 10 * 60;
const DEFAULT_RESET_TOKEN_TTL_SECONDS: i64 = 60 * 60;
const DEFAULT_SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;
const DEFAULT_UPLOADS_DIR: &str = "uploads";

/// Explicit configuration for the account lifecycle; passed into constructors
/// at process start, never read from the environment inside business logic.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    base_url: String,
    otp_ttl_seconds: i64,
    reset_token_ttl_seconds: i64,
    session_ttl_seconds: i64,
    uploads_dir: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            otp_ttl_seconds: DEFAULT_OTP_TTL_SECONDS,
            reset_token_ttl_seconds: DEFAULT_RESET_TOKEN_TTL_SECONDS,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            uploads_dir: DEFAULT_UPLOADS_DIR.to_string(),
        }
    }

    #[must_use]
    pub fn with_otp_ttl_seconds(mut self, seconds: i64) -> Self {
        self.otp_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_reset_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.reset_token_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_uploads_dir(mut self, dir: String) -> Self {
        self.uploads_dir = dir;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn otp_ttl_seconds(&self) -> i64 {
        self.otp_ttl_seconds
    }

    #[must_use]
    pub fn reset_token_ttl_seconds(&self) -> i64 {
        self.reset_token_ttl_seconds
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn uploads_dir(&self) -> &str {
        &self.uploads_dir
    }
}

pub struct AuthState {
    config: AuthConfig,
    tokens: TokenIssuer,
    mailer: Arc<dyn EmailSender>,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, tokens: TokenIssuer, mailer: Arc<dyn EmailSender>) -> Self {
        Self {
            config,
            tokens,
            mailer,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub(crate) fn mailer(&self) -> &dyn EmailSender {
        self.mailer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::email::LogEmailSender;
    use secrecy::SecretString;

    #[test]
    fn auth_config_defaults_and_overrides() {
        let config = AuthConfig::new("https://reelist.dev".to_string());

        assert_eq!(config.base_url(), "https://reelist.dev");
        assert_eq!(config.otp_ttl_seconds(), DEFAULT_OTP_TTL_SECONDS);
        assert_eq!(
            config.reset_token_ttl_seconds(),
            DEFAULT_RESET_TOKEN_TTL_SECONDS
        );
        assert_eq!(config.session_ttl_seconds(), DEFAULT_SESSION_TTL_SECONDS);
        assert_eq!(config.uploads_dir(), "uploads");

        let config = config
            .with_otp_ttl_seconds(120)
            .with_reset_token_ttl_seconds(300)
            .with_session_ttl_seconds(900)
            .with_uploads_dir("/var/lib/reelist/uploads".to_string());

        assert_eq!(config.otp_ttl_seconds(), 120);
        assert_eq!(config.reset_token_ttl_seconds(), 300);
        assert_eq!(config.session_ttl_seconds(), 900);
        assert_eq!(config.uploads_dir(), "/var/lib/reelist/uploads");
    }

    #[test]
    fn auth_state_exposes_parts() {
        let config = AuthConfig::new("https://reelist.dev".to_string());
        let tokens = TokenIssuer::new(&SecretString::from("fixture-secret".to_string()), 60);
        let state = AuthState::new(config, tokens, Arc::new(LogEmailSender));
        assert_eq!(state.config().base_url(), "https://reelist.dev");
    }
}
