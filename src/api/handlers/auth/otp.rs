//! OTP and reset-token material, plus the expiry checks over it.

use anyhow::{Context, Result};
use base64::Engine;
use rand::{rngs::OsRng, Rng, RngCore};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::handlers::ApiError;

/// Normalize an email for lookup/uniqueness checks.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
#[must_use]
pub fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email_normalized))
}

/// Current wall-clock time as unix seconds.
#[must_use]
pub(super) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as i64)
}

/// Six-digit numeric OTP, uniform in [100000, 999999].
pub(super) fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// High-entropy token for password-reset links.
///
/// The raw value is only sent to the user; the database stores its hash.
pub(super) fn generate_reset_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate reset token")?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

/// Hash a reset token so the raw value never touches the database.
pub(super) fn hash_reset_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

/// Validate a submitted OTP against the stored pending-signup material.
///
/// Value is compared before expiry, so a wrong code never learns whether the
/// stored one has lapsed.
pub(super) fn check_otp(
    stored: Option<&str>,
    expires_at: Option<i64>,
    submitted: &str,
    now: i64,
) -> Result<(), ApiError> {
    let (stored, expires_at) = match (stored, expires_at) {
        (Some(stored), Some(expires_at)) => (stored, expires_at),
        // Unverified accounts normally carry OTP material; missing fields mean
        // there is no signup in flight for this account.
        _ => return Err(ApiError::bad_request("No pending signup verification")),
    };

    if stored != submitted {
        return Err(ApiError::invalid_credential());
    }
    if now > expires_at {
        return Err(ApiError::expired("OTP expired"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::ErrorKind;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-at.example.com"));
        assert!(!valid_email("missing-domain@"));
    }

    #[test]
    fn otp_is_six_digits_in_range() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            let value: u32 = otp.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn reset_token_decodes_to_32_bytes() {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let decoded_len = generate_reset_token()
            .ok()
            .and_then(|token| URL_SAFE_NO_PAD.decode(token.as_bytes()).ok())
            .map(|bytes| bytes.len());
        assert_eq!(decoded_len, Some(32));
    }

    #[test]
    fn hash_reset_token_stable() {
        let first = hash_reset_token("token");
        let second = hash_reset_token("token");
        let different = hash_reset_token("other");
        assert_eq!(first, second);
        assert_ne!(first, different);
    }

    #[test]
    fn check_otp_accepts_match_before_expiry() {
        assert!(check_otp(Some("123456"), Some(1_000), "123456", 500).is_ok());
    }

    #[test]
    fn check_otp_rejects_wrong_code() {
        let err = check_otp(Some("123456"), Some(1_000), "654321", 500).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredential);
    }

    #[test]
    fn check_otp_rejects_expired_even_when_code_matches() {
        let err = check_otp(Some("123456"), Some(1_000), "123456", 1_001).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Expired);
    }

    #[test]
    fn check_otp_rejects_missing_material() {
        let err = check_otp(None, None, "123456", 500).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
    }
}
