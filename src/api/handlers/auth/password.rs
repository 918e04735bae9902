//! Argon2id password hashing.
//!
//! Hashing is always explicit: callers compute the hash before any persist,
//! there is no recompute-on-save behavior anywhere.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::debug;

/// Hash a plaintext password into a PHC string with a per-call salt.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("failed to hash password: {err}"))
}

/// Verify a plaintext against a stored PHC hash.
///
/// Malformed stored hashes count as a mismatch rather than an error so login
/// can stay on the generic invalid-credentials path.
#[must_use]
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!("Stored password hash is malformed: {err}");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("pw1").unwrap();
        assert!(verify_password("pw1", &hash));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("pw1").unwrap();
        assert!(!verify_password("pw2", &hash));
    }

    #[test]
    fn salts_differ_between_calls() {
        let first = hash_password("pw1").unwrap();
        let second = hash_password("pw1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        assert!(!verify_password("pw1", "not-a-phc-string"));
    }
}
