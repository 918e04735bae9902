//! # Reelist (Watchlist Account & Access Service)
//!
//! `reelist` is the backend for a movie watchlist application. It owns the
//! account lifecycle (signup with email OTP, login, password reset), issues
//! 24-hour HS256 session tokens, and gates a per-account watchlist of
//! external catalog ids plus an admin reporting surface.
//!
//! ## Accounts
//!
//! - **Email is the natural key:** trimmed and lowercased before any lookup.
//! - **Verification is one-way:** an account flips to verified exactly once;
//!   the pending OTP columns are cleared in the same statement.
//! - **Passwords** are stored as argon2id hashes, recomputed through an
//!   explicit hashing call whenever the plaintext changes.
//!
//! ## Sessions
//!
//! Session tokens are signed JWTs carrying account id, email, and role.
//! There is no revocation list; tokens stay valid until natural expiry.
//!
//! ## Watchlist
//!
//! Each entry associates an account with an external movie id and an opaque
//! metadata snapshot. The pair (account, movie) is unique; removal is
//! idempotent.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_commit_hash_is_hex_or_unknown() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(GIT_COMMIT_HASH.len() >= 7);
    }
}
