//! Session token issuing and verification (HS256).
//!
//! Tokens carry account id, email, and role, and stay valid until natural
//! expiry; there is no revocation list.

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::otp::unix_now;
use super::types::Role;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &SecretString, ttl_seconds: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
            ttl_seconds,
        }
    }

    /// Sign a session token for the given account.
    pub fn issue(&self, user_id: Uuid, email: &str, role: Role) -> Result<String> {
        let now = unix_now();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: now,
            exp: now + self.ttl_seconds,
        };
        encode(&Header::default(), &claims, &self.encoding).context("failed to sign session token")
    }

    /// Verify signature and expiry; any failure is reported without subtype.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .context("session token verification failed")?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(ttl_seconds: i64) -> TokenIssuer {
        TokenIssuer::new(&SecretString::from("fixture-secret".to_string()), ttl_seconds)
    }

    #[test]
    fn issue_then_verify_round_trips_claims() {
        let issuer = issuer(24 * 60 * 60);
        let user_id = Uuid::new_v4();
        let token = issuer.issue(user_id, "alice@example.com", Role::User).unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn expired_token_fails_verification() {
        let issuer = issuer(-3_600);
        let token = issuer
            .issue(Uuid::new_v4(), "alice@example.com", Role::User)
            .unwrap();
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn tampered_token_fails_verification() {
        let issuer = issuer(3_600);
        let token = issuer
            .issue(Uuid::new_v4(), "alice@example.com", Role::User)
            .unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('A');
        assert!(issuer.verify(&tampered).is_err());
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let token = issuer(3_600)
            .issue(Uuid::new_v4(), "alice@example.com", Role::Admin)
            .unwrap();
        let other = TokenIssuer::new(&SecretString::from("other-secret".to_string()), 3_600);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn admin_role_survives_round_trip() {
        let issuer = issuer(3_600);
        let token = issuer
            .issue(Uuid::new_v4(), "admin@example.com", Role::Admin)
            .unwrap();
        assert!(issuer.verify(&token).unwrap().role.is_admin());
    }
}
