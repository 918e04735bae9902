//! Bearer-token authentication for protected routes.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::debug;
use uuid::Uuid;

use crate::api::handlers::ApiError;

use super::{state::AuthState, types::Role};

/// Identity established from a verified session token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Principal {
    /// Fails with 403 unless the caller holds the admin role.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Access denied: admins only"))
        }
    }
}

/// Extracts and verifies the `Authorization: Bearer` token, returning the
/// caller's identity. Any failure collapses into a single 401 so the
/// response does not reveal whether the token was absent, malformed or
/// expired.
pub fn require_auth(headers: &HeaderMap, state: &AuthState) -> Result<Principal, ApiError> {
    let token = extract_bearer_token(headers).ok_or_else(ApiError::unauthorized)?;

    let claims = state.tokens().verify(token).map_err(|error| {
        debug!("Rejecting session token: {error}");
        ApiError::unauthorized()
    })?;

    Ok(Principal {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
    })
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
