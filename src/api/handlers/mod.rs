//! HTTP handlers and the shared response surface.

pub mod admin;
pub mod auth;
pub mod feedback;
pub mod health;
pub mod watchlist;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

/// Liveness probe for load balancers; not part of the documented API.
pub async fn root() -> &'static str {
    "Server is up and running!"
}

/// Plain success envelope used by operations without a richer payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Machine-readable failure classes exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    Conflict,
    NotFound,
    InvalidCredential,
    Expired,
    Forbidden,
    Unauthorized,
    DeliveryError,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest | Self::Expired => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidCredential | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::DeliveryError => StatusCode::BAD_GATEWAY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// User-visible failure: a kind plus a short human-readable message.
///
/// Store and transport failures are mapped to [`ErrorKind::Internal`] at each
/// operation's boundary; no raw error detail crosses into a response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Generic credential failure; never distinguishes unknown email from a
    /// wrong password or OTP value.
    #[must_use]
    pub fn invalid_credential() -> Self {
        Self::new(ErrorKind::InvalidCredential, "Invalid credentials")
    }

    pub fn expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Expired, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized, "Invalid or missing token")
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeliveryError, message)
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// Log the underlying failure and return an opaque internal error.
    pub fn internal(err: anyhow::Error) -> Self {
        error!("Internal error: {err:#}");
        Self::new(ErrorKind::Internal, "Server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.kind.status(), Json(&self)).into_response()
    }
}
