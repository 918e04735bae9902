//! Account lifecycle: signup with emailed OTP, login, profile, password reset.

pub mod login;
pub mod otp;
pub mod password;
pub mod principal;
pub mod profile;
pub mod reset;
pub mod signup;
pub mod state;
pub mod storage;
pub mod token;
pub mod types;
pub mod upload;

pub use otp::{normalize_email, valid_email};
pub use principal::{require_auth, Principal};
pub use state::{AuthConfig, AuthState};
pub use token::{Claims, TokenIssuer};
pub use types::Role;
