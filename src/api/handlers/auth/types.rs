//! Request/response types for the account lifecycle endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile_pic: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile_pic: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UploadResponse {
    pub message: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn role_round_trips_as_lowercase() -> Result<()> {
        assert_eq!(serde_json::to_value(Role::User)?, "user");
        assert_eq!(serde_json::to_value(Role::Admin)?, "admin");
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("root"), None);
        Ok(())
    }

    #[test]
    fn only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }

    #[test]
    fn signup_request_round_trips() -> Result<()> {
        let request = SignupRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "pw1".to_string(),
        };
        let value = serde_json::to_value(&request)?;
        let decoded: SignupRequest = serde_json::from_value(value)?;
        assert_eq!(decoded.email, "alice@example.com");
        assert_eq!(decoded.name, "Alice");
        Ok(())
    }

    #[test]
    fn update_profile_fields_are_optional() -> Result<()> {
        let decoded: UpdateProfileRequest = serde_json::from_value(serde_json::json!({}))?;
        assert!(decoded.name.is_none());
        assert!(decoded.current_password.is_none());
        assert!(decoded.new_password.is_none());
        Ok(())
    }
}
