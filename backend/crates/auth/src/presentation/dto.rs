//! API DTOs (Data Transfer Objects)
//!
//! Request fields are optional at the serde level so that a missing field is
//! reported by name instead of as a deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{AccessClaims, LoginInput, RegisterInput, VerifyOtpInput};
use crate::domain::entity::user::User;
use crate::error::{AuthError, AuthResult};

pub const REGISTERED_MESSAGE: &str = "OTP sent. Verify your email.";
pub const VERIFIED_MESSAGE: &str = "Email verified successfully!";
pub const LOGGED_IN_MESSAGE: &str = "Login successful!";

/// Present and not blank
fn required(value: Option<String>, field: &str) -> AuthResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AuthError::Validation(format!("{} is required", field))),
    }
}

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl RegisterRequest {
    pub fn into_input(self) -> AuthResult<RegisterInput> {
        Ok(RegisterInput {
            username: required(self.username, "username")?,
            email: required(self.email, "email")?,
            password: required(self.password, "password")?,
            role: required(self.role, "role")?,
        })
    }
}

/// Register response
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub email: String,
}

// ============================================================================
// Verify OTP
// ============================================================================

/// Verify OTP request
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
}

impl VerifyOtpRequest {
    pub fn into_input(self) -> AuthResult<VerifyOtpInput> {
        Ok(VerifyOtpInput {
            email: required(self.email, "email")?,
            otp: required(self.otp, "otp")?,
        })
    }
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn into_input(self) -> AuthResult<LoginInput> {
        Ok(LoginInput {
            email: required(self.email, "email")?,
            password: required(self.password, "password")?,
        })
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Sanitized user projection; never carries the password hash or OTP
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub u_id: String,
    pub username: String,
    pub email: String,
    pub role_name: String,
    pub verified: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.value(),
            u_id: user.public_id.to_string(),
            username: user.username.to_string(),
            email: user.email.to_string(),
            role_name: user.role.role_name.clone(),
            verified: user.is_verified(),
        }
    }
}

/// Verify OTP and login response
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokenResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

/// Token introspection response
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub role: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<AccessClaims> for MeResponse {
    fn from(claims: AccessClaims) -> Self {
        Self {
            expires_at: claims.expires_at(),
            id: claims.id,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_named() {
        let req = RegisterRequest {
            username: Some("alice".into()),
            email: None,
            password: Some("pw123456".into()),
            role: Some("USER".into()),
        };
        let err = req.into_input().err().unwrap();
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_blank_field_rejected() {
        let req = LoginRequest {
            email: Some("alice@example.com".into()),
            password: Some("   ".into()),
        };
        let err = req.into_input().err().unwrap();
        assert_eq!(err.to_string(), "password is required");
    }

    #[test]
    fn test_verify_request_from_json() {
        let req: VerifyOtpRequest = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        let err = req.into_input().err().unwrap();
        assert_eq!(err.to_string(), "otp is required");
    }
}
