//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use std::error::Error as _;

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input; the message is shown to the client
    #[error("{0}")]
    Validation(String),

    /// Email already registered
    #[error("User already exists")]
    EmailTaken,

    /// Requested role does not exist
    #[error("Invalid role")]
    InvalidRole,

    /// No user with this email (verification only)
    #[error("User not found")]
    UserNotFound,

    /// Wrong, consumed, or expired OTP
    #[error("Invalid or expired OTP")]
    InvalidOrExpiredOtp,

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Password correct but the account is still unverified
    #[error("Please verify your email first")]
    EmailNotVerified,

    /// Missing, malformed, or expired bearer token
    #[error("Invalid or missing bearer token")]
    InvalidToken,

    /// OTP email could not be sent
    #[error("Mail dispatch failed: {0}")]
    MailDispatch(String),

    /// Token signing failed
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::EmailTaken
            | AuthError::InvalidRole
            | AuthError::InvalidOrExpiredOtp => ErrorKind::BadRequest,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidCredentials | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::EmailNotVerified => ErrorKind::Forbidden,
            AuthError::MailDispatch(_)
            | AuthError::Token(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            AuthError::MailDispatch(_) => "Failed to send OTP. Check email configuration.".into(),
            AuthError::Token(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                "Internal server error".into()
            }
            other => other.to_string(),
        };
        AppError::new(self.kind(), message)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                let code = e.as_database_error().and_then(|db| db.code());
                tracing::error!(error = %e, db_code = ?code, "Auth database error");
            }
            AuthError::MailDispatch(msg) => {
                tracing::error!(error = %msg, "OTP mail dispatch failed");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidOrExpiredOtp => {
                tracing::warn!("Invalid or expired OTP submitted");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.kind().is_client_error() {
            return AuthError::Validation(err.message().to_string());
        }
        match err.source() {
            Some(source) => AuthError::Internal(format!("{}: {}", err.message(), source)),
            None => AuthError::Internal(err.message().to_string()),
        }
    }
}
