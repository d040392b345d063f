//! Verify OTP Use Case
//!
//! Consumes a pending OTP, marks the account verified, and issues the first
//! access token.

use chrono::Utc;
use std::sync::Arc;

use crate::application::token_issuer::TokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, otp_code::OtpCode};
use crate::error::{AuthError, AuthResult};

/// Verify OTP input
pub struct VerifyOtpInput {
    pub email: String,
    pub otp: String,
}

/// Verify OTP output
pub struct VerifyOtpOutput {
    pub token: String,
    pub user: User,
}

/// Verify OTP use case
pub struct VerifyOtpUseCase<R>
where
    R: UserRepository + TokenRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
}

impl<R> VerifyOtpUseCase<R>
where
    R: UserRepository + TokenRepository + Sync,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenIssuer>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AuthResult<VerifyOtpOutput> {
        // An address that cannot exist is reported like an unknown one
        let email = Email::new(&input.email).map_err(|_| AuthError::UserNotFound)?;
        let otp = OtpCode::from_submitted(&input.otp)?;

        let mut user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let now = Utc::now();
        if !user.verification.accepts(&otp, now) {
            return Err(AuthError::InvalidOrExpiredOtp);
        }

        // Loses to a concurrent submission of the same code
        if !self.repo.consume_otp(user.id, &otp, now).await? {
            return Err(AuthError::InvalidOrExpiredOtp);
        }
        user.mark_verified();

        let token = self.tokens.issue_and_store(&*self.repo, &user, now).await?;

        tracing::info!(user_id = %user.id, u_id = %user.public_id, "Email verified");

        Ok(VerifyOtpOutput { token, user })
    }
}
