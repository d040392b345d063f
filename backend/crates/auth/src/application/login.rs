//! Login Use Case
//!
//! Checks credentials and issues an access token for a verified account.

use chrono::Utc;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_issuer::TokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub token: String,
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository + TokenRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository + TokenRepository + Sync,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenIssuer>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password = RawPassword::for_login(input.password);

        let user = self.repo.find_by_email(&email).await?;

        let stored = user.as_ref().map(|u| u.password.clone());
        let pepper = self.config.pepper().map(<[u8]>::to_vec);
        let matched = UserPassword::check_login(stored, raw_password, pepper).await?;

        let user = match user {
            Some(user) if matched => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        // Only disclosed to callers holding the right password
        if !user.is_verified() {
            return Err(AuthError::EmailNotVerified);
        }

        let token = self
            .tokens
            .issue_and_store(&*self.repo, &user, Utc::now())
            .await?;

        tracing::info!(user_id = %user.id, u_id = %user.public_id, "User logged in");

        Ok(LoginOutput { token, user })
    }
}
