//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use std::future::Future;

use chrono::{DateTime, Utc};
use kernel::id::{TokenId, UserId};

use crate::domain::entity::{
    role::Role,
    token::NewToken,
    user::{NewUser, User},
};
use crate::domain::value_object::{email::Email, otp_code::OtpCode, role_name::RoleName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Find user (joined with role) by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Insert an unverified user and run `dispatch` inside the same unit of
    /// work. The insert is only kept if `dispatch` succeeds.
    ///
    /// A concurrent insert of the same email yields `AuthError::EmailTaken`.
    async fn create_unverified<F>(&self, new_user: &NewUser, dispatch: F) -> AuthResult<User>
    where
        F: Future<Output = AuthResult<()>> + Send;

    /// Mark the user verified and clear the OTP, but only while the stored
    /// code still equals `otp` and has not expired at `now`.
    ///
    /// Returns `false` when the conditional update touched no row.
    async fn consume_otp(
        &self,
        user_id: UserId,
        otp: &OtpCode,
        now: DateTime<Utc>,
    ) -> AuthResult<bool>;
}

/// Role lookup
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    /// Case-insensitive lookup by name
    async fn find_role_by_name(&self, name: &RoleName) -> AuthResult<Option<Role>>;
}

/// Issued token persistence
#[trait_variant::make(TokenRepository: Send)]
pub trait LocalTokenRepository {
    async fn save_token(&self, token: &NewToken) -> AuthResult<TokenId>;
}
