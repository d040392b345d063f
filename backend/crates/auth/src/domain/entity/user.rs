//! User Entity
//!
//! A registered account together with its role and verification state.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::role::Role;
use crate::domain::value_object::{
    email::Email, otp_code::OtpCode, public_id::PublicId, user_name::UserName,
    user_password::UserPassword, verification::Verification,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal numeric identifier
    pub id: UserId,
    /// Client-facing identifier derived from `id`
    pub public_id: PublicId,
    pub username: UserName,
    /// Unique, stored lower-cased
    pub email: Email,
    pub password: UserPassword,
    pub role: Role,
    pub verification: Verification,
}

impl User {
    pub fn is_verified(&self) -> bool {
        self.verification.is_verified()
    }

    /// `Pending -> Verified`; clears the OTP
    pub fn mark_verified(&mut self) {
        self.verification = Verification::Verified;
    }
}

/// Registration data before the row exists
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: UserName,
    pub email: Email,
    pub password: UserPassword,
    pub role: Role,
    pub otp: OtpCode,
    pub otp_expires_at: DateTime<Utc>,
}

impl NewUser {
    /// Attach the id assigned by the store
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            public_id: PublicId::for_user(id),
            username: self.username,
            email: self.email,
            password: self.password,
            role: self.role,
            verification: Verification::Pending {
                otp: self.otp,
                expires_at: self.otp_expires_at,
            },
        }
    }
}
