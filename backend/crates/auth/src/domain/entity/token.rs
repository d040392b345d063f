//! Token Entity
//!
//! Record of an issued bearer token. Tokens are never updated or revoked.

use chrono::{DateTime, Utc};
use derive_more::Display;
use kernel::id::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenType {
    #[display("ACCESS")]
    Access,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "ACCESS",
        }
    }
}

/// Token about to be persisted
#[derive(Debug, Clone)]
pub struct NewToken {
    pub user_id: UserId,
    pub token: String,
    pub token_type: TokenType,
    pub expires_at: DateTime<Utc>,
}

impl NewToken {
    pub fn access(user_id: UserId, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            token,
            token_type: TokenType::Access,
            expires_at,
        }
    }
}
