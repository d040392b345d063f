//! PublicId Value Object
//!
//! Client-facing user identifier derived from the numeric primary key:
//! a type tag followed by the id zero-padded to six digits.
//!
//! ```rust
//! use auth::domain::value_object::public_id::PublicId;
//! use kernel::id::UserId;
//!
//! let public_id = PublicId::for_user(UserId::new(42));
//! assert_eq!(public_id.as_str(), "USR000042");
//! ```

use derive_more::Display;
use kernel::id::UserId;
use serde::Serialize;

/// Type tag for user identifiers
pub const USER_TAG: &str = "USR";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
pub struct PublicId(String);

impl PublicId {
    pub fn derive(tag: &str, id: i64) -> Self {
        Self(format!("{}{:06}", tag, id))
    }

    pub fn for_user(user_id: UserId) -> Self {
        Self::derive(USER_TAG, user_id.value())
    }

    pub fn from_db(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
