//! Domain Layer
//!
//! Contains entities, value objects, and the repository and mailer traits.

pub mod entity;
pub mod mailer;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    role::Role,
    token::NewToken,
    user::{NewUser, User},
};
pub use mailer::OtpMailer;
pub use repository::{RoleRepository, TokenRepository, UserRepository};
