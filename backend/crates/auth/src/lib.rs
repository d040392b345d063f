//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and mailer traits
//! - `application/` - Use cases, configuration, token issuer
//! - `infra/` - PostgreSQL repository, SMTP mailer (plus in-memory doubles under test)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with email + password, verified by a 6-digit emailed OTP
//! - Login issuing HS256 bearer tokens that are also recorded in the store
//! - Token introspection without a database round trip
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - OTPs from the OS CSPRNG, compared in constant time, single use
//! - Login failures never reveal whether an email is registered

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use infra::smtp::{SmtpConfig, SmtpOtpMailer};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
