//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod smtp;

#[cfg(test)]
pub use memory::{InMemoryAuthRepository, RecordingMailer};
pub use postgres::PgAuthRepository;
pub use smtp::{SmtpConfig, SmtpOtpMailer};
