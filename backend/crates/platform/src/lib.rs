//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B length rules)
//! - Secure random numeric codes and constant-time comparison

pub mod crypto;
pub mod password;
