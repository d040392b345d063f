//! Entity Module

pub mod role;
pub mod token;
pub mod user;
