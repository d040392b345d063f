//! Value Object Module

pub mod email;
pub mod otp_code;
pub mod public_id;
pub mod role_name;
pub mod user_name;
pub mod user_password;
pub mod verification;
