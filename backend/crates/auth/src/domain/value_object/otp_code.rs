//! OTP Code Value Object
//!
//! Six-digit numeric one-time password sent by email.

use kernel::error::app_error::{AppError, AppResult};
use platform::crypto::{constant_time_eq, random_digits};
use std::fmt;

/// Number of digits in an issued code
pub const OTP_DIGITS: u32 = 6;

#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Fresh code from the OS CSPRNG
    pub fn generate() -> Self {
        Self(random_digits(OTP_DIGITS))
    }

    /// Code submitted by a client; only emptiness is rejected here; a
    /// malformed code simply never matches.
    pub fn from_submitted(raw: impl AsRef<str>) -> AppResult<Self> {
        let code = raw.as_ref().trim();
        if code.is_empty() {
            return Err(AppError::bad_request("OTP cannot be empty"));
        }
        Ok(Self(code.to_string()))
    }

    pub fn from_db(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time equality
    pub fn matches(&self, other: &OtpCode) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OtpCode").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let code = OtpCode::generate();
        assert_eq!(code.as_str().len(), OTP_DIGITS as usize);
        assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_submitted_trimmed() {
        let code = OtpCode::from_submitted(" 123456 ").unwrap();
        assert!(code.matches(&OtpCode::from_db("123456")));
    }

    #[test]
    fn test_submitted_empty() {
        assert!(OtpCode::from_submitted("").is_err());
        assert!(OtpCode::from_submitted("   ").is_err());
    }

    #[test]
    fn test_matches() {
        let stored = OtpCode::from_db("042042");
        assert!(stored.matches(&OtpCode::from_db("042042")));
        assert!(!stored.matches(&OtpCode::from_db("42042")));
        assert!(!stored.matches(&OtpCode::from_db("042043")));
    }

    #[test]
    fn test_debug_redacted() {
        assert!(!format!("{:?}", OtpCode::from_db("123456")).contains("123456"));
    }
}
