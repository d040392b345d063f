//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;
use std::fmt;

/// Length of a generated token secret
const TOKEN_SECRET_LEN: usize = 64;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for HS256 token signing
    pub token_secret: Vec<u8>,
    /// Access token lifetime (1 day)
    pub token_ttl: Duration,
    /// OTP lifetime (10 minutes)
    pub otp_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    pub fn new(token_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_ttl: Duration::days(1),
            otp_ttl: Duration::minutes(10),
            password_pepper: None,
        }
    }

    /// Create config with a random token secret (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        Self::new(platform::crypto::random_bytes(TOKEN_SECRET_LEN))
    }

    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.password_pepper = Some(pepper.into());
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("otp_ttl", &self.otp_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new(b"secret".to_vec());
        assert_eq!(config.token_ttl, Duration::days(1));
        assert_eq!(config.otp_ttl, Duration::minutes(10));
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_random_secret_differs() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.token_secret.len(), TOKEN_SECRET_LEN);
        assert_ne!(a.token_secret, b.token_secret);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AuthConfig::new(b"super-secret".to_vec()).with_pepper(b"pepper".to_vec());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
        assert_eq!(config.pepper(), Some(&b"pepper"[..]));
    }
}
