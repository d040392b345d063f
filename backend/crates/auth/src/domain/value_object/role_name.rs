//! Role Name Value Object
//!
//! Role names are matched case-insensitively; `canonical()` is the
//! upper-cased form used for lookups.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};

const ROLE_NAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct RoleName(String);

impl RoleName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let name = raw.as_ref().trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Role cannot be empty"));
        }
        if name.len() > ROLE_NAME_MAX_LENGTH {
            return Err(AppError::bad_request("Invalid role"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased form for case-insensitive comparison
    pub fn canonical(&self) -> String {
        self.0.to_uppercase()
    }

    pub fn matches(&self, stored: &str) -> bool {
        stored.to_uppercase() == self.canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_case_insensitive() {
        let role = RoleName::new("user").unwrap();
        assert_eq!(role.canonical(), "USER");
        assert!(role.matches("USER"));
        assert!(role.matches("User"));
        assert!(!role.matches("ADMIN"));
    }

    #[test]
    fn test_role_name_trimmed() {
        assert_eq!(RoleName::new(" admin ").unwrap().as_str(), "admin");
    }

    #[test]
    fn test_role_name_empty() {
        assert!(RoleName::new("").is_err());
        assert!(RoleName::new("  ").is_err());
    }
}
