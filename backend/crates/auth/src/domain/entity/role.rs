//! Role Entity
//!
//! Read-only reference data seeded by migration.

use kernel::id::RoleId;

use crate::domain::value_object::role_name::RoleName;

/// Role seeded for ordinary accounts
pub const ROLE_USER: &str = "USER";
/// Role seeded for administrators
pub const ROLE_ADMIN: &str = "ADMIN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    /// Name as stored (lookup is case-insensitive)
    pub role_name: String,
}

impl Role {
    pub fn new(id: RoleId, role_name: impl Into<String>) -> Self {
        Self {
            id,
            role_name: role_name.into(),
        }
    }

    /// Case-insensitive match against a requested name
    pub fn is(&self, requested: &RoleName) -> bool {
        requested.matches(&self.role_name)
    }
}
