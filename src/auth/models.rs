//! Session models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried by a session.
///
/// The upstream API treats roles as an open set of strings, so anything
/// other than the two known roles is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Administrator - full access to the admin surface
    Admin,
    /// Regular user - owns bookings, no admin surface
    User,
    /// Any other role string issued upstream
    Other(String),
}

impl Role {
    /// The role as the wire string
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Other(role) => role,
        }
    }

    /// Whether this is exactly the admin role
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Landing page after login for this role
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            _ => "/dashboard",
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        match role {
            "admin" => Role::Admin,
            "user" => Role::User,
            other => Role::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        Role::from(role.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_parse_to_variants() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("user"), Role::User);
    }

    #[test]
    fn unknown_roles_are_preserved() {
        let role = Role::from("support");
        assert_eq!(role, Role::Other("support".to_string()));
        assert_eq!(role.as_str(), "support");
        assert!(!role.is_admin());
    }

    #[test]
    fn only_admin_lands_on_the_admin_dashboard() {
        assert_eq!(Role::Admin.home_path(), "/admin/dashboard");
        assert_eq!(Role::User.home_path(), "/dashboard");
        assert_eq!(Role::from("support").home_path(), "/dashboard");
    }

    #[test]
    fn serializes_as_the_wire_string() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"support\"").unwrap();
        assert_eq!(role, Role::Other("support".to_string()));
    }
}
