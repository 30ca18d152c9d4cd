//! Staff roles and their landing pages

use crate::error::AccessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Landing page for anything without a usable role
pub const LOGIN_PATH: &str = "/login";

/// Access level of an authenticated staff member
///
/// Exactly one role is attached to a session. Changing it requires a new login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
    Manager,
    Employee,
}

impl Role {
    /// Every role, in privilege order
    pub const ALL: [Role; 4] = [Role::Admin, Role::Hr, Role::Manager, Role::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }

    /// Human-readable label used by dashboards
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Hr => "Human Resources",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        }
    }

    /// Dashboard this role lands on after login or after a denied navigation
    pub fn default_home(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Hr => "/hr",
            Role::Manager => "/manager",
            Role::Employee => "/employee",
        }
    }

    /// Parse a role coming from an untrusted identity source.
    ///
    /// Unknown or malformed values become `None` instead of an error.
    pub fn parse_lenient(raw: &str) -> Option<Role> {
        match raw.parse() {
            Ok(role) => Some(role),
            Err(_) => {
                log::debug!(target: "staffgate::access", "Ignoring unknown role {:?}", raw);
                None
            }
        }
    }
}

/// Default landing page for an optional role; no role means the login page
pub fn default_home(role: Option<Role>) -> &'static str {
    role.map(|r| r.default_home()).unwrap_or(LOGIN_PATH)
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "hr" => Ok(Role::Hr),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            _ => Err(AccessError::UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles_case_insensitive() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("HR".parse::<Role>().unwrap(), Role::Hr);
        assert_eq!(" Manager ".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("employee".parse::<Role>().unwrap(), Role::Employee);
    }

    #[test]
    fn test_unknown_role_is_error() {
        assert!(matches!("superuser".parse::<Role>(), Err(AccessError::UnknownRole(_))));
        assert!("".parse::<Role>().is_err());
        assert_eq!(Role::parse_lenient("root"), None);
    }

    #[test]
    fn test_default_homes() {
        assert_eq!(default_home(Some(Role::Admin)), "/admin");
        assert_eq!(default_home(Some(Role::Hr)), "/hr");
        assert_eq!(default_home(Some(Role::Manager)), "/manager");
        assert_eq!(default_home(Some(Role::Employee)), "/employee");
        assert_eq!(default_home(None), "/login");
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }
}
