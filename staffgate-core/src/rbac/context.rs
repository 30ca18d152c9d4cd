//! Identity supplied by the session layer

use super::roles::Role;
use serde::{Deserialize, Serialize};

/// Authenticated (or anonymous) caller as seen by the access core
///
/// Created by the session provider on login and dropped on logout or expiry.
/// The core only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Identity {
    pub role: Option<Role>,
    pub is_authenticated: bool,
}

impl Identity {
    /// Anonymous visitor
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Logged-in staff member with a known role
    pub fn authenticated(role: Role) -> Self {
        Self { role: Some(role), is_authenticated: true }
    }

    /// Build an identity from raw session data.
    ///
    /// A role string outside the known set is treated as no role at all.
    pub fn from_raw(role: Option<&str>, is_authenticated: bool) -> Self {
        Self { role: role.and_then(Role::parse_lenient), is_authenticated }
    }

    /// Role usable for decisions: only authenticated identities carry one
    pub fn effective_role(&self) -> Option<Role> {
        if self.is_authenticated {
            self.role
        } else {
            None
        }
    }
}

/// Source of the current identity
///
/// Implemented by the session layer. Guards call it on every check so a login
/// or logout between two renders is always observed.
pub trait IdentityProvider: Send + Sync {
    fn current_identity(&self) -> Identity;
}

impl IdentityProvider for Identity {
    fn current_identity(&self) -> Identity {
        *self
    }
}

impl<F> IdentityProvider for F
where
    F: Fn() -> Identity + Send + Sync,
{
    fn current_identity(&self) -> Identity {
        self()
    }
}
