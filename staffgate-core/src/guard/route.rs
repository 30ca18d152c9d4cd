//! Route Guard - decide whether a protected view may render
//!
//! Checks run in a fixed order and the first failing one decides:
//! 1. Authentication (when required)
//! 2. Explicit role requirement
//! 3. Route access table
//!
//! Example:
//! ```ignore
//! let guard = RouteGuard::new().require_roles([Role::Admin]);
//! match guard.check(&policy, &session, "/admin/system") {
//!     GuardDecision::Authorized => render(),
//!     other => redirect(other.redirect_target().unwrap_or(LOGIN_PATH)),
//! }
//! ```

use crate::rbac::{default_home, AccessPolicy, Identity, IdentityProvider, Role, LOGIN_PATH};
use serde::Serialize;

/// Outcome of a route guard check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Render the protected content
    Authorized,
    /// Send the visitor to the login page, remembering where they were going
    RedirectLogin { return_to: String },
    /// Send the user to their role's landing page
    RedirectRoleHome { target: String },
}

impl GuardDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, GuardDecision::Authorized)
    }

    /// Where the caller should navigate, `None` when authorized
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::Authorized => None,
            GuardDecision::RedirectLogin { .. } => Some(LOGIN_PATH),
            GuardDecision::RedirectRoleHome { target } => Some(target),
        }
    }

    /// Login URL carrying the original path, e.g. `/login?next=%2Fhr%2Fleaves`
    pub fn login_url(&self) -> Option<String> {
        match self {
            GuardDecision::RedirectLogin { return_to } => {
                Some(format!("{}?next={}", LOGIN_PATH, urlencoding::encode(return_to)))
            }
            _ => None,
        }
    }
}

/// Guard definition for one protected view
///
/// Holds configuration only; every check reads the identity afresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    /// Redirect anonymous visitors to the login page
    pub require_auth: bool,
    /// Roles allowed regardless of the route table (empty = no restriction)
    pub required_roles: Vec<Role>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self { require_auth: true, required_roles: Vec::new() }
    }
}

impl RouteGuard {
    /// Guard requiring authentication and nothing else
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_auth(mut self, required: bool) -> Self {
        self.require_auth = required;
        self
    }

    pub fn require_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.required_roles = roles.into_iter().collect();
        self
    }

    /// Decide for an explicit identity
    pub fn evaluate(&self, policy: &AccessPolicy, identity: &Identity, path: &str) -> GuardDecision {
        let role = identity.effective_role();

        if self.require_auth && !identity.is_authenticated {
            log::debug!(target: "staffgate::guard", "{}: not authenticated", path);
            return GuardDecision::RedirectLogin { return_to: path.to_string() };
        }

        if !self.required_roles.is_empty()
            && !role.is_some_and(|r| self.required_roles.contains(&r))
        {
            log::debug!(
                target: "staffgate::guard",
                "{}: role {:?} not in {:?}",
                path,
                role,
                self.required_roles
            );
            return role_home(role);
        }

        if identity.is_authenticated && !policy.can_access_route(role, path) {
            log::debug!(target: "staffgate::guard", "{}: route denied for {:?}", path, role);
            return role_home(role);
        }

        GuardDecision::Authorized
    }

    /// Decide for whoever the provider reports right now
    pub fn check(
        &self,
        policy: &AccessPolicy,
        provider: &dyn IdentityProvider,
        path: &str,
    ) -> GuardDecision {
        self.evaluate(policy, &provider.current_identity(), path)
    }
}

fn role_home(role: Option<Role>) -> GuardDecision {
    GuardDecision::RedirectRoleHome { target: default_home(role).to_string() }
}

/// Evaluate a guard built from `required_roles` with authentication required
pub fn evaluate_route_guard(
    policy: &AccessPolicy,
    identity: &Identity,
    required_roles: &[Role],
    path: &str,
) -> GuardDecision {
    RouteGuard::new().require_roles(required_roles.iter().copied()).evaluate(policy, identity, path)
}
