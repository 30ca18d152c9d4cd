//! Staffgate RBAC (Role-Based Access Control) Module
//!
//! Static authorization data and the pure lookups built on it:
//!
//! - [`PermissionMatrix`] - role × module × action → allowed, default-deny
//! - [`RouteAccessTable`] - route prefix → allowed roles, longest prefix wins
//! - [`AccessPolicy`] - both tables, built once and shared read-only
//!
//! # Example
//! ```rust,ignore
//! let policy = AccessPolicy::hospital_default()?;
//!
//! assert!(!policy.has_permission(Role::Employee, "payroll", "read"));
//! assert!(policy.can_access_route(Some(Role::Admin), "/hr/employees"));
//! assert!(!policy.can_access_route(None, "/employee"));
//! ```

mod context;
mod hospital;
mod matrix;
mod permissions;
mod policy;
mod roles;
mod routes;

// Public exports
pub use context::{Identity, IdentityProvider};
pub use hospital::{hospital_matrix, hospital_routes};
pub use matrix::{MatrixIssue, PermissionMatrix, PermissionMatrixBuilder};
pub use permissions::{Action, Module, Permission};
pub use policy::AccessPolicy;
pub use roles::{default_home, Role, LOGIN_PATH};
pub use routes::{normalize_path, RouteAccessTable, RouteAccessTableBuilder};

/// Trait for checking if a role has a specific permission
///
/// Gates and views depend on this rather than on a concrete table so that
/// alternative permission sources can be plugged in.
pub trait PermissionChecker: Send + Sync {
    /// Check if `role` may perform `action` on `module`
    ///
    /// # Arguments
    /// * `role` - The caller's role
    /// * `module` - Module name (e.g., "employees", "payroll")
    /// * `action` - Action name (e.g., "read", "deactivate")
    ///
    /// # Returns
    /// `true` only for an explicit grant; unknown names return `false`
    fn has_permission(&self, role: Role, module: &str, action: &str) -> bool;
}

impl PermissionChecker for PermissionMatrix {
    fn has_permission(&self, role: Role, module: &str, action: &str) -> bool {
        PermissionMatrix::has_permission(self, role, module, action)
    }
}
