//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use staffgate_core::prelude::*;
//! ```

// === Configuration ===
pub use crate::config::StaffgateConfig;
pub use crate::logging::LoggingConfig;

// === Policy ===
pub use crate::rbac::AccessPolicy;
pub use crate::rbac::MatrixIssue;
pub use crate::rbac::PermissionChecker;
pub use crate::rbac::PermissionMatrix;
pub use crate::rbac::RouteAccessTable;

// === Identity ===
pub use crate::rbac::Identity;
pub use crate::rbac::IdentityProvider;
pub use crate::rbac::{Action, Module, Permission, Role};

// === Decisions ===
pub use crate::guard::{evaluate_route_guard, GateOutcome, GuardDecision, PermissionGate, RouteGuard};

// === Errors ===
pub use crate::error::{AccessError, AccessResult};
