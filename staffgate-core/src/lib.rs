//! Staffgate - Core
//!
//! Authorization core for the hospital staff dashboards (admin, HR, manager
//! and employee areas over employee records, attendance, leave, payroll and
//! reports).
//!
//! # Overview
//!
//! Staffgate answers three questions, always failing closed:
//!
//! - may this role perform this action on this module?
//! - may this role open this route?
//! - should this view render, or redirect to login / the role's home?
//!
//! The session layer supplies the caller's [`Identity`]; Staffgate never
//! creates or stores one.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use staffgate_core::prelude::*;
//!
//! let policy = AccessPolicy::hospital_default()?;
//!
//! // Capability checks
//! assert!(!policy.has_permission(Role::Employee, "payroll", "read"));
//!
//! // Route guard before rendering a view
//! let decision = RouteGuard::new().evaluate(&policy, &Identity::authenticated(Role::Hr), "/admin/system");
//! assert_eq!(decision.redirect_target(), Some("/hr"));
//!
//! // Gate inside a view
//! let export = PermissionGate::permission("reports", "export")
//!     .render(&policy, Some(Role::Manager), || "Export PDF", || "");
//! ```
//!
//! # Architecture
//!
//! - [`rbac`] - roles, modules, actions, permission matrix, route table, policy
//! - [`guard`] - route guard and permission gate
//! - [`config`] - TOML + environment configuration
//! - [`logging`] - `log` backend with human, JSON and logfmt output

pub mod config; // Configuration system with TOML support
pub mod error;
pub mod guard; // Route guard and permission gate
pub mod logging; // Declarative logging on top of the log crate
pub mod rbac; // Roles, permission matrix, route access table

pub mod prelude;

// Re-exports of main types and traits
pub use error::{AccessError, AccessResult};
pub use guard::{evaluate_route_guard, GateOutcome, GuardDecision, PermissionGate, RouteGuard};
pub use rbac::{
    AccessPolicy, Action, Identity, IdentityProvider, Module, Permission, PermissionChecker,
    PermissionMatrix, Role, RouteAccessTable,
};
