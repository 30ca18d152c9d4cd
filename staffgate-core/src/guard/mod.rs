//! Render-time decisions built on the access policy
//!
//! - [`RouteGuard`] runs before a protected view and yields a [`GuardDecision`]
//! - [`PermissionGate`] hides or replaces fragments inside a view
//!
//! Both keep no state between calls.

mod gate;
mod route;

pub use gate::{GateOutcome, PermissionGate};
pub use route::{evaluate_route_guard, GuardDecision, RouteGuard};
