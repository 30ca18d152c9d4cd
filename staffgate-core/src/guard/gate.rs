//! Permission gate: show or hide a UI fragment at render time

use crate::rbac::{PermissionChecker, Role};
use serde::Serialize;

/// What a gate lets through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    /// Render the gated children
    Children,
    /// Render the fallback content
    Fallback,
    /// Render nothing
    Hidden,
}

/// Declarative render-time filter
///
/// A non-empty `roles` list is checked first and short-circuits; otherwise a
/// complete `(module, action)` pair is checked against the permission source.
/// A gate with neither check configured always renders its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGate {
    pub module: Option<String>,
    pub action: Option<String>,
    pub roles: Vec<Role>,
    /// Render the fallback on denial (otherwise render nothing)
    pub show_fallback: bool,
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self { module: None, action: None, roles: Vec::new(), show_fallback: true }
    }
}

impl PermissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate on a single `(module, action)` permission
    pub fn permission(module: impl Into<String>, action: impl Into<String>) -> Self {
        Self { module: Some(module.into()), action: Some(action.into()), ..Self::default() }
    }

    /// Gate on a role allow-list
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self { roles: roles.into_iter().collect(), ..Self::default() }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_show_fallback(mut self, show: bool) -> Self {
        self.show_fallback = show;
        self
    }

    /// Decide for the current role
    pub fn evaluate<C>(&self, checker: &C, role: Option<Role>) -> GateOutcome
    where
        C: PermissionChecker + ?Sized,
    {
        if !self.roles.is_empty() {
            return match role {
                Some(r) if self.roles.contains(&r) => GateOutcome::Children,
                _ => self.denied(),
            };
        }

        if let (Some(module), Some(action)) = (&self.module, &self.action) {
            let allowed = role.is_some_and(|r| checker.has_permission(r, module, action));
            return if allowed { GateOutcome::Children } else { self.denied() };
        }

        GateOutcome::Children
    }

    /// Produce the renderable for the current role.
    ///
    /// Only the selected branch is built. Returns `None` when the gate hides
    /// its content.
    pub fn render<C, T>(
        &self,
        checker: &C,
        role: Option<Role>,
        children: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> Option<T>
    where
        C: PermissionChecker + ?Sized,
    {
        match self.evaluate(checker, role) {
            GateOutcome::Children => Some(children()),
            GateOutcome::Fallback => Some(fallback()),
            GateOutcome::Hidden => None,
        }
    }

    fn denied(&self) -> GateOutcome {
        if self.show_fallback {
            GateOutcome::Fallback
        } else {
            GateOutcome::Hidden
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::AccessPolicy;

    fn policy() -> AccessPolicy {
        AccessPolicy::hospital_default().unwrap()
    }

    #[test]
    fn test_permission_gate() {
        let gate = PermissionGate::permission("payroll", "read");
        assert_eq!(gate.evaluate(&policy(), Some(Role::Hr)), GateOutcome::Children);
        assert_eq!(gate.evaluate(&policy(), Some(Role::Employee)), GateOutcome::Fallback);
        assert_eq!(gate.evaluate(&policy(), None), GateOutcome::Fallback);
    }

    #[test]
    fn test_roles_short_circuit() {
        // Employee may apply for leave, but the role list alone decides
        let gate = PermissionGate::roles([Role::Admin, Role::Hr])
            .with_module("leaves")
            .with_action("apply");
        assert_eq!(gate.evaluate(&policy(), Some(Role::Employee)), GateOutcome::Fallback);
        assert_eq!(gate.evaluate(&policy(), None), GateOutcome::Fallback);

        // Listed role passes without the permission being consulted
        let gate = PermissionGate::roles([Role::Manager]).with_module("payroll").with_action("read");
        assert_eq!(gate.evaluate(&policy(), Some(Role::Manager)), GateOutcome::Children);
    }

    #[test]
    fn test_hidden_without_fallback() {
        let gate = PermissionGate::permission("system", "backup").with_show_fallback(false);
        assert_eq!(gate.evaluate(&policy(), Some(Role::Hr)), GateOutcome::Hidden);
        assert_eq!(gate.render(&policy(), Some(Role::Hr), || "backup", || "no access"), None);
    }

    #[test]
    fn test_incomplete_configuration_renders_children() {
        let policy = policy();
        assert_eq!(PermissionGate::new().evaluate(&policy, None), GateOutcome::Children);
        let module_only = PermissionGate::new().with_module("payroll");
        assert_eq!(module_only.evaluate(&policy, Some(Role::Employee)), GateOutcome::Children);
    }

    #[test]
    fn test_render_builds_selected_branch() {
        let gate = PermissionGate::permission("reports", "export");
        let policy = policy();
        assert_eq!(
            gate.render(&policy, Some(Role::Hr), || "export button", || "fallback"),
            Some("export button")
        );
        assert_eq!(
            gate.render(&policy, Some(Role::Manager), || "export button", || "fallback"),
            Some("fallback")
        );
    }

    #[test]
    fn test_unknown_permission_denies() {
        let gate = PermissionGate::permission("wards", "read");
        assert_eq!(gate.evaluate(&policy(), Some(Role::Admin)), GateOutcome::Fallback);
    }
}
