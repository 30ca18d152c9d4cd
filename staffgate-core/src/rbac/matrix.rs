//! Permission matrix: role × module × action → allowed
//!
//! The matrix is built once through [`PermissionMatrixBuilder`] and never
//! mutated afterwards. Lookups are default-deny: a triple without an explicit
//! `true` is refused, whether it is unknown, missing or explicitly `false`.

use super::permissions::{Action, Module, Permission};
use super::roles::Role;
use crate::error::{AccessError, AccessResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

type ModuleEntries = BTreeMap<Module, BTreeMap<Action, bool>>;

/// Immutable role → module → action → bool table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionMatrix {
    entries: BTreeMap<Role, ModuleEntries>,
}

/// Problem found while validating a matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatrixIssue {
    /// No entry for a (role, module, action) the catalog defines
    Gap { role: Role, module: Module, action: Action },
    /// `granted` is allowed although the action it depends on is denied
    Contradiction { role: Role, module: Module, granted: Action, missing: Action },
}

impl MatrixIssue {
    pub fn is_gap(&self) -> bool {
        matches!(self, MatrixIssue::Gap { .. })
    }
}

impl fmt::Display for MatrixIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixIssue::Gap { role, module, action } => {
                write!(f, "gap: {} has no entry for {}:{}", role, module, action)
            }
            MatrixIssue::Contradiction { role, module, granted, missing } => write!(
                f,
                "contradiction: {} may {}:{} but not {}:{}",
                role, module, granted, module, missing
            ),
        }
    }
}

/// Action pairs where granting the first without the second is inconsistent,
/// on top of the generic "every action needs the module's read action" rule.
const EXTRA_IMPLICATIONS: &[(Module, Action, Action)] =
    &[(Module::Employees, Action::Delete, Action::Deactivate)];

impl PermissionMatrix {
    pub fn builder() -> PermissionMatrixBuilder {
        PermissionMatrixBuilder::default()
    }

    /// Free-form check used by views: unknown module or action strings deny.
    pub fn has_permission(&self, role: Role, module: &str, action: &str) -> bool {
        match Permission::parse(module, action) {
            Ok(permission) => self.allows(role, permission),
            Err(err) => {
                log::debug!(target: "staffgate::access", "Denying {} for {}: {}", role, module, err);
                false
            }
        }
    }

    /// Typed check; a missing entry is a configuration gap and denies
    pub fn allows(&self, role: Role, permission: Permission) -> bool {
        match self.entry(role, permission) {
            Some(allowed) => allowed,
            None => {
                if cfg!(debug_assertions) {
                    log::warn!(
                        target: "staffgate::access",
                        "Configuration gap: no matrix entry for {} on {}",
                        role,
                        permission
                    );
                }
                false
            }
        }
    }

    /// Raw entry, `None` when the matrix has no value for the triple
    pub fn entry(&self, role: Role, permission: Permission) -> Option<bool> {
        self.entries
            .get(&role)
            .and_then(|modules| modules.get(&permission.module))
            .and_then(|actions| actions.get(&permission.action))
            .copied()
    }

    /// True if at least one of the `(module, action)` pairs is allowed
    pub fn has_any_permission(&self, role: Role, pairs: &[(&str, &str)]) -> bool {
        pairs.iter().any(|(module, action)| self.has_permission(role, module, action))
    }

    /// True if every `(module, action)` pair is allowed; an empty list is not a grant
    pub fn has_all_permissions(&self, role: Role, pairs: &[(&str, &str)]) -> bool {
        !pairs.is_empty()
            && pairs.iter().all(|(module, action)| self.has_permission(role, module, action))
    }

    /// Everything the role is explicitly allowed to do, in catalog order
    pub fn granted(&self, role: Role) -> Vec<Permission> {
        Permission::catalog().filter(|p| self.entry(role, *p) == Some(true)).collect()
    }

    /// Report missing entries and inconsistent grants
    pub fn validate(&self) -> Vec<MatrixIssue> {
        let mut issues = Vec::new();

        for role in Role::ALL {
            for permission in Permission::catalog() {
                if self.entry(role, permission).is_none() {
                    issues.push(MatrixIssue::Gap {
                        role,
                        module: permission.module,
                        action: permission.action,
                    });
                }
            }

            for module in Module::ALL {
                let allowed = |action: Action| {
                    self.entry(role, Permission { module, action }) == Some(true)
                };

                if let Some(read) = module.read_action() {
                    if !allowed(read) {
                        for action in module.actions().iter().filter(|a| **a != read) {
                            if allowed(*action) {
                                issues.push(MatrixIssue::Contradiction {
                                    role,
                                    module,
                                    granted: *action,
                                    missing: read,
                                });
                            }
                        }
                    }
                }

                for (m, granted, missing) in EXTRA_IMPLICATIONS {
                    if *m == module && allowed(*granted) && !allowed(*missing) {
                        issues.push(MatrixIssue::Contradiction {
                            role,
                            module,
                            granted: *granted,
                            missing: *missing,
                        });
                    }
                }
            }
        }

        issues
    }
}

/// Builder for [`PermissionMatrix`]
///
/// Errors (actions a module does not define) are collected and reported by
/// [`PermissionMatrixBuilder::build`].
#[derive(Debug, Default)]
pub struct PermissionMatrixBuilder {
    entries: BTreeMap<Role, ModuleEntries>,
    errors: Vec<AccessError>,
}

impl PermissionMatrixBuilder {
    /// Set a single entry; pairs outside the module's action set are errors
    pub fn set(mut self, role: Role, permission: Permission, allowed: bool) -> Self {
        if permission.module.defines(permission.action) {
            self.insert(role, permission, allowed);
        } else {
            self.errors.push(AccessError::ActionNotInModule {
                module: permission.module,
                action: permission.action,
            });
        }
        self
    }

    /// Declare the complete row for `(role, module)`: the listed actions are
    /// allowed, every other action of the module is explicitly denied.
    pub fn module(mut self, role: Role, module: Module, granted: &[Action]) -> Self {
        for action in granted {
            if !module.defines(*action) {
                self.errors.push(AccessError::ActionNotInModule { module, action: *action });
            }
        }
        for action in module.actions() {
            self.insert(role, Permission { module, action: *action }, granted.contains(action));
        }
        self
    }

    /// Allow every action of every module
    pub fn allow_all(mut self, role: Role) -> Self {
        for permission in Permission::catalog() {
            self.insert(role, permission, true);
        }
        self
    }

    /// Deny every action of `module` explicitly
    pub fn deny_module(self, role: Role, module: Module) -> Self {
        self.module(role, module, &[])
    }

    fn insert(&mut self, role: Role, permission: Permission, allowed: bool) {
        self.entries
            .entry(role)
            .or_default()
            .entry(permission.module)
            .or_default()
            .insert(permission.action, allowed);
    }

    pub fn build(mut self) -> AccessResult<PermissionMatrix> {
        if !self.errors.is_empty() {
            return Err(self.errors.remove(0));
        }
        Ok(PermissionMatrix { entries: self.entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PermissionMatrix {
        PermissionMatrix::builder()
            .allow_all(Role::Admin)
            .module(Role::Employee, Module::Leaves, &[Action::Read, Action::Apply])
            .build()
            .unwrap()
    }

    #[test]
    fn test_explicit_grant_and_deny() {
        let matrix = sample();
        assert!(matrix.has_permission(Role::Employee, "leaves", "apply"));
        assert!(!matrix.has_permission(Role::Employee, "leaves", "approve"));
        assert_eq!(
            matrix.entry(
                Role::Employee,
                Permission { module: Module::Leaves, action: Action::Approve }
            ),
            Some(false)
        );
    }

    #[test]
    fn test_missing_entries_deny() {
        let matrix = sample();
        // No row at all for payroll or for the manager role
        assert!(!matrix.has_permission(Role::Employee, "payroll", "read"));
        assert!(!matrix.has_permission(Role::Manager, "leaves", "read"));
    }

    #[test]
    fn test_unknown_keys_deny_without_error() {
        let matrix = sample();
        assert!(!matrix.has_permission(Role::Admin, "wards", "read"));
        assert!(!matrix.has_permission(Role::Admin, "employees", "fly"));
        assert!(!matrix.has_permission(Role::Admin, "", ""));
    }

    #[test]
    fn test_module_rejects_foreign_action() {
        let result =
            PermissionMatrix::builder().module(Role::Hr, Module::Reports, &[Action::Read]).build();
        assert!(matches!(result, Err(AccessError::ActionNotInModule { .. })));
    }

    #[test]
    fn test_set_rejects_out_of_catalog_pair() {
        let system_read = Permission { module: Module::System, action: Action::Read };
        let result = PermissionMatrix::builder().set(Role::Admin, system_read, true).build();
        assert!(matches!(
            result,
            Err(AccessError::ActionNotInModule { module: Module::System, action: Action::Read })
        ));
    }

    #[test]
    fn test_any_all() {
        let matrix = sample();
        assert!(matrix.has_any_permission(Role::Employee, &[("payroll", "read"), ("leaves", "read")]));
        assert!(!matrix.has_all_permissions(Role::Employee, &[("payroll", "read"), ("leaves", "read")]));
        assert!(matrix.has_all_permissions(Role::Employee, &[("leaves", "apply"), ("leaves", "read")]));
        assert!(!matrix.has_all_permissions(Role::Admin, &[]));
        assert!(!matrix.has_any_permission(Role::Admin, &[]));
    }

    #[test]
    fn test_granted_lists_only_true_entries() {
        let matrix = sample();
        let granted = matrix.granted(Role::Employee);
        assert_eq!(granted.len(), 2);
        assert!(granted.iter().all(|p| p.module == Module::Leaves));
        assert_eq!(matrix.granted(Role::Admin).len(), Permission::catalog().count());
    }

    #[test]
    fn test_validate_reports_gaps() {
        let issues = sample().validate();
        let gaps = issues.iter().filter(|i| i.is_gap()).count();
        let catalog = Permission::catalog().count();
        // Admin complete, employee only has the leaves row, hr and manager empty
        assert_eq!(gaps, 3 * catalog - Module::Leaves.actions().len());
    }

    #[test]
    fn test_validate_reports_contradictions() {
        let matrix = PermissionMatrix::builder()
            .module(Role::Hr, Module::Payroll, &[Action::Export])
            .module(Role::Hr, Module::Employees, &[Action::Read, Action::Delete])
            .build()
            .unwrap();

        let contradictions: Vec<_> = matrix.validate().into_iter().filter(|i| !i.is_gap()).collect();
        assert_eq!(contradictions.len(), 2);
        assert!(contradictions.contains(&MatrixIssue::Contradiction {
            role: Role::Hr,
            module: Module::Payroll,
            granted: Action::Export,
            missing: Action::Read,
        }));
        assert!(contradictions.contains(&MatrixIssue::Contradiction {
            role: Role::Hr,
            module: Module::Employees,
            granted: Action::Delete,
            missing: Action::Deactivate,
        }));
    }

    #[test]
    fn test_issue_display() {
        let gap = MatrixIssue::Gap { role: Role::Hr, module: Module::System, action: Action::Backup };
        assert_eq!(gap.to_string(), "gap: hr has no entry for system:backup");
    }
}
