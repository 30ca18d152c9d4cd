//! Modules, actions and the permission pair they form

use crate::error::AccessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource category subject to permission checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Employees,
    Users,
    Attendance,
    Leaves,
    Payroll,
    Reports,
    System,
}

/// Operation within a module
///
/// The set is shared across modules, but each module only defines a subset
/// (see [`Module::actions`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Register,
    Deactivate,
    Password,
    Approve,
    Reject,
    Apply,
    Cancel,
    Process,
    Export,
    View,
    Generate,
    Settings,
    Backup,
    Audit,
}

impl Module {
    pub const ALL: [Module; 7] = [
        Module::Employees,
        Module::Users,
        Module::Attendance,
        Module::Leaves,
        Module::Payroll,
        Module::Reports,
        Module::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Employees => "employees",
            Module::Users => "users",
            Module::Attendance => "attendance",
            Module::Leaves => "leaves",
            Module::Payroll => "payroll",
            Module::Reports => "reports",
            Module::System => "system",
        }
    }

    /// Actions this module defines
    pub fn actions(&self) -> &'static [Action] {
        use Action::*;
        match self {
            Module::Employees => &[Create, Read, Update, Delete, Register, Deactivate, Password],
            Module::Users => &[Create, Read, Update, Delete],
            Module::Attendance => &[Read, Create, Update, Approve, Export],
            Module::Leaves => &[Read, Apply, Approve, Reject, Cancel],
            Module::Payroll => &[Read, Create, Update, Process, Export],
            Module::Reports => &[View, Generate, Export],
            Module::System => &[Settings, Backup, Audit],
        }
    }

    pub fn defines(&self, action: Action) -> bool {
        self.actions().contains(&action)
    }

    /// The action that grants visibility into this module, if it has one
    pub fn read_action(&self) -> Option<Action> {
        if self.defines(Action::Read) {
            Some(Action::Read)
        } else if self.defines(Action::View) {
            Some(Action::View)
        } else {
            None
        }
    }
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Register => "register",
            Action::Deactivate => "deactivate",
            Action::Password => "password",
            Action::Approve => "approve",
            Action::Reject => "reject",
            Action::Apply => "apply",
            Action::Cancel => "cancel",
            Action::Process => "process",
            Action::Export => "export",
            Action::View => "view",
            Action::Generate => "generate",
            Action::Settings => "settings",
            Action::Backup => "backup",
            Action::Audit => "audit",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Module::ALL
            .into_iter()
            .find(|m| m.as_str() == key)
            .ok_or_else(|| AccessError::UnknownModule(s.to_string()))
    }
}

/// Permission identifier: a module paired with one of its actions
///
/// Written as `module:action` (e.g. `payroll:read`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Permission {
    pub module: Module,
    pub action: Action,
}

impl Permission {
    /// Create a permission, rejecting actions the module does not define
    pub fn new(module: Module, action: Action) -> Result<Self, AccessError> {
        if module.defines(action) {
            Ok(Self { module, action })
        } else {
            Err(AccessError::ActionNotInModule { module, action })
        }
    }

    /// Parse a free-form `(module, action)` pair against the module catalog
    pub fn parse(module: &str, action: &str) -> Result<Self, AccessError> {
        let parsed_module: Module = module.parse()?;
        let key = action.trim().to_ascii_lowercase();
        parsed_module
            .actions()
            .iter()
            .find(|a| a.as_str() == key)
            .map(|a| Self { module: parsed_module, action: *a })
            .ok_or_else(|| AccessError::UnknownAction {
                module: module.to_string(),
                action: action.to_string(),
            })
    }

    /// Every permission in the catalog
    pub fn catalog() -> impl Iterator<Item = Permission> {
        Module::ALL
            .into_iter()
            .flat_map(|m| m.actions().iter().map(move |a| Permission { module: m, action: *a }))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.action)
    }
}

impl FromStr for Permission {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((module, action)) => Permission::parse(module, action),
            None => Err(AccessError::UnknownAction { module: s.to_string(), action: String::new() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_action_sets() {
        assert_eq!(Module::Employees.actions().len(), 7);
        assert!(Module::Reports.defines(Action::Export));
        assert!(!Module::Reports.defines(Action::Read));
        assert!(!Module::Users.defines(Action::Approve));
    }

    #[test]
    fn test_read_action() {
        assert_eq!(Module::Payroll.read_action(), Some(Action::Read));
        assert_eq!(Module::Reports.read_action(), Some(Action::View));
        assert_eq!(Module::System.read_action(), None);
    }

    #[test]
    fn test_parse_permission() {
        let perm = Permission::parse("Payroll", "READ").unwrap();
        assert_eq!(perm, Permission { module: Module::Payroll, action: Action::Read });
        assert_eq!(perm.to_string(), "payroll:read");
        assert_eq!("employees:deactivate".parse::<Permission>().unwrap().action, Action::Deactivate);
    }

    #[test]
    fn test_parse_rejects_foreign_action() {
        // "view" exists, but only for reports
        assert!(matches!(
            Permission::parse("payroll", "view"),
            Err(AccessError::UnknownAction { .. })
        ));
        assert!(matches!(Permission::parse("wards", "read"), Err(AccessError::UnknownModule(_))));
        assert!(Permission::new(Module::System, Action::Read).is_err());
    }

    #[test]
    fn test_catalog_size() {
        let total: usize = Module::ALL.iter().map(|m| m.actions().len()).sum();
        assert_eq!(Permission::catalog().count(), total);
        assert_eq!(total, 32);
    }
}
