//! Error types for policy construction
//!
//! Decision functions never return these: every failure on the decision path
//! degrades to "deny". Errors only surface while parsing roles or loading a
//! policy document.

use crate::rbac::{Action, MatrixIssue, Module, Permission, Role};

/// Errors raised while building or loading an access policy
#[derive(thiserror::Error, Debug)]
pub enum AccessError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Unknown action '{action}' for module '{module}'")]
    UnknownAction { module: String, action: String },

    #[error("Action '{action}' is not defined for module '{module}'")]
    ActionNotInModule { module: Module, action: Action },

    #[error("Route '{0}' has an empty role set")]
    EmptyRoleSet(String),

    #[error("Route '{0}' is declared more than once")]
    DuplicateRoute(String),

    #[error("Permission '{permission}' is set more than once for role '{role}'")]
    DuplicateEntry { role: Role, permission: Permission },

    #[error("Malformed route path: {0:?}")]
    MalformedPath(String),

    #[error("Permission matrix is incomplete: {} issue(s)", .0.len())]
    Incomplete(Vec<MatrixIssue>),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type AccessResult<T> = Result<T, AccessError>;
