//! Access policy: the permission matrix and route table, built once and shared

use super::hospital::{hospital_matrix, hospital_routes};
use super::matrix::{MatrixIssue, PermissionMatrix};
use super::permissions::Permission;
use super::roles::Role;
use super::routes::RouteAccessTable;
use super::PermissionChecker;
use crate::config::AccessConfig;
use crate::error::{AccessError, AccessResult};
use anyhow::Context;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Immutable authorization configuration
///
/// Construct once at startup and pass by reference (or `Arc`) to every
/// caller. There is no mutation path after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessPolicy {
    matrix: PermissionMatrix,
    routes: RouteAccessTable,
}

/// TOML representation of a policy document
///
/// ```toml
/// [matrix.hr.employees]
/// read = true
/// delete = true
///
/// [routes]
/// "/hr" = ["admin", "hr"]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyDocument {
    #[serde(default)]
    matrix: BTreeMap<String, BTreeMap<String, BTreeMap<String, bool>>>,
    #[serde(default)]
    routes: BTreeMap<String, Vec<String>>,
}

impl AccessPolicy {
    pub fn new(matrix: PermissionMatrix, routes: RouteAccessTable) -> Self {
        Self { matrix, routes }
    }

    /// Policy of the hospital staff dashboards
    pub fn hospital_default() -> AccessResult<Self> {
        Ok(Self::new(hospital_matrix()?, hospital_routes()?))
    }

    /// Parse a policy document.
    ///
    /// Unknown roles, modules or actions are rejected here rather than
    /// silently never matching at decision time, as are keys that name the
    /// same entry or route twice.
    pub fn from_toml_str(content: &str) -> AccessResult<Self> {
        let document: PolicyDocument = toml::from_str(content)?;

        // Keys are matched case-insensitively, so "HR" and "hr" must not both appear
        let mut seen = BTreeSet::new();
        let mut matrix = PermissionMatrix::builder();
        for (role, modules) in &document.matrix {
            let role: Role = role.parse()?;
            for (module, actions) in modules {
                for (action, allowed) in actions {
                    let permission = Permission::parse(module, action)?;
                    if !seen.insert((role, permission)) {
                        return Err(AccessError::DuplicateEntry { role, permission });
                    }
                    matrix = matrix.set(role, permission, *allowed);
                }
            }
        }

        let mut routes = RouteAccessTable::builder();
        for (path, roles) in &document.routes {
            let roles = roles.iter().map(|r| r.parse()).collect::<AccessResult<Vec<Role>>>()?;
            routes = routes.route(path.as_str(), &roles);
        }

        Ok(Self::new(matrix.build()?, routes.build()?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse policy file: {}", path.display()))
    }

    /// Build the policy described by the access configuration.
    ///
    /// Without a policy file the hospital default is used. In strict mode a
    /// matrix with gaps is refused; otherwise gaps are logged and deny.
    pub fn load(config: &AccessConfig) -> anyhow::Result<Self> {
        let policy = match &config.policy_file {
            Some(path) => Self::from_file(path)?,
            None => Self::hospital_default()?,
        };

        let issues = policy.validate();
        let gaps: Vec<MatrixIssue> = issues.iter().filter(|i| i.is_gap()).cloned().collect();

        for issue in issues.iter().filter(|i| !i.is_gap()) {
            log::warn!(target: "staffgate::policy", "Permission matrix {}", issue);
        }

        if !gaps.is_empty() {
            if config.strict {
                return Err(AccessError::Incomplete(gaps).into());
            }
            log::warn!(
                target: "staffgate::policy",
                "Permission matrix has {} gap(s); missing entries will deny",
                gaps.len()
            );
        }

        log::info!(
            target: "staffgate::policy",
            "Access policy loaded: {} granted permission(s), {} route(s)",
            Role::ALL.iter().map(|r| policy.matrix.granted(*r).len()).sum::<usize>(),
            policy.routes.len()
        );

        Ok(policy)
    }

    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    pub fn routes(&self) -> &RouteAccessTable {
        &self.routes
    }

    pub fn has_permission(&self, role: Role, module: &str, action: &str) -> bool {
        self.matrix.has_permission(role, module, action)
    }

    pub fn can_access_route(&self, role: Option<Role>, path: &str) -> bool {
        self.routes.can_access_route(role, path)
    }

    pub fn validate(&self) -> Vec<MatrixIssue> {
        self.matrix.validate()
    }
}

impl PermissionChecker for AccessPolicy {
    fn has_permission(&self, role: Role, module: &str, action: &str) -> bool {
        self.matrix.has_permission(role, module, action)
    }
}
