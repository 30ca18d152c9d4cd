//! Route access table with longest-prefix resolution

use super::roles::Role;
use crate::error::{AccessError, AccessResult};
use std::collections::{BTreeMap, BTreeSet};

/// Static mapping from route prefix to the roles allowed under it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteAccessTable {
    routes: BTreeMap<String, BTreeSet<Role>>,
}

/// Normalize a requested path for lookup.
///
/// Drops query string and fragment, adds the leading slash, strips trailing
/// slashes, percent-decodes each segment and resolves `.` and `..`. Returns
/// `None` for paths that are empty after trimming, climb above the root or
/// hide a `/` or invalid UTF-8 inside an encoded segment.
pub fn normalize_path(path: &str) -> Option<String> {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    if path.is_empty() {
        return None;
    }

    let mut segments: Vec<String> = Vec::new();
    for raw in path.split('/') {
        let segment = urlencoding::decode(raw).ok()?;
        if segment.contains('/') {
            return None;
        }
        match segment.as_ref() {
            "" | "." => {}
            // Climbing above the root has no meaning
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(segment.into_owned()),
        }
    }
    Some(format!("/{}", segments.join("/")))
}

impl RouteAccessTable {
    pub fn builder() -> RouteAccessTableBuilder {
        RouteAccessTableBuilder::default()
    }

    /// Whether `role` may open `path`.
    ///
    /// No role, an empty path or a path without any matching prefix all deny.
    pub fn can_access_route(&self, role: Option<Role>, path: &str) -> bool {
        let Some(role) = role else {
            return false;
        };

        match self.resolve(path) {
            Some((prefix, roles)) => {
                let allowed = roles.contains(&role);
                log::debug!(
                    target: "staffgate::access",
                    "Route {} resolved via {} for {}: {}",
                    path,
                    prefix,
                    role,
                    if allowed { "allow" } else { "deny" }
                );
                allowed
            }
            None => {
                log::debug!(target: "staffgate::access", "No route entry for {:?}", path);
                false
            }
        }
    }

    /// Find the entry governing `path`: exact key first, then each shorter
    /// segment prefix down to the first segment.
    pub fn resolve(&self, path: &str) -> Option<(&str, &BTreeSet<Role>)> {
        let normalized = normalize_path(path)?;

        if let Some((key, roles)) = self.routes.get_key_value(&normalized) {
            return Some((key.as_str(), roles));
        }

        let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
        (1..segments.len()).rev().find_map(|i| {
            let prefix = format!("/{}", segments[..i].join("/"));
            self.routes.get_key_value(&prefix).map(|(key, roles)| (key.as_str(), roles))
        })
    }

    /// Route prefixes the role may open, sorted
    pub fn routes_for(&self, role: Role) -> Vec<&str> {
        self.routes
            .iter()
            .filter(|(_, roles)| roles.contains(&role))
            .map(|(path, _)| path.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<Role>)> {
        self.routes.iter().map(|(path, roles)| (path.as_str(), roles))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder for [`RouteAccessTable`]
#[derive(Debug, Default)]
pub struct RouteAccessTableBuilder {
    routes: Vec<(String, Vec<Role>)>,
}

impl RouteAccessTableBuilder {
    /// Register a prefix; registering the same normalized prefix twice fails the build
    pub fn route(mut self, prefix: impl Into<String>, roles: &[Role]) -> Self {
        self.routes.push((prefix.into(), roles.to_vec()));
        self
    }

    pub fn build(self) -> AccessResult<RouteAccessTable> {
        let mut routes = BTreeMap::new();
        for (prefix, roles) in self.routes {
            let key = normalize_path(&prefix).ok_or_else(|| AccessError::MalformedPath(prefix.clone()))?;
            if roles.is_empty() {
                return Err(AccessError::EmptyRoleSet(key));
            }
            if routes.contains_key(&key) {
                return Err(AccessError::DuplicateRoute(key));
            }
            routes.insert(key, roles.into_iter().collect());
        }
        Ok(RouteAccessTable { routes })
    }
}
