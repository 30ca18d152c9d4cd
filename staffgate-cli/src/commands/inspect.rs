use super::Report;
use serde::Serialize;
use staffgate_core::rbac::MatrixIssue;
use staffgate_core::{AccessPolicy, Permission, Role};

#[derive(Debug, Serialize)]
pub struct PermissionsReport {
    pub role: Role,
    pub granted: Vec<Permission>,
}

impl Report for PermissionsReport {
    fn passed(&self) -> bool {
        true
    }

    fn human(&self) -> String {
        let mut out = format!("{} ({} permission(s))", self.role.display_name(), self.granted.len());
        for permission in &self.granted {
            out.push_str(&format!("\n  {}", permission));
        }
        out
    }
}

pub fn permissions(policy: &AccessPolicy, role: Role) -> PermissionsReport {
    PermissionsReport { role, granted: policy.matrix().granted(role) }
}

#[derive(Debug, Serialize)]
pub struct RoutesReport {
    pub role: Role,
    pub home: &'static str,
    pub routes: Vec<String>,
}

impl Report for RoutesReport {
    fn passed(&self) -> bool {
        true
    }

    fn human(&self) -> String {
        let mut out = format!("{} (home: {})", self.role.display_name(), self.home);
        for route in &self.routes {
            out.push_str(&format!("\n  {}", route));
        }
        out
    }
}

pub fn routes(policy: &AccessPolicy, role: Role) -> RoutesReport {
    RoutesReport {
        role,
        home: role.default_home(),
        routes: policy.routes().routes_for(role).into_iter().map(str::to_string).collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub gaps: usize,
    pub contradictions: usize,
    pub issues: Vec<MatrixIssue>,
}

impl Report for ValidationReport {
    /// Contradictions are reported but only gaps fail validation
    fn passed(&self) -> bool {
        self.gaps == 0
    }

    fn human(&self) -> String {
        let mut out = String::new();
        for issue in &self.issues {
            out.push_str(&format!("{}\n", issue));
        }
        out.push_str(&format!(
            "{} gap(s), {} contradiction(s)",
            self.gaps, self.contradictions
        ));
        out
    }
}

pub fn validate(policy: &AccessPolicy) -> ValidationReport {
    let issues = policy.validate();
    let gaps = issues.iter().filter(|i| i.is_gap()).count();
    ValidationReport { gaps, contradictions: issues.len() - gaps, issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AccessPolicy {
        AccessPolicy::hospital_default().unwrap()
    }

    #[test]
    fn employee_permissions() {
        let report = permissions(&policy(), Role::Employee);
        let listed: Vec<String> = report.granted.iter().map(|p| p.to_string()).collect();
        assert!(listed.contains(&"leaves:apply".to_string()));
        assert!(!listed.iter().any(|p| p.starts_with("payroll:")));
        assert_eq!(report.human().lines().count(), report.granted.len() + 1);
    }

    #[test]
    fn manager_routes() {
        let report = routes(&policy(), Role::Manager);
        assert_eq!(report.home, "/manager");
        assert!(report.routes.contains(&"/manager/team".to_string()));
        assert!(!report.routes.iter().any(|r| r.starts_with("/hr")));
    }

    #[test]
    fn hospital_policy_validates_with_one_contradiction() {
        let report = validate(&policy());
        assert!(report.passed());
        assert_eq!(report.gaps, 0);
        assert_eq!(report.contradictions, 1);
        assert!(report.human().ends_with("0 gap(s), 1 contradiction(s)"));
    }

    #[test]
    fn partial_policy_fails_validation() {
        let policy = AccessPolicy::from_toml_str("[matrix.admin.system]\nbackup = true\n").unwrap();
        let report = validate(&policy);
        assert!(!report.passed());
        assert!(report.gaps > 0);
    }
}
