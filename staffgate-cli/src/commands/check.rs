use super::Report;
use serde::Serialize;
use staffgate_core::{AccessPolicy, GuardDecision, Identity, Role, RouteGuard};

#[derive(Debug, Serialize)]
pub struct PermissionReport {
    pub role: Role,
    pub module: String,
    pub action: String,
    pub allowed: bool,
}

impl Report for PermissionReport {
    fn passed(&self) -> bool {
        self.allowed
    }

    fn human(&self) -> String {
        let verdict = if self.allowed { "allow" } else { "deny" };
        format!("{}: {} {}:{}", verdict, self.role, self.module, self.action)
    }
}

pub fn permission(policy: &AccessPolicy, role: Role, module: &str, action: &str) -> PermissionReport {
    PermissionReport {
        role,
        module: module.to_string(),
        action: action.to_string(),
        allowed: policy.has_permission(role, module, action),
    }
}

#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub role: Option<Role>,
    pub path: String,
    /// Table entry that governed the decision
    pub matched: Option<String>,
    pub allowed: bool,
}

impl Report for RouteReport {
    fn passed(&self) -> bool {
        self.allowed
    }

    fn human(&self) -> String {
        let verdict = if self.allowed { "allow" } else { "deny" };
        let role = self.role.map(|r| r.as_str()).unwrap_or("(no role)");
        match &self.matched {
            Some(prefix) => format!("{}: {} {} (via {})", verdict, role, self.path, prefix),
            None => format!("{}: {} {} (no matching route)", verdict, role, self.path),
        }
    }
}

pub fn route(policy: &AccessPolicy, role: Option<Role>, path: &str) -> RouteReport {
    RouteReport {
        role,
        path: path.to_string(),
        matched: policy.routes().resolve(path).map(|(prefix, _)| prefix.to_string()),
        allowed: policy.can_access_route(role, path),
    }
}

#[derive(Debug, Serialize)]
pub struct GuardReport {
    pub identity: Identity,
    pub required_roles: Vec<Role>,
    pub path: String,
    pub decision: GuardDecision,
    pub redirect: Option<String>,
}

impl Report for GuardReport {
    fn passed(&self) -> bool {
        self.decision.is_authorized()
    }

    fn human(&self) -> String {
        match &self.redirect {
            Some(target) => format!("redirect: {} -> {}", self.path, target),
            None => format!("authorized: {}", self.path),
        }
    }
}

pub fn guard(
    policy: &AccessPolicy,
    raw_role: Option<&str>,
    authenticated: bool,
    required_roles: Vec<Role>,
    require_auth: bool,
    path: &str,
) -> GuardReport {
    let identity = Identity::from_raw(raw_role, authenticated);
    let decision = RouteGuard::new()
        .require_auth(require_auth)
        .require_roles(required_roles.iter().copied())
        .check(policy, &identity, path);

    let redirect = decision
        .login_url()
        .or_else(|| decision.redirect_target().map(str::to_string));

    GuardReport { identity, required_roles, path: path.to_string(), decision, redirect }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AccessPolicy {
        AccessPolicy::hospital_default().unwrap()
    }

    #[test]
    fn permission_report() {
        let report = permission(&policy(), Role::Hr, "employees", "delete");
        assert!(report.passed());
        assert_eq!(report.human(), "allow: hr employees:delete");

        let report = permission(&policy(), Role::Employee, "payroll", "read");
        assert!(!report.passed());
    }

    #[test]
    fn route_report_names_matched_prefix() {
        let report = route(&policy(), Some(Role::Hr), "/hr/employees/add");
        assert!(report.passed());
        assert_eq!(report.matched.as_deref(), Some("/hr/employees"));

        let report = route(&policy(), None, "/profile");
        assert!(!report.passed());
        assert_eq!(report.human(), "deny: (no role) /profile (via /profile)");
    }

    #[test]
    fn guard_report_redirects() {
        let report = guard(&policy(), None, false, Vec::new(), true, "/hr/leaves");
        assert!(!report.passed());
        assert_eq!(report.redirect.as_deref(), Some("/login?next=%2Fhr%2Fleaves"));

        let report = guard(&policy(), Some("hr"), true, Vec::new(), true, "/admin/system");
        assert_eq!(report.human(), "redirect: /admin/system -> /hr");

        let report = guard(&policy(), Some("manager"), true, vec![Role::Manager], true, "/manager");
        assert!(report.passed());
    }

    #[test]
    fn guard_report_serializes_decision() {
        let report = guard(&policy(), Some("employee"), true, Vec::new(), true, "/payroll");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["decision"]["decision"], "redirect_role_home");
        assert_eq!(value["identity"]["role"], "employee");
        assert_eq!(value["redirect"], "/employee");
    }
}
