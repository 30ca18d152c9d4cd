//! Built-in policy for the hospital staff dashboards

use super::matrix::PermissionMatrix;
use super::permissions::{Action::*, Module};
use super::roles::Role;
use super::routes::RouteAccessTable;
use crate::error::AccessResult;

const ALL_ROLES: &[Role] = &[Role::Admin, Role::Hr, Role::Manager, Role::Employee];
const ADMIN: &[Role] = &[Role::Admin];
const ADMIN_HR: &[Role] = &[Role::Admin, Role::Hr];
const ADMIN_MANAGER: &[Role] = &[Role::Admin, Role::Manager];

/// Capability matrix of the four staff roles.
///
/// HR keeps `employees:delete` without `employees:deactivate`; validation
/// reports that row as a contradiction.
pub fn hospital_matrix() -> AccessResult<PermissionMatrix> {
    PermissionMatrix::builder()
        .allow_all(Role::Admin)
        // HR
        .module(Role::Hr, Module::Employees, &[Create, Read, Update, Delete, Register])
        .module(Role::Hr, Module::Users, &[Read])
        .module(Role::Hr, Module::Attendance, &[Read, Create, Update, Approve, Export])
        .module(Role::Hr, Module::Leaves, &[Read, Apply, Approve, Reject, Cancel])
        .module(Role::Hr, Module::Payroll, &[Read, Create, Update, Process, Export])
        .module(Role::Hr, Module::Reports, &[View, Generate, Export])
        .deny_module(Role::Hr, Module::System)
        // Manager
        .module(Role::Manager, Module::Employees, &[Read])
        .deny_module(Role::Manager, Module::Users)
        .module(Role::Manager, Module::Attendance, &[Read, Approve, Export])
        .module(Role::Manager, Module::Leaves, &[Read, Apply, Approve, Reject, Cancel])
        .deny_module(Role::Manager, Module::Payroll)
        .module(Role::Manager, Module::Reports, &[View, Generate])
        .deny_module(Role::Manager, Module::System)
        // Employee
        .module(Role::Employee, Module::Employees, &[Read])
        .deny_module(Role::Employee, Module::Users)
        .module(Role::Employee, Module::Attendance, &[Read, Create])
        .module(Role::Employee, Module::Leaves, &[Read, Apply, Cancel])
        .deny_module(Role::Employee, Module::Payroll)
        .deny_module(Role::Employee, Module::Reports)
        .deny_module(Role::Employee, Module::System)
        .build()
}

/// Dashboard areas and the roles allowed into them.
///
/// Admin is listed everywhere; `/employee` covers self-service pages every
/// staff member has.
pub fn hospital_routes() -> AccessResult<RouteAccessTable> {
    RouteAccessTable::builder()
        .route("/admin", ADMIN)
        .route("/admin/employees", ADMIN)
        .route("/admin/users", ADMIN)
        .route("/admin/attendance", ADMIN)
        .route("/admin/leaves", ADMIN)
        .route("/admin/salary", ADMIN)
        .route("/admin/reports", ADMIN)
        .route("/admin/system", ADMIN)
        .route("/hr", ADMIN_HR)
        .route("/hr/employees", ADMIN_HR)
        .route("/hr/attendance", ADMIN_HR)
        .route("/hr/leaves", ADMIN_HR)
        .route("/hr/salary", ADMIN_HR)
        .route("/hr/epf", ADMIN_HR)
        .route("/hr/reports", ADMIN_HR)
        .route("/manager", ADMIN_MANAGER)
        .route("/manager/team", ADMIN_MANAGER)
        .route("/manager/attendance", ADMIN_MANAGER)
        .route("/manager/leaves", ADMIN_MANAGER)
        .route("/manager/reports", ADMIN_MANAGER)
        .route("/employee", ALL_ROLES)
        .route("/employee/profile", ALL_ROLES)
        .route("/employee/attendance", ALL_ROLES)
        .route("/employee/leaves", ALL_ROLES)
        .route("/employee/payslips", ALL_ROLES)
        .route("/profile", ALL_ROLES)
        .route("/notifications", ALL_ROLES)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::{Action, MatrixIssue};

    #[test]
    fn test_matrix_has_no_gaps() {
        let matrix = hospital_matrix().unwrap();
        assert!(matrix.validate().iter().all(|issue| !issue.is_gap()));
    }

    #[test]
    fn test_only_hr_delete_contradiction() {
        let issues = hospital_matrix().unwrap().validate();
        assert_eq!(
            issues,
            vec![MatrixIssue::Contradiction {
                role: Role::Hr,
                module: Module::Employees,
                granted: Action::Delete,
                missing: Action::Deactivate,
            }]
        );
    }

    #[test]
    fn test_admin_listed_on_every_route() {
        let routes = hospital_routes().unwrap();
        assert!(routes.iter().all(|(_, roles)| roles.contains(&Role::Admin)));
    }

    #[test]
    fn test_employee_cannot_read_payroll() {
        let matrix = hospital_matrix().unwrap();
        assert!(!matrix.has_permission(Role::Employee, "payroll", "read"));
        assert!(matrix.has_permission(Role::Hr, "payroll", "read"));
    }
}
