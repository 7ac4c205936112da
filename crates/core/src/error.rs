// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::{DomainError, EmployeeId, SiteId};

/// Errors that can occur during scheduling transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// No active employee matches the window's site and role.
    #[error("No eligible employees for site {site_id}")]
    NoEligibleEmployees {
        /// The window's site.
        site_id: SiteId,
    },
    /// The pattern matrix has no usable cells.
    #[error("Pattern matrix '{matrix}' has no shift codes")]
    EmptyPattern {
        /// The matrix name.
        matrix: String,
    },
    /// An extension produced no assignments.
    #[error("No active employees with scheduled shifts between {start} and {end}")]
    NoActiveEmployeesInRange {
        /// Requested extension start.
        start: time::Date,
        /// Requested extension end.
        end: time::Date,
    },
    /// Two employees from different sites cannot swap.
    #[error("Employees {employee_a} and {employee_b} belong to different work sites")]
    CrossSiteSwap {
        /// First employee.
        employee_a: EmployeeId,
        /// Second employee.
        employee_b: EmployeeId,
    },
    /// An employee cannot swap with themselves.
    #[error("Employee {0} cannot swap with themselves")]
    SelfSwap(EmployeeId),
    /// The employee is not in the site roster.
    #[error("Employee {0} not found")]
    EmployeeNotFound(EmployeeId),
    /// The window has been deactivated.
    #[error("Scheduling window '{0}' is inactive")]
    WindowInactive(String),
    /// The window is already active.
    #[error("Scheduling window '{0}' is already active")]
    WindowAlreadyActive(String),
    /// The loaded context does not belong to the window.
    #[error("Context mismatch: {0}")]
    ContextMismatch(String),
}
