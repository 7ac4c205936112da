// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_audit::AuditEvent;
use rota_domain::{Assignment, Employee, EmployeeId, PatternMatrix, SchedulingWindow, WorkSite};
use time::Date;

/// The read-only inputs a window is scheduled against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleContext {
    /// The window's site.
    pub site: WorkSite,
    /// The window's pattern matrix.
    pub matrix: PatternMatrix,
    /// Every employee of the site, in any status, plus any employee from
    /// elsewhere that a command names.
    pub roster: Vec<Employee>,
}

impl ScheduleContext {
    /// Creates a new `ScheduleContext`.
    #[must_use]
    pub const fn new(site: WorkSite, matrix: PatternMatrix, roster: Vec<Employee>) -> Self {
        Self {
            site,
            matrix,
            roster,
        }
    }

    /// Adds an employee to the roster unless already present.
    ///
    /// Generation and extension filter the roster by site, so an employee
    /// from another site is only ever seen by commands that name them.
    #[must_use]
    pub fn with_employee(mut self, employee: Employee) -> Self {
        if self.employee(employee.id).is_none() {
            self.roster.push(employee);
        }
        self
    }

    /// Looks up an employee in the roster.
    #[must_use]
    pub fn employee(&self, employee_id: EmployeeId) -> Option<&Employee> {
        self.roster.iter().find(|e| e.id == employee_id)
    }
}

/// A window together with its current assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    /// The window.
    pub window: SchedulingWindow,
    /// Every assignment in the window.
    pub assignments: Vec<Assignment>,
}

impl WindowState {
    /// Creates a new `WindowState`.
    #[must_use]
    pub const fn new(window: SchedulingWindow, assignments: Vec<Assignment>) -> Self {
        Self {
            window,
            assignments,
        }
    }

    /// Finds the assignment for `employee_id` on `date`.
    #[must_use]
    pub fn find(&self, employee_id: EmployeeId, date: Date) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.employee_id == employee_id && a.date == date)
    }

    /// Returns one employee's assignments in date order.
    #[must_use]
    pub fn assignments_for(&self, employee_id: EmployeeId) -> Vec<&Assignment> {
        let mut found: Vec<&Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .collect();
        found.sort_by_key(|a| a.date);
        found
    }
}

/// The store writes a transition requires.
///
/// Each variant is applied in a single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentMutation {
    /// Delete every assignment and insert these.
    ReplaceAll(Vec<Assignment>),
    /// Insert these assignments and move the window end.
    Append {
        /// The window's new end date.
        new_end: Date,
        /// The appended assignments.
        assignments: Vec<Assignment>,
    },
    /// Overwrite the code of these existing assignments.
    UpdateCodes(Vec<Assignment>),
    /// Flip the soft-delete flag.
    SetActive(bool),
}

/// Counters reported by a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationOutcome {
    /// Assignments written.
    pub assignments_created: usize,
    /// Prior assignments removed.
    pub assignments_replaced: usize,
    /// Employees placed on a rotation row.
    pub employees_scheduled: usize,
    /// Employee-days skipped because the cell had no code.
    pub empty_cells_skipped: usize,
}

impl GenerationOutcome {
    /// Whether the run wrote nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.assignments_created == 0
    }
}

/// Counters reported by an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionOutcome {
    /// Assignments appended.
    pub assignments_created: usize,
    /// Distinct employees who received at least one new assignment.
    pub employees_affected: usize,
    /// The window end before extension.
    pub previous_end: Date,
    /// The window end after extension.
    pub new_end: Date,
}

/// A cell addressed by employee and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The day.
    pub date: Date,
}

/// An edit that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEdit {
    /// The targeted cell.
    pub cell: CellRef,
    /// The code that was refused.
    pub code: String,
    /// Why it was refused.
    pub reason: String,
}

/// Per-cell results of an edit batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditOutcome {
    /// Cells whose code changed.
    pub changed: usize,
    /// Cells that already held the requested code.
    pub unchanged: usize,
    /// Requested cells with no assignment.
    pub missing: Vec<CellRef>,
    /// Requested codes that failed validation.
    pub rejected: Vec<RejectedEdit>,
}

/// Results of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    /// Dates on which both employees had an assignment.
    pub exchanged: usize,
}

/// What a transition did, for the caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Assignments were generated.
    Generated(GenerationOutcome),
    /// The window was extended.
    Extended(ExtensionOutcome),
    /// Cells were edited.
    Edited(EditOutcome),
    /// Two employees swapped.
    Swapped(SwapOutcome),
    /// The soft-delete flag changed.
    ActiveChanged {
        /// The new flag value.
        active: bool,
    },
}

/// The result of a successful transition.
///
/// Nothing here has been written yet; the caller persists `mutation`
/// atomically and then dispatches `audit_events`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The state after the transition.
    pub new_state: WindowState,
    /// The writes that take the store to `new_state`.
    pub mutation: AssignmentMutation,
    /// Counters for the caller.
    pub outcome: TransitionOutcome,
    /// One event per logical change.
    pub audit_events: Vec<AuditEvent>,
}
