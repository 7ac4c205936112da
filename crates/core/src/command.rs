// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::EmployeeId;
use time::Date;

/// A requested overwrite of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    /// The employee whose row is edited.
    pub employee_id: EmployeeId,
    /// The day being edited.
    pub date: Date,
    /// The replacement code, unvalidated.
    pub code: String,
}

impl CellChange {
    /// Creates a new `CellChange`.
    #[must_use]
    pub fn new(employee_id: EmployeeId, date: Date, code: &str) -> Self {
        Self {
            employee_id,
            date,
            code: code.to_string(),
        }
    }
}

/// A command represents operator intent against an existing window as data only.
///
/// Window creation is not a command; see [`crate::create_window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rebuild every assignment from the pattern.
    Regenerate,
    /// Append days after the current end and continue the rotation.
    Extend {
        /// First appended day; must follow the current end.
        start: Date,
        /// Last appended day.
        end: Date,
    },
    /// Overwrite individual cell codes.
    EditCells {
        /// The requested changes, applied in order.
        changes: Vec<CellChange>,
    },
    /// Exchange codes between two employees on every shared date.
    Swap {
        /// First employee.
        employee_a: EmployeeId,
        /// Second employee.
        employee_b: EmployeeId,
    },
    /// Soft-delete the window.
    Deactivate,
    /// Undo a soft delete.
    Restore,
}
