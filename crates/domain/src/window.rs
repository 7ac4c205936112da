// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{EmployeeId, MatrixId, RoleId, ShiftCode, SiteId, WindowId};
use crate::validation::{dates_inclusive, days_between, validate_date_range};
use serde::{Deserialize, Serialize};
use time::Date;

/// A dated scheduling window binding a site, a role and a pattern matrix.
///
/// `end_date` only ever moves forward, through extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingWindow {
    /// Assigned by the store once persisted.
    pub id: Option<WindowId>,
    /// Display name.
    pub name: String,
    /// The site being scheduled.
    pub site_id: SiteId,
    /// The role being scheduled.
    pub role_id: RoleId,
    /// The rotation template.
    pub matrix_id: MatrixId,
    /// First scheduled day (inclusive).
    pub start_date: Date,
    /// Last scheduled day (inclusive).
    pub end_date: Date,
    /// Who created the window.
    pub created_by: String,
    /// Store-assigned creation timestamp.
    pub created_at: Option<String>,
    /// Soft-delete flag.
    pub active: bool,
}

impl SchedulingWindow {
    /// Creates a new, active, unpersisted window.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end_date < start_date`.
    pub fn new(
        name: &str,
        site_id: SiteId,
        role_id: RoleId,
        matrix_id: MatrixId,
        start_date: Date,
        end_date: Date,
        created_by: &str,
    ) -> Result<Self, DomainError> {
        validate_date_range(start_date, end_date)?;
        Ok(Self {
            id: None,
            name: name.to_string(),
            site_id,
            role_id,
            matrix_id,
            start_date,
            end_date,
            created_by: created_by.to_string(),
            created_at: None,
            active: true,
        })
    }

    /// Returns a copy carrying the persisted identifier.
    #[must_use]
    pub fn with_id(mut self, id: WindowId) -> Self {
        self.id = Some(id);
        self
    }

    /// Number of days covered, inclusive of both ends.
    #[must_use]
    pub fn day_count(&self) -> i64 {
        days_between(self.start_date, self.end_date) + 1
    }

    /// Every day in the window, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the dates cannot be iterated.
    pub fn dates(&self) -> Result<Vec<Date>, DomainError> {
        dates_inclusive(self.start_date, self.end_date)
    }

    /// Whether `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns a copy whose end date has moved to `new_end`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OverlappingExtension` if `new_end` does not move
    /// the window forward.
    pub fn extended_to(&self, new_end: Date) -> Result<Self, DomainError> {
        if new_end <= self.end_date {
            return Err(DomainError::OverlappingExtension {
                current_end: self.end_date,
                requested_start: new_end,
            });
        }
        let mut extended: Self = self.clone();
        extended.end_date = new_end;
        Ok(extended)
    }
}

/// One employee's shift on one day of a window.
///
/// `(employee_id, date)` is unique within a window. `row` and `column` record
/// the matrix position the code came from so rotation continuity survives
/// extension; a swap leaves them untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Employee holding the shift.
    pub employee_id: EmployeeId,
    /// Scheduled day.
    pub date: Date,
    /// Matrix row the employee rotates on.
    pub row: u32,
    /// Matrix column used for this day.
    pub column: u32,
    /// The shift code.
    pub code: ShiftCode,
}

impl Assignment {
    /// Creates a new `Assignment`.
    #[must_use]
    pub const fn new(
        employee_id: EmployeeId,
        date: Date,
        row: u32,
        column: u32,
        code: ShiftCode,
    ) -> Self {
        Self {
            employee_id,
            date,
            row,
            column,
            code,
        }
    }
}
