// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Window extension with rotation continuity.
//!
//! Each employee resumes from their last recorded position: the row is kept
//! and the column advances by the number of days since that position. An
//! employee with no position yet takes the next free row and starts at the
//! column matching the day's offset into the extension.
//!
//! Unlike generation, eligibility is evaluated per day, so employees whose
//! availability starts or ends inside the extension are picked up or dropped
//! on the right dates.

use crate::error::CoreError;
use crate::generation::{require_usable_pattern, rotation_index};
use crate::state::{ExtensionOutcome, ScheduleContext, WindowState};
use rota_domain::{
    Assignment, DomainError, Employee, EmployeeId, dates_inclusive, days_between, eligible_employees,
    eligible_on, validate_extension_range,
};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// The last place an employee was in the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    row: u32,
    column: u32,
    date: Date,
}

/// Latest position per employee, taken from their most recent assignment.
fn last_positions(state: &WindowState) -> BTreeMap<EmployeeId, Position> {
    let mut positions: BTreeMap<EmployeeId, Position> = BTreeMap::new();
    for assignment in &state.assignments {
        let candidate: Position = Position {
            row: assignment.row,
            column: assignment.column,
            date: assignment.date,
        };
        positions
            .entry(assignment.employee_id)
            .and_modify(|current| {
                if candidate.date > current.date {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }
    positions
}

/// Computes the assignments appended by extending `state` over
/// `[ext_start, ext_end]`.
///
/// # Errors
///
/// Returns an error if:
/// - `ext_start` is not after the current end (`OverlappingExtension`)
/// - `ext_end` precedes `ext_start` (`InvalidDateRange`)
/// - The matrix has no usable cells
/// - No assignment at all results (`NoActiveEmployeesInRange`)
pub fn extend(
    ctx: &ScheduleContext,
    state: &WindowState,
    ext_start: Date,
    ext_end: Date,
) -> Result<(Vec<Assignment>, ExtensionOutcome), CoreError> {
    let window = &state.window;
    validate_extension_range(window.end_date, ext_start, ext_end)?;
    require_usable_pattern(ctx)?;

    let row_count: u32 = ctx.matrix.row_count();
    let column_count: u32 = ctx.matrix.column_count();
    let snapshot: Vec<Employee> = eligible_employees(&ctx.roster, window.site_id, window.role_id);
    let mut positions: BTreeMap<EmployeeId, Position> = last_positions(state);

    let mut assignments: Vec<Assignment> = Vec::new();
    let mut affected: BTreeSet<EmployeeId> = BTreeSet::new();

    for date in dates_inclusive(ext_start, ext_end)? {
        for employee in eligible_on(&snapshot, date) {
            let position: Position = match positions.get(&employee.id) {
                Some(last) => {
                    let elapsed: i64 = days_between(last.date, date);
                    Position {
                        row: last.row,
                        column: rotation_index(i64::from(last.column) + elapsed, column_count)?,
                        date,
                    }
                }
                None => {
                    let rows_in_use: usize = positions
                        .values()
                        .map(|p| p.row)
                        .collect::<BTreeSet<u32>>()
                        .len();
                    let rows_in_use: i64 = i64::try_from(rows_in_use).map_err(|_| {
                        CoreError::DomainViolation(DomainError::DateArithmeticOverflow {
                            operation: String::from("counting rows in use"),
                        })
                    })?;
                    Position {
                        row: rotation_index(rows_in_use, row_count)?,
                        column: rotation_index(days_between(ext_start, date), column_count)?,
                        date,
                    }
                }
            };

            positions.insert(employee.id, position);

            if let Some(code) = ctx.matrix.cell(position.row, position.column) {
                assignments.push(Assignment::new(
                    employee.id,
                    date,
                    position.row,
                    position.column,
                    code.clone(),
                ));
                affected.insert(employee.id);
            }
        }
    }

    if assignments.is_empty() {
        return Err(CoreError::NoActiveEmployeesInRange {
            start: ext_start,
            end: ext_end,
        });
    }

    let outcome: ExtensionOutcome = ExtensionOutcome {
        assignments_created: assignments.len(),
        employees_affected: affected.len(),
        previous_end: window.end_date,
        new_end: ext_end,
    };
    Ok((assignments, outcome))
}
