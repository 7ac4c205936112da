// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fresh generation of a window's assignments.
//!
//! The employee at ordinal `i` in the eligibility order rotates on row
//! `i mod row_count` for the whole window. Day `d` uses column
//! `(d - start) mod column_count`.

use crate::error::CoreError;
use crate::state::{GenerationOutcome, ScheduleContext};
use rota_domain::{
    Assignment, DomainError, Employee, SchedulingWindow, days_between, eligible_employees,
    validate_staffing,
};
use time::Date;

/// Reduces `offset` into `[0, len)`.
///
/// `len` must be non-zero.
pub(crate) fn rotation_index(offset: i64, len: u32) -> Result<u32, CoreError> {
    let reduced: i64 = offset.rem_euclid(i64::from(len));
    u32::try_from(reduced).map_err(|_| {
        CoreError::DomainViolation(DomainError::DateArithmeticOverflow {
            operation: format!("reducing offset {offset} modulo {len}"),
        })
    })
}

/// Fails with `EmptyPattern` unless the matrix can drive a rotation.
pub(crate) fn require_usable_pattern(ctx: &ScheduleContext) -> Result<(), CoreError> {
    if !ctx.matrix.is_usable() {
        return Err(CoreError::EmptyPattern {
            matrix: ctx.matrix.name().to_string(),
        });
    }
    Ok(())
}

/// Computes every assignment for `window` from scratch.
///
/// Prior assignments are not consulted; the caller replaces them.
///
/// # Errors
///
/// Returns an error if:
/// - No active employee matches the window's site and role
/// - A fixed rotation is under-staffed for the site's target headcount
/// - The matrix has no usable cells
pub fn generate(
    ctx: &ScheduleContext,
    window: &SchedulingWindow,
) -> Result<(Vec<Assignment>, GenerationOutcome), CoreError> {
    let eligible: Vec<Employee> = eligible_employees(&ctx.roster, window.site_id, window.role_id);
    if eligible.is_empty() {
        return Err(CoreError::NoEligibleEmployees {
            site_id: window.site_id,
        });
    }

    validate_staffing(&ctx.site, ctx.matrix.rotation_type(), eligible.len())?;
    require_usable_pattern(ctx)?;

    let row_count: u32 = ctx.matrix.row_count();
    let column_count: u32 = ctx.matrix.column_count();
    let dates: Vec<Date> = window.dates()?;

    let mut assignments: Vec<Assignment> = Vec::with_capacity(eligible.len() * dates.len());
    let mut outcome: GenerationOutcome = GenerationOutcome {
        employees_scheduled: eligible.len(),
        ..GenerationOutcome::default()
    };

    for (ordinal, employee) in eligible.iter().enumerate() {
        let ordinal: i64 = i64::try_from(ordinal).map_err(|_| {
            CoreError::DomainViolation(DomainError::DateArithmeticOverflow {
                operation: String::from("counting eligible employees"),
            })
        })?;
        let row: u32 = rotation_index(ordinal, row_count)?;

        for &date in &dates {
            let column: u32 = rotation_index(days_between(window.start_date, date), column_count)?;
            match ctx.matrix.cell(row, column) {
                Some(code) => {
                    assignments.push(Assignment::new(employee.id, date, row, column, code.clone()));
                }
                None => outcome.empty_cells_skipped += 1,
            }
        }
    }

    outcome.assignments_created = assignments.len();
    Ok((assignments, outcome))
}
