// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::{ScheduleContext, SwapOutcome};
use rota_audit::ExchangedCell;
use rota_domain::{Assignment, Employee, EmployeeId};
use std::collections::BTreeMap;
use time::Date;

/// The result of swapping two employees' codes.
#[derive(Debug)]
pub(crate) struct SwapResult {
    pub(crate) assignments: Vec<Assignment>,
    pub(crate) updated: Vec<Assignment>,
    pub(crate) cells: Vec<ExchangedCell>,
    pub(crate) outcome: SwapOutcome,
}

fn roster_employee(ctx: &ScheduleContext, employee_id: EmployeeId) -> Result<&Employee, CoreError> {
    ctx.employee(employee_id)
        .ok_or(CoreError::EmployeeNotFound(employee_id))
}

/// Exchanges codes between `employee_a` and `employee_b` on every date both
/// hold an assignment.
///
/// Rows and columns stay where generation put them, and dates held by only
/// one of the two are untouched. Swapping twice restores the original codes.
///
/// # Errors
///
/// Returns an error if:
/// - Both identifiers are the same employee
/// - Either employee is not in the roster
/// - The employees work at different sites
pub(crate) fn swap(
    ctx: &ScheduleContext,
    assignments: &[Assignment],
    employee_a: EmployeeId,
    employee_b: EmployeeId,
) -> Result<SwapResult, CoreError> {
    if employee_a == employee_b {
        return Err(CoreError::SelfSwap(employee_a));
    }
    let first: &Employee = roster_employee(ctx, employee_a)?;
    let second: &Employee = roster_employee(ctx, employee_b)?;
    if first.site_id != second.site_id {
        return Err(CoreError::CrossSiteSwap {
            employee_a,
            employee_b,
        });
    }

    let mut working: Vec<Assignment> = assignments.to_vec();
    let by_date = |id: EmployeeId, working: &[Assignment]| -> BTreeMap<Date, usize> {
        working
            .iter()
            .enumerate()
            .filter(|(_, a)| a.employee_id == id)
            .map(|(i, a)| (a.date, i))
            .collect()
    };
    let dates_a: BTreeMap<Date, usize> = by_date(employee_a, &working);
    let dates_b: BTreeMap<Date, usize> = by_date(employee_b, &working);

    let mut cells: Vec<ExchangedCell> = Vec::new();
    let mut updated: Vec<Assignment> = Vec::new();
    for (date, &index_a) in &dates_a {
        let Some(&index_b) = dates_b.get(date) else {
            continue;
        };
        cells.push(ExchangedCell::new(
            *date,
            working[index_a].code.value(),
            working[index_b].code.value(),
        ));
        if working[index_a].code == working[index_b].code {
            continue;
        }
        let code_a = working[index_a].code.clone();
        working[index_a].code = working[index_b].code.clone();
        working[index_b].code = code_a;
        updated.push(working[index_a].clone());
        updated.push(working[index_b].clone());
    }

    Ok(SwapResult {
        assignments: working,
        updated,
        outcome: SwapOutcome {
            exchanged: cells.len(),
        },
        cells,
    })
}
