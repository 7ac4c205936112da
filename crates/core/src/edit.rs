// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::CellChange;
use crate::state::{CellRef, EditOutcome, RejectedEdit};
use rota_audit::SchedulingEvent;
use rota_domain::{Assignment, EmployeeId, ShiftCode};
use std::collections::HashMap;
use time::Date;

/// The result of applying an edit batch to a set of assignments.
#[derive(Debug)]
pub(crate) struct EditBatch {
    pub(crate) assignments: Vec<Assignment>,
    pub(crate) updated: Vec<Assignment>,
    pub(crate) outcome: EditOutcome,
    pub(crate) events: Vec<SchedulingEvent>,
}

/// Applies `changes` in order to a copy of `assignments`.
///
/// Only the code of an existing assignment is overwritten; a change for a
/// cell with no assignment is reported missing. A change with an invalid
/// code is reported rejected and the rest of the batch still applies.
pub(crate) fn edit_cells(assignments: &[Assignment], changes: &[CellChange]) -> EditBatch {
    let mut working: Vec<Assignment> = assignments.to_vec();
    let by_cell: HashMap<(EmployeeId, Date), usize> = working
        .iter()
        .enumerate()
        .map(|(i, a)| ((a.employee_id, a.date), i))
        .collect();
    let mut touched: Vec<usize> = Vec::new();
    let mut outcome: EditOutcome = EditOutcome::default();
    let mut events: Vec<SchedulingEvent> = Vec::new();

    for change in changes {
        let cell: CellRef = CellRef {
            employee_id: change.employee_id,
            date: change.date,
        };
        let Some(&index) = by_cell.get(&(change.employee_id, change.date)) else {
            outcome.missing.push(cell);
            continue;
        };

        let requested: &str = change.code.trim();
        if working[index].code.value() == requested {
            outcome.unchanged += 1;
            continue;
        }

        let code: ShiftCode = match ShiftCode::new(requested) {
            Ok(code) => code,
            Err(err) => {
                outcome.rejected.push(RejectedEdit {
                    cell,
                    code: change.code.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        events.push(SchedulingEvent::CellEdited {
            employee_id: change.employee_id,
            date: change.date,
            old_code: working[index].code.value().to_string(),
            new_code: code.value().to_string(),
        });
        working[index].code = code;
        outcome.changed += 1;
        if !touched.contains(&index) {
            touched.push(index);
        }
    }

    let updated: Vec<Assignment> = touched.iter().map(|&i| working[i].clone()).collect();
    EditBatch {
        assignments: working,
        updated,
        outcome,
        events,
    }
}
