// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use rota_domain::{EmployeeId, MatrixId, RoleId, SiteId};
use serde::{Deserialize, Serialize};
use time::Date;

/// One date on which two employees exchanged codes.
///
/// The codes are the ones each employee held before the swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangedCell {
    /// The shared date.
    pub date: Date,
    /// The first employee's code before the swap.
    pub code_a: String,
    /// The second employee's code before the swap.
    pub code_b: String,
}

impl ExchangedCell {
    /// Creates a new `ExchangedCell`.
    #[must_use]
    pub fn new(date: Date, code_a: &str, code_b: &str) -> Self {
        Self {
            date,
            code_a: code_a.to_string(),
            code_b: code_b.to_string(),
        }
    }
}

/// Renders `date:a=X,b=Y` pairs, with the codes exchanged when `after`.
fn describe_cells(cells: &[ExchangedCell], after: bool) -> String {
    cells
        .iter()
        .map(|cell| {
            let (a, b) = if after {
                (&cell.code_b, &cell.code_a)
            } else {
                (&cell.code_a, &cell.code_b)
            };
            format!("{}:a={a},b={b}", cell.date)
        })
        .collect::<Vec<String>>()
        .join(";")
}

/// A domain event emitted by a scheduling transition.
///
/// Each variant carries the old and new values it describes so the audit
/// record is meaningful without the surrounding state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulingEvent {
    /// A window was created.
    WindowCreated {
        name: String,
        site_id: SiteId,
        role_id: RoleId,
        matrix_id: MatrixId,
        start_date: Date,
        end_date: Date,
    },
    /// Assignments were generated from scratch, replacing any prior set.
    AssignmentsGenerated {
        created: usize,
        replaced: usize,
        employees: usize,
    },
    /// The window was extended and new assignments appended.
    AssignmentsExtended {
        previous_end: Date,
        new_end: Date,
        created: usize,
        employees: usize,
    },
    /// One cell code was overwritten.
    CellEdited {
        employee_id: EmployeeId,
        date: Date,
        old_code: String,
        new_code: String,
    },
    /// Two employees exchanged their codes.
    Swapped {
        employee_a: EmployeeId,
        employee_b: EmployeeId,
        /// Every shared date, with the codes held before the exchange.
        cells: Vec<ExchangedCell>,
    },
    /// The window was soft-deleted.
    WindowDeactivated,
    /// A soft-deleted window was restored.
    WindowRestored,
}

impl SchedulingEvent {
    /// The stable action name recorded in the audit log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WindowCreated { .. } => "WindowCreated",
            Self::AssignmentsGenerated { .. } => "AssignmentsGenerated",
            Self::AssignmentsExtended { .. } => "AssignmentsExtended",
            Self::CellEdited { .. } => "CellEdited",
            Self::Swapped { .. } => "Swapped",
            Self::WindowDeactivated => "WindowDeactivated",
            Self::WindowRestored => "WindowRestored",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::WindowCreated {
                name,
                site_id,
                role_id,
                matrix_id,
                ..
            } => Some(format!(
                "window '{name}' for site {site_id}, role {role_id}, matrix {matrix_id}"
            )),
            Self::AssignmentsGenerated {
                created, employees, ..
            }
            | Self::AssignmentsExtended {
                created, employees, ..
            } => Some(format!("{created} assignments for {employees} employees")),
            Self::CellEdited { employee_id, date, .. } => {
                Some(format!("employee {employee_id} on {date}"))
            }
            Self::Swapped {
                employee_a,
                employee_b,
                cells,
            } => Some(format!(
                "employees {employee_a} and {employee_b} on {} dates",
                cells.len()
            )),
            Self::WindowDeactivated | Self::WindowRestored => None,
        }
    }

    fn snapshots(&self) -> (StateSnapshot, StateSnapshot) {
        match self {
            Self::WindowCreated {
                start_date,
                end_date,
                ..
            } => (
                StateSnapshot::empty(),
                StateSnapshot::new(format!("start={start_date},end={end_date},active=true")),
            ),
            Self::AssignmentsGenerated {
                created, replaced, ..
            } => (
                StateSnapshot::new(format!("assignments={replaced}")),
                StateSnapshot::new(format!("assignments={created}")),
            ),
            Self::AssignmentsExtended {
                previous_end,
                new_end,
                created,
                ..
            } => (
                StateSnapshot::new(format!("end={previous_end}")),
                StateSnapshot::new(format!("end={new_end},appended={created}")),
            ),
            Self::CellEdited {
                old_code, new_code, ..
            } => (
                StateSnapshot::new(format!("code={old_code}")),
                StateSnapshot::new(format!("code={new_code}")),
            ),
            Self::Swapped { cells, .. } => (
                StateSnapshot::new(describe_cells(cells, false)),
                StateSnapshot::new(describe_cells(cells, true)),
            ),
            Self::WindowDeactivated => (
                StateSnapshot::new(String::from("active=true")),
                StateSnapshot::new(String::from("active=false")),
            ),
            Self::WindowRestored => (
                StateSnapshot::new(String::from("active=false")),
                StateSnapshot::new(String::from("active=true")),
            ),
        }
    }

    /// Converts this event into an audit record attributed to `actor`.
    #[must_use]
    pub fn into_audit_event(self, actor: &Actor, cause: &Cause) -> AuditEvent {
        let (before, after) = self.snapshots();
        let action: Action = Action::new(self.name().to_string(), self.details());
        AuditEvent::new(actor.clone(), cause.clone(), action, before, after)
    }
}
