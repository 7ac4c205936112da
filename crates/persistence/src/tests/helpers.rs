// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use rota::{ScheduleContext, TransitionResult, WindowState, create_window};
use rota_audit::{Actor, Cause};
use rota_domain::{
    Employee, EmployeeId, MatrixId, PatternMatrix, RoleId, RotationType, SchedulingWindow, SiteId,
    WindowId,
};
use time::Date;

pub struct Seeded {
    pub site_id: SiteId,
    pub role_id: RoleId,
    pub matrix_id: MatrixId,
    pub employee_ids: Vec<EmployeeId>,
}

pub fn create_test_actor() -> Actor {
    Actor::operator("planner-1")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-789"), String::from("Store test"))
}

/// Seeds a site, a role, `employees` employees and the `[[A,B,C],[D,E,F]]` pattern.
pub fn seed_directory(persistence: &mut Persistence, employees: usize) -> Seeded {
    let site_id: SiteId = persistence.create_site("Bogota Norte", None, "CO").unwrap();
    let role_id: RoleId = persistence.create_role("Guard").unwrap();
    let matrix: PatternMatrix = PatternMatrix::from_rows(
        "Two by three",
        RotationType::Variable,
        &[vec!["A", "B", "C"], vec!["D", "E", "F"]],
    )
    .unwrap();
    let matrix_id: MatrixId = persistence.create_matrix(&matrix).unwrap();

    let employee_ids: Vec<EmployeeId> = (1..=employees)
        .map(|n| {
            let employee: Employee = Employee::new(
                EmployeeId::new(0),
                "Test",
                &format!("Employee{n:02}"),
                site_id,
                role_id,
            );
            persistence.create_employee(&employee).unwrap()
        })
        .collect();

    Seeded {
        site_id,
        role_id,
        matrix_id,
        employee_ids,
    }
}

pub fn load_context(persistence: &mut Persistence, seeded: &Seeded) -> ScheduleContext {
    persistence
        .load_schedule_context(seeded.site_id, seeded.matrix_id)
        .unwrap()
}

/// Creates, generates and stores a window, returning its reloaded state.
pub fn create_stored_window(
    persistence: &mut Persistence,
    seeded: &Seeded,
    start: Date,
    end: Date,
) -> WindowState {
    let ctx: ScheduleContext = load_context(persistence, seeded);
    let window: SchedulingWindow = SchedulingWindow::new(
        "March",
        seeded.site_id,
        seeded.role_id,
        seeded.matrix_id,
        start,
        end,
        "planner-1",
    )
    .unwrap();
    let result: TransitionResult =
        create_window(&ctx, window, create_test_actor(), create_test_cause()).unwrap();
    let window_id: WindowId = persistence.persist_window_creation(&result).unwrap();
    persistence.get_window_state(window_id).unwrap()
}

/// The codes of one employee's assignments, in date order, concatenated.
pub fn codes_of(state: &WindowState, employee_id: EmployeeId) -> String {
    state
        .assignments_for(employee_id)
        .iter()
        .map(|a| a.code.value().to_string())
        .collect()
}
