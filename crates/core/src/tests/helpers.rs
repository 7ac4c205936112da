// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ScheduleContext, WindowState, create_window};
use rota_audit::{Actor, Cause};
use rota_domain::{
    Employee, EmployeeId, MatrixId, PatternMatrix, RoleId, RotationType, SchedulingWindow, SiteId,
    WindowId, WorkSite,
};
use time::Date;

pub fn create_test_actor() -> Actor {
    Actor::operator("planner-1")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Monthly planning"))
}

pub fn create_test_site(target_headcount: Option<u32>) -> WorkSite {
    WorkSite::new(SiteId::new(1), "Bogota Norte", target_headcount)
}

pub fn create_test_matrix(rows: &[&[&str]], rotation_type: RotationType) -> PatternMatrix {
    let rows: Vec<Vec<&str>> = rows.iter().map(|row| row.to_vec()).collect();
    PatternMatrix::from_rows("Test pattern", rotation_type, &rows)
        .unwrap()
        .with_id(MatrixId::new(1))
}

/// The 2x3 pattern `[[A,B,C],[D,E,F]]`.
pub fn create_two_by_three_matrix() -> PatternMatrix {
    create_test_matrix(&[&["A", "B", "C"], &["D", "E", "F"]], RotationType::Variable)
}

pub fn create_test_employee(id: i64) -> Employee {
    Employee::new(
        EmployeeId::new(id),
        "Test",
        &format!("Employee{id:02}"),
        SiteId::new(1),
        RoleId::new(1),
    )
}

pub fn create_test_roster(count: i64) -> Vec<Employee> {
    (1..=count).map(create_test_employee).collect()
}

pub fn create_test_context(matrix: PatternMatrix, roster: Vec<Employee>) -> ScheduleContext {
    ScheduleContext::new(create_test_site(None), matrix, roster)
}

pub fn create_test_window(start: Date, end: Date) -> SchedulingWindow {
    SchedulingWindow::new(
        "Test window",
        SiteId::new(1),
        RoleId::new(1),
        MatrixId::new(1),
        start,
        end,
        "planner-1",
    )
    .unwrap()
}

/// Creates and generates a window, then assigns it identifier 1 as the store would.
pub fn create_generated_state(ctx: &ScheduleContext, start: Date, end: Date) -> WindowState {
    let result = create_window(
        ctx,
        create_test_window(start, end),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    WindowState::new(
        result.new_state.window.with_id(WindowId::new(1)),
        result.new_state.assignments,
    )
}

/// One employee's codes concatenated in date order.
pub fn codes_of(state: &WindowState, employee_id: i64) -> String {
    state
        .assignments_for(EmployeeId::new(employee_id))
        .iter()
        .map(|a| a.code.value())
        .collect()
}

/// One employee's rows in date order.
pub fn rows_of(state: &WindowState, employee_id: i64) -> Vec<u32> {
    state
        .assignments_for(EmployeeId::new(employee_id))
        .iter()
        .map(|a| a.row)
        .collect()
}
