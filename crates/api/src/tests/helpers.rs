// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rota_domain::{
    Employee, EmployeeId, MatrixId, PatternMatrix, RoleId, RotationType, SiteId,
};
use rota_persistence::Persistence;

use crate::{CreateWindowRequest, RequestContext, WindowCommandRequest, create_window};

/// A seeded store plus a second handle serving as the audit sink.
pub struct Fixture {
    pub persistence: Persistence,
    pub sink: Persistence,
    pub site_id: SiteId,
    pub role_id: RoleId,
    pub matrix_id: MatrixId,
    pub employee_ids: Vec<EmployeeId>,
}

pub fn create_test_context() -> RequestContext {
    RequestContext {
        actor_id: String::from("planner-1"),
        cause_id: String::from("api-req-456"),
        cause_description: String::from("API request"),
    }
}

pub fn create_command_request() -> WindowCommandRequest {
    WindowCommandRequest {
        context: create_test_context(),
    }
}

/// Seeds a site with `employees` employees and the given pattern.
pub fn create_fixture_with(
    employees: usize,
    target_headcount: Option<u32>,
    rotation_type: RotationType,
    rows: &[Vec<&str>],
) -> Fixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let sink: Persistence = persistence.reopen().unwrap();

    let site_id: SiteId = persistence
        .create_site("Bogota Norte", target_headcount, "CO")
        .unwrap();
    let role_id: RoleId = persistence.create_role("Guard").unwrap();
    let matrix: PatternMatrix = PatternMatrix::from_rows("Pattern", rotation_type, rows).unwrap();
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

    Fixture {
        persistence,
        sink,
        site_id,
        role_id,
        matrix_id,
        employee_ids,
    }
}

/// Three employees on the variable `[[A,B,C],[D,E,F]]` pattern.
pub fn create_fixture() -> Fixture {
    create_fixture_with(
        3,
        None,
        RotationType::Variable,
        &[vec!["A", "B", "C"], vec!["D", "E", "F"]],
    )
}

pub fn create_window_request(fixture: &Fixture, start: &str, end: &str) -> CreateWindowRequest {
    CreateWindowRequest {
        context: create_test_context(),
        name: String::from("March"),
        site_id: fixture.site_id.value(),
        role_id: fixture.role_id.value(),
        matrix_id: fixture.matrix_id.value(),
        start_date: start.to_string(),
        end_date: end.to_string(),
    }
}

/// Creates a window through the API and returns its identifier.
pub fn create_test_window(fixture: &mut Fixture, start: &str, end: &str) -> i64 {
    let request: CreateWindowRequest = create_window_request(fixture, start, end);
    create_window(&mut fixture.persistence, &mut fixture.sink, &request)
        .unwrap()
        .window_id
}
