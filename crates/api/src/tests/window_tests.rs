// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_audit::InMemoryAuditLog;
use rota_domain::{Employee, EmployeeId, RotationType, SiteId};

use crate::tests::helpers::{
    create_command_request, create_fixture, create_fixture_with, create_test_context,
    create_test_window, create_window_request,
};
use crate::{
    ApiError, CellChangeRequest, EditCellsRequest, ExtendWindowRequest, SwapEmployeesRequest,
    create_window, edit_cells, extend_window, get_window_audit, list_windows, regenerate_window,
    swap_employees,
};

#[test]
fn test_create_window_generates_and_records_audit() {
    let mut fixture = create_fixture();
    let request = create_window_request(&fixture, "2026-03-01", "2026-03-04");

    let response = create_window(&mut fixture.persistence, &mut fixture.sink, &request).unwrap();

    assert_eq!(response.assignments_created, 12);
    assert_eq!(response.employees_scheduled, 3);

    let timeline = get_window_audit(&mut fixture.persistence, response.window_id).unwrap();
    let actions: Vec<&str> = timeline.events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["WindowCreated", "AssignmentsGenerated"]);
    assert_eq!(timeline.events[0].actor_id, "planner-1");
    assert_eq!(timeline.events[0].cause_id, "api-req-456");
}

#[test]
fn test_short_staffed_fixed_window_is_not_persisted() {
    let mut fixture = create_fixture_with(
        5,
        Some(2),
        RotationType::Fixed,
        &[vec!["A", "B"], vec!["N", "N"]],
    );
    let request = create_window_request(&fixture, "2026-03-01", "2026-03-31");

    let err = create_window(&mut fixture.persistence, &mut fixture.sink, &request).unwrap_err();

    match err {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "minimum_staffing");
            assert!(message.contains("at least 8"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(
        list_windows(&mut fixture.persistence, None, true)
            .unwrap()
            .windows
            .is_empty()
    );
}

#[test]
fn test_fixed_window_with_enough_staff_is_created() {
    let mut fixture = create_fixture_with(4, Some(1), RotationType::Fixed, &[vec!["D", "N"]]);
    let request = create_window_request(&fixture, "2026-03-01", "2026-03-02");

    let response = create_window(&mut fixture.persistence, &mut fixture.sink, &request).unwrap();

    assert_eq!(response.assignments_created, 8);
}

#[test]
fn test_empty_pattern_is_rejected() {
    let mut fixture = create_fixture_with(2, None, RotationType::Variable, &[]);
    let request = create_window_request(&fixture, "2026-03-01", "2026-03-04");

    let err = create_window(&mut fixture.persistence, &mut fixture.sink, &request).unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "non_empty_pattern"
    ));
}

#[test]
fn test_malformed_start_date_names_the_field() {
    let mut fixture = create_fixture();
    let request = create_window_request(&fixture, "2026-13-01", "2026-03-04");

    let err = create_window(&mut fixture.persistence, &mut fixture.sink, &request).unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "start_date"
    ));
}

#[test]
fn test_inverted_window_range_is_invalid_input() {
    let mut fixture = create_fixture();
    let request = create_window_request(&fixture, "2026-03-10", "2026-03-01");

    let err = create_window(&mut fixture.persistence, &mut fixture.sink, &request).unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "end_date"
    ));
}

#[test]
fn test_blank_actor_is_rejected() {
    let mut fixture = create_fixture();
    let mut request = create_window_request(&fixture, "2026-03-01", "2026-03-04");
    request.context.actor_id = String::from("  ");

    let err = create_window(&mut fixture.persistence, &mut fixture.sink, &request).unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "actor_id"
    ));
}

#[test]
fn test_unknown_matrix_is_not_found() {
    let mut fixture = create_fixture();
    let mut request = create_window_request(&fixture, "2026-03-01", "2026-03-04");
    request.matrix_id = 404;

    let err = create_window(&mut fixture.persistence, &mut fixture.sink, &request).unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_failing_audit_sink_does_not_roll_back() {
    let mut fixture = create_fixture();
    let mut sink = InMemoryAuditLog::rejecting();
    let request = create_window_request(&fixture, "2026-03-01", "2026-03-04");

    let response = create_window(&mut fixture.persistence, &mut sink, &request).unwrap();

    assert!(sink.events().is_empty());
    let listed = list_windows(&mut fixture.persistence, Some(fixture.site_id.value()), false)
        .unwrap();
    assert_eq!(listed.windows.len(), 1);
    assert_eq!(listed.windows[0].window_id, response.window_id);
    assert!(
        get_window_audit(&mut fixture.persistence, response.window_id)
            .unwrap()
            .events
            .is_empty()
    );
}

#[test]
fn test_regenerate_reports_replaced_assignments() {
    let mut fixture = create_fixture();
    let window_id = create_test_window(&mut fixture, "2026-03-01", "2026-03-04");

    let response = regenerate_window(
        &mut fixture.persistence,
        &mut fixture.sink,
        window_id,
        &create_command_request(),
    )
    .unwrap();

    assert_eq!(response.assignments_created, 12);
    assert_eq!(response.assignments_replaced, 12);
}

#[test]
fn test_extend_window_continues_rotation() {
    let mut fixture = create_fixture();
    let window_id = create_test_window(&mut fixture, "2026-03-01", "2026-03-04");

    let response = extend_window(
        &mut fixture.persistence,
        &mut fixture.sink,
        window_id,
        &ExtendWindowRequest {
            context: create_test_context(),
            extension_start: String::from("2026-03-05"),
            extension_end: String::from("2026-03-07"),
        },
    )
    .unwrap();

    assert_eq!(response.assignments_created, 9);
    assert_eq!(response.employees_affected, 3);
    assert_eq!(response.end_date, "2026-03-07");
}

#[test]
fn test_overlapping_extension_is_a_rule_violation() {
    let mut fixture = create_fixture();
    let window_id = create_test_window(&mut fixture, "2026-03-01", "2026-03-04");

    let err = extend_window(
        &mut fixture.persistence,
        &mut fixture.sink,
        window_id,
        &ExtendWindowRequest {
            context: create_test_context(),
            extension_start: String::from("2026-03-03"),
            extension_end: String::from("2026-03-10"),
        },
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "non_overlapping_extension"
    ));
    let listed = list_windows(&mut fixture.persistence, None, false).unwrap();
    assert_eq!(listed.windows[0].end_date, "2026-03-04");
}

#[test]
fn test_edit_cells_reports_each_outcome() {
    let mut fixture = create_fixture();
    let window_id = create_test_window(&mut fixture, "2026-03-01", "2026-03-04");
    let employee = fixture.employee_ids[0].value();

    let response = edit_cells(
        &mut fixture.persistence,
        &mut fixture.sink,
        window_id,
        &EditCellsRequest {
            context: create_test_context(),
            changes: vec![
                CellChangeRequest {
                    employee_id: employee,
                    date: String::from("2026-03-01"),
                    code: String::from("N"),
                },
                CellChangeRequest {
                    employee_id: employee,
                    date: String::from("2026-03-02"),
                    code: String::from("B"),
                },
                CellChangeRequest {
                    employee_id: employee,
                    date: String::from("2026-03-03"),
                    code: String::from("A!"),
                },
                CellChangeRequest {
                    employee_id: employee,
                    date: String::from("2026-04-01"),
                    code: String::from("N"),
                },
            ],
        },
    )
    .unwrap();

    assert_eq!(response.changed, 1);
    assert_eq!(response.unchanged, 1);
    assert_eq!(response.rejected.len(), 1);
    assert_eq!(response.rejected[0].code, "A!");
    assert_eq!(response.missing.len(), 1);
    assert_eq!(response.missing[0].date, "2026-04-01");

    let timeline = get_window_audit(&mut fixture.persistence, window_id).unwrap();
    let edited: Vec<_> = timeline
        .events
        .iter()
        .filter(|e| e.action == "CellEdited")
        .collect();
    assert_eq!(edited.len(), 1);
}

#[test]
fn test_swap_with_self_is_invalid_input() {
    let mut fixture = create_fixture();
    let window_id = create_test_window(&mut fixture, "2026-03-01", "2026-03-04");
    let employee = fixture.employee_ids[0].value();

    let err = swap_employees(
        &mut fixture.persistence,
        &mut fixture.sink,
        window_id,
        &SwapEmployeesRequest {
            context: create_test_context(),
            employee_a: employee,
            employee_b: employee,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_swap_exchanges_every_shared_date() {
    let mut fixture = create_fixture();
    let window_id = create_test_window(&mut fixture, "2026-03-01", "2026-03-04");

    let response = swap_employees(
        &mut fixture.persistence,
        &mut fixture.sink,
        window_id,
        &SwapEmployeesRequest {
            context: create_test_context(),
            employee_a: fixture.employee_ids[0].value(),
            employee_b: fixture.employee_ids[1].value(),
        },
    )
    .unwrap();

    assert_eq!(response.exchanged, 4);
}

#[test]
fn test_swap_records_moved_codes_in_audit() {
    let mut fixture = create_fixture();
    let window_id = create_test_window(&mut fixture, "2026-03-01", "2026-03-02");

    swap_employees(
        &mut fixture.persistence,
        &mut fixture.sink,
        window_id,
        &SwapEmployeesRequest {
            context: create_test_context(),
            employee_a: fixture.employee_ids[0].value(),
            employee_b: fixture.employee_ids[1].value(),
        },
    )
    .unwrap();

    let timeline = get_window_audit(&mut fixture.persistence, window_id).unwrap();
    let swapped = timeline.events.last().unwrap();
    assert_eq!(swapped.action, "Swapped");
    assert_eq!(swapped.before, "2026-03-01:a=A,b=D;2026-03-02:a=B,b=E");
    assert_eq!(swapped.after, "2026-03-01:a=D,b=A;2026-03-02:a=E,b=B");
}

#[test]
fn test_swap_with_employee_from_another_site_is_rule_violation() {
    let mut fixture = create_fixture();
    let window_id = create_test_window(&mut fixture, "2026-03-01", "2026-03-04");
    let other_site: SiteId = fixture
        .persistence
        .create_site("Cali", None, "CO")
        .unwrap();
    let outsider: EmployeeId = fixture
        .persistence
        .create_employee(&Employee::new(
            EmployeeId::new(0),
            "Visiting",
            "Guard",
            other_site,
            fixture.role_id,
        ))
        .unwrap();

    let err = swap_employees(
        &mut fixture.persistence,
        &mut fixture.sink,
        window_id,
        &SwapEmployeesRequest {
            context: create_test_context(),
            employee_a: fixture.employee_ids[0].value(),
            employee_b: outsider.value(),
        },
    )
    .unwrap_err();

    match err {
        ApiError::DomainRuleViolation { rule, .. } => assert_eq!(rule, "same_site_swap"),
        other => panic!("expected a same-site rule violation, got {other:?}"),
    }
    let timeline = get_window_audit(&mut fixture.persistence, window_id).unwrap();
    assert!(timeline.events.iter().all(|e| e.action != "Swapped"));
}

#[test]
fn test_swap_with_unknown_employee_is_not_found() {
    let mut fixture = create_fixture();
    let window_id = create_test_window(&mut fixture, "2026-03-01", "2026-03-04");

    let err = swap_employees(
        &mut fixture.persistence,
        &mut fixture.sink,
        window_id,
        &SwapEmployeesRequest {
            context: create_test_context(),
            employee_a: fixture.employee_ids[0].value(),
            employee_b: 999,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_unknown_window_is_not_found() {
    let mut fixture = create_fixture();

    let err = regenerate_window(
        &mut fixture.persistence,
        &mut fixture.sink,
        999,
        &create_command_request(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
    assert!(matches!(
        get_window_audit(&mut fixture.persistence, 999),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
