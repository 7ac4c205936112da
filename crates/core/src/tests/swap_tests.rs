// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    codes_of, create_generated_state, create_test_actor, create_test_cause, create_test_context,
    create_test_employee, create_test_roster, create_test_window, create_two_by_three_matrix,
    rows_of,
};
use crate::{
    Command, CoreError, ScheduleContext, SwapOutcome, TransitionOutcome, TransitionResult,
    WindowState, apply,
};
use rota_domain::{Assignment, EmployeeId, ShiftCode, SiteId, WindowId};
use time::Date;
use time::macros::date;

fn swap(
    ctx: &ScheduleContext,
    state: &WindowState,
    a: i64,
    b: i64,
) -> Result<TransitionResult, CoreError> {
    apply(
        ctx,
        state,
        Command::Swap {
            employee_a: EmployeeId::new(a),
            employee_b: EmployeeId::new(b),
        },
        create_test_actor(),
        create_test_cause(),
    )
}

fn exchanged(result: &TransitionResult) -> usize {
    match &result.outcome {
        TransitionOutcome::Swapped(SwapOutcome { exchanged }) => *exchanged,
        other => panic!("expected a swap outcome, got {other:?}"),
    }
}

fn assignment(employee_id: i64, date: Date, code: &str) -> Assignment {
    Assignment::new(
        EmployeeId::new(employee_id),
        date,
        0,
        0,
        ShiftCode::new(code).unwrap(),
    )
}

#[test]
fn test_swap_exchanges_codes_and_keeps_positions() {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(2));
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 04));

    let result: TransitionResult = swap(&ctx, &state, 1, 2).unwrap();

    assert_eq!(codes_of(&result.new_state, 1), "DEFD");
    assert_eq!(codes_of(&result.new_state, 2), "ABCA");
    assert_eq!(rows_of(&result.new_state, 1), vec![0, 0, 0, 0]);
    assert_eq!(rows_of(&result.new_state, 2), vec![1, 1, 1, 1]);
    assert_eq!(exchanged(&result), 4);
}

#[test]
fn test_swap_is_involutive() {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(3));
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 09));

    let once: TransitionResult = swap(&ctx, &state, 1, 2).unwrap();
    let twice: TransitionResult = swap(&ctx, &once.new_state, 1, 2).unwrap();

    assert_eq!(twice.new_state, state);
}

#[test]
fn test_swap_only_touches_shared_dates() {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(2));
    let window = create_test_window(date!(2026 - 03 - 01), date!(2026 - 03 - 04)).with_id(WindowId::new(1));
    let state: WindowState = WindowState::new(
        window,
        vec![
            assignment(1, date!(2026 - 03 - 01), "A"),
            assignment(1, date!(2026 - 03 - 02), "B"),
            assignment(1, date!(2026 - 03 - 03), "C"),
            assignment(2, date!(2026 - 03 - 02), "X"),
            assignment(2, date!(2026 - 03 - 03), "C"),
            assignment(2, date!(2026 - 03 - 04), "Y"),
        ],
    );

    let result: TransitionResult = swap(&ctx, &state, 1, 2).unwrap();

    assert_eq!(codes_of(&result.new_state, 1), "AXC");
    assert_eq!(codes_of(&result.new_state, 2), "BCY");
    assert_eq!(exchanged(&result), 2);
    let crate::AssignmentMutation::UpdateCodes(updated) = &result.mutation else {
        panic!("expected a code update");
    };
    assert_eq!(updated.len(), 2);
}

#[test]
fn test_self_swap_is_rejected() {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(2));
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 04));

    assert_eq!(
        swap(&ctx, &state, 1, 1).unwrap_err(),
        CoreError::SelfSwap(EmployeeId::new(1))
    );
}

#[test]
fn test_unknown_employee_is_rejected() {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(2));
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 04));

    assert_eq!(
        swap(&ctx, &state, 1, 42).unwrap_err(),
        CoreError::EmployeeNotFound(EmployeeId::new(42))
    );
}

#[test]
fn test_cross_site_swap_is_rejected() {
    let mut roster = create_test_roster(2);
    let mut visitor = create_test_employee(3);
    visitor.site_id = SiteId::new(2);
    roster.push(visitor);
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), roster);
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 04));

    assert!(matches!(
        swap(&ctx, &state, 1, 3),
        Err(CoreError::CrossSiteSwap { .. })
    ));
}

#[test]
fn test_swap_audit_carries_codes_before_and_after() {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(2));
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 02));

    let result: TransitionResult = swap(&ctx, &state, 1, 2).unwrap();

    assert_eq!(result.audit_events.len(), 1);
    assert_eq!(
        result.audit_events[0].before.data,
        "2026-03-01:a=A,b=D;2026-03-02:a=B,b=E"
    );
    assert_eq!(
        result.audit_events[0].after.data,
        "2026-03-01:a=D,b=A;2026-03-02:a=E,b=B"
    );
}

#[test]
fn test_swap_resolves_employee_added_from_another_site() {
    let mut visitor = create_test_employee(3);
    visitor.site_id = SiteId::new(2);
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(2))
        .with_employee(visitor);
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 04));

    assert!(state.assignments.iter().all(|a| a.employee_id != EmployeeId::new(3)));
    assert!(matches!(
        swap(&ctx, &state, 1, 3),
        Err(CoreError::CrossSiteSwap { .. })
    ));
}
