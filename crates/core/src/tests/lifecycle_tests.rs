// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_generated_state, create_test_actor, create_test_cause, create_test_context,
    create_test_roster, create_test_site, create_test_window, create_two_by_three_matrix,
};
use crate::{
    AssignmentMutation, CellChange, Command, CoreError, ScheduleContext, TransitionOutcome,
    TransitionResult, WindowState, apply, create_window,
};
use rota_domain::{EmployeeId, MatrixId, SiteId, WorkSite};
use time::macros::date;

fn run(ctx: &ScheduleContext, state: &WindowState, command: Command) -> Result<TransitionResult, CoreError> {
    apply(ctx, state, command, create_test_actor(), create_test_cause())
}

fn generated() -> (ScheduleContext, WindowState) {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(3));
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 04));
    (ctx, state)
}

#[test]
fn test_create_window_emits_created_and_generated_events() {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(3));

    let result: TransitionResult = create_window(
        &ctx,
        create_test_window(date!(2026 - 03 - 01), date!(2026 - 03 - 04)),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let names: Vec<&str> = result
        .audit_events
        .iter()
        .map(|e| e.action.name.as_str())
        .collect();
    assert_eq!(names, vec!["WindowCreated", "AssignmentsGenerated"]);
    assert!(result.audit_events.iter().all(|e| e.window_id.is_none()));
    assert!(result.audit_events.iter().all(|e| e.actor.id == "planner-1"));
}

#[test]
fn test_deactivate_then_restore() {
    let (ctx, state) = generated();

    let deactivated: TransitionResult = run(&ctx, &state, Command::Deactivate).unwrap();
    assert!(!deactivated.new_state.window.active);
    assert_eq!(deactivated.mutation, AssignmentMutation::SetActive(false));
    assert_eq!(
        deactivated.outcome,
        TransitionOutcome::ActiveChanged { active: false }
    );
    assert_eq!(deactivated.new_state.assignments, state.assignments);
    assert_eq!(deactivated.audit_events[0].action.name, "WindowDeactivated");

    let restored: TransitionResult = run(&ctx, &deactivated.new_state, Command::Restore).unwrap();
    assert!(restored.new_state.window.active);
    assert_eq!(restored.audit_events[0].action.name, "WindowRestored");
}

#[test]
fn test_inactive_window_rejects_mutations() {
    let (ctx, state) = generated();
    let inactive: WindowState = run(&ctx, &state, Command::Deactivate).unwrap().new_state;

    let commands: Vec<Command> = vec![
        Command::Regenerate,
        Command::Extend {
            start: date!(2026 - 03 - 05),
            end: date!(2026 - 03 - 06),
        },
        Command::EditCells {
            changes: vec![CellChange::new(EmployeeId::new(1), date!(2026 - 03 - 01), "N")],
        },
        Command::Swap {
            employee_a: EmployeeId::new(1),
            employee_b: EmployeeId::new(2),
        },
        Command::Deactivate,
    ];
    for command in commands {
        assert!(matches!(
            run(&ctx, &inactive, command),
            Err(CoreError::WindowInactive(_))
        ));
    }
}

#[test]
fn test_restoring_active_window_fails() {
    let (ctx, state) = generated();

    assert!(matches!(
        run(&ctx, &state, Command::Restore),
        Err(CoreError::WindowAlreadyActive(_))
    ));
}

#[test]
fn test_context_for_another_site_is_rejected() {
    let (ctx, state) = generated();
    let other: ScheduleContext = ScheduleContext::new(
        WorkSite::new(SiteId::new(2), "Cali", None),
        ctx.matrix.clone(),
        ctx.roster.clone(),
    );

    assert!(matches!(
        run(&other, &state, Command::Regenerate),
        Err(CoreError::ContextMismatch(_))
    ));
}

#[test]
fn test_context_for_another_matrix_is_rejected() {
    let (ctx, state) = generated();
    let other: ScheduleContext = ScheduleContext::new(
        create_test_site(None),
        ctx.matrix.clone().with_id(MatrixId::new(9)),
        ctx.roster.clone(),
    );

    assert!(matches!(
        run(&other, &state, Command::Regenerate),
        Err(CoreError::ContextMismatch(_))
    ));
}

#[test]
fn test_apply_never_mutates_input_state() {
    let (ctx, state) = generated();
    let snapshot: WindowState = state.clone();

    let _ = run(&ctx, &state, Command::Deactivate).unwrap();
    let _ = run(
        &ctx,
        &state,
        Command::Extend {
            start: date!(2026 - 03 - 05),
            end: date!(2026 - 03 - 06),
        },
    )
    .unwrap();

    assert_eq!(state, snapshot);
}
