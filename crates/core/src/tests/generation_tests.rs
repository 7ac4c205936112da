// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    codes_of, create_generated_state, create_test_actor, create_test_cause, create_test_context,
    create_test_matrix, create_test_roster, create_test_site, create_test_window,
    create_two_by_three_matrix, rows_of,
};
use crate::{
    AssignmentMutation, Command, CoreError, GenerationOutcome, ScheduleContext, TransitionOutcome,
    TransitionResult, WindowState, apply, create_window,
};
use rota_domain::{
    DomainError, EmployeeStatus, MatrixId, PatternCell, PatternMatrix, RotationType, days_between,
};
use time::macros::date;

fn generation_outcome(result: &TransitionResult) -> GenerationOutcome {
    match &result.outcome {
        TransitionOutcome::Generated(outcome) => *outcome,
        other => panic!("expected a generation outcome, got {other:?}"),
    }
}

#[test]
fn test_two_by_three_pattern_with_three_employees_over_four_days() {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(3));
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 04));

    assert_eq!(codes_of(&state, 1), "ABCA");
    assert_eq!(codes_of(&state, 2), "DEFD");
    assert_eq!(codes_of(&state, 3), "ABCA");
    assert_eq!(state.assignments.len(), 12);
}

#[test]
fn test_row_is_ordinal_modulo_row_count_and_constant() {
    let matrix: PatternMatrix = create_test_matrix(
        &[&["A", "B"], &["C", "D"], &["E", "F"]],
        RotationType::Variable,
    );
    let ctx: ScheduleContext = create_test_context(matrix, create_test_roster(7));
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 10));

    for ordinal in 0..7_i64 {
        let expected: u32 = u32::try_from(ordinal % 3).unwrap();
        let rows: Vec<u32> = rows_of(&state, ordinal + 1);
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|&row| row == expected));
    }
}

#[test]
fn test_column_is_day_offset_modulo_column_count() {
    let matrix: PatternMatrix = create_test_matrix(
        &[&["A", "B", "C", "D", "E"], &["F", "G", "H", "I", "J"]],
        RotationType::Variable,
    );
    let ctx: ScheduleContext = create_test_context(matrix, create_test_roster(2));
    let start = date!(2026 - 02 - 20);
    let state: WindowState = create_generated_state(&ctx, start, date!(2026 - 03 - 12));

    for assignment in &state.assignments {
        let expected: i64 = days_between(start, assignment.date) % 5;
        assert_eq!(i64::from(assignment.column), expected);
        assert_eq!(
            ctx.matrix.cell(assignment.row, assignment.column),
            Some(&assignment.code)
        );
    }
}

#[test]
fn test_eligibility_order_is_by_surname() {
    let mut roster = create_test_roster(2);
    roster[0].surname = String::from("Zuluaga");
    roster[1].surname = String::from("Arango");
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), roster);
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 02));

    assert_eq!(codes_of(&state, 2), "AB");
    assert_eq!(codes_of(&state, 1), "DE");
}

#[test]
fn test_inactive_employees_are_not_scheduled() {
    let mut roster = create_test_roster(3);
    roster[1] = roster[1].clone().with_status(EmployeeStatus::Inactive);
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), roster);
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 03));

    assert_eq!(codes_of(&state, 2), "");
    assert_eq!(codes_of(&state, 3), "DEF");
}

#[test]
fn test_empty_cells_are_skipped_and_counted() {
    let matrix: PatternMatrix = PatternMatrix::new(
        "Alternating",
        RotationType::Variable,
        vec![PatternCell::new(0, 0, "N"), PatternCell::new(0, 1, "")],
    )
    .unwrap()
    .with_id(MatrixId::new(1));
    let ctx: ScheduleContext = create_test_context(matrix, create_test_roster(1));

    let result: TransitionResult = create_window(
        &ctx,
        create_test_window(date!(2026 - 03 - 01), date!(2026 - 03 - 04)),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let outcome: GenerationOutcome = generation_outcome(&result);

    assert_eq!(outcome.assignments_created, 2);
    assert_eq!(outcome.empty_cells_skipped, 2);
    assert_eq!(outcome.employees_scheduled, 1);
    assert!(!outcome.is_empty());
}

#[test]
fn test_pattern_without_codes_fails_with_empty_pattern() {
    let matrix: PatternMatrix = PatternMatrix::new(
        "Blank",
        RotationType::Variable,
        vec![PatternCell::new(1, 1, "")],
    )
    .unwrap()
    .with_id(MatrixId::new(1));
    let ctx: ScheduleContext = create_test_context(matrix, create_test_roster(3));

    let result = create_window(
        &ctx,
        create_test_window(date!(2026 - 03 - 01), date!(2026 - 03 - 04)),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(CoreError::EmptyPattern { .. })));
}

#[test]
fn test_no_eligible_employees_fails() {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), Vec::new());

    let result = create_window(
        &ctx,
        create_test_window(date!(2026 - 03 - 01), date!(2026 - 03 - 04)),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(CoreError::NoEligibleEmployees { .. })));
}

#[test]
fn test_fixed_rotation_with_too_few_employees_is_rejected() {
    let matrix: PatternMatrix = create_test_matrix(&[&["A", "B"], &["C", "D"]], RotationType::Fixed);
    let ctx: ScheduleContext =
        ScheduleContext::new(create_test_site(Some(2)), matrix, create_test_roster(5));

    let result = create_window(
        &ctx,
        create_test_window(date!(2026 - 03 - 01), date!(2026 - 03 - 31)),
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InsufficientStaffing {
            required: 8,
            available: 5,
        })
    );
}

#[test]
fn test_variable_rotation_ignores_target_headcount() {
    let matrix: PatternMatrix =
        create_test_matrix(&[&["A", "B"], &["C", "D"]], RotationType::Variable);
    let ctx: ScheduleContext =
        ScheduleContext::new(create_test_site(Some(2)), matrix, create_test_roster(5));

    let result = create_window(
        &ctx,
        create_test_window(date!(2026 - 03 - 01), date!(2026 - 03 - 31)),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_fixed_rotation_with_enough_employees_generates() {
    let matrix: PatternMatrix = create_test_matrix(&[&["A", "B"], &["C", "D"]], RotationType::Fixed);
    let ctx: ScheduleContext =
        ScheduleContext::new(create_test_site(Some(2)), matrix, create_test_roster(8));

    let result: TransitionResult = create_window(
        &ctx,
        create_test_window(date!(2026 - 03 - 01), date!(2026 - 03 - 02)),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(generation_outcome(&result).assignments_created, 16);
}

#[test]
fn test_regeneration_is_idempotent() {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(3));
    let state: WindowState = create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 14));

    let result: TransitionResult = apply(
        &ctx,
        &state,
        Command::Regenerate,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_state, state);
    let outcome: GenerationOutcome = generation_outcome(&result);
    assert_eq!(outcome.assignments_replaced, state.assignments.len());
    assert_eq!(outcome.assignments_created, state.assignments.len());
    assert!(matches!(result.mutation, AssignmentMutation::ReplaceAll(_)));
}

#[test]
fn test_regeneration_discards_manual_edits() {
    let ctx: ScheduleContext = create_test_context(create_two_by_three_matrix(), create_test_roster(1));
    let mut state: WindowState =
        create_generated_state(&ctx, date!(2026 - 03 - 01), date!(2026 - 03 - 03));
    state.assignments[0].code = rota_domain::ShiftCode::new("X").unwrap();

    let result: TransitionResult = apply(
        &ctx,
        &state,
        Command::Regenerate,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(codes_of(&result.new_state, 1), "ABC");
}
