// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::edit::{EditBatch, edit_cells};
use crate::error::CoreError;
use crate::extension::extend;
use crate::generation::generate;
use crate::state::{
    AssignmentMutation, GenerationOutcome, ScheduleContext, TransitionOutcome, TransitionResult,
    WindowState,
};
use crate::swap::{SwapResult, swap};
use rota_audit::{Actor, AuditEvent, Cause, SchedulingEvent};
use rota_domain::{Assignment, MatrixId, SchedulingWindow};

/// Verifies that `ctx` was loaded for `window`.
fn check_context(ctx: &ScheduleContext, window: &SchedulingWindow) -> Result<(), CoreError> {
    if ctx.site.id != window.site_id {
        return Err(CoreError::ContextMismatch(format!(
            "window '{}' belongs to site {}, context is site {}",
            window.name, window.site_id, ctx.site.id
        )));
    }
    if ctx.matrix.id() != Some(window.matrix_id) {
        return Err(CoreError::ContextMismatch(format!(
            "window '{}' uses matrix {}, context matrix is {:?}",
            window.name,
            window.matrix_id,
            ctx.matrix.id().map(MatrixId::value)
        )));
    }
    Ok(())
}

fn require_active(window: &SchedulingWindow) -> Result<(), CoreError> {
    if !window.active {
        return Err(CoreError::WindowInactive(window.name.clone()));
    }
    Ok(())
}

fn to_audit_events(
    window: &SchedulingWindow,
    events: Vec<SchedulingEvent>,
    actor: &Actor,
    cause: &Cause,
) -> Vec<AuditEvent> {
    events
        .into_iter()
        .map(|event| {
            let audit: AuditEvent = event.into_audit_event(actor, cause);
            match window.id {
                Some(id) => audit.for_window(id),
                None => audit,
            }
        })
        .collect()
}

fn generated_event(outcome: &GenerationOutcome) -> SchedulingEvent {
    SchedulingEvent::AssignmentsGenerated {
        created: outcome.assignments_created,
        replaced: outcome.assignments_replaced,
        employees: outcome.employees_scheduled,
    }
}

/// Creates a window and generates its assignments in one transition.
///
/// A window that fails staffing or generation is never produced, so the
/// caller has nothing to persist.
///
/// # Arguments
///
/// * `ctx` - The site, matrix and roster the window is scheduled against
/// * `window` - The new, unpersisted window
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the context does not match the window or generation
/// fails.
pub fn create_window(
    ctx: &ScheduleContext,
    window: SchedulingWindow,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    check_context(ctx, &window)?;
    require_active(&window)?;

    let (assignments, outcome) = generate(ctx, &window)?;

    let events: Vec<SchedulingEvent> = vec![
        SchedulingEvent::WindowCreated {
            name: window.name.clone(),
            site_id: window.site_id,
            role_id: window.role_id,
            matrix_id: window.matrix_id,
            start_date: window.start_date,
            end_date: window.end_date,
        },
        generated_event(&outcome),
    ];
    let audit_events: Vec<AuditEvent> = to_audit_events(&window, events, &actor, &cause);

    Ok(TransitionResult {
        new_state: WindowState::new(window, assignments.clone()),
        mutation: AssignmentMutation::ReplaceAll(assignments),
        outcome: TransitionOutcome::Generated(outcome),
        audit_events,
    })
}

/// Applies a command to a window, producing the new state, the writes
/// required to reach it, and its audit events.
///
/// The input state is never modified.
///
/// # Arguments
///
/// * `ctx` - The site, matrix and roster the window is scheduled against
/// * `state` - The current window state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The context does not belong to the window
/// - The window is inactive (every command except `Restore`)
/// - The window is already active (`Restore`)
/// - The command violates a scheduling rule
pub fn apply(
    ctx: &ScheduleContext,
    state: &WindowState,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    check_context(ctx, &state.window)?;
    if !matches!(command, Command::Restore) {
        require_active(&state.window)?;
    }

    match command {
        Command::Regenerate => {
            let (assignments, mut outcome) = generate(ctx, &state.window)?;
            outcome.assignments_replaced = state.assignments.len();

            let audit_events: Vec<AuditEvent> = to_audit_events(
                &state.window,
                vec![generated_event(&outcome)],
                &actor,
                &cause,
            );
            Ok(TransitionResult {
                new_state: WindowState::new(state.window.clone(), assignments.clone()),
                mutation: AssignmentMutation::ReplaceAll(assignments),
                outcome: TransitionOutcome::Generated(outcome),
                audit_events,
            })
        }
        Command::Extend { start, end } => {
            let (appended, outcome) = extend(ctx, state, start, end)?;
            let new_window: SchedulingWindow = state.window.extended_to(end)?;

            let mut assignments: Vec<Assignment> = state.assignments.clone();
            assignments.extend(appended.iter().cloned());

            let audit_events: Vec<AuditEvent> = to_audit_events(
                &state.window,
                vec![SchedulingEvent::AssignmentsExtended {
                    previous_end: outcome.previous_end,
                    new_end: outcome.new_end,
                    created: outcome.assignments_created,
                    employees: outcome.employees_affected,
                }],
                &actor,
                &cause,
            );
            Ok(TransitionResult {
                new_state: WindowState::new(new_window, assignments),
                mutation: AssignmentMutation::Append {
                    new_end: end,
                    assignments: appended,
                },
                outcome: TransitionOutcome::Extended(outcome),
                audit_events,
            })
        }
        Command::EditCells { changes } => {
            let batch: EditBatch = edit_cells(&state.assignments, &changes);
            let audit_events: Vec<AuditEvent> =
                to_audit_events(&state.window, batch.events, &actor, &cause);
            Ok(TransitionResult {
                new_state: WindowState::new(state.window.clone(), batch.assignments),
                mutation: AssignmentMutation::UpdateCodes(batch.updated),
                outcome: TransitionOutcome::Edited(batch.outcome),
                audit_events,
            })
        }
        Command::Swap {
            employee_a,
            employee_b,
        } => {
            let result: SwapResult = swap(ctx, &state.assignments, employee_a, employee_b)?;
            let audit_events: Vec<AuditEvent> = to_audit_events(
                &state.window,
                vec![SchedulingEvent::Swapped {
                    employee_a,
                    employee_b,
                    cells: result.cells,
                }],
                &actor,
                &cause,
            );
            Ok(TransitionResult {
                new_state: WindowState::new(state.window.clone(), result.assignments),
                mutation: AssignmentMutation::UpdateCodes(result.updated),
                outcome: TransitionOutcome::Swapped(result.outcome),
                audit_events,
            })
        }
        Command::Deactivate => Ok(set_active(state, false, &actor, &cause)),
        Command::Restore => {
            if state.window.active {
                return Err(CoreError::WindowAlreadyActive(state.window.name.clone()));
            }
            Ok(set_active(state, true, &actor, &cause))
        }
    }
}

fn set_active(state: &WindowState, active: bool, actor: &Actor, cause: &Cause) -> TransitionResult {
    let mut window: SchedulingWindow = state.window.clone();
    window.active = active;

    let event: SchedulingEvent = if active {
        SchedulingEvent::WindowRestored
    } else {
        SchedulingEvent::WindowDeactivated
    };
    let audit_events: Vec<AuditEvent> = to_audit_events(&state.window, vec![event], actor, cause);

    TransitionResult {
        new_state: WindowState::new(window, state.assignments.clone()),
        mutation: AssignmentMutation::SetActive(active),
        outcome: TransitionOutcome::ActiveChanged { active },
        audit_events,
    }
}
