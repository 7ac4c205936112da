// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Every mutating handler follows the same sequence: load the window and its
//! context from the store, compute the transition in the core, persist it in
//! one transaction, then hand the audit events to the sink. A failing sink is
//! logged and never undoes the committed transition.

use rota::{
    CellChange, Command, EditOutcome, ExtensionOutcome, GenerationOutcome, ScheduleContext,
    SwapOutcome, TransitionOutcome, TransitionResult, WindowState,
};
use rota_audit::{Actor, AuditEvent, AuditSink, Cause};
use rota_domain::{
    Employee, EmployeeId, MatrixId, RoleId, SchedulingWindow, SiteId, WindowId, WorkSite,
};
use rota_persistence::{Persistence, PersistenceError};
use std::collections::BTreeMap;
use time::Date;
use tracing::{debug, info, warn};

use crate::dates::{format_date, parse_date_field};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::grid::{ScheduleGrid, build_grid, grid_to_csv};
use crate::holidays::HolidayCalendar;
use crate::request_response::{
    AuditEventInfo, AuditTimelineResponse, CellRefInfo, CreateWindowRequest,
    CreateWindowResponse, EditCellsRequest, EditCellsResponse, ExtendWindowRequest,
    ExtendWindowResponse, ListWindowsResponse, RegenerateWindowResponse, RejectedEditInfo,
    RequestContext, SwapEmployeesRequest, SwapEmployeesResponse, WindowCommandRequest, WindowInfo,
    WindowStatusResponse,
};

impl RequestContext {
    /// Converts the request context into the audit actor and cause.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if `actor_id` is blank.
    pub fn to_audit(&self) -> Result<(Actor, Cause), ApiError> {
        let actor_id: &str = self.actor_id.trim();
        if actor_id.is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("actor_id"),
                message: String::from("Every change must name the operator making it"),
            });
        }
        Ok((
            Actor::operator(actor_id),
            Cause::new(self.cause_id.clone(), self.cause_description.clone()),
        ))
    }
}

/// Hands committed audit events to the sink.
///
/// Events produced before the window had an identifier are bound to
/// `window_id` first. Returns the number of events the sink accepted.
pub fn dispatch_audit(
    sink: &mut dyn AuditSink,
    window_id: WindowId,
    events: &[AuditEvent],
) -> usize {
    let mut accepted: usize = 0;
    for event in events {
        let bound: AuditEvent = if event.window_id.is_some() {
            event.clone()
        } else {
            event.clone().for_window(window_id)
        };
        match sink.append(&bound) {
            Ok(event_id) => {
                accepted += 1;
                debug!(
                    event_id,
                    window_id = window_id.value(),
                    action = %bound.action.name,
                    "Recorded audit event"
                );
            }
            Err(e) => {
                warn!(
                    error = %e,
                    window_id = window_id.value(),
                    action = %bound.action.name,
                    "Audit sink rejected event; operation stays committed"
                );
            }
        }
    }
    accepted
}

fn load_context(
    persistence: &mut Persistence,
    window: &SchedulingWindow,
) -> Result<ScheduleContext, ApiError> {
    persistence
        .load_schedule_context(window.site_id, window.matrix_id)
        .map_err(translate_persistence_error)
}

/// Adds the employees a command names who are missing from the site roster.
///
/// An unknown identifier is left for the core to report.
fn resolve_named_employees(
    persistence: &mut Persistence,
    mut ctx: ScheduleContext,
    command: &Command,
) -> Result<ScheduleContext, ApiError> {
    let Command::Swap {
        employee_a,
        employee_b,
    } = command
    else {
        return Ok(ctx);
    };
    for &employee_id in [employee_a, employee_b] {
        if ctx.employee(employee_id).is_some() {
            continue;
        }
        match persistence.get_employee(employee_id) {
            Ok(employee) => {
                debug!(
                    employee_id = employee_id.value(),
                    site_id = employee.site_id.value(),
                    "Resolved employee outside the window roster"
                );
                ctx = ctx.with_employee(employee);
            }
            Err(PersistenceError::NotFound(_)) => {}
            Err(e) => return Err(translate_persistence_error(e)),
        }
    }
    Ok(ctx)
}

/// Loads, computes, persists and dispatches one command against a window.
fn run_command(
    persistence: &mut Persistence,
    sink: &mut dyn AuditSink,
    window_id: WindowId,
    context: &RequestContext,
    command: Command,
) -> Result<TransitionResult, ApiError> {
    let (actor, cause) = context.to_audit()?;

    let state: WindowState = persistence
        .get_window_state(window_id)
        .map_err(translate_persistence_error)?;
    let ctx: ScheduleContext = load_context(persistence, &state.window)?;
    let ctx: ScheduleContext = resolve_named_employees(persistence, ctx, &command)?;

    let result: TransitionResult =
        rota::apply(&ctx, &state, command, actor, cause).map_err(translate_core_error)?;

    persistence
        .persist_transition(window_id, &result)
        .map_err(translate_persistence_error)?;
    dispatch_audit(sink, window_id, &result.audit_events);
    Ok(result)
}

fn unexpected_outcome(operation: &str) -> ApiError {
    ApiError::Internal {
        message: format!("Unexpected outcome for {operation}"),
    }
}

/// Creates a scheduling window and generates its assignments.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `sink` - Receives the audit events after commit
/// * `request` - The window to create
///
/// # Errors
///
/// Returns an error if:
/// - A date is malformed or the range is inverted
/// - The site, matrix or role context cannot be loaded
/// - The pattern is empty, no employee is eligible, or staffing is short
/// - The store rejects the write (nothing is persisted then)
pub fn create_window(
    persistence: &mut Persistence,
    sink: &mut dyn AuditSink,
    request: &CreateWindowRequest,
) -> Result<CreateWindowResponse, ApiError> {
    let (actor, cause) = request.context.to_audit()?;
    let start: Date = parse_date_field("start_date", &request.start_date)?;
    let end: Date = parse_date_field("end_date", &request.end_date)?;

    let window: SchedulingWindow = SchedulingWindow::new(
        &request.name,
        SiteId::new(request.site_id),
        RoleId::new(request.role_id),
        MatrixId::new(request.matrix_id),
        start,
        end,
        &actor.id,
    )
    .map_err(translate_domain_error)?;

    let ctx: ScheduleContext = load_context(persistence, &window)?;
    let result: TransitionResult =
        rota::create_window(&ctx, window, actor, cause).map_err(translate_core_error)?;
    let TransitionOutcome::Generated(outcome) = &result.outcome else {
        return Err(unexpected_outcome("create_window"));
    };
    let outcome: GenerationOutcome = *outcome;

    let window_id: WindowId = persistence
        .persist_window_creation(&result)
        .map_err(translate_persistence_error)?;
    dispatch_audit(sink, window_id, &result.audit_events);

    if outcome.is_empty() {
        warn!(
            window_id = window_id.value(),
            empty_cells = outcome.empty_cells_skipped,
            "Window created without any assignments"
        );
    }
    info!(
        window_id = window_id.value(),
        site_id = request.site_id,
        assignments = outcome.assignments_created,
        employees = outcome.employees_scheduled,
        "Created scheduling window"
    );

    Ok(CreateWindowResponse {
        window_id: window_id.value(),
        assignments_created: outcome.assignments_created,
        employees_scheduled: outcome.employees_scheduled,
        message: format!(
            "Created window '{}' with {} assignments",
            request.name, outcome.assignments_created
        ),
    })
}

/// Rebuilds every assignment of a window from its pattern.
///
/// # Errors
///
/// Returns an error if the window is missing or inactive, or generation fails.
pub fn regenerate_window(
    persistence: &mut Persistence,
    sink: &mut dyn AuditSink,
    window_id: i64,
    request: &WindowCommandRequest,
) -> Result<RegenerateWindowResponse, ApiError> {
    let id: WindowId = WindowId::new(window_id);
    let result: TransitionResult =
        run_command(persistence, sink, id, &request.context, Command::Regenerate)?;
    let TransitionOutcome::Generated(outcome) = result.outcome else {
        return Err(unexpected_outcome("regenerate_window"));
    };

    info!(
        window_id,
        created = outcome.assignments_created,
        replaced = outcome.assignments_replaced,
        "Regenerated window"
    );
    Ok(RegenerateWindowResponse {
        window_id,
        assignments_created: outcome.assignments_created,
        assignments_replaced: outcome.assignments_replaced,
    })
}

/// Extends a window past its current end, continuing each rotation.
///
/// # Errors
///
/// Returns an error if the extension overlaps the window, the range is
/// inverted, or no employee gets a shift in the extension.
pub fn extend_window(
    persistence: &mut Persistence,
    sink: &mut dyn AuditSink,
    window_id: i64,
    request: &ExtendWindowRequest,
) -> Result<ExtendWindowResponse, ApiError> {
    let start: Date = parse_date_field("extension_start", &request.extension_start)?;
    let end: Date = parse_date_field("extension_end", &request.extension_end)?;

    let result: TransitionResult = run_command(
        persistence,
        sink,
        WindowId::new(window_id),
        &request.context,
        Command::Extend { start, end },
    )?;
    let TransitionOutcome::Extended(outcome) = result.outcome else {
        return Err(unexpected_outcome("extend_window"));
    };
    let ExtensionOutcome {
        assignments_created,
        employees_affected,
        previous_end,
        new_end,
    } = outcome;

    info!(
        window_id,
        previous_end = %previous_end,
        new_end = %new_end,
        created = assignments_created,
        employees = employees_affected,
        "Extended window"
    );
    Ok(ExtendWindowResponse {
        window_id,
        assignments_created,
        employees_affected,
        end_date: format_date(new_end),
    })
}

/// Overwrites individual cell codes.
///
/// Invalid codes and missing cells are reported per change; they do not
/// stop the rest of the batch.
///
/// # Errors
///
/// Returns an error if a change date is malformed, or the window is missing
/// or inactive.
pub fn edit_cells(
    persistence: &mut Persistence,
    sink: &mut dyn AuditSink,
    window_id: i64,
    request: &EditCellsRequest,
) -> Result<EditCellsResponse, ApiError> {
    let changes: Vec<CellChange> = request
        .changes
        .iter()
        .map(|change| {
            Ok(CellChange::new(
                EmployeeId::new(change.employee_id),
                parse_date_field("date", &change.date)?,
                &change.code,
            ))
        })
        .collect::<Result<Vec<CellChange>, ApiError>>()?;

    let result: TransitionResult = run_command(
        persistence,
        sink,
        WindowId::new(window_id),
        &request.context,
        Command::EditCells { changes },
    )?;
    let TransitionOutcome::Edited(outcome) = result.outcome else {
        return Err(unexpected_outcome("edit_cells"));
    };
    let EditOutcome {
        changed,
        unchanged,
        missing,
        rejected,
    } = outcome;

    if !rejected.is_empty() || !missing.is_empty() {
        warn!(
            window_id,
            rejected = rejected.len(),
            missing = missing.len(),
            "Some cell edits were not applied"
        );
    }
    info!(window_id, changed, unchanged, "Edited cells");

    Ok(EditCellsResponse {
        changed,
        unchanged,
        missing: missing
            .into_iter()
            .map(|cell| CellRefInfo {
                employee_id: cell.employee_id.value(),
                date: format_date(cell.date),
            })
            .collect(),
        rejected: rejected
            .into_iter()
            .map(|edit| RejectedEditInfo {
                employee_id: edit.cell.employee_id.value(),
                date: format_date(edit.cell.date),
                code: edit.code,
                reason: edit.reason,
            })
            .collect(),
    })
}

/// Exchanges the codes of two employees on every date they share.
///
/// # Errors
///
/// Returns an error if either employee is unknown, both are the same, they
/// belong to different sites, or the window is missing or inactive.
pub fn swap_employees(
    persistence: &mut Persistence,
    sink: &mut dyn AuditSink,
    window_id: i64,
    request: &SwapEmployeesRequest,
) -> Result<SwapEmployeesResponse, ApiError> {
    let result: TransitionResult = run_command(
        persistence,
        sink,
        WindowId::new(window_id),
        &request.context,
        Command::Swap {
            employee_a: EmployeeId::new(request.employee_a),
            employee_b: EmployeeId::new(request.employee_b),
        },
    )?;
    let TransitionOutcome::Swapped(SwapOutcome { exchanged }) = result.outcome else {
        return Err(unexpected_outcome("swap_employees"));
    };

    info!(
        window_id,
        employee_a = request.employee_a,
        employee_b = request.employee_b,
        exchanged,
        "Swapped employees"
    );
    Ok(SwapEmployeesResponse { exchanged })
}

fn change_status(
    persistence: &mut Persistence,
    sink: &mut dyn AuditSink,
    window_id: i64,
    request: &WindowCommandRequest,
    command: Command,
) -> Result<WindowStatusResponse, ApiError> {
    let result: TransitionResult = run_command(
        persistence,
        sink,
        WindowId::new(window_id),
        &request.context,
        command,
    )?;
    let TransitionOutcome::ActiveChanged { active } = result.outcome else {
        return Err(unexpected_outcome("change_status"));
    };

    info!(window_id, active, "Changed window status");
    Ok(WindowStatusResponse { window_id, active })
}

/// Soft-deletes a window. Its assignments are kept.
///
/// # Errors
///
/// Returns an error if the window is missing or already inactive.
pub fn deactivate_window(
    persistence: &mut Persistence,
    sink: &mut dyn AuditSink,
    window_id: i64,
    request: &WindowCommandRequest,
) -> Result<WindowStatusResponse, ApiError> {
    change_status(persistence, sink, window_id, request, Command::Deactivate)
}

/// Undoes a soft delete.
///
/// # Errors
///
/// Returns an error if the window is missing or already active.
pub fn restore_window(
    persistence: &mut Persistence,
    sink: &mut dyn AuditSink,
    window_id: i64,
    request: &WindowCommandRequest,
) -> Result<WindowStatusResponse, ApiError> {
    change_status(persistence, sink, window_id, request, Command::Restore)
}

fn to_window_info(window: &SchedulingWindow) -> WindowInfo {
    WindowInfo {
        window_id: window.id.map_or(0, WindowId::value),
        name: window.name.clone(),
        site_id: window.site_id.value(),
        role_id: window.role_id.value(),
        matrix_id: window.matrix_id.value(),
        start_date: format_date(window.start_date),
        end_date: format_date(window.end_date),
        created_by: window.created_by.clone(),
        created_at: window.created_at.clone(),
        active: window.active,
    }
}

/// Lists windows, optionally for one site.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_windows(
    persistence: &mut Persistence,
    site_id: Option<i64>,
    include_inactive: bool,
) -> Result<ListWindowsResponse, ApiError> {
    let windows: Vec<SchedulingWindow> = persistence
        .list_windows(site_id.map(SiteId::new), include_inactive)
        .map_err(translate_persistence_error)?;

    Ok(ListWindowsResponse {
        windows: windows.iter().map(to_window_info).collect(),
    })
}

/// Renders a window as a holiday-annotated grid.
///
/// # Errors
///
/// Returns an error if the window or its site cannot be loaded.
pub fn get_schedule_grid(
    persistence: &mut Persistence,
    holidays: &dyn HolidayCalendar,
    window_id: i64,
) -> Result<ScheduleGrid, ApiError> {
    let state: WindowState = persistence
        .get_window_state(WindowId::new(window_id))
        .map_err(translate_persistence_error)?;
    let site: WorkSite = persistence
        .get_site(state.window.site_id)
        .map_err(translate_persistence_error)?;
    let roster: Vec<Employee> = persistence
        .list_site_employees(site.id)
        .map_err(translate_persistence_error)?;

    let annotations: BTreeMap<Date, String> =
        holidays.holidays_in_range(&site.country_code, state.window.start_date, state.window.end_date);
    debug!(
        window_id,
        country = %site.country_code,
        holidays = annotations.len(),
        "Rendering schedule grid"
    );
    build_grid(&state, &roster, &annotations)
}

/// Renders a window grid as CSV.
///
/// # Errors
///
/// Returns an error if the grid cannot be built or written.
pub fn get_schedule_grid_csv(
    persistence: &mut Persistence,
    holidays: &dyn HolidayCalendar,
    window_id: i64,
) -> Result<String, ApiError> {
    let grid: ScheduleGrid = get_schedule_grid(persistence, holidays, window_id)?;
    grid_to_csv(&grid)
}

/// Returns the audit timeline of a window, oldest first.
///
/// # Errors
///
/// Returns an error if the window does not exist.
pub fn get_window_audit(
    persistence: &mut Persistence,
    window_id: i64,
) -> Result<AuditTimelineResponse, ApiError> {
    let id: WindowId = WindowId::new(window_id);
    persistence
        .get_window(id)
        .map_err(translate_persistence_error)?;
    let events: Vec<AuditEvent> = persistence
        .get_window_audit(id)
        .map_err(translate_persistence_error)?;

    Ok(AuditTimelineResponse {
        window_id,
        events: events
            .into_iter()
            .map(|event| AuditEventInfo {
                event_id: event.event_id,
                action: event.action.name,
                details: event.action.details,
                actor_id: event.actor.id,
                actor_type: event.actor.actor_type,
                cause_id: event.cause.id,
                cause_description: event.cause.description,
                before: event.before.data,
                after: event.after.data,
            })
            .collect(),
    })
}
