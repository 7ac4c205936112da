// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduling window writes.
//!
//! A transition computed by the core arrives as an [`AssignmentMutation`];
//! these functions apply it to the store inside one transaction.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rota::{AssignmentMutation, TransitionResult};
use rota_domain::{Assignment, SchedulingWindow, WindowId};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewAssignmentRow, format_date};
use crate::diesel_schema::{assignments, scheduling_windows};
use crate::error::PersistenceError;
use crate::mutations::{INSERT_CHUNK_SIZE, index_to_db};

fn to_rows(
    window_id: WindowId,
    batch: &[Assignment],
) -> Result<Vec<NewAssignmentRow>, PersistenceError> {
    batch
        .iter()
        .map(|assignment| {
            Ok(NewAssignmentRow {
                window_id: window_id.value(),
                employee_id: assignment.employee_id.value(),
                assignment_date: format_date(assignment.date)?,
                row_index: index_to_db(assignment.row, "row_index")?,
                column_index: index_to_db(assignment.column, "column_index")?,
                code: assignment.code.value().to_string(),
            })
        })
        .collect()
}

/// Inserts assignments in chunks. Callers provide the transaction.
fn insert_assignments(
    conn: &mut SqliteConnection,
    window_id: WindowId,
    batch: &[Assignment],
) -> Result<usize, PersistenceError> {
    let rows: Vec<NewAssignmentRow> = to_rows(window_id, batch)?;
    let mut inserted: usize = 0;
    for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
        inserted += diesel::insert_into(assignments::table)
            .values(chunk)
            .execute(conn)?;
    }
    Ok(inserted)
}

fn insert_window(
    conn: &mut SqliteConnection,
    window: &SchedulingWindow,
) -> Result<WindowId, PersistenceError> {
    diesel::insert_into(scheduling_windows::table)
        .values((
            scheduling_windows::name.eq(&window.name),
            scheduling_windows::site_id.eq(window.site_id.value()),
            scheduling_windows::role_id.eq(window.role_id.value()),
            scheduling_windows::matrix_id.eq(window.matrix_id.value()),
            scheduling_windows::start_date.eq(format_date(window.start_date)?),
            scheduling_windows::end_date.eq(format_date(window.end_date)?),
            scheduling_windows::created_by.eq(&window.created_by),
            scheduling_windows::is_active.eq(i32::from(window.active)),
        ))
        .execute(conn)?;
    Ok(WindowId::new(get_last_insert_rowid(conn)?))
}

/// Stores a freshly created window together with its generated assignments.
///
/// # Errors
///
/// Returns an error if the result does not carry a full assignment set, or
/// if any insert fails. Nothing is stored on failure.
pub fn persist_window_creation(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<WindowId, PersistenceError> {
    let AssignmentMutation::ReplaceAll(batch) = &result.mutation else {
        return Err(PersistenceError::InitializationError(
            "window creation must carry a full assignment set".to_string(),
        ));
    };

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let window_id: WindowId = insert_window(conn, &result.new_state.window)?;
        let inserted: usize = insert_assignments(conn, window_id, batch)?;
        info!(
            window_id = window_id.value(),
            assignments = inserted,
            "Persisted scheduling window"
        );
        Ok(window_id)
    })
}

fn set_window_end(
    conn: &mut SqliteConnection,
    window_id: WindowId,
    new_end: time::Date,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        scheduling_windows::table.filter(scheduling_windows::window_id.eq(window_id.value())),
    )
    .set(scheduling_windows::end_date.eq(format_date(new_end)?))
    .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::WindowNotFound(window_id.value()));
    }
    Ok(())
}

fn update_codes(
    conn: &mut SqliteConnection,
    window_id: WindowId,
    batch: &[Assignment],
) -> Result<usize, PersistenceError> {
    for assignment in batch {
        let date: String = format_date(assignment.date)?;
        let updated: usize = diesel::update(
            assignments::table
                .filter(assignments::window_id.eq(window_id.value()))
                .filter(assignments::employee_id.eq(assignment.employee_id.value()))
                .filter(assignments::assignment_date.eq(&date)),
        )
        .set(assignments::code.eq(assignment.code.value()))
        .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Assignment for employee {} on {date} in window {window_id}",
                assignment.employee_id
            )));
        }
    }
    Ok(batch.len())
}

/// Applies the mutation of a computed transition to an existing window.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `window_id` - The window the transition was computed for
/// * `result` - The computed transition
///
/// # Errors
///
/// Returns an error if the window does not exist or any write fails. The
/// store is left unchanged on failure.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    window_id: WindowId,
    result: &TransitionResult,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        match &result.mutation {
            AssignmentMutation::ReplaceAll(batch) => {
                let removed: usize = diesel::delete(
                    assignments::table.filter(assignments::window_id.eq(window_id.value())),
                )
                .execute(conn)?;
                let inserted: usize = insert_assignments(conn, window_id, batch)?;
                info!(
                    window_id = window_id.value(),
                    removed, inserted, "Replaced window assignments"
                );
            }
            AssignmentMutation::Append {
                new_end,
                assignments: batch,
            } => {
                let inserted: usize = insert_assignments(conn, window_id, batch)?;
                set_window_end(conn, window_id, *new_end)?;
                info!(
                    window_id = window_id.value(),
                    inserted,
                    new_end = %new_end,
                    "Extended window"
                );
            }
            AssignmentMutation::UpdateCodes(batch) => {
                let updated: usize = update_codes(conn, window_id, batch)?;
                debug!(window_id = window_id.value(), updated, "Updated assignment codes");
            }
            AssignmentMutation::SetActive(active) => {
                let updated: usize = diesel::update(
                    scheduling_windows::table
                        .filter(scheduling_windows::window_id.eq(window_id.value())),
                )
                .set(scheduling_windows::is_active.eq(i32::from(*active)))
                .execute(conn)?;
                if updated == 0 {
                    return Err(PersistenceError::WindowNotFound(window_id.value()));
                }
                info!(window_id = window_id.value(), active, "Changed window status");
            }
        }
        Ok(())
    })
}
