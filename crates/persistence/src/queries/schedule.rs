// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduling window and assignment queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rota_domain::{
    Assignment, EmployeeId, MatrixId, RoleId, SchedulingWindow, ShiftCode, SiteId, WindowId,
};

use crate::data_models::{AssignmentRow, SchedulingWindowRow, parse_date};
use crate::diesel_schema::{assignments, scheduling_windows};
use crate::error::PersistenceError;
use crate::queries::index_from_db;

fn window_from_row(row: SchedulingWindowRow) -> Result<SchedulingWindow, PersistenceError> {
    Ok(SchedulingWindow {
        id: Some(WindowId::new(row.window_id)),
        name: row.name,
        site_id: SiteId::new(row.site_id),
        role_id: RoleId::new(row.role_id),
        matrix_id: MatrixId::new(row.matrix_id),
        start_date: parse_date(&row.start_date)?,
        end_date: parse_date(&row.end_date)?,
        created_by: row.created_by,
        created_at: row.created_at,
        active: row.is_active != 0,
    })
}

/// Retrieves a scheduling window, active or not.
///
/// # Errors
///
/// Returns `WindowNotFound` if the window does not exist.
pub fn get_window(
    conn: &mut SqliteConnection,
    window_id: WindowId,
) -> Result<SchedulingWindow, PersistenceError> {
    let row: SchedulingWindowRow = scheduling_windows::table
        .filter(scheduling_windows::window_id.eq(window_id.value()))
        .select(SchedulingWindowRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::WindowNotFound(window_id.value()))?;

    window_from_row(row)
}

/// Lists windows, newest start date first.
///
/// Deactivated windows are only returned when `include_inactive` is set.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `site_id` - Restricts the listing to one site when present
/// * `include_inactive` - Whether soft-deleted windows are included
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_windows(
    conn: &mut SqliteConnection,
    site_id: Option<SiteId>,
    include_inactive: bool,
) -> Result<Vec<SchedulingWindow>, PersistenceError> {
    let mut query = scheduling_windows::table
        .select(SchedulingWindowRow::as_select())
        .into_boxed();

    if let Some(site_id) = site_id {
        query = query.filter(scheduling_windows::site_id.eq(site_id.value()));
    }
    if !include_inactive {
        query = query.filter(scheduling_windows::is_active.eq(1));
    }

    let rows: Vec<SchedulingWindowRow> = query
        .order((
            scheduling_windows::start_date.desc(),
            scheduling_windows::window_id.desc(),
        ))
        .load(conn)?;

    rows.into_iter().map(window_from_row).collect()
}

/// Retrieves every assignment of a window ordered by date, then employee.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn get_assignments(
    conn: &mut SqliteConnection,
    window_id: WindowId,
) -> Result<Vec<Assignment>, PersistenceError> {
    let rows: Vec<AssignmentRow> = assignments::table
        .filter(assignments::window_id.eq(window_id.value()))
        .order((
            assignments::assignment_date.asc(),
            assignments::employee_id.asc(),
        ))
        .select(AssignmentRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| {
            let code: ShiftCode = ShiftCode::new(&row.code)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
            Ok(Assignment::new(
                EmployeeId::new(row.employee_id),
                parse_date(&row.assignment_date)?,
                index_from_db(row.row_index, "row_index")?,
                index_from_db(row.column_index, "column_index")?,
                code,
            ))
        })
        .collect()
}

/// Counts the assignments of a window.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_assignments(
    conn: &mut SqliteConnection,
    window_id: WindowId,
) -> Result<i64, PersistenceError> {
    Ok(assignments::table
        .filter(assignments::window_id.eq(window_id.value()))
        .count()
        .get_result(conn)?)
}
