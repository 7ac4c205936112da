// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::diesel_schema::{
    assignments, audit_events, employees, pattern_cells, scheduling_windows, work_sites,
};
use crate::error::PersistenceError;

/// Dates are stored as ISO `YYYY-MM-DD` text.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats a date for storage.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored date.
///
/// # Errors
///
/// Returns an error if the text is not an ISO calendar date.
pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| {
        PersistenceError::ReconstructionError(format!("invalid stored date '{value}': {e}"))
    })
}

/// Parses an optional stored date.
///
/// # Errors
///
/// Returns an error if the text is present and not an ISO calendar date.
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, PersistenceError> {
    value.map(parse_date).transpose()
}

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = work_sites)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WorkSiteRow {
    pub site_id: i64,
    pub name: String,
    pub target_headcount: Option<i32>,
    pub country_code: String,
    pub is_active: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub given_name: String,
    pub surname: String,
    pub document: String,
    pub site_id: i64,
    pub role_id: i64,
    pub status: String,
    pub active_from: Option<String>,
    pub active_until: Option<String>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = pattern_cells)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PatternCellRow {
    pub row_index: i32,
    pub column_index: i32,
    pub code: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = pattern_cells)]
pub struct NewPatternCellRow<'a> {
    pub matrix_id: i64,
    pub row_index: i32,
    pub column_index: i32,
    pub code: &'a str,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = scheduling_windows)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SchedulingWindowRow {
    pub window_id: i64,
    pub name: String,
    pub site_id: i64,
    pub role_id: i64,
    pub matrix_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub created_by: String,
    pub created_at: Option<String>,
    pub is_active: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = assignments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssignmentRow {
    pub employee_id: i64,
    pub assignment_date: String,
    pub row_index: i32,
    pub column_index: i32,
    pub code: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = assignments)]
pub struct NewAssignmentRow {
    pub window_id: i64,
    pub employee_id: i64,
    pub assignment_date: String,
    pub row_index: i32,
    pub column_index: i32,
    pub code: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditEventRow {
    pub event_id: i64,
    pub window_id: Option<i64>,
    pub action_name: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    #[allow(dead_code)]
    pub created_at: Option<String>,
}
