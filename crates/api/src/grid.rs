// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only schedule grid.
//!
//! One row per employee appearing in the window, ordered by surname, and one
//! column per day. Days carry the holiday name, if any.

use rota::WindowState;
use rota_domain::{Employee, EmployeeId, WindowId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use time::Date;

use crate::dates::format_date;
use crate::error::{ApiError, translate_domain_error};

/// One grid column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDay {
    /// The day, `YYYY-MM-DD`.
    pub date: String,
    /// English weekday name.
    pub weekday: String,
    /// Public holiday falling on this day.
    pub holiday: Option<String>,
}

/// One grid row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    /// The employee.
    pub employee_id: i64,
    /// Surname-first display name.
    pub employee_name: String,
    /// One entry per grid day; `None` where no shift is assigned.
    pub cells: Vec<Option<String>>,
}

/// A rendered scheduling window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGrid {
    /// The window identifier.
    pub window_id: i64,
    /// The window name.
    pub name: String,
    /// Soft-delete flag.
    pub active: bool,
    /// Columns, in date order.
    pub days: Vec<GridDay>,
    /// Rows, in surname order.
    pub rows: Vec<GridRow>,
}

/// Renders a window state as a grid.
///
/// Employees missing from `roster` are still rendered, after the known ones,
/// under their identifier.
///
/// # Errors
///
/// Returns an error if the window is unpersisted or its dates cannot be
/// iterated.
pub fn build_grid(
    state: &WindowState,
    roster: &[Employee],
    holidays: &BTreeMap<Date, String>,
) -> Result<ScheduleGrid, ApiError> {
    let window_id: WindowId = state.window.id.ok_or_else(|| ApiError::Internal {
        message: String::from("Cannot render an unpersisted window"),
    })?;
    let dates: Vec<Date> = state.window.dates().map_err(translate_domain_error)?;

    let days: Vec<GridDay> = dates
        .iter()
        .map(|date| GridDay {
            date: format_date(*date),
            weekday: date.weekday().to_string(),
            holiday: holidays.get(date).cloned(),
        })
        .collect();

    let by_id: HashMap<EmployeeId, &Employee> = roster.iter().map(|e| (e.id, e)).collect();
    let codes: HashMap<(EmployeeId, Date), &str> = state
        .assignments
        .iter()
        .map(|a| ((a.employee_id, a.date), a.code.value()))
        .collect();

    let appearing: BTreeSet<EmployeeId> = state.assignments.iter().map(|a| a.employee_id).collect();
    let mut ordered: Vec<(bool, String, String, EmployeeId)> = appearing
        .into_iter()
        .map(|id| match by_id.get(&id) {
            Some(e) => (false, e.surname.clone(), e.given_name.clone(), id),
            None => (true, String::new(), String::new(), id),
        })
        .collect();
    ordered.sort();

    let rows: Vec<GridRow> = ordered
        .into_iter()
        .map(|(_, _, _, id)| GridRow {
            employee_id: id.value(),
            employee_name: by_id
                .get(&id)
                .copied()
                .map_or_else(|| format!("#{id}"), Employee::display_name),
            cells: dates
                .iter()
                .map(|date| codes.get(&(id, *date)).map(|code| (*code).to_string()))
                .collect(),
        })
        .collect();

    Ok(ScheduleGrid {
        window_id: window_id.value(),
        name: state.window.name.clone(),
        active: state.window.active,
        days,
        rows,
    })
}

/// Exports a grid as CSV.
///
/// The header row holds the dates, the second row the holiday names, then
/// one row per employee.
///
/// # Errors
///
/// Returns an error if the CSV cannot be written.
pub fn grid_to_csv(grid: &ScheduleGrid) -> Result<String, ApiError> {
    let csv_error = |e: &dyn std::fmt::Display| ApiError::Internal {
        message: format!("Failed to write CSV: {e}"),
    };

    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = vec![String::from("employee_id"), String::from("employee")];
    header.extend(grid.days.iter().map(|day| day.date.clone()));
    writer.write_record(&header).map_err(|e| csv_error(&e))?;

    let mut holiday_row: Vec<String> = vec![String::new(), String::from("holiday")];
    holiday_row.extend(
        grid.days
            .iter()
            .map(|day| day.holiday.clone().unwrap_or_default()),
    );
    writer.write_record(&holiday_row).map_err(|e| csv_error(&e))?;

    for row in &grid.rows {
        let mut record: Vec<String> = vec![row.employee_id.to_string(), row.employee_name.clone()];
        record.extend(row.cells.iter().map(|cell| cell.clone().unwrap_or_default()));
        writer.write_record(&record).map_err(|e| csv_error(&e))?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| csv_error(&e))?;
    String::from_utf8(bytes).map_err(|e| csv_error(&e))
}
