// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory lookups: sites, employees and pattern matrices.

use diesel::prelude::*;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;
use rota_domain::{
    Employee, EmployeeId, EmployeeStatus, MatrixId, PatternCell, PatternMatrix, RoleId,
    RotationType, SiteId, WorkSite,
};
use std::str::FromStr;

use crate::data_models::{EmployeeRow, PatternCellRow, WorkSiteRow, parse_optional_date};
use crate::diesel_schema::{employees, pattern_cells, pattern_matrices, work_sites};
use crate::error::PersistenceError;
use crate::queries::index_from_db;

/// Retrieves a work site.
///
/// # Errors
///
/// Returns `NotFound` if the site does not exist.
pub fn get_site(conn: &mut SqliteConnection, site_id: SiteId) -> Result<WorkSite, PersistenceError> {
    let row: WorkSiteRow = work_sites::table
        .filter(work_sites::site_id.eq(site_id.value()))
        .select(WorkSiteRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Work site {site_id}")))?;

    let target_headcount: Option<u32> = row
        .target_headcount
        .map(|target| {
            target.to_u32().ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "target_headcount out of range: {target}"
                ))
            })
        })
        .transpose()?;

    Ok(WorkSite {
        id: SiteId::new(row.site_id),
        name: row.name,
        target_headcount,
        country_code: row.country_code,
        active: row.is_active != 0,
    })
}

fn employee_from_row(row: EmployeeRow) -> Result<Employee, PersistenceError> {
    let status: EmployeeStatus = EmployeeStatus::from_str(&row.status)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

    Ok(Employee {
        id: EmployeeId::new(row.employee_id),
        given_name: row.given_name,
        surname: row.surname,
        document: row.document,
        site_id: SiteId::new(row.site_id),
        role_id: RoleId::new(row.role_id),
        status,
        active_from: parse_optional_date(row.active_from.as_deref())?,
        active_until: parse_optional_date(row.active_until.as_deref())?,
    })
}

/// Retrieves every employee of a site, in any status.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_site_employees(
    conn: &mut SqliteConnection,
    site_id: SiteId,
) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .filter(employees::site_id.eq(site_id.value()))
        .order((employees::surname.asc(), employees::given_name.asc()))
        .select(EmployeeRow::as_select())
        .load(conn)?;

    rows.into_iter().map(employee_from_row).collect()
}

/// Retrieves one employee.
///
/// # Errors
///
/// Returns `NotFound` if the employee does not exist.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Employee, PersistenceError> {
    let row: EmployeeRow = employees::table
        .filter(employees::employee_id.eq(employee_id.value()))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Employee {employee_id}")))?;

    employee_from_row(row)
}

/// Retrieves a pattern matrix with all its cells.
///
/// # Errors
///
/// Returns `NotFound` if the matrix does not exist, or a reconstruction
/// error if a stored cell holds an invalid code.
pub fn get_matrix(
    conn: &mut SqliteConnection,
    matrix_id: MatrixId,
) -> Result<PatternMatrix, PersistenceError> {
    let (name, rotation_code): (String, String) = pattern_matrices::table
        .filter(pattern_matrices::matrix_id.eq(matrix_id.value()))
        .select((pattern_matrices::name, pattern_matrices::rotation_type))
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Pattern matrix {matrix_id}")))?;

    let rotation_type: RotationType = RotationType::from_str(&rotation_code)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

    let rows: Vec<PatternCellRow> = pattern_cells::table
        .filter(pattern_cells::matrix_id.eq(matrix_id.value()))
        .order((pattern_cells::row_index.asc(), pattern_cells::column_index.asc()))
        .select(PatternCellRow::as_select())
        .load(conn)?;

    let cells: Vec<PatternCell> = rows
        .into_iter()
        .map(|row| {
            Ok(PatternCell::new(
                index_from_db(row.row_index, "row_index")?,
                index_from_db(row.column_index, "column_index")?,
                &row.code,
            ))
        })
        .collect::<Result<Vec<PatternCell>, PersistenceError>>()?;

    let matrix: PatternMatrix = PatternMatrix::new(&name, rotation_type, cells)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    Ok(matrix.with_id(matrix_id))
}
