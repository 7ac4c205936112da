// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory writes: sites, roles, employees and pattern matrices.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rota_domain::{Employee, EmployeeId, MatrixId, PatternCell, PatternMatrix, RoleId, SiteId};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewPatternCellRow, format_date};
use crate::diesel_schema::{employees, pattern_cells, pattern_matrices, roles, work_sites};
use crate::error::PersistenceError;
use crate::mutations::{INSERT_CHUNK_SIZE, index_to_db};

/// Creates a work site.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - Display name
/// * `target_headcount` - Promised positions, if contracted
/// * `country_code` - ISO country used for holiday lookups
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_site(
    conn: &mut SqliteConnection,
    name: &str,
    target_headcount: Option<u32>,
    country_code: &str,
) -> Result<SiteId, PersistenceError> {
    let target: Option<i32> = target_headcount
        .map(|target| index_to_db(target, "target_headcount"))
        .transpose()?;

    diesel::insert_into(work_sites::table)
        .values((
            work_sites::name.eq(name),
            work_sites::target_headcount.eq(target),
            work_sites::country_code.eq(country_code),
            work_sites::is_active.eq(1),
        ))
        .execute(conn)?;

    let site_id: i64 = get_last_insert_rowid(conn)?;
    info!(site_id, name, "Created work site");
    Ok(SiteId::new(site_id))
}

/// Creates a role.
///
/// # Errors
///
/// Returns an error if the insert fails or the name is already taken.
pub fn create_role(conn: &mut SqliteConnection, name: &str) -> Result<RoleId, PersistenceError> {
    diesel::insert_into(roles::table)
        .values(roles::name.eq(name))
        .execute(conn)?;

    let role_id: i64 = get_last_insert_rowid(conn)?;
    debug!(role_id, name, "Created role");
    Ok(RoleId::new(role_id))
}

/// Creates an employee. The identifier carried by `employee` is ignored;
/// the store assigns a fresh one.
///
/// # Errors
///
/// Returns an error if the insert fails or the site or role does not exist.
pub fn create_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<EmployeeId, PersistenceError> {
    let active_from: Option<String> = employee.active_from.map(format_date).transpose()?;
    let active_until: Option<String> = employee.active_until.map(format_date).transpose()?;

    diesel::insert_into(employees::table)
        .values((
            employees::given_name.eq(&employee.given_name),
            employees::surname.eq(&employee.surname),
            employees::document.eq(&employee.document),
            employees::site_id.eq(employee.site_id.value()),
            employees::role_id.eq(employee.role_id.value()),
            employees::status.eq(employee.status.as_str()),
            employees::active_from.eq(active_from),
            employees::active_until.eq(active_until),
        ))
        .execute(conn)?;

    let employee_id: i64 = get_last_insert_rowid(conn)?;
    debug!(employee_id, site_id = employee.site_id.value(), "Created employee");
    Ok(EmployeeId::new(employee_id))
}

/// Stores a pattern matrix and all of its defined cells.
///
/// # Errors
///
/// Returns an error if any insert fails; nothing is stored in that case.
pub fn create_matrix(
    conn: &mut SqliteConnection,
    matrix: &PatternMatrix,
) -> Result<MatrixId, PersistenceError> {
    let cells: Vec<PatternCell> = matrix.cells();

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(pattern_matrices::table)
            .values((
                pattern_matrices::name.eq(matrix.name()),
                pattern_matrices::rotation_type.eq(matrix.rotation_type().as_str()),
            ))
            .execute(conn)?;
        let matrix_id: i64 = get_last_insert_rowid(conn)?;

        let rows: Vec<NewPatternCellRow<'_>> = cells
            .iter()
            .map(|cell| {
                Ok(NewPatternCellRow {
                    matrix_id,
                    row_index: index_to_db(cell.row, "row_index")?,
                    column_index: index_to_db(cell.column, "column_index")?,
                    code: cell.code.as_str(),
                })
            })
            .collect::<Result<Vec<_>, PersistenceError>>()?;

        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            diesel::insert_into(pattern_cells::table)
                .values(chunk)
                .execute(conn)?;
        }

        info!(
            matrix_id,
            name = matrix.name(),
            rows = matrix.row_count(),
            columns = matrix.column_count(),
            "Stored pattern matrix"
        );
        Ok(MatrixId::new(matrix_id))
    })
}
