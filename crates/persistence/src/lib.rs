// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Rota shift scheduler.
//!
//! Stores the site directory, pattern matrices, scheduling windows, their
//! assignments and the audit timeline in `SQLite` through Diesel.
//!
//! ## Storage model
//!
//! - Migrations are embedded and applied on every open
//! - Foreign keys are enforced and verified at startup
//! - Dates are stored as ISO-8601 `YYYY-MM-DD` text
//! - Every transition is written in a single transaction
//!
//! Audit events are appended separately, after the transition that produced
//! them has committed.
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives each caller an isolated shared-cache
//! in-memory database, so tests never touch the filesystem.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use rota::{ScheduleContext, TransitionResult, WindowState};
use rota_audit::{AuditEvent, AuditSink, AuditWriteError};
use rota_domain::{
    Assignment, Employee, EmployeeId, MatrixId, PatternMatrix, RoleId, SchedulingWindow, SiteId,
    WindowId, WorkSite,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{format_date, parse_date};
pub use error::PersistenceError;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
    database_url: String,
    file_backed: bool,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            database_url: shared_memory_url,
            file_backed: false,
        })
    }

    /// Creates a new persistence adapter backed by a database file.
    ///
    /// The file is created if missing and switched to WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the database cannot
    /// be initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            database_url: path_str.to_string(),
            file_backed: true,
        })
    }

    /// Opens a second handle onto the same database.
    ///
    /// An in-memory database lives as long as any of its handles, so the
    /// returned handle sees every write made through this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the new connection cannot be initialized.
    pub fn reopen(&self) -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&self.database_url)?;
        if self.file_backed {
            backend::sqlite::enable_wal_mode(&mut conn)?;
        }
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            database_url: self.database_url.clone(),
            file_backed: self.file_backed,
        })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if enforcement is off or cannot be checked.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ------------------------------------------------------------------
    // Directory
    // ------------------------------------------------------------------

    /// Creates a work site.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_site(
        &mut self,
        name: &str,
        target_headcount: Option<u32>,
        country_code: &str,
    ) -> Result<SiteId, PersistenceError> {
        mutations::directory::create_site(&mut self.conn, name, target_headcount, country_code)
    }

    /// Creates a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or the name is taken.
    pub fn create_role(&mut self, name: &str) -> Result<RoleId, PersistenceError> {
        mutations::directory::create_role(&mut self.conn, name)
    }

    /// Creates an employee and returns the store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_employee(&mut self, employee: &Employee) -> Result<EmployeeId, PersistenceError> {
        mutations::directory::create_employee(&mut self.conn, employee)
    }

    /// Stores a pattern matrix with its cells.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub fn create_matrix(&mut self, matrix: &PatternMatrix) -> Result<MatrixId, PersistenceError> {
        mutations::directory::create_matrix(&mut self.conn, matrix)
    }

    /// Retrieves a work site.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the site does not exist.
    pub fn get_site(&mut self, site_id: SiteId) -> Result<WorkSite, PersistenceError> {
        queries::directory::get_site(&mut self.conn, site_id)
    }

    /// Retrieves one employee.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub fn get_employee(&mut self, employee_id: EmployeeId) -> Result<Employee, PersistenceError> {
        queries::directory::get_employee(&mut self.conn, employee_id)
    }

    /// Retrieves every employee of a site.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_site_employees(&mut self, site_id: SiteId) -> Result<Vec<Employee>, PersistenceError> {
        queries::directory::list_site_employees(&mut self.conn, site_id)
    }

    /// Retrieves a pattern matrix.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the matrix does not exist.
    pub fn get_matrix(&mut self, matrix_id: MatrixId) -> Result<PatternMatrix, PersistenceError> {
        queries::directory::get_matrix(&mut self.conn, matrix_id)
    }

    /// Loads the site, matrix and roster a window is scheduled against.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three cannot be loaded.
    pub fn load_schedule_context(
        &mut self,
        site_id: SiteId,
        matrix_id: MatrixId,
    ) -> Result<ScheduleContext, PersistenceError> {
        let site: WorkSite = self.get_site(site_id)?;
        let matrix: PatternMatrix = self.get_matrix(matrix_id)?;
        let roster: Vec<Employee> = self.list_site_employees(site_id)?;
        Ok(ScheduleContext::new(site, matrix, roster))
    }

    // ------------------------------------------------------------------
    // Windows
    // ------------------------------------------------------------------

    /// Retrieves a window, active or not.
    ///
    /// # Errors
    ///
    /// Returns `WindowNotFound` if the window does not exist.
    pub fn get_window(&mut self, window_id: WindowId) -> Result<SchedulingWindow, PersistenceError> {
        queries::schedule::get_window(&mut self.conn, window_id)
    }

    /// Retrieves the assignments of a window ordered by date, then employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_assignments(
        &mut self,
        window_id: WindowId,
    ) -> Result<Vec<Assignment>, PersistenceError> {
        queries::schedule::get_assignments(&mut self.conn, window_id)
    }

    /// Counts the assignments of a window.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_assignments(&mut self, window_id: WindowId) -> Result<i64, PersistenceError> {
        queries::schedule::count_assignments(&mut self.conn, window_id)
    }

    /// Loads a window together with its assignments.
    ///
    /// # Errors
    ///
    /// Returns `WindowNotFound` if the window does not exist.
    pub fn get_window_state(&mut self, window_id: WindowId) -> Result<WindowState, PersistenceError> {
        let window: SchedulingWindow = self.get_window(window_id)?;
        let assignments: Vec<Assignment> = self.get_assignments(window_id)?;
        Ok(WindowState::new(window, assignments))
    }

    /// Lists windows, optionally for one site. Deactivated windows are only
    /// included on request.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_windows(
        &mut self,
        site_id: Option<SiteId>,
        include_inactive: bool,
    ) -> Result<Vec<SchedulingWindow>, PersistenceError> {
        queries::schedule::list_windows(&mut self.conn, site_id, include_inactive)
    }

    /// Stores a newly created window and its generated assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is stored in that case.
    pub fn persist_window_creation(
        &mut self,
        result: &TransitionResult,
    ) -> Result<WindowId, PersistenceError> {
        mutations::schedule::persist_window_creation(&mut self.conn, result)
    }

    /// Applies a computed transition to an existing window.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; the store is unchanged in that case.
    pub fn persist_transition(
        &mut self,
        window_id: WindowId,
        result: &TransitionResult,
    ) -> Result<(), PersistenceError> {
        mutations::schedule::persist_transition(&mut self.conn, window_id, result)
    }

    // ------------------------------------------------------------------
    // Audit
    // ------------------------------------------------------------------

    /// Appends an audit event and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized or stored.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the event does not exist.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the audit timeline of a window, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_window_audit(
        &mut self,
        window_id: WindowId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_window_audit(&mut self.conn, window_id)
    }
}

impl AuditSink for Persistence {
    fn append(&mut self, event: &AuditEvent) -> Result<i64, AuditWriteError> {
        self.persist_audit_event(event).map_err(|e| {
            warn!(error = %e, action = %event.action.name, "Audit write failed");
            AuditWriteError::WriteFailed(e.to_string())
        })
    }
}
