// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the Guardia engine.
//!
//! This crate stores the brigade and employee directory, the guard calendar,
//! leave/shift-change/transfer requests, the append-only assignment ledger
//! and the audit log. Workflow outcomes planned by the `guardia` crate are
//! applied atomically through [`Persistence::commit`].
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller its own shared-cache
//! in-memory database, so tests never observe each other's writes.

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
use guardia::WorkflowOutcome;
use guardia_audit::AuditEvent;
use guardia_domain::{
    AssignmentRecord, AssignmentSource, Brigade, BrigadeId, Employee, EmployeeBalances,
    EmployeeId, LeaveRequest, LeaveRequestId, Role, ShiftChangeRequest, ShiftChangeRequestId,
    Transfer, TransferId,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::PersistenceBackend;
pub use error::PersistenceError;
pub use mutations::CommitReceipt;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter backed by a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the database cannot
    /// be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Workflow commits
    // ========================================================================

    /// Applies a planned workflow outcome atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; the database is left unchanged.
    pub fn commit(&mut self, outcome: &WorkflowOutcome) -> Result<CommitReceipt, PersistenceError> {
        mutations::commit_outcome(&mut self.conn, outcome)
    }

    // ========================================================================
    // Directory
    // ========================================================================

    /// Creates a brigade.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the insert fails.
    pub fn create_brigade(
        &mut self,
        name: &str,
        park_id: Option<i64>,
        is_special: bool,
    ) -> Result<BrigadeId, PersistenceError> {
        mutations::directory::create_brigade(&mut self.conn, name, park_id, is_special)
    }

    /// Returns the named brigade's id, creating it as special if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or insert fails.
    pub fn ensure_special_brigade(&mut self, name: &str) -> Result<BrigadeId, PersistenceError> {
        mutations::directory::ensure_special_brigade(&mut self.conn, name)
    }

    /// Retrieves a brigade by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the brigade does not exist.
    pub fn get_brigade(&mut self, brigade_id: BrigadeId) -> Result<Brigade, PersistenceError> {
        queries::directory::get_brigade(&mut self.conn, brigade_id)
    }

    /// Looks up a brigade by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_brigade_by_name(&mut self, name: &str) -> Result<Option<Brigade>, PersistenceError> {
        queries::directory::find_brigade_by_name(&mut self.conn, name)
    }

    /// Lists all brigades.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_brigades(&mut self) -> Result<Vec<Brigade>, PersistenceError> {
        queries::directory::list_brigades(&mut self.conn)
    }

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_employee(
        &mut self,
        name: &str,
        role: Role,
        home_brigade_id: Option<BrigadeId>,
        balances: &EmployeeBalances,
    ) -> Result<EmployeeId, PersistenceError> {
        mutations::directory::create_employee(&mut self.conn, name, role, home_brigade_id, balances)
    }

    /// Retrieves an employee by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist.
    pub fn get_employee(&mut self, employee_id: EmployeeId) -> Result<Employee, PersistenceError> {
        queries::directory::get_employee(&mut self.conn, employee_id)
    }

    /// Lists employees holding any of the given roles.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_employees_with_roles(
        &mut self,
        roles: &[Role],
    ) -> Result<Vec<Employee>, PersistenceError> {
        queries::directory::list_employees_with_roles(&mut self.conn, roles)
    }

    /// Schedules a guard for a brigade on a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn schedule_guard_day(
        &mut self,
        brigade_id: BrigadeId,
        date: Date,
    ) -> Result<(), PersistenceError> {
        mutations::directory::schedule_guard_day(&mut self.conn, brigade_id, date)
    }

    /// Names of brigades on guard on any of the given dates.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn guard_brigade_names(&mut self, dates: &[Date]) -> Result<Vec<String>, PersistenceError> {
        queries::directory::guard_brigade_names(&mut self.conn, dates)
    }

    // ========================================================================
    // Ledger
    // ========================================================================

    /// The employee's most recent ledger record on or before a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn latest_assignment(
        &mut self,
        employee_id: EmployeeId,
        date: Date,
    ) -> Result<Option<AssignmentRecord>, PersistenceError> {
        queries::ledger::latest_on_or_before(&mut self.conn, employee_id, date)
    }

    /// The employee's records on one date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn assignments_on(
        &mut self,
        employee_id: EmployeeId,
        date: Date,
    ) -> Result<Vec<AssignmentRecord>, PersistenceError> {
        queries::ledger::records_on(&mut self.conn, employee_id, date)
    }

    /// Records owned by one source.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn assignments_for_source(
        &mut self,
        source: AssignmentSource,
    ) -> Result<Vec<AssignmentRecord>, PersistenceError> {
        queries::ledger::records_for_source(&mut self.conn, source)
    }

    /// The employee's full ledger in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn assignments_for_employee(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Vec<AssignmentRecord>, PersistenceError> {
        queries::ledger::records_for_employee(&mut self.conn, employee_id)
    }

    /// Number of records in the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_assignments(&mut self) -> Result<usize, PersistenceError> {
        queries::ledger::count_records(&mut self.conn)
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Retrieves a leave request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist.
    pub fn get_leave_request(
        &mut self,
        leave_request_id: LeaveRequestId,
    ) -> Result<LeaveRequest, PersistenceError> {
        queries::requests::get_leave_request(&mut self.conn, leave_request_id)
    }

    /// Lists an employee's leave requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_leave_requests(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Vec<LeaveRequest>, PersistenceError> {
        queries::requests::list_leave_requests_for_employee(&mut self.conn, employee_id)
    }

    /// Lists confirmed leave requests overlapping a date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_confirmed_leaves(
        &mut self,
        from: Date,
        to: Date,
    ) -> Result<Vec<LeaveRequest>, PersistenceError> {
        queries::requests::list_confirmed_leaves_overlapping(&mut self.conn, from, to)
    }

    /// Retrieves a shift-change request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist.
    pub fn get_shift_change_request(
        &mut self,
        shift_change_request_id: ShiftChangeRequestId,
    ) -> Result<ShiftChangeRequest, PersistenceError> {
        queries::requests::get_shift_change_request(&mut self.conn, shift_change_request_id)
    }

    /// Retrieves a transfer.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer does not exist.
    pub fn get_transfer(&mut self, transfer_id: TransferId) -> Result<Transfer, PersistenceError> {
        queries::requests::get_transfer(&mut self.conn, transfer_id)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Retrieves an audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves an employee's audit timeline, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_timeline(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn, employee_id)
    }

    /// Retrieves every audit event, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_audit_events(&mut self) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_all_audit_events(&mut self.conn)
    }
}
