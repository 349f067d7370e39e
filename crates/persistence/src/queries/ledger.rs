// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment ledger queries.
//!
//! Dates are stored as ISO text, so lexical comparison is chronological.

use diesel::dsl::max;
use diesel::prelude::*;
use diesel::SqliteConnection;
use guardia_domain::{
    AssignmentRecord, AssignmentSource, EmployeeId, format_date, most_recent, sort_same_day,
};
use num_traits::ToPrimitive;
use time::Date;

use crate::data_models::AssignmentRow;
use crate::diesel_schema::assignments;
use crate::error::PersistenceError;

fn into_records(rows: Vec<AssignmentRow>) -> Result<Vec<AssignmentRecord>, PersistenceError> {
    rows.into_iter().map(AssignmentRecord::try_from).collect()
}

/// Retrieves an employee's records on one date, Morning to Night then
/// insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn records_on(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    date: Date,
) -> Result<Vec<AssignmentRecord>, PersistenceError> {
    let rows: Vec<AssignmentRow> = assignments::table
        .filter(assignments::employee_id.eq(employee_id.value()))
        .filter(assignments::date.eq(format_date(date)?))
        .select(AssignmentRow::as_select())
        .load(conn)?;
    let mut records: Vec<AssignmentRecord> = into_records(rows)?;
    sort_same_day(&mut records);
    Ok(records)
}

/// Retrieves the employee's most recent record dated on or before `date`.
///
/// Only the latest populated day is loaded; ties within it are broken by
/// shift priority, then insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn latest_on_or_before(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    date: Date,
) -> Result<Option<AssignmentRecord>, PersistenceError> {
    let latest_day: Option<String> = assignments::table
        .filter(assignments::employee_id.eq(employee_id.value()))
        .filter(assignments::date.le(format_date(date)?))
        .select(max(assignments::date))
        .first::<Option<String>>(conn)?;

    let Some(latest_day) = latest_day else {
        return Ok(None);
    };

    let rows: Vec<AssignmentRow> = assignments::table
        .filter(assignments::employee_id.eq(employee_id.value()))
        .filter(assignments::date.eq(latest_day))
        .select(AssignmentRow::as_select())
        .load(conn)?;
    let records: Vec<AssignmentRecord> = into_records(rows)?;
    Ok(most_recent(&records).cloned())
}

/// Retrieves every record owned by a source, in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn records_for_source(
    conn: &mut SqliteConnection,
    source: AssignmentSource,
) -> Result<Vec<AssignmentRecord>, PersistenceError> {
    let query = assignments::table
        .select(AssignmentRow::as_select())
        .order(assignments::assignment_id.asc())
        .into_boxed();
    let query = match source {
        AssignmentSource::Leave(id) => query.filter(assignments::leave_request_id.eq(id.value())),
        AssignmentSource::ShiftChange(id) => {
            query.filter(assignments::shift_change_request_id.eq(id.value()))
        }
        AssignmentSource::Transfer(id) => query.filter(assignments::transfer_id.eq(id.value())),
        AssignmentSource::Roster | AssignmentSource::Requirement => {
            query.filter(assignments::source.eq(source.tag()))
        }
    };
    into_records(query.load(conn)?)
}

/// Retrieves an employee's full ledger in chronological order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn records_for_employee(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Vec<AssignmentRecord>, PersistenceError> {
    let rows: Vec<AssignmentRow> = assignments::table
        .filter(assignments::employee_id.eq(employee_id.value()))
        .select(AssignmentRow::as_select())
        .load(conn)?;
    let mut records: Vec<AssignmentRecord> = into_records(rows)?;
    records.sort_by(AssignmentRecord::recency_cmp);
    Ok(records)
}

/// Counts the records in the ledger.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_records(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let count: i64 = assignments::table.count().get_result(conn)?;
    count
        .to_usize()
        .ok_or_else(|| PersistenceError::ReconstructionError(format!("Invalid count: {count}")))
}
