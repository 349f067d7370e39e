// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave, shift-change and transfer lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;
use guardia_domain::{
    EmployeeId, LeaveRequest, LeaveRequestId, LeaveState, ShiftChangeRequest,
    ShiftChangeRequestId, Transfer, TransferId, format_date,
};
use time::Date;

use crate::data_models::{LeaveRequestRow, ShiftChangeRow, TransferRow};
use crate::diesel_schema::{leave_requests, shift_change_requests, transfers};
use crate::error::PersistenceError;

/// Retrieves a leave request by id.
///
/// # Errors
///
/// Returns `LeaveRequestNotFound` if no such request exists.
pub fn get_leave_request(
    conn: &mut SqliteConnection,
    leave_request_id: LeaveRequestId,
) -> Result<LeaveRequest, PersistenceError> {
    let row: LeaveRequestRow = leave_requests::table
        .filter(leave_requests::leave_request_id.eq(leave_request_id.value()))
        .select(LeaveRequestRow::as_select())
        .first::<LeaveRequestRow>(conn)
        .optional()?
        .ok_or(PersistenceError::LeaveRequestNotFound(
            leave_request_id.value(),
        ))?;
    LeaveRequest::try_from(row)
}

/// Lists an employee's leave requests in creation order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_leave_requests_for_employee(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Vec<LeaveRequest>, PersistenceError> {
    leave_requests::table
        .filter(leave_requests::employee_id.eq(employee_id.value()))
        .order(leave_requests::leave_request_id.asc())
        .select(LeaveRequestRow::as_select())
        .load::<LeaveRequestRow>(conn)?
        .into_iter()
        .map(LeaveRequest::try_from)
        .collect()
}

/// Lists confirmed leave requests of any employee that overlap `[from, to]`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_confirmed_leaves_overlapping(
    conn: &mut SqliteConnection,
    from: Date,
    to: Date,
) -> Result<Vec<LeaveRequest>, PersistenceError> {
    leave_requests::table
        .filter(leave_requests::state.eq(LeaveState::Confirmed.as_str()))
        .filter(leave_requests::start_date.le(format_date(to)?))
        .filter(leave_requests::end_date.ge(format_date(from)?))
        .order(leave_requests::leave_request_id.asc())
        .select(LeaveRequestRow::as_select())
        .load::<LeaveRequestRow>(conn)?
        .into_iter()
        .map(LeaveRequest::try_from)
        .collect()
}

/// Retrieves a shift-change request by id.
///
/// # Errors
///
/// Returns `ShiftChangeNotFound` if no such request exists.
pub fn get_shift_change_request(
    conn: &mut SqliteConnection,
    shift_change_request_id: ShiftChangeRequestId,
) -> Result<ShiftChangeRequest, PersistenceError> {
    let row: ShiftChangeRow = shift_change_requests::table
        .filter(shift_change_requests::shift_change_request_id.eq(shift_change_request_id.value()))
        .select(ShiftChangeRow::as_select())
        .first::<ShiftChangeRow>(conn)
        .optional()?
        .ok_or(PersistenceError::ShiftChangeNotFound(
            shift_change_request_id.value(),
        ))?;
    ShiftChangeRequest::try_from(row)
}

/// Retrieves a transfer by id.
///
/// # Errors
///
/// Returns `TransferNotFound` if no such transfer exists.
pub fn get_transfer(
    conn: &mut SqliteConnection,
    transfer_id: TransferId,
) -> Result<Transfer, PersistenceError> {
    let row: TransferRow = transfers::table
        .filter(transfers::transfer_id.eq(transfer_id.value()))
        .select(TransferRow::as_select())
        .first::<TransferRow>(conn)
        .optional()?
        .ok_or(PersistenceError::TransferNotFound(transfer_id.value()))?;
    Transfer::try_from(row)
}
