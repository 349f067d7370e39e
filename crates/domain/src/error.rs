// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::leave::LeaveType;
use crate::quantity::Quantity;
use crate::types::EmployeeId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The shift token is not one of the six recognised tokens.
    InvalidShiftToken(String),
    /// A single-shift value could not be parsed.
    InvalidShift(String),
    /// The leave type is not recognised.
    InvalidLeaveType(String),
    /// The leave request state is not recognised.
    InvalidLeaveState(String),
    /// The shift-change state is not recognised.
    InvalidShiftChangeState(String),
    /// The employee role is not recognised.
    InvalidRole(String),
    /// The assignment kind or source is not recognised.
    InvalidAssignmentKind(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The end date precedes the start date.
    InvalidDateRange {
        /// The start of the range.
        start_date: time::Date,
        /// The end of the range.
        end_date: time::Date,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A shift-scoped leave type was requested without a shift.
    MissingShift(LeaveType),
    /// An hour-scoped leave type was requested without hours.
    MissingHours(LeaveType),
    /// Hours must be a finite value of at least 0.01.
    InvalidHours(String),
    /// An amount is not a decimal with at most two fractional digits.
    InvalidQuantity(String),
    /// The employee does not have enough balance for the leave.
    InsufficientBalance {
        /// The leave type being confirmed.
        leave_type: LeaveType,
        /// The quantity the leave would debit.
        requested: Quantity,
        /// The quantity currently available.
        available: Quantity,
    },
    /// No prior brigade and no home brigade could be resolved for the employee.
    NoOriginBrigade(EmployeeId),
    /// No brigade assignment could be resolved for a shift-change participant.
    NoBrigadeAssignment {
        /// The employee without an assignment.
        employee_id: EmployeeId,
        /// The date that was resolved against.
        date: time::Date,
    },
    /// A request state transition is not permitted.
    InvalidStateTransition {
        /// The current state.
        from: String,
        /// The requested state.
        to: String,
    },
    /// No synthetic brigade is configured for the leave type.
    MissingLeaveBrigade(LeaveType),
    /// A shift change names the same employee twice.
    SameEmployee(EmployeeId),
    /// A transfer or requirement targets the brigade it starts from.
    SameBrigade,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShiftToken(token) => write!(f, "Invalid shift token: '{token}'"),
            Self::InvalidShift(value) => write!(f, "Invalid shift: '{value}'"),
            Self::InvalidLeaveType(value) => write!(f, "Invalid leave type: '{value}'"),
            Self::InvalidLeaveState(value) => write!(f, "Invalid leave request state: '{value}'"),
            Self::InvalidShiftChangeState(value) => {
                write!(f, "Invalid shift change state: '{value}'")
            }
            Self::InvalidRole(value) => write!(f, "Invalid employee role: '{value}'"),
            Self::InvalidAssignmentKind(value) => write!(f, "Invalid assignment kind: '{value}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Invalid date range: end date {end_date} is before start date {start_date}"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::MissingShift(leave_type) => {
                write!(f, "Leave type '{leave_type}' requires a shift")
            }
            Self::MissingHours(leave_type) => {
                write!(f, "Leave type '{leave_type}' requires a number of hours")
            }
            Self::InvalidHours(hours) => {
                write!(f, "Invalid hours: {hours}. Must be at least 0.01")
            }
            Self::InvalidQuantity(value) => write!(f, "Invalid quantity: '{value}'"),
            Self::InsufficientBalance {
                leave_type,
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient balance for '{leave_type}': requested {requested}, available {available}"
                )
            }
            Self::NoOriginBrigade(employee_id) => {
                write!(
                    f,
                    "No origin brigade could be resolved for employee {employee_id}"
                )
            }
            Self::NoBrigadeAssignment { employee_id, date } => {
                write!(
                    f,
                    "Employee {employee_id} has no brigade assignment on or before {date}"
                )
            }
            Self::InvalidStateTransition { from, to } => {
                write!(f, "Cannot transition from '{from}' to '{to}'")
            }
            Self::MissingLeaveBrigade(leave_type) => {
                write!(f, "No brigade is configured for leave type '{leave_type}'")
            }
            Self::SameEmployee(employee_id) => {
                write!(
                    f,
                    "A shift change needs two different employees, got {employee_id} twice"
                )
            }
            Self::SameBrigade => {
                write!(f, "Origin and destination brigades must differ")
            }
        }
    }
}

impl std::error::Error for DomainError {}
