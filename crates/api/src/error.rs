// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::config::ConfigError;
use guardia::CoreError;
use guardia_domain::DomainError;
use guardia_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The engine configuration could not be loaded or resolved.
    Configuration {
        /// A description of the configuration problem.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Configuration { message } => {
                write!(f, "Configuration error: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// Validation failures become `InvalidInput` naming the offending field.
/// Business-rule rejections become `DomainRuleViolation` so callers can tell
/// an insufficient balance apart from a missing brigade.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidShiftToken(token) => ApiError::InvalidInput {
            field: String::from("shift"),
            message: format!("'{token}' is not a recognised shift token"),
        },
        DomainError::InvalidShift(value) => ApiError::InvalidInput {
            field: String::from("shift"),
            message: format!("'{value}' is not a recognised shift"),
        },
        DomainError::InvalidLeaveType(value) => ApiError::InvalidInput {
            field: String::from("leave_type"),
            message: format!("'{value}' is not a recognised leave type"),
        },
        DomainError::InvalidLeaveState(value) => ApiError::InvalidInput {
            field: String::from("state"),
            message: format!("'{value}' is not a recognised leave request state"),
        },
        DomainError::InvalidShiftChangeState(value) => ApiError::InvalidInput {
            field: String::from("state"),
            message: format!("'{value}' is not a recognised shift change state"),
        },
        DomainError::InvalidRole(value) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("'{value}' is not a recognised role"),
        },
        DomainError::InvalidAssignmentKind(value) => ApiError::Internal {
            message: format!("Stored assignment has an unrecognised kind or source: {value}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::InvalidDateRange {
            start_date,
            end_date,
        } => ApiError::InvalidInput {
            field: String::from("end_date"),
            message: format!("End date {end_date} precedes start date {start_date}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow: {operation}"),
        },
        DomainError::MissingShift(leave_type) => ApiError::InvalidInput {
            field: String::from("shift"),
            message: format!("{leave_type} leave requires a shift"),
        },
        DomainError::MissingHours(leave_type) => ApiError::InvalidInput {
            field: String::from("hours"),
            message: format!("{leave_type} leave requires hours"),
        },
        DomainError::InvalidHours(hours) => ApiError::InvalidInput {
            field: String::from("hours"),
            message: format!("Hours must be at least 0.01, got {hours}"),
        },
        DomainError::InvalidQuantity(value) => ApiError::InvalidInput {
            field: String::from("balances"),
            message: format!("'{value}' is not an amount with at most two decimals"),
        },
        DomainError::InsufficientBalance {
            leave_type,
            requested,
            available,
        } => ApiError::DomainRuleViolation {
            rule: String::from("insufficient_balance"),
            message: format!(
                "{leave_type} leave needs {requested} but only {available} is available"
            ),
        },
        DomainError::NoOriginBrigade(employee_id) => ApiError::DomainRuleViolation {
            rule: String::from("no_origin_brigade"),
            message: format!(
                "Employee {employee_id} has no prior assignment and no home brigade"
            ),
        },
        DomainError::NoBrigadeAssignment { employee_id, date } => {
            ApiError::DomainRuleViolation {
                rule: String::from("no_brigade_assignment"),
                message: format!("Employee {employee_id} has no brigade assignment on {date}"),
            }
        }
        DomainError::InvalidStateTransition { from, to } => ApiError::DomainRuleViolation {
            rule: String::from("state_transition"),
            message: format!("Cannot transition from {from} to {to}"),
        },
        DomainError::MissingLeaveBrigade(leave_type) => ApiError::Configuration {
            message: format!("No brigade is configured for {leave_type} leave"),
        },
        DomainError::SameEmployee(employee_id) => ApiError::DomainRuleViolation {
            rule: String::from("distinct_employees"),
            message: format!("Employee {employee_id} cannot swap shifts with themselves"),
        },
        DomainError::SameBrigade => ApiError::DomainRuleViolation {
            rule: String::from("distinct_brigades"),
            message: String::from("Origin and destination brigade must differ"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Lookups that miss become `ResourceNotFound`; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EmployeeNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {id} does not exist"),
        },
        PersistenceError::BrigadeNotFound(brigade) => ApiError::ResourceNotFound {
            resource_type: String::from("Brigade"),
            message: format!("Brigade {brigade} does not exist"),
        },
        PersistenceError::LeaveRequestNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Leave request"),
            message: format!("Leave request {id} does not exist"),
        },
        PersistenceError::ShiftChangeNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Shift change"),
            message: format!("Shift change request {id} does not exist"),
        },
        PersistenceError::TransferNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Transfer"),
            message: format!("Transfer {id} does not exist"),
        },
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("Audit event {id} does not exist"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::StaleState(message) => ApiError::DomainRuleViolation {
            rule: String::from("concurrent_transition"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
