// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod leave;
mod outcome;
mod requirement;
mod shift_change;
mod transfer;

#[cfg(test)]
mod tests;

use guardia_domain::{AssignmentRecord, BrigadeId, DomainError, Employee};

// Re-export public types and functions
pub use error::CoreError;
pub use leave::{LeaveContext, create_leave, delete_leave, transition_leave};
pub use outcome::{BalanceWrite, EntityWrite, RecordOwner, WorkflowOutcome, balances_snapshot};
pub use requirement::{assign_to_brigade, require_firefighter};
pub use shift_change::{
    ShiftChangeProposal, create_shift_change, delete_shift_change, transition_shift_change,
};
pub use transfer::{create_transfer, delete_transfer, update_transfer};

/// Resolves the brigade an employee is leaving from.
///
/// Uses the destination of the latest ledger record when there is one, and
/// the employee's home brigade otherwise.
///
/// # Errors
///
/// Returns `DomainError::NoOriginBrigade` if neither is available.
pub fn resolve_origin(
    employee: &Employee,
    latest: Option<&AssignmentRecord>,
) -> Result<BrigadeId, DomainError> {
    latest
        .map(|record| record.destination_brigade_id)
        .or(employee.home_brigade_id)
        .ok_or(DomainError::NoOriginBrigade(employee.employee_id))
}
