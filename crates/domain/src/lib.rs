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

mod assignment;
mod availability;
mod error;
mod leave;
mod leave_brigades;
mod quantity;
mod shift;
mod shift_change;
mod transfer;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use assignment::{
    AssignmentKind, AssignmentPair, AssignmentRecord, AssignmentSource, PlannedAssignment,
    most_recent, sort_same_day,
};
pub use availability::{AvailabilityReason, ExclusionVariant, evaluate};
pub use error::DomainError;
pub use leave::{LeaveDetails, LeaveRequest, LeaveScope, LeaveState, LeaveType};
pub use leave_brigades::LeaveBrigadeMap;
pub use quantity::Quantity;
pub use shift::{Shift, ShiftToken, ShiftTransition, transition, transition_for};
pub use shift_change::{ShiftChangeDetails, ShiftChangeRequest, ShiftChangeState};
pub use transfer::{Transfer, TransferDetails};

// Re-export public types
pub use types::{
    AssignmentId, BalanceAccount, Brigade, BrigadeId, Employee, EmployeeBalances, EmployeeId,
    LeaveRequestId, Role, RoleFilter, ShiftChangeRequestId, TransferId,
};
pub use validation::{
    MIN_HOURS, format_date, hours_from_decimal, inclusive_days, next_day, parse_date,
    previous_day, validate_date_range, validate_hours,
};
