// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::shift::ShiftToken;
use crate::types::{BrigadeId, EmployeeId, ShiftChangeRequestId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Lifecycle state of a shift-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShiftChangeState {
    /// Both employees agreed; awaiting processing.
    #[default]
    AcceptedByEmployees,
    /// Under review by an approver.
    InProcess,
    /// Approved; the four ledger records exist.
    Accepted,
    /// Refused.
    Rejected,
}

impl ShiftChangeState {
    /// Converts this state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AcceptedByEmployees => "AcceptedByEmployees",
            Self::InProcess => "InProcess",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// The state field stays administratively editable, so any change to a
    /// different state is accepted. Only entering and leaving `Accepted` has
    /// ledger effects.
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        *self != target
    }
}

impl FromStr for ShiftChangeState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "").as_str() {
            "acceptedbyemployees" | "aceptadoporempleados" => Ok(Self::AcceptedByEmployees),
            "inprocess" | "entramite" => Ok(Self::InProcess),
            "accepted" | "aceptado" => Ok(Self::Accepted),
            "rejected" | "rechazado" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidShiftChangeState(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftChangeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fields of a bilateral brigade swap between two employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftChangeDetails {
    /// First employee.
    pub employee1_id: EmployeeId,
    /// Second employee.
    pub employee2_id: EmployeeId,
    /// Brigade of the first employee, snapshotted at creation.
    pub brigade1_id: BrigadeId,
    /// Brigade of the second employee, snapshotted at creation.
    pub brigade2_id: BrigadeId,
    /// Swap date.
    pub date: Date,
    /// Optional secondary date recorded with the request.
    pub secondary_date: Option<Date>,
    /// Swap window.
    pub shift: ShiftToken,
    /// Free-text reason.
    pub reason: String,
}

/// A persisted shift-change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftChangeRequest {
    /// The canonical identifier.
    pub shift_change_request_id: ShiftChangeRequestId,
    /// The request fields.
    pub details: ShiftChangeDetails,
    /// Current state.
    pub state: ShiftChangeState,
}

impl ShiftChangeRequest {
    /// Whether the swap is accepted and its ledger records exist.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.state == ShiftChangeState::Accepted
    }
}
