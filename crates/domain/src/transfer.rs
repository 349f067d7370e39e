// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::quantity::Quantity;
use crate::shift::ShiftToken;
use crate::types::{BrigadeId, EmployeeId, TransferId};
use crate::validation::validate_hours;
use serde::{Deserialize, Serialize};
use time::Date;

/// The editable fields of a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferDetails {
    /// The employee being relocated.
    pub employee_id: EmployeeId,
    /// The brigade the employee leaves.
    pub origin_brigade_id: BrigadeId,
    /// The brigade the employee covers.
    pub destination_brigade_id: BrigadeId,
    /// Date of the transfer.
    pub date: Date,
    /// Shift window.
    pub shift: ShiftToken,
    /// Hour cost added to the employee's transferred-hours counter.
    pub hours: Quantity,
}

impl TransferDetails {
    /// Validates the transfer fields.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Origin and destination are the same brigade
    /// - Hours are below 0.01
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.origin_brigade_id == self.destination_brigade_id {
            return Err(DomainError::SameBrigade);
        }
        validate_hours(self.hours)
    }
}

/// A persisted transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// The canonical identifier.
    pub transfer_id: TransferId,
    /// The transfer fields.
    pub details: TransferDetails,
}
