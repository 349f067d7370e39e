// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request types, lifecycle states and balance quantities.

use crate::error::DomainError;
use crate::quantity::Quantity;
use crate::shift::ShiftToken;
use crate::types::{BalanceAccount, EmployeeId, LeaveRequestId};
use crate::validation::{inclusive_days, validate_date_range, validate_hours};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// How a leave type is measured and how it affects availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveScope {
    /// Whole days over a date range. Excludes the employee for every covered day.
    Days,
    /// Jornadas over a shift window. Protects the employee on composite windows.
    Shifts,
    /// Hours, optionally tied to a shift window.
    Hours,
}

/// The kinds of leave an employee can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    /// Vacaciones.
    Vacation,
    /// Módulo.
    Module,
    /// Licencia por jornadas.
    DayLicense,
    /// Asuntos propios.
    PersonalAffairs,
    /// Compensación por grupo especial.
    SpecialGroupCompensation,
    /// Licencia por turnos.
    ShiftLicense,
    /// Horas sindicales.
    UnionHours,
    /// Salidas personales.
    PersonalOuting,
}

impl LeaveType {
    /// Every leave type, in a stable order.
    pub const ALL: [Self; 8] = [
        Self::Vacation,
        Self::Module,
        Self::DayLicense,
        Self::PersonalAffairs,
        Self::SpecialGroupCompensation,
        Self::ShiftLicense,
        Self::UnionHours,
        Self::PersonalOuting,
    ];

    /// Converts this leave type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vacation => "Vacation",
            Self::Module => "Module",
            Self::DayLicense => "DayLicense",
            Self::PersonalAffairs => "PersonalAffairs",
            Self::SpecialGroupCompensation => "SpecialGroupCompensation",
            Self::ShiftLicense => "ShiftLicense",
            Self::UnionHours => "UnionHours",
            Self::PersonalOuting => "PersonalOuting",
        }
    }

    /// Returns how this leave type is measured.
    #[must_use]
    pub const fn scope(&self) -> LeaveScope {
        match self {
            Self::Vacation | Self::Module | Self::DayLicense => LeaveScope::Days,
            Self::PersonalAffairs | Self::SpecialGroupCompensation | Self::ShiftLicense => {
                LeaveScope::Shifts
            }
            Self::UnionHours | Self::PersonalOuting => LeaveScope::Hours,
        }
    }

    /// Returns the balance counter this leave type draws from.
    ///
    /// Licenses are granted without a counter.
    #[must_use]
    pub const fn balance_account(&self) -> Option<BalanceAccount> {
        match self {
            Self::Vacation => Some(BalanceAccount::VacationDays),
            Self::Module => Some(BalanceAccount::ModuleDays),
            Self::PersonalAffairs => Some(BalanceAccount::PersonalAffairsDays),
            Self::SpecialGroupCompensation => Some(BalanceAccount::SpecialGroupCompensationDays),
            Self::UnionHours => Some(BalanceAccount::UnionHours),
            Self::PersonalOuting => Some(BalanceAccount::PersonalOutingHours),
            Self::DayLicense | Self::ShiftLicense => None,
        }
    }

    /// Default name of the synthetic brigade that represents this leave type.
    #[must_use]
    pub const fn default_brigade_name(&self) -> &'static str {
        match self {
            Self::Vacation => "Vacaciones",
            Self::Module => "Modulo",
            Self::DayLicense => "Licencias por jornadas",
            Self::PersonalAffairs => "Asuntos Propios",
            Self::SpecialGroupCompensation => "Compensacion grupo especial",
            Self::ShiftLicense => "Licencias por turnos",
            Self::UnionHours => "Horas sindicales",
            Self::PersonalOuting => "Salidas personales",
        }
    }
}

impl FromStr for LeaveType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .replace(['-', '_'], " ")
            .replace('ó', "o")
            .replace('á', "a");
        match key.as_str() {
            "vacation" | "vacaciones" => Ok(Self::Vacation),
            "module" | "modulo" => Ok(Self::Module),
            "daylicense" | "day license" | "licencias por jornadas" => Ok(Self::DayLicense),
            "personalaffairs" | "personal affairs" | "asuntos propios" => {
                Ok(Self::PersonalAffairs)
            }
            "specialgroupcompensation"
            | "special group compensation"
            | "compensacion grupo especial" => Ok(Self::SpecialGroupCompensation),
            "shiftlicense" | "shift license" | "licencias por turnos" => Ok(Self::ShiftLicense),
            "unionhours" | "union hours" | "horas sindicales" => Ok(Self::UnionHours),
            "personalouting" | "personal outing" | "salidas personales" => {
                Ok(Self::PersonalOuting)
            }
            _ => Err(DomainError::InvalidLeaveType(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeaveState {
    /// Requested by the employee, awaiting an approver.
    #[default]
    Pending,
    /// Approved. Balance debited and ledger pair written.
    Confirmed,
    /// Withdrawn.
    Cancelled,
    /// Refused by the approver.
    Denied,
}

impl LeaveState {
    /// Converts this state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
            Self::Denied => "Denied",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending ⇄ Confirmed, Cancelled, Denied
    /// - Confirmed ⇄ Cancelled, Denied
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed | Self::Cancelled | Self::Denied)
                | (Self::Confirmed, Self::Pending | Self::Cancelled | Self::Denied)
                | (Self::Cancelled | Self::Denied, Self::Pending | Self::Confirmed)
        )
    }
}

impl FromStr for LeaveState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Ok(Self::Pending),
            "confirmed" | "confirmada" => Ok(Self::Confirmed),
            "cancelled" | "canceled" | "cancelada" => Ok(Self::Cancelled),
            "denied" | "denegada" => Ok(Self::Denied),
            _ => Err(DomainError::InvalidLeaveState(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fields an employee supplies when requesting leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDetails {
    /// The requesting employee.
    pub employee_id: EmployeeId,
    /// The leave type.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: Date,
    /// Last day of leave (inclusive).
    pub end_date: Date,
    /// Shift window, required for shift-scoped types.
    pub shift: Option<ShiftToken>,
    /// Hours, required for hour-scoped types.
    pub hours: Option<Quantity>,
}

impl LeaveDetails {
    /// Validates the field combination for the leave type.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The end date precedes the start date
    /// - A shift-scoped type has no shift
    /// - An hour-scoped type has no hours, or hours below 0.01
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_date_range(self.start_date, self.end_date)?;
        match self.leave_type.scope() {
            LeaveScope::Days => Ok(()),
            LeaveScope::Shifts => {
                if self.shift.is_none() {
                    return Err(DomainError::MissingShift(self.leave_type));
                }
                Ok(())
            }
            LeaveScope::Hours => {
                let hours: Quantity = self
                    .hours
                    .ok_or(DomainError::MissingHours(self.leave_type))?;
                validate_hours(hours)
            }
        }
    }

    /// Computes the balance quantity this leave consumes.
    ///
    /// - Day-scoped: the inclusive day span.
    /// - Shift-scoped: shift jornadas times the inclusive day span.
    /// - Hour-scoped: the requested hours.
    ///
    /// The value is derived only from the request's own fields, so a debit and
    /// the matching credit always use the same amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fields are invalid.
    pub fn quantity(&self) -> Result<Quantity, DomainError> {
        self.validate()?;
        let days: u32 = inclusive_days(self.start_date, self.end_date)?;
        match self.leave_type.scope() {
            LeaveScope::Days => Ok(Quantity::whole(days)),
            LeaveScope::Shifts => {
                let token: ShiftToken = self
                    .shift
                    .ok_or(DomainError::MissingShift(self.leave_type))?;
                Ok(Quantity::whole(u32::from(token.jornadas()).saturating_mul(days)))
            }
            LeaveScope::Hours => self.hours.ok_or(DomainError::MissingHours(self.leave_type)),
        }
    }

    /// Whether the leave covers `date` (`start_date <= date <= end_date`).
    #[must_use]
    pub fn covers(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A persisted leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The canonical identifier.
    pub leave_request_id: LeaveRequestId,
    /// The request fields.
    pub details: LeaveDetails,
    /// The current lifecycle state.
    pub state: LeaveState,
}

impl LeaveRequest {
    /// Whether the request is confirmed.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.state == LeaveState::Confirmed
    }
}
