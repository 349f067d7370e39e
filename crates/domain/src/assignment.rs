// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment ledger records and pair planning.
//!
//! The ledger is append-only: records are created and deleted, never updated.
//! Every request-driven write produces exactly one outbound and one return
//! record that share the same [`AssignmentSource`].

use crate::error::DomainError;
use crate::shift::{Shift, ShiftToken, ShiftTransition, transition};
use crate::types::{
    AssignmentId, BrigadeId, EmployeeId, LeaveRequestId, ShiftChangeRequestId, TransferId,
};
use crate::validation::{next_day, validate_date_range};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use time::Date;

/// Direction of a ledger record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentKind {
    /// The employee moves into the destination brigade.
    Outbound,
    /// The employee returns to the destination brigade.
    Return,
}

impl AssignmentKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Outbound => "Outbound",
            Self::Return => "Return",
        }
    }
}

impl FromStr for AssignmentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Outbound" => Ok(Self::Outbound),
            "Return" => Ok(Self::Return),
            _ => Err(DomainError::InvalidAssignmentKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What produced a ledger record.
///
/// At most one back-reference can exist per record; the enum makes that
/// structural. `Roster` records are open-ended standing assignments, every
/// other variant marks a defined outbound/return pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentSource {
    /// A standing roster assignment with no owning request.
    Roster,
    /// An ad-hoc requirement pulling an available employee into a brigade.
    Requirement,
    /// A confirmed leave request.
    Leave(LeaveRequestId),
    /// An accepted shift change.
    ShiftChange(ShiftChangeRequestId),
    /// A transfer.
    Transfer(TransferId),
}

impl AssignmentSource {
    /// Returns the stored tag for this source.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Roster => "Roster",
            Self::Requirement => "Requirement",
            Self::Leave(_) => "Leave",
            Self::ShiftChange(_) => "ShiftChange",
            Self::Transfer(_) => "Transfer",
        }
    }

    /// Whether the record belongs to a defined outbound/return pair.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        !matches!(self, Self::Roster)
    }

    /// Rebuilds a source from its stored tag and back-reference columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is unknown or its back-reference is missing.
    pub fn from_parts(
        tag: &str,
        leave_request_id: Option<i64>,
        shift_change_request_id: Option<i64>,
        transfer_id: Option<i64>,
    ) -> Result<Self, DomainError> {
        let missing =
            || DomainError::InvalidAssignmentKind(format!("{tag} without back-reference"));
        match tag {
            "Roster" => Ok(Self::Roster),
            "Requirement" => Ok(Self::Requirement),
            "Leave" => leave_request_id
                .map(|id| Self::Leave(LeaveRequestId::new(id)))
                .ok_or_else(missing),
            "ShiftChange" => shift_change_request_id
                .map(|id| Self::ShiftChange(ShiftChangeRequestId::new(id)))
                .ok_or_else(missing),
            "Transfer" => transfer_id
                .map(|id| Self::Transfer(TransferId::new(id)))
                .ok_or_else(missing),
            _ => Err(DomainError::InvalidAssignmentKind(tag.to_string())),
        }
    }
}

/// A ledger record that has not been written yet.
///
/// The source is attached when the record is committed, because request ids
/// are only known once the owning row exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedAssignment {
    /// The employee being moved.
    pub employee_id: EmployeeId,
    /// Effective date.
    pub date: Date,
    /// Effective shift.
    pub shift: Shift,
    /// The brigade the employee leaves, if known.
    pub origin_brigade_id: Option<BrigadeId>,
    /// The brigade the employee is in from this record on.
    pub destination_brigade_id: BrigadeId,
    /// Direction.
    pub kind: AssignmentKind,
}

/// A persisted ledger record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Auto-increment identifier; also the insertion order.
    pub assignment_id: AssignmentId,
    /// The employee being moved.
    pub employee_id: EmployeeId,
    /// Effective date.
    pub date: Date,
    /// Effective shift.
    pub shift: Shift,
    /// The brigade the employee leaves, if known.
    pub origin_brigade_id: Option<BrigadeId>,
    /// The brigade the employee is in from this record on.
    pub destination_brigade_id: BrigadeId,
    /// Direction.
    pub kind: AssignmentKind,
    /// What produced the record.
    pub source: AssignmentSource,
}

impl AssignmentRecord {
    /// Orders records by recency: date, then shift (Night > Afternoon > Morning),
    /// then insertion order.
    #[must_use]
    pub fn recency_cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then(self.shift.cmp(&other.shift))
            .then(self.assignment_id.cmp(&other.assignment_id))
    }
}

/// Picks the most recent record among candidates.
///
/// Callers pass the records dated on or before the query date; ties on date
/// are broken by shift priority Night > Afternoon > Morning, then by insertion
/// recency.
#[must_use]
pub fn most_recent<'a, I>(records: I) -> Option<&'a AssignmentRecord>
where
    I: IntoIterator<Item = &'a AssignmentRecord>,
{
    records.into_iter().max_by(|a, b| a.recency_cmp(b))
}

/// Sorts one day's records Morning → Afternoon → Night, then by insertion order.
pub fn sort_same_day(records: &mut [AssignmentRecord]) {
    records.sort_by(|a, b| {
        a.shift
            .cmp(&b.shift)
            .then(a.assignment_id.cmp(&b.assignment_id))
    });
}

/// A matched outbound/return pair awaiting commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPair {
    /// The move into the temporary brigade.
    pub outbound: PlannedAssignment,
    /// The move back.
    pub return_record: PlannedAssignment,
}

impl AssignmentPair {
    /// Plans a pair for one shift window using the shared transition table.
    ///
    /// The outbound record moves the employee from `home` to `away` on
    /// `date` at the outbound shift; the return record moves them back at the
    /// return shift, on the next day when the table says so.
    ///
    /// # Errors
    ///
    /// Returns an error if the return date overflows.
    pub fn for_window(
        employee_id: EmployeeId,
        home: BrigadeId,
        away: BrigadeId,
        date: Date,
        token: ShiftToken,
    ) -> Result<Self, DomainError> {
        Self::for_window_span(employee_id, home, away, date, date, token)
    }

    /// Plans a pair for a shift window repeated from `start_date` to `end_date`.
    ///
    /// The outbound shift applies to `start_date` and the return shift to
    /// `end_date` (or the day after, per the transition table).
    ///
    /// # Errors
    ///
    /// Returns an error if the range is reversed or the return date overflows.
    pub fn for_window_span(
        employee_id: EmployeeId,
        home: BrigadeId,
        away: BrigadeId,
        start_date: Date,
        end_date: Date,
        token: ShiftToken,
    ) -> Result<Self, DomainError> {
        validate_date_range(start_date, end_date)?;
        let shifts: ShiftTransition = transition(token);
        let return_date: Date = if shifts.return_is_next_day {
            next_day(end_date)?
        } else {
            end_date
        };
        Ok(Self::between(
            employee_id,
            home,
            away,
            (start_date, shifts.outbound),
            (return_date, shifts.return_shift),
        ))
    }

    /// Plans a pair for a whole-day date range.
    ///
    /// The employee leaves on the morning of `start_date` and returns on the
    /// morning after `end_date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the return date overflows.
    pub fn for_date_range(
        employee_id: EmployeeId,
        home: BrigadeId,
        away: BrigadeId,
        start_date: Date,
        end_date: Date,
    ) -> Result<Self, DomainError> {
        let return_date: Date = next_day(end_date)?;
        Ok(Self::between(
            employee_id,
            home,
            away,
            (start_date, Shift::Morning),
            (return_date, Shift::Morning),
        ))
    }

    /// Builds a pair from explicit outbound and return slots.
    #[must_use]
    pub const fn between(
        employee_id: EmployeeId,
        home: BrigadeId,
        away: BrigadeId,
        outbound: (Date, Shift),
        back: (Date, Shift),
    ) -> Self {
        Self {
            outbound: PlannedAssignment {
                employee_id,
                date: outbound.0,
                shift: outbound.1,
                origin_brigade_id: Some(home),
                destination_brigade_id: away,
                kind: AssignmentKind::Outbound,
            },
            return_record: PlannedAssignment {
                employee_id,
                date: back.0,
                shift: back.1,
                origin_brigade_id: Some(away),
                destination_brigade_id: home,
                kind: AssignmentKind::Return,
            },
        }
    }

    /// Returns both records, outbound first.
    #[must_use]
    pub fn into_records(self) -> [PlannedAssignment; 2] {
        [self.outbound, self.return_record]
    }
}
