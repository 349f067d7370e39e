// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability ("requerible") rules.
//!
//! Availability is decided from two inputs only: the name of the brigade the
//! employee most recently moved into on or before the query date, and the
//! employee's leave requests. The evaluation performs no I/O and yields the
//! same decision for the same inputs.
//!
//! Rules are evaluated in order, first match wins:
//!
//! 1. Confirmed shift-scoped leave over a composite window covering the date:
//!    available, whatever the brigade says.
//! 2. Confirmed whole-day leave covering the date: unavailable.
//! 3. Latest brigade is in the excluded set: unavailable.
//! 4. Confirmed whole-day leave on the day before or after: available.
//! 5. No resolvable brigade: unavailable.
//! 6. Otherwise available.

use crate::leave::{LeaveRequest, LeaveScope};
use crate::validation::{next_day, previous_day};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::Date;

/// Why an employee was judged available or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailabilityReason {
    /// Confirmed whole-day leave covers the date.
    OnLeave,
    /// Confirmed shift-scoped leave over a composite window covers the date.
    ProtectedByShiftLeave,
    /// Confirmed whole-day leave covers an adjacent day.
    ProtectedByAdjacentLeave,
    /// The employee's latest brigade is excluded.
    ExcludedBrigade,
    /// No brigade could be resolved for the employee.
    NoAssignment,
    /// The employee's leave records could not be read.
    UnreadableLeave,
    /// No rule disqualifies the employee.
    Free,
}

impl AvailabilityReason {
    /// Converts this reason to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OnLeave => "OnLeave",
            Self::ProtectedByShiftLeave => "ProtectedByShiftLeave",
            Self::ProtectedByAdjacentLeave => "ProtectedByAdjacentLeave",
            Self::ExcludedBrigade => "ExcludedBrigade",
            Self::NoAssignment => "NoAssignment",
            Self::UnreadableLeave => "UnreadableLeave",
            Self::Free => "Free",
        }
    }

    /// Whether this reason lists the employee as available.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(
            self,
            Self::ProtectedByShiftLeave | Self::ProtectedByAdjacentLeave | Self::Free
        )
    }
}

impl std::fmt::Display for AvailabilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How far guard days widen the excluded brigade set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionVariant {
    /// Brigades on guard the day before, the day of, or the day after.
    WithAdjacentGuards,
    /// Brigades on guard the day of the query only.
    WithoutAdjacentGuards,
}

impl ExclusionVariant {
    /// The dates whose guard brigades are excluded for a query on `date`.
    ///
    /// Dates that cannot be represented are skipped.
    #[must_use]
    pub fn guard_dates(&self, date: Date) -> Vec<Date> {
        match self {
            Self::WithoutAdjacentGuards => vec![date],
            Self::WithAdjacentGuards => [previous_day(date).ok(), Some(date), next_day(date).ok()]
                .into_iter()
                .flatten()
                .collect(),
        }
    }
}

/// Evaluates the availability rules for one employee on one date.
///
/// `latest_brigade_name` is the name of the destination brigade of the most
/// recent ledger record on or before `date`, or `None` when nothing resolves.
/// Leave requests that are not confirmed are ignored.
#[must_use]
pub fn evaluate(
    date: Date,
    latest_brigade_name: Option<&str>,
    leaves: &[LeaveRequest],
    excluded: &BTreeSet<String>,
) -> AvailabilityReason {
    let confirmed = || leaves.iter().filter(|leave| leave.is_confirmed());

    if confirmed().any(|leave| {
        leave.details.leave_type.scope() == LeaveScope::Shifts
            && leave.details.covers(date)
            && leave.details.shift.is_some_and(|token| token.is_composite())
    }) {
        return AvailabilityReason::ProtectedByShiftLeave;
    }

    if confirmed().any(|leave| is_whole_day(leave) && leave.details.covers(date)) {
        return AvailabilityReason::OnLeave;
    }

    if latest_brigade_name.is_some_and(|name| excluded.contains(name)) {
        return AvailabilityReason::ExcludedBrigade;
    }

    let adjacent: [Option<Date>; 2] = [previous_day(date).ok(), next_day(date).ok()];
    if confirmed().any(|leave| {
        is_whole_day(leave)
            && adjacent
                .iter()
                .flatten()
                .any(|day| leave.details.covers(*day))
    }) {
        return AvailabilityReason::ProtectedByAdjacentLeave;
    }

    if latest_brigade_name.is_none() {
        return AvailabilityReason::NoAssignment;
    }

    AvailabilityReason::Free
}

fn is_whole_day(leave: &LeaveRequest) -> bool {
    leave.details.leave_type.scope() == LeaveScope::Days
}
