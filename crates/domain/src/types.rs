// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::quantity::Quantity;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Generates a canonical numeric identifier newtype.
///
/// Identifiers are assigned by the database and are never reused.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a persisted identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of an employee (firefighter, command or head).
    EmployeeId
);
id_type!(
    /// Identifier of a brigade, including the synthetic leave brigades.
    BrigadeId
);
id_type!(
    /// Identifier of a leave request.
    LeaveRequestId
);
id_type!(
    /// Identifier of a bilateral shift-change request.
    ShiftChangeRequestId
);
id_type!(
    /// Identifier of a cross-brigade transfer.
    TransferId
);
id_type!(
    /// Identifier of an assignment ledger record.
    AssignmentId
);

/// Role tag carried by every employee.
///
/// Capability is decided by the role, not by a distinct entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Rank-and-file firefighter (bombero).
    Firefighter,
    /// Command staff (mando).
    Command,
    /// Head of service (jefe).
    Head,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Firefighter => "Firefighter",
            Self::Command => "Command",
            Self::Head => "Head",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "firefighter" | "bombero" => Ok(Self::Firefighter),
            "command" | "mando" => Ok(Self::Command),
            "head" | "jefe" => Ok(Self::Head),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which roles make up the employee pool of an availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleFilter {
    /// Firefighters and command staff.
    FirefightersAndCommand,
    /// Firefighters only.
    FirefightersOnly,
}

impl RoleFilter {
    /// Returns the roles included by this filter.
    #[must_use]
    pub const fn roles(&self) -> &'static [Role] {
        match self {
            Self::FirefightersAndCommand => &[Role::Firefighter, Role::Command],
            Self::FirefightersOnly => &[Role::Firefighter],
        }
    }
}

/// A balance counter on the employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceAccount {
    /// Vacation days.
    VacationDays,
    /// Module days.
    ModuleDays,
    /// Personal-affairs jornadas.
    PersonalAffairsDays,
    /// Special-group compensation jornadas.
    SpecialGroupCompensationDays,
    /// Union hours.
    UnionHours,
    /// Personal-outing hours.
    PersonalOutingHours,
    /// Cumulative hours spent transferred to other brigades.
    TransferredHours,
}

impl BalanceAccount {
    /// Returns the account name used in messages and audit details.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VacationDays => "vacation_days",
            Self::ModuleDays => "module_days",
            Self::PersonalAffairsDays => "personal_affairs_days",
            Self::SpecialGroupCompensationDays => "special_group_compensation_days",
            Self::UnionHours => "union_hours",
            Self::PersonalOutingHours => "personal_outing_hours",
            Self::TransferredHours => "transferred_hours",
        }
    }
}

/// Entitlement counters held on the employee record.
///
/// Counters are never negative: every debit is floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployeeBalances {
    /// Vacation days remaining.
    pub vacation_days: Quantity,
    /// Module days remaining.
    pub module_days: Quantity,
    /// Personal-affairs jornadas remaining.
    pub personal_affairs_days: Quantity,
    /// Special-group compensation jornadas remaining.
    pub special_group_compensation_days: Quantity,
    /// Union hours remaining.
    pub union_hours: Quantity,
    /// Personal-outing hours remaining.
    pub personal_outing_hours: Quantity,
    /// Cumulative transferred hours.
    pub transferred_hours: Quantity,
}

impl EmployeeBalances {
    /// Returns the current value of an account.
    #[must_use]
    pub const fn get(&self, account: BalanceAccount) -> Quantity {
        match account {
            BalanceAccount::VacationDays => self.vacation_days,
            BalanceAccount::ModuleDays => self.module_days,
            BalanceAccount::PersonalAffairsDays => self.personal_affairs_days,
            BalanceAccount::SpecialGroupCompensationDays => self.special_group_compensation_days,
            BalanceAccount::UnionHours => self.union_hours,
            BalanceAccount::PersonalOutingHours => self.personal_outing_hours,
            BalanceAccount::TransferredHours => self.transferred_hours,
        }
    }

    const fn slot(&mut self, account: BalanceAccount) -> &mut Quantity {
        match account {
            BalanceAccount::VacationDays => &mut self.vacation_days,
            BalanceAccount::ModuleDays => &mut self.module_days,
            BalanceAccount::PersonalAffairsDays => &mut self.personal_affairs_days,
            BalanceAccount::SpecialGroupCompensationDays => {
                &mut self.special_group_compensation_days
            }
            BalanceAccount::UnionHours => &mut self.union_hours,
            BalanceAccount::PersonalOutingHours => &mut self.personal_outing_hours,
            BalanceAccount::TransferredHours => &mut self.transferred_hours,
        }
    }

    /// Returns a copy with `delta` added to `account`, floored at zero.
    #[must_use]
    pub fn adjusted(&self, account: BalanceAccount, delta: Quantity) -> Self {
        let mut next: Self = *self;
        let slot: &mut Quantity = next.slot(account);
        *slot = (*slot + delta).max(Quantity::ZERO);
        next
    }

    /// Returns a copy with `quantity` removed from `account`, floored at zero.
    #[must_use]
    pub fn debited(&self, account: BalanceAccount, quantity: Quantity) -> Self {
        self.adjusted(account, -quantity)
    }

    /// Returns a copy with `quantity` added back to `account`.
    #[must_use]
    pub fn credited(&self, account: BalanceAccount, quantity: Quantity) -> Self {
        self.adjusted(account, quantity)
    }
}

/// An employee as seen by the engine.
///
/// The employee directory owns the record; the engine only reads the role and
/// home brigade and writes the balance counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The canonical identifier.
    pub employee_id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Role tag.
    pub role: Role,
    /// Default brigade used when the ledger holds no prior assignment.
    pub home_brigade_id: Option<BrigadeId>,
    /// Entitlement counters.
    pub balances: EmployeeBalances,
}

/// A brigade from the brigade/park directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brigade {
    /// The canonical identifier.
    pub brigade_id: BrigadeId,
    /// Unique brigade name.
    pub name: String,
    /// The park (station) the brigade belongs to, if any.
    pub park_id: Option<i64>,
    /// Whether this is a non-operational brigade (leave categories and similar).
    pub is_special: bool,
}
