// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use guardia_domain::{ExclusionVariant, Quantity, RoleFilter};

/// Guardia - brigade assignment and leave orchestration for firefighter crews
#[derive(Parser, Debug)]
#[command(name = "guardia", author, version, about, long_about = None)]
pub struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Path to a JSON engine configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive (overrides `RUST_LOG`), e.g. `debug` or `guardia_api=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Identifier recorded as the actor of every audit event.
    #[arg(long, global = true, default_value = "operator")]
    pub actor: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the schema and provision the leave brigades
    Init,

    /// Manage brigades
    #[command(subcommand)]
    Brigade(BrigadeCommand),

    /// Manage employees
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// Put a brigade on guard on a date
    GuardDay {
        /// Brigade id
        brigade_id: i64,
        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// Place an employee in a brigade from a date onwards
    Assign {
        /// Employee id
        employee_id: i64,
        /// Brigade id
        brigade_id: i64,
        /// Date (YYYY-MM-DD)
        date: String,
        /// Shift the placement starts on
        #[arg(long, default_value = "Morning")]
        shift: String,
    },

    /// List who can be required on a date
    #[command(visible_alias = "av")]
    Available {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Role pool to consider
        #[arg(long, value_enum, default_value_t = Pool::FirefightersAndCommand)]
        pool: Pool,
        /// Only exclude brigades on guard on the date itself
        #[arg(long)]
        without_adjacent_guards: bool,
        /// Check a single employee instead of the whole pool
        #[arg(long)]
        employee: Option<i64>,
    },

    /// Leave requests
    #[command(subcommand)]
    Leave(LeaveCommand),

    /// Shift-change requests
    #[command(subcommand)]
    ShiftChange(ShiftChangeCommand),

    /// Transfers between brigades
    #[command(subcommand)]
    Transfer(TransferCommand),

    /// Pull an employee into a brigade for one shift window
    Require {
        /// Employee id
        employee_id: i64,
        /// Brigade that needs cover
        brigade_id: i64,
        /// Date (YYYY-MM-DD)
        date: String,
        /// Shift token
        shift: String,
    },

    /// Print an employee's assignment ledger
    Ledger {
        /// Employee id
        employee_id: i64,
    },

    /// Print the audit events touching an employee
    Audit {
        /// Employee id
        employee_id: i64,
    },
}

impl Command {
    /// Short name recorded as the cause of audit events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Brigade(_) => "brigade",
            Self::Employee(_) => "employee",
            Self::GuardDay { .. } => "guard-day",
            Self::Assign { .. } => "assign",
            Self::Available { .. } => "available",
            Self::Leave(_) => "leave",
            Self::ShiftChange(_) => "shift-change",
            Self::Transfer(_) => "transfer",
            Self::Require { .. } => "require",
            Self::Ledger { .. } => "ledger",
            Self::Audit { .. } => "audit",
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum BrigadeCommand {
    /// Create a brigade
    Create {
        /// Unique brigade name
        name: String,
        /// Park (station) id
        #[arg(long)]
        park: Option<i64>,
        /// Mark the brigade as non-operational
        #[arg(long)]
        special: bool,
    },
    /// List every brigade
    List,
}

#[derive(Debug, Clone, Subcommand)]
pub enum EmployeeCommand {
    /// Create an employee with opening balances
    Create {
        /// Full name
        name: String,
        /// Role (Firefighter, Command, Head, ...)
        #[arg(long, default_value = "Firefighter")]
        role: String,
        /// Home brigade id
        #[arg(long)]
        home: Option<i64>,
        #[arg(long, default_value = "0")]
        vacation_days: Quantity,
        #[arg(long, default_value = "0")]
        module_days: Quantity,
        #[arg(long, default_value = "0")]
        personal_affairs_days: Quantity,
        #[arg(long, default_value = "0")]
        special_group_compensation_days: Quantity,
        #[arg(long, default_value = "0")]
        union_hours: Quantity,
        #[arg(long, default_value = "0")]
        personal_outing_hours: Quantity,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum LeaveCommand {
    /// File a pending leave request
    Create {
        /// Employee id
        employee_id: i64,
        /// Leave type (Vacation, Module, PersonalAffairs, ...)
        leave_type: String,
        /// First day (YYYY-MM-DD)
        start_date: String,
        /// Last day (YYYY-MM-DD)
        end_date: String,
        /// Shift token for shift- and hour-scoped leave
        #[arg(long)]
        shift: Option<String>,
        /// Hours for hour-scoped leave
        #[arg(long)]
        hours: Option<f64>,
    },
    /// Move a leave request to another state
    Transition {
        /// Leave request id
        leave_request_id: i64,
        /// Target state
        state: String,
    },
    /// Delete a leave request
    Delete {
        /// Leave request id
        leave_request_id: i64,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ShiftChangeCommand {
    /// Record a swap agreed between two employees
    Create {
        /// First employee id
        employee1_id: i64,
        /// Second employee id
        employee2_id: i64,
        /// Swap date (YYYY-MM-DD)
        date: String,
        /// Shift token
        shift: String,
        /// Optional secondary date (YYYY-MM-DD)
        #[arg(long)]
        secondary_date: Option<String>,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Move a shift-change request to another state
    Transition {
        /// Shift-change request id
        shift_change_request_id: i64,
        /// Target state
        state: String,
    },
    /// Delete a shift-change request
    Delete {
        /// Shift-change request id
        shift_change_request_id: i64,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum TransferCommand {
    /// Move an employee to another brigade for a shift window
    Create {
        /// Employee id
        employee_id: i64,
        /// Destination brigade id
        destination_brigade_id: i64,
        /// Date (YYYY-MM-DD)
        date: String,
        /// Shift token
        shift: String,
        /// Hours charged to the transferred-hours counter
        hours: f64,
        /// Origin brigade id (defaults to the employee's current brigade)
        #[arg(long)]
        origin: Option<i64>,
    },
    /// Change a transfer's shift window and hours
    Update {
        /// Transfer id
        transfer_id: i64,
        /// New shift token
        shift: String,
        /// New hours
        hours: f64,
    },
    /// Delete a transfer
    Delete {
        /// Transfer id
        transfer_id: i64,
    },
}

/// Role pool of an availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Pool {
    FirefightersAndCommand,
    Firefighters,
}

impl From<Pool> for RoleFilter {
    fn from(pool: Pool) -> Self {
        match pool {
            Pool::FirefightersAndCommand => Self::FirefightersAndCommand,
            Pool::Firefighters => Self::FirefightersOnly,
        }
    }
}

/// Maps the `--without-adjacent-guards` flag onto the exclusion variant.
#[must_use]
pub const fn exclusion_variant(without_adjacent_guards: bool) -> ExclusionVariant {
    if without_adjacent_guards {
        ExclusionVariant::WithoutAdjacentGuards
    } else {
        ExclusionVariant::WithAdjacentGuards
    }
}
