// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion into domain values.
//!
//! Enumerations are stored as their canonical `as_str` text and dates as
//! ISO `YYYY-MM-DD`; both are parsed back through the domain `FromStr`
//! implementations so a corrupt row surfaces as a reconstruction error.

use diesel::prelude::*;
use guardia_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use guardia_domain::{
    AssignmentId, AssignmentKind, AssignmentRecord, AssignmentSource, Brigade, BrigadeId,
    Employee, EmployeeBalances, EmployeeId, LeaveDetails, LeaveRequest, LeaveRequestId,
    LeaveState, LeaveType, Quantity, Role, Shift, ShiftChangeDetails, ShiftChangeRequest,
    ShiftChangeRequestId, ShiftChangeState, ShiftToken, Transfer, TransferDetails, TransferId,
    parse_date,
};
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{
    assignments, audit_events, brigades, employees, leave_requests, shift_change_requests,
    transfers,
};
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = brigades)]
pub struct BrigadeRow {
    pub brigade_id: i64,
    pub name: String,
    pub park_id: Option<i64>,
    pub is_special: i32,
}

impl From<BrigadeRow> for Brigade {
    fn from(row: BrigadeRow) -> Self {
        Self {
            brigade_id: BrigadeId::new(row.brigade_id),
            name: row.name,
            park_id: row.park_id,
            is_special: row.is_special != 0,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub name: String,
    pub role: String,
    pub home_brigade_id: Option<i64>,
    pub vacation_days: i64,
    pub module_days: i64,
    pub personal_affairs_days: i64,
    pub special_group_compensation_days: i64,
    pub union_hours: i64,
    pub personal_outing_hours: i64,
    pub transferred_hours: i64,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = PersistenceError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            employee_id: EmployeeId::new(row.employee_id),
            name: row.name,
            role: row.role.parse::<Role>()?,
            home_brigade_id: row.home_brigade_id.map(BrigadeId::new),
            balances: EmployeeBalances {
                vacation_days: Quantity::from_hundredths(row.vacation_days),
                module_days: Quantity::from_hundredths(row.module_days),
                personal_affairs_days: Quantity::from_hundredths(row.personal_affairs_days),
                special_group_compensation_days: Quantity::from_hundredths(row.special_group_compensation_days),
                union_hours: Quantity::from_hundredths(row.union_hours),
                personal_outing_hours: Quantity::from_hundredths(row.personal_outing_hours),
                transferred_hours: Quantity::from_hundredths(row.transferred_hours),
            },
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = leave_requests)]
pub struct LeaveRequestRow {
    pub leave_request_id: i64,
    pub employee_id: i64,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub shift: Option<String>,
    pub hours: Option<i64>,
    pub state: String,
}

impl TryFrom<LeaveRequestRow> for LeaveRequest {
    type Error = PersistenceError;

    fn try_from(row: LeaveRequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            leave_request_id: LeaveRequestId::new(row.leave_request_id),
            details: LeaveDetails {
                employee_id: EmployeeId::new(row.employee_id),
                leave_type: row.leave_type.parse::<LeaveType>()?,
                start_date: parse_date(&row.start_date)?,
                end_date: parse_date(&row.end_date)?,
                shift: row
                    .shift
                    .as_deref()
                    .map(str::parse::<ShiftToken>)
                    .transpose()?,
                hours: row.hours.map(Quantity::from_hundredths),
            },
            state: row.state.parse::<LeaveState>()?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_change_requests)]
pub struct ShiftChangeRow {
    pub shift_change_request_id: i64,
    pub employee1_id: i64,
    pub employee2_id: i64,
    pub brigade1_id: i64,
    pub brigade2_id: i64,
    pub date: String,
    pub secondary_date: Option<String>,
    pub shift: String,
    pub reason: String,
    pub state: String,
}

impl TryFrom<ShiftChangeRow> for ShiftChangeRequest {
    type Error = PersistenceError;

    fn try_from(row: ShiftChangeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            shift_change_request_id: ShiftChangeRequestId::new(row.shift_change_request_id),
            details: ShiftChangeDetails {
                employee1_id: EmployeeId::new(row.employee1_id),
                employee2_id: EmployeeId::new(row.employee2_id),
                brigade1_id: BrigadeId::new(row.brigade1_id),
                brigade2_id: BrigadeId::new(row.brigade2_id),
                date: parse_date(&row.date)?,
                secondary_date: row.secondary_date.as_deref().map(parse_date).transpose()?,
                shift: row.shift.parse::<ShiftToken>()?,
                reason: row.reason,
            },
            state: row.state.parse::<ShiftChangeState>()?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = transfers)]
pub struct TransferRow {
    pub transfer_id: i64,
    pub employee_id: i64,
    pub origin_brigade_id: i64,
    pub destination_brigade_id: i64,
    pub date: String,
    pub shift: String,
    pub hours: i64,
}

impl TryFrom<TransferRow> for Transfer {
    type Error = PersistenceError;

    fn try_from(row: TransferRow) -> Result<Self, Self::Error> {
        Ok(Self {
            transfer_id: TransferId::new(row.transfer_id),
            details: TransferDetails {
                employee_id: EmployeeId::new(row.employee_id),
                origin_brigade_id: BrigadeId::new(row.origin_brigade_id),
                destination_brigade_id: BrigadeId::new(row.destination_brigade_id),
                date: parse_date(&row.date)?,
                shift: row.shift.parse::<ShiftToken>()?,
                hours: Quantity::from_hundredths(row.hours),
            },
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = assignments)]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub employee_id: i64,
    pub date: String,
    pub shift: String,
    pub origin_brigade_id: Option<i64>,
    pub destination_brigade_id: i64,
    pub kind: String,
    pub source: String,
    pub leave_request_id: Option<i64>,
    pub shift_change_request_id: Option<i64>,
    pub transfer_id: Option<i64>,
}

impl TryFrom<AssignmentRow> for AssignmentRecord {
    type Error = PersistenceError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            assignment_id: AssignmentId::new(row.assignment_id),
            employee_id: EmployeeId::new(row.employee_id),
            date: parse_date(&row.date)?,
            shift: row.shift.parse::<Shift>()?,
            origin_brigade_id: row.origin_brigade_id.map(BrigadeId::new),
            destination_brigade_id: BrigadeId::new(row.destination_brigade_id),
            kind: row.kind.parse::<AssignmentKind>()?,
            source: AssignmentSource::from_parts(
                &row.source,
                row.leave_request_id,
                row.shift_change_request_id,
                row.transfer_id,
            )?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub employee_id: Option<i64>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    #[allow(dead_code)]
    pub created_at: Option<String>,
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
        let action_data: ActionData = serde_json::from_str(&row.action_json)?;
        let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
        let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

        Ok(Self::new(
            Actor::new(actor_data.id, actor_data.actor_type),
            Cause::new(cause_data.id, cause_data.description),
            Action::new(action_data.name, action_data.details),
            StateSnapshot::new(before_data.data),
            StateSnapshot::new(after_data.data),
            row.employee_id.map(EmployeeId::new),
        )
        .with_event_id(row.event_id))
    }
}
