// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guardia_audit::{AuditEvent, StateSnapshot};
use guardia_domain::{
    AssignmentSource, EmployeeBalances, EmployeeId, LeaveDetails, LeaveRequestId, LeaveState,
    PlannedAssignment, ShiftChangeDetails, ShiftChangeRequestId, ShiftChangeState, Transfer,
    TransferDetails, TransferId,
};

/// The write a workflow performs on its owning request entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityWrite {
    /// No request entity is touched.
    None,
    /// Insert a new leave request in the `Pending` state.
    InsertLeave(LeaveDetails),
    /// Change the state of a leave request.
    UpdateLeaveState {
        /// The request.
        leave_request_id: LeaveRequestId,
        /// The state the transition was planned from.
        from: LeaveState,
        /// The new state.
        state: LeaveState,
    },
    /// Delete a leave request.
    DeleteLeave(LeaveRequestId),
    /// Insert a new shift-change request in the `AcceptedByEmployees` state.
    InsertShiftChange(ShiftChangeDetails),
    /// Change the state of a shift-change request.
    UpdateShiftChangeState {
        /// The request.
        shift_change_request_id: ShiftChangeRequestId,
        /// The state the transition was planned from.
        from: ShiftChangeState,
        /// The new state.
        state: ShiftChangeState,
    },
    /// Delete a shift-change request.
    DeleteShiftChange(ShiftChangeRequestId),
    /// Insert a new transfer.
    InsertTransfer(TransferDetails),
    /// Overwrite an existing transfer.
    UpdateTransfer(Transfer),
    /// Delete a transfer.
    DeleteTransfer(TransferId),
}

impl EntityWrite {
    /// The ledger source for records owned by an entity with the given id.
    ///
    /// Returns `None` for writes that do not own ledger records.
    #[must_use]
    pub const fn owning_source(&self, entity_id: i64) -> Option<AssignmentSource> {
        match self {
            Self::InsertLeave(_) | Self::UpdateLeaveState { .. } | Self::DeleteLeave(_) => Some(
                AssignmentSource::Leave(LeaveRequestId::new(entity_id)),
            ),
            Self::InsertShiftChange(_)
            | Self::UpdateShiftChangeState { .. }
            | Self::DeleteShiftChange(_) => Some(AssignmentSource::ShiftChange(
                ShiftChangeRequestId::new(entity_id),
            )),
            Self::InsertTransfer(_) | Self::UpdateTransfer(_) | Self::DeleteTransfer(_) => {
                Some(AssignmentSource::Transfer(TransferId::new(entity_id)))
            }
            Self::None => None,
        }
    }

    /// The id of an existing entity this write targets.
    ///
    /// Inserts return `None`; their id is assigned on commit.
    #[must_use]
    pub const fn existing_id(&self) -> Option<i64> {
        match self {
            Self::UpdateLeaveState {
                leave_request_id, ..
            }
            | Self::DeleteLeave(leave_request_id) => Some(leave_request_id.value()),
            Self::UpdateShiftChangeState {
                shift_change_request_id,
                ..
            }
            | Self::DeleteShiftChange(shift_change_request_id) => {
                Some(shift_change_request_id.value())
            }
            Self::UpdateTransfer(transfer) => Some(transfer.transfer_id.value()),
            Self::DeleteTransfer(transfer_id) => Some(transfer_id.value()),
            Self::None
            | Self::InsertLeave(_)
            | Self::InsertShiftChange(_)
            | Self::InsertTransfer(_) => None,
        }
    }
}

/// Who owns the ledger records appended by an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOwner {
    /// The request entity written by the same outcome.
    Entity,
    /// A standing roster assignment.
    Roster,
    /// An ad-hoc requirement.
    Requirement,
}

/// A balance counter write for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceWrite {
    /// The employee whose counters change.
    pub employee_id: EmployeeId,
    /// The full counter set after the change.
    pub balances: EmployeeBalances,
}

/// Everything one workflow transition changes.
///
/// Produced by the pure planners in this crate and applied as a single
/// transaction by the persistence layer. A planner either returns a complete
/// outcome or an error; there is no partially planned state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOutcome {
    /// The request entity write.
    pub entity: EntityWrite,
    /// Ledger sources whose records are deleted before anything is appended.
    pub removals: Vec<AssignmentSource>,
    /// Ledger records to append.
    pub appends: Vec<PlannedAssignment>,
    /// Owner of the appended records.
    pub owner: RecordOwner,
    /// Balance write, if any counter changes.
    pub balances: Option<BalanceWrite>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

impl WorkflowOutcome {
    /// Number of ledger records the outcome appends.
    #[must_use]
    pub fn append_count(&self) -> usize {
        self.appends.len()
    }
}

/// Renders a balance set for audit snapshots.
#[must_use]
pub fn balances_snapshot(label: &str, balances: &EmployeeBalances) -> StateSnapshot {
    StateSnapshot::new(format!(
        "{label},vacation_days={},module_days={},personal_affairs_days={},special_group_compensation_days={},union_hours={},personal_outing_hours={},transferred_hours={}",
        balances.vacation_days,
        balances.module_days,
        balances.personal_affairs_days,
        balances.special_group_compensation_days,
        balances.union_hours,
        balances.personal_outing_hours,
        balances.transferred_hours
    ))
}
