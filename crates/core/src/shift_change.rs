// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift-change workflow.
//!
//! Two employees swap brigades for one shift window. Entering `Accepted`
//! plans four ledger records (an outbound/return pair per employee); leaving
//! `Accepted` removes them.

use crate::error::CoreError;
use crate::outcome::{EntityWrite, RecordOwner, WorkflowOutcome};
use guardia_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use guardia_domain::{
    AssignmentPair, AssignmentRecord, AssignmentSource, BrigadeId, DomainError, EmployeeId,
    PlannedAssignment, ShiftChangeDetails, ShiftChangeRequest, ShiftChangeState, ShiftToken,
};
use time::Date;

/// The fields supplied when two employees have agreed on a swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftChangeProposal {
    /// First employee.
    pub employee1_id: EmployeeId,
    /// Second employee.
    pub employee2_id: EmployeeId,
    /// Swap date.
    pub date: Date,
    /// Optional secondary date.
    pub secondary_date: Option<Date>,
    /// Swap window.
    pub shift: ShiftToken,
    /// Free-text reason.
    pub reason: String,
}

/// Plans the creation of a shift-change request.
///
/// Each employee's current brigade is the destination of their latest ledger
/// record on or before the swap date, snapshotted onto the request.
///
/// # Errors
///
/// Returns an error if:
/// - Both sides name the same employee
/// - Either employee has no resolvable brigade
/// - Both employees currently sit in the same brigade
pub fn create_shift_change(
    proposal: ShiftChangeProposal,
    latest1: Option<&AssignmentRecord>,
    latest2: Option<&AssignmentRecord>,
    actor: Actor,
    cause: Cause,
) -> Result<WorkflowOutcome, CoreError> {
    if proposal.employee1_id == proposal.employee2_id {
        return Err(DomainError::SameEmployee(proposal.employee1_id).into());
    }
    let brigade1_id: BrigadeId = current_brigade(proposal.employee1_id, proposal.date, latest1)?;
    let brigade2_id: BrigadeId = current_brigade(proposal.employee2_id, proposal.date, latest2)?;
    if brigade1_id == brigade2_id {
        return Err(DomainError::SameBrigade.into());
    }

    let details: ShiftChangeDetails = ShiftChangeDetails {
        employee1_id: proposal.employee1_id,
        employee2_id: proposal.employee2_id,
        brigade1_id,
        brigade2_id,
        date: proposal.date,
        secondary_date: proposal.secondary_date,
        shift: proposal.shift,
        reason: proposal.reason,
    };

    let action: Action = Action::new(
        String::from("CreateShiftChange"),
        Some(format!(
            "Employees {} (brigade {brigade1_id}) and {} (brigade {brigade2_id}) swap on {} ({})",
            details.employee1_id, details.employee2_id, details.date, details.shift
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        StateSnapshot::new(String::from("shift_change=none")),
        StateSnapshot::new(format!(
            "shift_change=new,state={}",
            ShiftChangeState::AcceptedByEmployees
        )),
        Some(details.employee1_id),
    );

    Ok(WorkflowOutcome {
        entity: EntityWrite::InsertShiftChange(details),
        removals: Vec::new(),
        appends: Vec::new(),
        owner: RecordOwner::Entity,
        balances: None,
        audit_event,
    })
}

/// Plans a state transition of a shift-change request.
///
/// # Errors
///
/// Returns an error if the target equals the current state or the return
/// date overflows.
pub fn transition_shift_change(
    request: &ShiftChangeRequest,
    target: ShiftChangeState,
    actor: Actor,
    cause: Cause,
) -> Result<WorkflowOutcome, CoreError> {
    if !request.state.can_transition_to(target) {
        return Err(DomainError::InvalidStateTransition {
            from: request.state.to_string(),
            to: target.to_string(),
        }
        .into());
    }

    let (removals, appends): (Vec<AssignmentSource>, Vec<PlannedAssignment>) =
        if target == ShiftChangeState::Accepted {
            (Vec::new(), plan_swap(&request.details)?)
        } else if request.is_accepted() {
            (
                vec![AssignmentSource::ShiftChange(
                    request.shift_change_request_id,
                )],
                Vec::new(),
            )
        } else {
            (Vec::new(), Vec::new())
        };

    let action: Action = Action::new(
        String::from("TransitionShiftChange"),
        Some(format!(
            "Shift change {} {} -> {target}",
            request.shift_change_request_id, request.state
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        swap_snapshot(request.state, &request.details),
        swap_snapshot(target, &request.details),
        Some(request.details.employee1_id),
    );

    Ok(WorkflowOutcome {
        entity: EntityWrite::UpdateShiftChangeState {
            shift_change_request_id: request.shift_change_request_id,
            from: request.state,
            state: target,
        },
        removals,
        appends,
        owner: RecordOwner::Entity,
        balances: None,
        audit_event,
    })
}

/// Plans the deletion of a shift-change request.
///
/// An accepted request has its four ledger records removed first.
#[must_use]
pub fn delete_shift_change(
    request: &ShiftChangeRequest,
    actor: Actor,
    cause: Cause,
) -> WorkflowOutcome {
    let removals: Vec<AssignmentSource> = if request.is_accepted() {
        vec![AssignmentSource::ShiftChange(
            request.shift_change_request_id,
        )]
    } else {
        Vec::new()
    };

    let action: Action = Action::new(
        String::from("DeleteShiftChange"),
        Some(format!(
            "Deleted shift change {} ({})",
            request.shift_change_request_id, request.state
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        swap_snapshot(request.state, &request.details),
        StateSnapshot::new(String::from("shift_change=deleted")),
        Some(request.details.employee1_id),
    );

    WorkflowOutcome {
        entity: EntityWrite::DeleteShiftChange(request.shift_change_request_id),
        removals,
        appends: Vec::new(),
        owner: RecordOwner::Entity,
        balances: None,
        audit_event,
    }
}

/// The four records of an accepted swap: each employee moves into the other's
/// brigade at the outbound shift and back at the return shift.
fn plan_swap(details: &ShiftChangeDetails) -> Result<Vec<PlannedAssignment>, DomainError> {
    let first: AssignmentPair = AssignmentPair::for_window(
        details.employee1_id,
        details.brigade1_id,
        details.brigade2_id,
        details.date,
        details.shift,
    )?;
    let second: AssignmentPair = AssignmentPair::for_window(
        details.employee2_id,
        details.brigade2_id,
        details.brigade1_id,
        details.date,
        details.shift,
    )?;
    Ok(first
        .into_records()
        .into_iter()
        .chain(second.into_records())
        .collect())
}

fn current_brigade(
    employee_id: EmployeeId,
    date: Date,
    latest: Option<&AssignmentRecord>,
) -> Result<BrigadeId, DomainError> {
    latest
        .map(|record| record.destination_brigade_id)
        .ok_or(DomainError::NoBrigadeAssignment { employee_id, date })
}

fn swap_snapshot(state: ShiftChangeState, details: &ShiftChangeDetails) -> StateSnapshot {
    StateSnapshot::new(format!(
        "state={state},employee1={}@{},employee2={}@{}",
        details.employee1_id, details.brigade1_id, details.employee2_id, details.brigade2_id
    ))
}
