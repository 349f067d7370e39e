// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request workflow.
//!
//! Entering `Confirmed` debits the employee's balance and plans an
//! outbound/return pair into the leave type's brigade. Leaving `Confirmed`
//! credits the same quantity back and removes the pair. The quantity is
//! always recomputed from the request's own fields, so any number of
//! confirm/unconfirm cycles nets to zero.

use crate::error::CoreError;
use crate::outcome::{BalanceWrite, EntityWrite, RecordOwner, WorkflowOutcome};
use crate::resolve_origin;
use guardia_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use guardia_domain::{
    AssignmentPair, AssignmentRecord, AssignmentSource, BalanceAccount, BrigadeId, DomainError,
    Employee, EmployeeBalances, LeaveBrigadeMap, LeaveDetails, LeaveRequest, LeaveScope,
    LeaveState, PlannedAssignment, Quantity, ShiftToken,
};

/// What the leave workflow reads besides the request itself.
#[derive(Debug, Clone, Copy)]
pub struct LeaveContext<'a> {
    /// The requesting employee.
    pub employee: &'a Employee,
    /// The employee's most recent ledger record on or before the start date.
    pub latest_before_start: Option<&'a AssignmentRecord>,
    /// Resolved leave-type brigades.
    pub leave_brigades: &'a LeaveBrigadeMap,
}

/// Plans the creation of a leave request.
///
/// New requests are always `Pending` and have no ledger or balance effect.
///
/// # Errors
///
/// Returns an error if the request fields are invalid for the leave type.
pub fn create_leave(
    details: LeaveDetails,
    actor: Actor,
    cause: Cause,
) -> Result<WorkflowOutcome, CoreError> {
    details.validate()?;
    let quantity: Quantity = details.quantity()?;

    let action: Action = Action::new(
        String::from("CreateLeaveRequest"),
        Some(format!(
            "{} leave {}..{} ({quantity})",
            details.leave_type, details.start_date, details.end_date
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        StateSnapshot::new(String::from("leave_request=none")),
        StateSnapshot::new(format!("leave_request=new,state={}", LeaveState::Pending)),
        Some(details.employee_id),
    );

    Ok(WorkflowOutcome {
        entity: EntityWrite::InsertLeave(details),
        removals: Vec::new(),
        appends: Vec::new(),
        owner: RecordOwner::Entity,
        balances: None,
        audit_event,
    })
}

/// Plans a state transition of a leave request.
///
/// # Errors
///
/// Returns an error if:
/// - The transition is not permitted from the current state
/// - Confirming would exceed the available balance
/// - No origin brigade can be resolved for the employee
/// - The leave type has no configured brigade
pub fn transition_leave(
    request: &LeaveRequest,
    target: LeaveState,
    context: LeaveContext<'_>,
    actor: Actor,
    cause: Cause,
) -> Result<WorkflowOutcome, CoreError> {
    if !request.state.can_transition_to(target) {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStateTransition {
                from: request.state.to_string(),
                to: target.to_string(),
            },
        ));
    }

    let details: &LeaveDetails = &request.details;
    let current: EmployeeBalances = context.employee.balances;
    let source: AssignmentSource = AssignmentSource::Leave(request.leave_request_id);

    let (balances, removals, appends): (
        Option<EmployeeBalances>,
        Vec<AssignmentSource>,
        Vec<PlannedAssignment>,
    ) = if target == LeaveState::Confirmed {
        let quantity: Quantity = details.quantity()?;
        let next: Option<EmployeeBalances> = debit(details, &current, quantity)?;
        let pair: Option<AssignmentPair> = plan_pair(details, context)?;
        (
            next,
            Vec::new(),
            pair.map(|p| p.into_records().to_vec()).unwrap_or_default(),
        )
    } else if request.is_confirmed() {
        let quantity: Quantity = details.quantity()?;
        let next: Option<EmployeeBalances> = details
            .leave_type
            .balance_account()
            .map(|account| current.credited(account, quantity));
        (next, vec![source], Vec::new())
    } else {
        (None, Vec::new(), Vec::new())
    };

    let account: Option<BalanceAccount> = details.leave_type.balance_account();
    let before: StateSnapshot = leave_snapshot(request.state, account, &current);
    let after: StateSnapshot = leave_snapshot(target, account, &balances.unwrap_or(current));
    let action: Action = Action::new(
        String::from("TransitionLeaveRequest"),
        Some(format!(
            "Leave request {} ({}) {} -> {target}",
            request.leave_request_id, details.leave_type, request.state
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        Some(details.employee_id),
    );

    Ok(WorkflowOutcome {
        entity: EntityWrite::UpdateLeaveState {
            leave_request_id: request.leave_request_id,
            from: request.state,
            state: target,
        },
        removals,
        appends,
        owner: RecordOwner::Entity,
        balances: balances.map(|balances| BalanceWrite {
            employee_id: details.employee_id,
            balances,
        }),
        audit_event,
    })
}

/// Plans the deletion of a leave request.
///
/// A confirmed request is credited back and its pair removed first.
///
/// # Errors
///
/// Returns an error if the stored request fields are invalid.
pub fn delete_leave(
    request: &LeaveRequest,
    employee: &Employee,
    actor: Actor,
    cause: Cause,
) -> Result<WorkflowOutcome, CoreError> {
    let details: &LeaveDetails = &request.details;
    let current: EmployeeBalances = employee.balances;
    let account: Option<BalanceAccount> = details.leave_type.balance_account();

    let (balances, removals): (Option<EmployeeBalances>, Vec<AssignmentSource>) =
        if request.is_confirmed() {
            let quantity: Quantity = details.quantity()?;
            (
                account.map(|account| current.credited(account, quantity)),
                vec![AssignmentSource::Leave(request.leave_request_id)],
            )
        } else {
            (None, Vec::new())
        };

    let action: Action = Action::new(
        String::from("DeleteLeaveRequest"),
        Some(format!(
            "Deleted leave request {} ({}, {})",
            request.leave_request_id, details.leave_type, request.state
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        leave_snapshot(request.state, account, &current),
        StateSnapshot::new(String::from("leave_request=deleted")),
        Some(details.employee_id),
    );

    Ok(WorkflowOutcome {
        entity: EntityWrite::DeleteLeave(request.leave_request_id),
        removals,
        appends: Vec::new(),
        owner: RecordOwner::Entity,
        balances: balances.map(|balances| BalanceWrite {
            employee_id: details.employee_id,
            balances,
        }),
        audit_event,
    })
}

/// Debits the leave's account, rejecting the transition if it would overdraw.
///
/// Leave types without an account (licenses) are granted without a check.
fn debit(
    details: &LeaveDetails,
    current: &EmployeeBalances,
    quantity: Quantity,
) -> Result<Option<EmployeeBalances>, DomainError> {
    let Some(account) = details.leave_type.balance_account() else {
        return Ok(None);
    };
    let available: Quantity = current.get(account);
    if available < quantity {
        return Err(DomainError::InsufficientBalance {
            leave_type: details.leave_type,
            requested: quantity,
            available,
        });
    }
    Ok(Some(current.debited(account, quantity)))
}

/// Plans the outbound/return pair for a confirmed leave.
///
/// Whole-day leave leaves on the start morning and returns the morning after
/// the end date. Shift-scoped leave follows the transition table over the
/// range. Hour-scoped leave only moves the employee when a shift is given.
fn plan_pair(
    details: &LeaveDetails,
    context: LeaveContext<'_>,
) -> Result<Option<AssignmentPair>, DomainError> {
    let window: Option<ShiftToken> = match details.leave_type.scope() {
        LeaveScope::Days => None,
        LeaveScope::Shifts => Some(
            details
                .shift
                .ok_or(DomainError::MissingShift(details.leave_type))?,
        ),
        LeaveScope::Hours => {
            if details.shift.is_none() {
                return Ok(None);
            }
            details.shift
        }
    };

    let away: BrigadeId = context.leave_brigades.brigade_for(details.leave_type)?;
    let home: BrigadeId = resolve_origin(context.employee, context.latest_before_start)?;

    let pair: AssignmentPair = match window {
        None => AssignmentPair::for_date_range(
            details.employee_id,
            home,
            away,
            details.start_date,
            details.end_date,
        )?,
        Some(token) => AssignmentPair::for_window_span(
            details.employee_id,
            home,
            away,
            details.start_date,
            details.end_date,
            token,
        )?,
    };
    Ok(Some(pair))
}

fn leave_snapshot(
    state: LeaveState,
    account: Option<BalanceAccount>,
    balances: &EmployeeBalances,
) -> StateSnapshot {
    match account {
        Some(account) => StateSnapshot::new(format!(
            "state={state},{}={}",
            account.as_str(),
            balances.get(account)
        )),
        None => StateSnapshot::new(format!("state={state}")),
    }
}
