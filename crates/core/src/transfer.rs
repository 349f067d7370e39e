// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transfer workflow.
//!
//! A transfer relocates an employee to another brigade for one shift window
//! and charges its hours to the employee's transferred-hours counter.

use crate::error::CoreError;
use crate::outcome::{BalanceWrite, EntityWrite, RecordOwner, WorkflowOutcome, balances_snapshot};
use guardia_audit::{Action, Actor, AuditEvent, Cause};
use guardia_domain::{
    AssignmentPair, AssignmentSource, BalanceAccount, Employee, EmployeeBalances, Quantity,
    ShiftToken, Transfer, TransferDetails,
};

/// Plans the creation of a transfer.
///
/// # Errors
///
/// Returns an error if the brigades coincide, the hours are invalid, or the
/// return date overflows.
pub fn create_transfer(
    details: TransferDetails,
    employee: &Employee,
    actor: Actor,
    cause: Cause,
) -> Result<WorkflowOutcome, CoreError> {
    details.validate()?;
    let pair: AssignmentPair = plan_pair(&details)?;
    let current: EmployeeBalances = employee.balances;
    let next: EmployeeBalances = current.adjusted(BalanceAccount::TransferredHours, details.hours);

    let action: Action = Action::new(
        String::from("CreateTransfer"),
        Some(format!(
            "Employee {} from brigade {} to brigade {} on {} ({}, {} hours)",
            details.employee_id,
            details.origin_brigade_id,
            details.destination_brigade_id,
            details.date,
            details.shift,
            details.hours
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        balances_snapshot("transfer=none", &current),
        balances_snapshot("transfer=new", &next),
        Some(details.employee_id),
    );

    Ok(WorkflowOutcome {
        balances: Some(BalanceWrite {
            employee_id: details.employee_id,
            balances: next,
        }),
        entity: EntityWrite::InsertTransfer(details),
        removals: Vec::new(),
        appends: pair.into_records().to_vec(),
        owner: RecordOwner::Entity,
        audit_event,
    })
}

/// Plans an update of a transfer's shift window and hours.
///
/// The ledger pair is always rewritten under the new window and the counter
/// moves by `hours - old hours`, floored at zero.
///
/// # Errors
///
/// Returns an error if the new hours are invalid or the return date overflows.
pub fn update_transfer(
    transfer: &Transfer,
    shift: ShiftToken,
    hours: Quantity,
    employee: &Employee,
    actor: Actor,
    cause: Cause,
) -> Result<WorkflowOutcome, CoreError> {
    let details: TransferDetails = TransferDetails {
        shift,
        hours,
        ..transfer.details.clone()
    };
    details.validate()?;
    let pair: AssignmentPair = plan_pair(&details)?;
    let delta: Quantity = hours - transfer.details.hours;
    let current: EmployeeBalances = employee.balances;
    let next: EmployeeBalances = current.adjusted(BalanceAccount::TransferredHours, delta);

    let action: Action = Action::new(
        String::from("UpdateTransfer"),
        Some(format!(
            "Transfer {}: {} -> {shift}, {} -> {hours} hours",
            transfer.transfer_id, transfer.details.shift, transfer.details.hours
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        balances_snapshot(&format!("transfer={}", transfer.transfer_id), &current),
        balances_snapshot(&format!("transfer={}", transfer.transfer_id), &next),
        Some(details.employee_id),
    );

    Ok(WorkflowOutcome {
        entity: EntityWrite::UpdateTransfer(Transfer {
            transfer_id: transfer.transfer_id,
            details: details.clone(),
        }),
        removals: vec![AssignmentSource::Transfer(transfer.transfer_id)],
        appends: pair.into_records().to_vec(),
        owner: RecordOwner::Entity,
        balances: Some(BalanceWrite {
            employee_id: details.employee_id,
            balances: next,
        }),
        audit_event,
    })
}

/// Plans the deletion of a transfer: the counter is reduced by its hours
/// (floored at zero) and its pair removed.
#[must_use]
pub fn delete_transfer(
    transfer: &Transfer,
    employee: &Employee,
    actor: Actor,
    cause: Cause,
) -> WorkflowOutcome {
    let current: EmployeeBalances = employee.balances;
    let next: EmployeeBalances =
        current.adjusted(BalanceAccount::TransferredHours, -transfer.details.hours);

    let action: Action = Action::new(
        String::from("DeleteTransfer"),
        Some(format!(
            "Deleted transfer {} ({} hours)",
            transfer.transfer_id, transfer.details.hours
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        balances_snapshot(&format!("transfer={}", transfer.transfer_id), &current),
        balances_snapshot("transfer=deleted", &next),
        Some(transfer.details.employee_id),
    );

    WorkflowOutcome {
        entity: EntityWrite::DeleteTransfer(transfer.transfer_id),
        removals: vec![AssignmentSource::Transfer(transfer.transfer_id)],
        appends: Vec::new(),
        owner: RecordOwner::Entity,
        balances: Some(BalanceWrite {
            employee_id: transfer.details.employee_id,
            balances: next,
        }),
        audit_event,
    }
}

fn plan_pair(details: &TransferDetails) -> Result<AssignmentPair, CoreError> {
    Ok(AssignmentPair::for_window(
        details.employee_id,
        details.origin_brigade_id,
        details.destination_brigade_id,
        details.date,
        details.shift,
    )?)
}
