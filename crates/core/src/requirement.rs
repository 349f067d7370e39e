// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignments made without an owning request.

use crate::error::CoreError;
use crate::outcome::{EntityWrite, RecordOwner, WorkflowOutcome};
use crate::resolve_origin;
use guardia_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use guardia_domain::{
    AssignmentKind, AssignmentPair, AssignmentRecord, BrigadeId, DomainError, Employee,
    PlannedAssignment, Shift, ShiftToken,
};
use time::Date;

/// Plans pulling an employee into another brigade for one shift window.
///
/// The employee's origin is their latest brigade on or before `date`, falling
/// back to their home brigade.
///
/// # Errors
///
/// Returns an error if no origin brigade resolves, the origin already is the
/// destination, or the return date overflows.
pub fn require_firefighter(
    employee: &Employee,
    latest: Option<&AssignmentRecord>,
    destination_brigade_id: BrigadeId,
    date: Date,
    shift: ShiftToken,
    actor: Actor,
    cause: Cause,
) -> Result<WorkflowOutcome, CoreError> {
    let origin: BrigadeId = resolve_origin(employee, latest)?;
    if origin == destination_brigade_id {
        return Err(DomainError::SameBrigade.into());
    }
    let pair: AssignmentPair = AssignmentPair::for_window(
        employee.employee_id,
        origin,
        destination_brigade_id,
        date,
        shift,
    )?;

    let action: Action = Action::new(
        String::from("RequireFirefighter"),
        Some(format!(
            "Employee {} required from brigade {origin} into brigade {destination_brigade_id} on {date} ({shift})",
            employee.employee_id
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        StateSnapshot::new(format!("brigade={origin}")),
        StateSnapshot::new(format!(
            "brigade={destination_brigade_id},returns_to={origin}"
        )),
        Some(employee.employee_id),
    );

    Ok(WorkflowOutcome {
        entity: EntityWrite::None,
        removals: Vec::new(),
        appends: pair.into_records().to_vec(),
        owner: RecordOwner::Requirement,
        balances: None,
        audit_event,
    })
}

/// Plans a standing roster assignment: from `date`/`shift` on, the employee
/// belongs to `brigade_id` until a later record says otherwise.
#[must_use]
pub fn assign_to_brigade(
    employee: &Employee,
    latest: Option<&AssignmentRecord>,
    brigade_id: BrigadeId,
    date: Date,
    shift: Shift,
    actor: Actor,
    cause: Cause,
) -> WorkflowOutcome {
    let origin: Option<BrigadeId> = latest
        .map(|record| record.destination_brigade_id)
        .or(employee.home_brigade_id);
    let record: PlannedAssignment = PlannedAssignment {
        employee_id: employee.employee_id,
        date,
        shift,
        origin_brigade_id: origin,
        destination_brigade_id: brigade_id,
        kind: AssignmentKind::Outbound,
    };

    let action: Action = Action::new(
        String::from("AssignToBrigade"),
        Some(format!(
            "Employee {} assigned to brigade {brigade_id} from {date} ({shift})",
            employee.employee_id
        )),
    );
    let before: StateSnapshot = StateSnapshot::new(
        origin.map_or_else(|| String::from("brigade=none"), |b| format!("brigade={b}")),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        StateSnapshot::new(format!("brigade={brigade_id}")),
        Some(employee.employee_id),
    );

    WorkflowOutcome {
        entity: EntityWrite::None,
        removals: Vec::new(),
        appends: vec![record],
        owner: RecordOwner::Roster,
        balances: None,
        audit_event,
    }
}
