// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for workflow and read-only operations.
//!
//! Every state-changing handler follows the same shape: load what the
//! workflow reads, plan the outcome with the pure `guardia` planners, commit
//! it in one transaction, then read back what the caller sees.

use std::collections::{BTreeMap, BTreeSet};

use guardia::{LeaveContext, ShiftChangeProposal, WorkflowOutcome};
use guardia_audit::{Actor, AuditEvent, Cause};
use guardia_domain::{
    AssignmentRecord, AssignmentSource, AvailabilityReason, Brigade, BrigadeId, Employee,
    EmployeeId, ExclusionVariant, LeaveDetails, LeaveRequest, LeaveRequestId, LeaveState,
    LeaveType, Quantity, Role, RoleFilter, Shift, ShiftChangeRequest, ShiftChangeRequestId,
    ShiftChangeState, ShiftToken, Transfer, TransferDetails, TransferId, evaluate,
    hours_from_decimal, next_day, parse_date, previous_day,
};
use guardia_persistence::{CommitReceipt, Persistence};
use time::Date;
use tracing::{debug, info, warn};

use crate::config::EngineContext;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AssignToBrigadeRequest, AssignToBrigadeResponse, AssignmentInfo, AuditEventInfo,
    AuditTimelineResponse, AvailabilityEntry, BrigadeInfo, CheckAvailabilityRequest,
    CreateBrigadeRequest, CreateBrigadeResponse, CreateEmployeeRequest, CreateEmployeeResponse,
    CreateLeaveRequestRequest, CreateLeaveRequestResponse, CreateShiftChangeRequest,
    CreateShiftChangeResponse, CreateTransferRequest, DeleteLeaveRequestResponse,
    DeleteShiftChangeResponse, DeleteTransferResponse, EmployeeLedgerResponse,
    LeaveRequestInfo, ListBrigadesResponse, RequireFirefighterRequest,
    RequireFirefighterResponse, ResolveAvailabilityRequest, ResolveAvailabilityResponse,
    ScheduleGuardDayRequest, ScheduleGuardDayResponse, ShiftChangeInfo,
    TransferInfo, TransferResponse, TransitionLeaveRequestRequest,
    TransitionLeaveRequestResponse, TransitionShiftChangeRequest, TransitionShiftChangeResponse,
    UpdateTransferRequest,
};

// ============================================================================
// Directory
// ============================================================================

/// Creates a brigade in the directory.
///
/// # Errors
///
/// Returns an error if the name is empty or already taken.
pub fn create_brigade(
    persistence: &mut Persistence,
    request: &CreateBrigadeRequest,
) -> Result<CreateBrigadeResponse, ApiError> {
    let name: &str = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Brigade name must not be empty"),
        });
    }
    if persistence
        .find_brigade_by_name(name)
        .map_err(translate_persistence_error)?
        .is_some()
    {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("unique_brigade_name"),
            message: format!("Brigade '{name}' already exists"),
        });
    }

    let brigade_id: BrigadeId = persistence
        .create_brigade(name, request.park_id, request.is_special)
        .map_err(translate_persistence_error)?;
    let brigade: Brigade = persistence
        .get_brigade(brigade_id)
        .map_err(translate_persistence_error)?;
    info!(%brigade_id, name, "Created brigade");

    Ok(CreateBrigadeResponse {
        brigade: BrigadeInfo::from(&brigade),
        message: format!("Created brigade '{name}'"),
    })
}

/// Lists every brigade in the directory.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_brigades(persistence: &mut Persistence) -> Result<ListBrigadesResponse, ApiError> {
    let brigades: Vec<Brigade> = persistence
        .list_brigades()
        .map_err(translate_persistence_error)?;
    Ok(ListBrigadesResponse {
        brigades: brigades.iter().map(BrigadeInfo::from).collect(),
    })
}

/// Creates an employee with a role, optional home brigade and counters.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or the role is not recognised
/// - The home brigade does not exist
pub fn create_employee(
    persistence: &mut Persistence,
    request: &CreateEmployeeRequest,
) -> Result<CreateEmployeeResponse, ApiError> {
    let name: &str = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Employee name must not be empty"),
        });
    }
    let role: Role = request.role.parse().map_err(translate_domain_error)?;
    let home_brigade_id: Option<BrigadeId> = request.home_brigade_id.map(BrigadeId::new);
    if let Some(brigade_id) = home_brigade_id {
        persistence
            .get_brigade(brigade_id)
            .map_err(translate_persistence_error)?;
    }

    let employee_id: EmployeeId = persistence
        .create_employee(name, role, home_brigade_id, &request.balances)
        .map_err(translate_persistence_error)?;
    info!(%employee_id, name, %role, "Created employee");

    Ok(CreateEmployeeResponse {
        employee_id: employee_id.value(),
        name: name.to_string(),
        role: role.to_string(),
        balances: request.balances,
        message: format!("Created {role} '{name}'"),
    })
}

/// Records that a brigade is on guard on a date.
///
/// # Errors
///
/// Returns an error if the date is invalid or the brigade does not exist.
pub fn schedule_guard_day(
    persistence: &mut Persistence,
    request: &ScheduleGuardDayRequest,
) -> Result<ScheduleGuardDayResponse, ApiError> {
    let date: Date = parse_date_field("date", &request.date)?;
    let brigade_id: BrigadeId = BrigadeId::new(request.brigade_id);
    persistence
        .get_brigade(brigade_id)
        .map_err(translate_persistence_error)?;
    persistence
        .schedule_guard_day(brigade_id, date)
        .map_err(translate_persistence_error)?;
    info!(%brigade_id, %date, "Scheduled guard day");

    Ok(ScheduleGuardDayResponse {
        brigade_id: brigade_id.value(),
        date: date.to_string(),
        message: format!("Brigade {brigade_id} is on guard on {date}"),
    })
}

// ============================================================================
// Availability
// ============================================================================

/// Resolves which employees of a role pool can be required on a date.
///
/// The excluded brigade set is the configured one (leave brigades plus
/// extras) widened with the brigades on guard on the dates the variant
/// names. Each employee is then judged from their latest ledger record and
/// their confirmed leave around the date.
///
/// This is a read-only operation. Lookups that fail for one employee are
/// logged and that employee is reported unavailable (`NoAssignment` for an
/// unresolvable brigade, `UnreadableLeave` for unreadable leave rows) rather
/// than failing the whole query.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `context` - The resolved engine context
/// * `request` - Date, role pool and exclusion variant
///
/// # Errors
///
/// Returns an error if the date is invalid or the pool cannot be listed.
pub fn resolve_availability(
    persistence: &mut Persistence,
    context: &EngineContext,
    request: &ResolveAvailabilityRequest,
) -> Result<ResolveAvailabilityResponse, ApiError> {
    let date: Date = parse_date_field("date", &request.date)?;
    let excluded: BTreeSet<String> =
        excluded_brigades(persistence, context, request.variant, date)?;
    let employees: Vec<Employee> = persistence
        .list_employees_with_roles(request.role_filter.roles())
        .map_err(translate_persistence_error)?;
    let around: Option<BTreeMap<EmployeeId, Vec<LeaveRequest>>> =
        confirmed_leaves_around(persistence, date);

    let mut names: BTreeMap<BrigadeId, Option<String>> = BTreeMap::new();
    let mut entries: Vec<AvailabilityEntry> = Vec::with_capacity(employees.len());
    for employee in &employees {
        let leaves: Option<Vec<LeaveRequest>> = around.as_ref().map_or_else(
            || employee_leaves(persistence, employee.employee_id),
            |by_employee| {
                Some(
                    by_employee
                        .get(&employee.employee_id)
                        .cloned()
                        .unwrap_or_default(),
                )
            },
        );
        entries.push(evaluate_employee(
            persistence,
            employee,
            date,
            leaves.as_deref(),
            &excluded,
            &mut names,
        ));
    }

    info!(
        %date,
        pool = entries.len(),
        available = entries.iter().filter(|entry| entry.available).count(),
        "Resolved availability"
    );

    Ok(ResolveAvailabilityResponse {
        date: date.to_string(),
        entries,
    })
}

/// Firefighters and command staff, excluding brigades on guard the day
/// before, of, or after the date.
///
/// # Errors
///
/// Returns an error if the date is invalid or the pool cannot be listed.
pub fn available_firefighters_and_command(
    persistence: &mut Persistence,
    context: &EngineContext,
    date: &str,
) -> Result<ResolveAvailabilityResponse, ApiError> {
    resolve_availability(
        persistence,
        context,
        &ResolveAvailabilityRequest {
            date: date.to_string(),
            role_filter: RoleFilter::FirefightersAndCommand,
            variant: ExclusionVariant::WithAdjacentGuards,
        },
    )
}

/// Firefighters and command staff, excluding only brigades on guard that day.
///
/// # Errors
///
/// Returns an error if the date is invalid or the pool cannot be listed.
pub fn available_firefighters_and_command_without_adjacent_guards(
    persistence: &mut Persistence,
    context: &EngineContext,
    date: &str,
) -> Result<ResolveAvailabilityResponse, ApiError> {
    resolve_availability(
        persistence,
        context,
        &ResolveAvailabilityRequest {
            date: date.to_string(),
            role_filter: RoleFilter::FirefightersAndCommand,
            variant: ExclusionVariant::WithoutAdjacentGuards,
        },
    )
}

/// Firefighters only, with adjacent guard days excluded.
///
/// # Errors
///
/// Returns an error if the date is invalid or the pool cannot be listed.
pub fn available_firefighters(
    persistence: &mut Persistence,
    context: &EngineContext,
    date: &str,
) -> Result<ResolveAvailabilityResponse, ApiError> {
    resolve_availability(
        persistence,
        context,
        &ResolveAvailabilityRequest {
            date: date.to_string(),
            role_filter: RoleFilter::FirefightersOnly,
            variant: ExclusionVariant::WithAdjacentGuards,
        },
    )
}

/// Firefighters only, excluding only brigades on guard that day.
///
/// # Errors
///
/// Returns an error if the date is invalid or the pool cannot be listed.
pub fn available_firefighters_without_adjacent_guards(
    persistence: &mut Persistence,
    context: &EngineContext,
    date: &str,
) -> Result<ResolveAvailabilityResponse, ApiError> {
    resolve_availability(
        persistence,
        context,
        &ResolveAvailabilityRequest {
            date: date.to_string(),
            role_filter: RoleFilter::FirefightersOnly,
            variant: ExclusionVariant::WithoutAdjacentGuards,
        },
    )
}

/// Judges one employee on one date under a guard variant.
///
/// # Errors
///
/// Returns an error if the date is invalid or the employee does not exist.
pub fn check_availability(
    persistence: &mut Persistence,
    context: &EngineContext,
    request: &CheckAvailabilityRequest,
) -> Result<AvailabilityEntry, ApiError> {
    let date: Date = parse_date_field("date", &request.date)?;
    let employee: Employee = persistence
        .get_employee(EmployeeId::new(request.employee_id))
        .map_err(translate_persistence_error)?;
    let excluded: BTreeSet<String> =
        excluded_brigades(persistence, context, request.variant, date)?;
    let leaves: Option<Vec<LeaveRequest>> = employee_leaves(persistence, employee.employee_id);
    let mut names: BTreeMap<BrigadeId, Option<String>> = BTreeMap::new();
    Ok(evaluate_employee(
        persistence,
        &employee,
        date,
        leaves.as_deref(),
        &excluded,
        &mut names,
    ))
}

/// Whether an employee can be required on a date, given the caller's own
/// excluded brigade names. No guard days are added to the set.
///
/// # Errors
///
/// Returns an error if the date is invalid or the employee does not exist.
pub fn is_available(
    persistence: &mut Persistence,
    employee_id: i64,
    date: &str,
    excluded_brigade_names: &BTreeSet<String>,
) -> Result<bool, ApiError> {
    let date: Date = parse_date_field("date", date)?;
    let employee: Employee = persistence
        .get_employee(EmployeeId::new(employee_id))
        .map_err(translate_persistence_error)?;
    let leaves: Option<Vec<LeaveRequest>> = employee_leaves(persistence, employee.employee_id);
    let mut names: BTreeMap<BrigadeId, Option<String>> = BTreeMap::new();
    Ok(evaluate_employee(
        persistence,
        &employee,
        date,
        leaves.as_deref(),
        excluded_brigade_names,
        &mut names,
    )
    .available)
}

fn excluded_brigades(
    persistence: &mut Persistence,
    context: &EngineContext,
    variant: ExclusionVariant,
    date: Date,
) -> Result<BTreeSet<String>, ApiError> {
    let guards: Vec<String> = persistence
        .guard_brigade_names(&variant.guard_dates(date))
        .map_err(translate_persistence_error)?;
    debug!(%date, ?variant, guards = guards.len(), "Widened excluded brigades with guards");
    Ok(context
        .excluded_brigades
        .iter()
        .cloned()
        .chain(guards)
        .collect())
}

/// Confirmed leave touching the day before through the day after.
///
/// Returns `None` when any row in the window cannot be read; callers then
/// load leave per employee so one bad row only affects its owner.
fn confirmed_leaves_around(
    persistence: &mut Persistence,
    date: Date,
) -> Option<BTreeMap<EmployeeId, Vec<LeaveRequest>>> {
    let from: Date = previous_day(date).unwrap_or(date);
    let to: Date = next_day(date).unwrap_or(date);
    let leaves: Vec<LeaveRequest> = match persistence.list_confirmed_leaves(from, to) {
        Ok(leaves) => leaves,
        Err(err) => {
            warn!(%from, %to, error = %err, "Confirmed leave lookup failed, loading per employee");
            return None;
        }
    };

    let mut by_employee: BTreeMap<EmployeeId, Vec<LeaveRequest>> = BTreeMap::new();
    for leave in leaves {
        by_employee
            .entry(leave.details.employee_id)
            .or_default()
            .push(leave);
    }
    Some(by_employee)
}

/// All leave requests of one employee, or `None` if any cannot be read.
fn employee_leaves(
    persistence: &mut Persistence,
    employee_id: EmployeeId,
) -> Option<Vec<LeaveRequest>> {
    match persistence.list_leave_requests(employee_id) {
        Ok(leaves) => Some(leaves),
        Err(err) => {
            warn!(%employee_id, error = %err, "Leave lookup failed");
            None
        }
    }
}

fn evaluate_employee(
    persistence: &mut Persistence,
    employee: &Employee,
    date: Date,
    leaves: Option<&[LeaveRequest]>,
    excluded: &BTreeSet<String>,
    names: &mut BTreeMap<BrigadeId, Option<String>>,
) -> AvailabilityEntry {
    let brigade: Option<String> =
        latest_brigade_name(persistence, employee.employee_id, date, names);
    let reason: AvailabilityReason = leaves.map_or(AvailabilityReason::UnreadableLeave, |leaves| {
        evaluate(date, brigade.as_deref(), leaves, excluded)
    });
    debug!(employee_id = %employee.employee_id, %date, ?brigade, %reason, "Evaluated availability");

    AvailabilityEntry {
        employee_id: employee.employee_id.value(),
        name: employee.name.clone(),
        role: employee.role.to_string(),
        brigade,
        reason,
        available: reason.is_available(),
    }
}

/// Name of the brigade of the employee's latest record on or before `date`.
///
/// Lookup failures yield `None`, which the rules treat as unavailable.
fn latest_brigade_name(
    persistence: &mut Persistence,
    employee_id: EmployeeId,
    date: Date,
    names: &mut BTreeMap<BrigadeId, Option<String>>,
) -> Option<String> {
    let record: AssignmentRecord = match persistence.latest_assignment(employee_id, date) {
        Ok(Some(record)) => record,
        Ok(None) => return None,
        Err(err) => {
            warn!(%employee_id, %date, error = %err, "Latest assignment lookup failed");
            return None;
        }
    };

    let brigade_id: BrigadeId = record.destination_brigade_id;
    if let Some(name) = names.get(&brigade_id) {
        return name.clone();
    }
    let name: Option<String> = match persistence.get_brigade(brigade_id) {
        Ok(brigade) => Some(brigade.name),
        Err(err) => {
            warn!(%employee_id, %brigade_id, error = %err, "Brigade name lookup failed");
            None
        }
    };
    names.insert(brigade_id, name.clone());
    name
}

// ============================================================================
// Leave requests
// ============================================================================

/// Creates a leave request in the `Pending` state.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The leave fields as supplied by the caller
/// * `actor` - The operator recording the request
/// * `cause` - The reason for the action
///
/// # Errors
///
/// Returns an error if:
/// - Any token or date cannot be parsed
/// - The end date precedes the start date
/// - A shift-scoped type has no shift, or an hour-scoped type no valid hours
/// - The employee does not exist
pub fn create_leave_request(
    persistence: &mut Persistence,
    request: &CreateLeaveRequestRequest,
    actor: Actor,
    cause: Cause,
) -> Result<CreateLeaveRequestResponse, ApiError> {
    let leave_type: LeaveType = request.leave_type.parse().map_err(translate_domain_error)?;
    let start_date: Date = parse_date_field("start_date", &request.start_date)?;
    let end_date: Date = parse_date_field("end_date", &request.end_date)?;
    let shift: Option<ShiftToken> = request
        .shift
        .as_deref()
        .map(str::parse::<ShiftToken>)
        .transpose()
        .map_err(translate_domain_error)?;
    let hours: Option<Quantity> = request
        .hours
        .map(hours_from_decimal)
        .transpose()
        .map_err(translate_domain_error)?;
    let employee: Employee = persistence
        .get_employee(EmployeeId::new(request.employee_id))
        .map_err(translate_persistence_error)?;

    let details: LeaveDetails = LeaveDetails {
        employee_id: employee.employee_id,
        leave_type,
        start_date,
        end_date,
        shift,
        hours,
    };
    let outcome: WorkflowOutcome =
        guardia::create_leave(details, actor, cause).map_err(translate_core_error)?;
    let receipt: CommitReceipt = commit(persistence, &outcome)?;
    let leave_request_id: LeaveRequestId = LeaveRequestId::new(committed_entity_id(&receipt)?);
    let leave: LeaveRequest = persistence
        .get_leave_request(leave_request_id)
        .map_err(translate_persistence_error)?;

    Ok(CreateLeaveRequestResponse {
        leave_request: LeaveRequestInfo::from(&leave),
        event_id: receipt.event_id,
        message: format!(
            "Created {leave_type} leave request {leave_request_id} for employee {}",
            employee.employee_id
        ),
    })
}

/// Moves a leave request to another state.
///
/// Entering `Confirmed` debits the employee's balance and writes the
/// outbound/return pair into the leave type's brigade. Leaving `Confirmed`
/// credits the same quantity back and removes the pair. A rejected
/// transition changes nothing.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `context` - The resolved engine context (leave brigades)
/// * `request` - The request id and target state
/// * `actor` - The approver
/// * `cause` - The reason for the action
///
/// # Errors
///
/// Returns an error if:
/// - The state token is not recognised or the transition is not permitted
/// - The balance is insufficient (`insufficient_balance`)
/// - No origin brigade can be resolved (`no_origin_brigade`)
/// - The request or employee does not exist
pub fn transition_leave_request(
    persistence: &mut Persistence,
    context: &EngineContext,
    request: &TransitionLeaveRequestRequest,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionLeaveRequestResponse, ApiError> {
    let target: LeaveState = request.state.parse().map_err(translate_domain_error)?;
    let leave_request_id: LeaveRequestId = LeaveRequestId::new(request.leave_request_id);
    let leave: LeaveRequest = persistence
        .get_leave_request(leave_request_id)
        .map_err(translate_persistence_error)?;
    let employee: Employee = persistence
        .get_employee(leave.details.employee_id)
        .map_err(translate_persistence_error)?;
    let latest: Option<AssignmentRecord> = persistence
        .latest_assignment(employee.employee_id, leave.details.start_date)
        .map_err(translate_persistence_error)?;

    let outcome: WorkflowOutcome = guardia::transition_leave(
        &leave,
        target,
        LeaveContext {
            employee: &employee,
            latest_before_start: latest.as_ref(),
            leave_brigades: &context.leave_brigades,
        },
        actor,
        cause,
    )
    .map_err(translate_core_error)?;
    let receipt: CommitReceipt = commit(persistence, &outcome)?;

    let updated: LeaveRequest = persistence
        .get_leave_request(leave_request_id)
        .map_err(translate_persistence_error)?;
    let employee: Employee = persistence
        .get_employee(employee.employee_id)
        .map_err(translate_persistence_error)?;
    let records: Vec<AssignmentInfo> =
        owned_records(persistence, AssignmentSource::Leave(leave_request_id))?;

    Ok(TransitionLeaveRequestResponse {
        leave_request: LeaveRequestInfo::from(&updated),
        balances: employee.balances,
        records,
        removed: receipt.removed,
        event_id: receipt.event_id,
        message: format!(
            "Leave request {leave_request_id} moved from {} to {target}",
            leave.state
        ),
    })
}

/// Deletes a leave request, reversing its effects first if it is confirmed.
///
/// # Errors
///
/// Returns an error if the request or employee does not exist.
pub fn delete_leave_request(
    persistence: &mut Persistence,
    leave_request_id: i64,
    actor: Actor,
    cause: Cause,
) -> Result<DeleteLeaveRequestResponse, ApiError> {
    let leave_request_id: LeaveRequestId = LeaveRequestId::new(leave_request_id);
    let leave: LeaveRequest = persistence
        .get_leave_request(leave_request_id)
        .map_err(translate_persistence_error)?;
    let employee: Employee = persistence
        .get_employee(leave.details.employee_id)
        .map_err(translate_persistence_error)?;

    let outcome: WorkflowOutcome =
        guardia::delete_leave(&leave, &employee, actor, cause).map_err(translate_core_error)?;
    let receipt: CommitReceipt = commit(persistence, &outcome)?;
    let employee: Employee = persistence
        .get_employee(employee.employee_id)
        .map_err(translate_persistence_error)?;

    Ok(DeleteLeaveRequestResponse {
        leave_request_id: leave_request_id.value(),
        balances: employee.balances,
        removed: receipt.removed,
        event_id: receipt.event_id,
        message: format!("Deleted leave request {leave_request_id}"),
    })
}

// ============================================================================
// Shift changes
// ============================================================================

/// Records a swap both employees have agreed on.
///
/// Each employee's brigade is resolved from their latest ledger record on or
/// before the swap date and stored on the request.
///
/// # Errors
///
/// Returns an error if:
/// - A token or date cannot be parsed
/// - Either employee does not exist, or both sides are the same employee
/// - Either employee has no brigade assignment (`no_brigade_assignment`)
pub fn create_shift_change(
    persistence: &mut Persistence,
    request: &CreateShiftChangeRequest,
    actor: Actor,
    cause: Cause,
) -> Result<CreateShiftChangeResponse, ApiError> {
    let date: Date = parse_date_field("date", &request.date)?;
    let secondary_date: Option<Date> = request
        .secondary_date
        .as_deref()
        .map(|value| parse_date_field("secondary_date", value))
        .transpose()?;
    let shift: ShiftToken = request.shift.parse().map_err(translate_domain_error)?;
    let employee1: Employee = persistence
        .get_employee(EmployeeId::new(request.employee1_id))
        .map_err(translate_persistence_error)?;
    let employee2: Employee = persistence
        .get_employee(EmployeeId::new(request.employee2_id))
        .map_err(translate_persistence_error)?;
    let latest1: Option<AssignmentRecord> = persistence
        .latest_assignment(employee1.employee_id, date)
        .map_err(translate_persistence_error)?;
    let latest2: Option<AssignmentRecord> = persistence
        .latest_assignment(employee2.employee_id, date)
        .map_err(translate_persistence_error)?;

    let proposal: ShiftChangeProposal = ShiftChangeProposal {
        employee1_id: employee1.employee_id,
        employee2_id: employee2.employee_id,
        date,
        secondary_date,
        shift,
        reason: request.reason.clone(),
    };
    let outcome: WorkflowOutcome = guardia::create_shift_change(
        proposal,
        latest1.as_ref(),
        latest2.as_ref(),
        actor,
        cause,
    )
    .map_err(translate_core_error)?;
    let receipt: CommitReceipt = commit(persistence, &outcome)?;
    let shift_change_request_id: ShiftChangeRequestId =
        ShiftChangeRequestId::new(committed_entity_id(&receipt)?);
    let created: ShiftChangeRequest = persistence
        .get_shift_change_request(shift_change_request_id)
        .map_err(translate_persistence_error)?;

    Ok(CreateShiftChangeResponse {
        shift_change: ShiftChangeInfo::from(&created),
        event_id: receipt.event_id,
        message: format!(
            "Created shift change {shift_change_request_id} between employees {} and {}",
            employee1.employee_id, employee2.employee_id
        ),
    })
}

/// Moves a shift-change request to another state.
///
/// Entering `Accepted` writes four ledger records; leaving it removes them.
///
/// # Errors
///
/// Returns an error if the state token is not recognised, equals the current
/// state, or the request does not exist.
pub fn transition_shift_change(
    persistence: &mut Persistence,
    request: &TransitionShiftChangeRequest,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionShiftChangeResponse, ApiError> {
    let target: ShiftChangeState = request.state.parse().map_err(translate_domain_error)?;
    let shift_change_request_id: ShiftChangeRequestId =
        ShiftChangeRequestId::new(request.shift_change_request_id);
    let current: ShiftChangeRequest = persistence
        .get_shift_change_request(shift_change_request_id)
        .map_err(translate_persistence_error)?;

    let outcome: WorkflowOutcome = guardia::transition_shift_change(&current, target, actor, cause)
        .map_err(translate_core_error)?;
    let receipt: CommitReceipt = commit(persistence, &outcome)?;

    let updated: ShiftChangeRequest = persistence
        .get_shift_change_request(shift_change_request_id)
        .map_err(translate_persistence_error)?;
    let records: Vec<AssignmentInfo> = owned_records(
        persistence,
        AssignmentSource::ShiftChange(shift_change_request_id),
    )?;

    Ok(TransitionShiftChangeResponse {
        shift_change: ShiftChangeInfo::from(&updated),
        records,
        removed: receipt.removed,
        event_id: receipt.event_id,
        message: format!(
            "Shift change {shift_change_request_id} moved from {} to {target}",
            current.state
        ),
    })
}

/// Deletes a shift-change request, removing its records if accepted.
///
/// # Errors
///
/// Returns an error if the request does not exist.
pub fn delete_shift_change(
    persistence: &mut Persistence,
    shift_change_request_id: i64,
    actor: Actor,
    cause: Cause,
) -> Result<DeleteShiftChangeResponse, ApiError> {
    let shift_change_request_id: ShiftChangeRequestId =
        ShiftChangeRequestId::new(shift_change_request_id);
    let current: ShiftChangeRequest = persistence
        .get_shift_change_request(shift_change_request_id)
        .map_err(translate_persistence_error)?;

    let outcome: WorkflowOutcome = guardia::delete_shift_change(&current, actor, cause);
    let receipt: CommitReceipt = commit(persistence, &outcome)?;

    Ok(DeleteShiftChangeResponse {
        shift_change_request_id: shift_change_request_id.value(),
        removed: receipt.removed,
        event_id: receipt.event_id,
        message: format!("Deleted shift change {shift_change_request_id}"),
    })
}

// ============================================================================
// Transfers
// ============================================================================

/// Creates a transfer and charges its hours.
///
/// When no origin brigade is given it is resolved like a leave origin: the
/// latest ledger record on or before the date, else the home brigade.
///
/// # Errors
///
/// Returns an error if:
/// - The date or shift token cannot be parsed
/// - The employee or either brigade does not exist
/// - No origin can be resolved, or origin and destination coincide
/// - The hours are below 0.01
pub fn create_transfer(
    persistence: &mut Persistence,
    request: &CreateTransferRequest,
    actor: Actor,
    cause: Cause,
) -> Result<TransferResponse, ApiError> {
    let date: Date = parse_date_field("date", &request.date)?;
    let shift: ShiftToken = request.shift.parse().map_err(translate_domain_error)?;
    let employee: Employee = persistence
        .get_employee(EmployeeId::new(request.employee_id))
        .map_err(translate_persistence_error)?;
    let destination: Brigade = persistence
        .get_brigade(BrigadeId::new(request.destination_brigade_id))
        .map_err(translate_persistence_error)?;
    let origin_brigade_id: BrigadeId = match request.origin_brigade_id {
        Some(id) => {
            persistence
                .get_brigade(BrigadeId::new(id))
                .map_err(translate_persistence_error)?
                .brigade_id
        }
        None => {
            let latest: Option<AssignmentRecord> = persistence
                .latest_assignment(employee.employee_id, date)
                .map_err(translate_persistence_error)?;
            guardia::resolve_origin(&employee, latest.as_ref()).map_err(translate_domain_error)?
        }
    };

    let details: TransferDetails = TransferDetails {
        employee_id: employee.employee_id,
        origin_brigade_id,
        destination_brigade_id: destination.brigade_id,
        date,
        shift,
        hours: hours_from_decimal(request.hours).map_err(translate_domain_error)?,
    };
    let outcome: WorkflowOutcome =
        guardia::create_transfer(details, &employee, actor, cause).map_err(translate_core_error)?;
    let receipt: CommitReceipt = commit(persistence, &outcome)?;
    let transfer_id: TransferId = TransferId::new(committed_entity_id(&receipt)?);

    transfer_response(
        persistence,
        transfer_id,
        &receipt,
        format!(
            "Created transfer {transfer_id} of employee {} to '{}'",
            employee.employee_id, destination.name
        ),
    )
}

/// Changes a transfer's shift window and hours.
///
/// The pair is always rewritten and the counter moves by the signed hour
/// delta, floored at zero.
///
/// # Errors
///
/// Returns an error if the shift token or hours are invalid, or the transfer
/// does not exist.
pub fn update_transfer(
    persistence: &mut Persistence,
    request: &UpdateTransferRequest,
    actor: Actor,
    cause: Cause,
) -> Result<TransferResponse, ApiError> {
    let shift: ShiftToken = request.shift.parse().map_err(translate_domain_error)?;
    let hours: Quantity = hours_from_decimal(request.hours).map_err(translate_domain_error)?;
    let transfer_id: TransferId = TransferId::new(request.transfer_id);
    let transfer: Transfer = persistence
        .get_transfer(transfer_id)
        .map_err(translate_persistence_error)?;
    let employee: Employee = persistence
        .get_employee(transfer.details.employee_id)
        .map_err(translate_persistence_error)?;

    let outcome: WorkflowOutcome =
        guardia::update_transfer(&transfer, shift, hours, &employee, actor, cause)
            .map_err(translate_core_error)?;
    let receipt: CommitReceipt = commit(persistence, &outcome)?;

    transfer_response(
        persistence,
        transfer_id,
        &receipt,
        format!(
            "Updated transfer {transfer_id}: {} -> {shift}, {} -> {hours} hours",
            transfer.details.shift, transfer.details.hours
        ),
    )
}

/// Deletes a transfer, refunding its hours and removing its pair.
///
/// # Errors
///
/// Returns an error if the transfer or its employee does not exist.
pub fn delete_transfer(
    persistence: &mut Persistence,
    transfer_id: i64,
    actor: Actor,
    cause: Cause,
) -> Result<DeleteTransferResponse, ApiError> {
    let transfer_id: TransferId = TransferId::new(transfer_id);
    let transfer: Transfer = persistence
        .get_transfer(transfer_id)
        .map_err(translate_persistence_error)?;
    let employee: Employee = persistence
        .get_employee(transfer.details.employee_id)
        .map_err(translate_persistence_error)?;

    let outcome: WorkflowOutcome = guardia::delete_transfer(&transfer, &employee, actor, cause);
    let receipt: CommitReceipt = commit(persistence, &outcome)?;
    let employee: Employee = persistence
        .get_employee(employee.employee_id)
        .map_err(translate_persistence_error)?;

    Ok(DeleteTransferResponse {
        transfer_id: transfer_id.value(),
        transferred_hours: employee.balances.transferred_hours.to_decimal(),
        removed: receipt.removed,
        event_id: receipt.event_id,
        message: format!("Deleted transfer {transfer_id}"),
    })
}

fn transfer_response(
    persistence: &mut Persistence,
    transfer_id: TransferId,
    receipt: &CommitReceipt,
    message: String,
) -> Result<TransferResponse, ApiError> {
    let transfer: Transfer = persistence
        .get_transfer(transfer_id)
        .map_err(translate_persistence_error)?;
    let employee: Employee = persistence
        .get_employee(transfer.details.employee_id)
        .map_err(translate_persistence_error)?;
    let records: Vec<AssignmentInfo> =
        owned_records(persistence, AssignmentSource::Transfer(transfer_id))?;

    Ok(TransferResponse {
        transfer: TransferInfo::from(&transfer),
        transferred_hours: employee.balances.transferred_hours.to_decimal(),
        records,
        removed: receipt.removed,
        event_id: receipt.event_id,
        message,
    })
}

// ============================================================================
// Ad-hoc ledger operations
// ============================================================================

/// Pulls an employee into a brigade for one shift window.
///
/// The employee leaves their current brigade (latest record on or before
/// the date, else their home brigade) and returns to it per the shift
/// transition table. No request owns the pair.
///
/// # Errors
///
/// Returns an error if:
/// - The date or shift token cannot be parsed
/// - The employee or destination brigade does not exist
/// - No origin brigade can be resolved, or it is the destination
pub fn require_firefighter(
    persistence: &mut Persistence,
    request: &RequireFirefighterRequest,
    actor: Actor,
    cause: Cause,
) -> Result<RequireFirefighterResponse, ApiError> {
    let date: Date = parse_date_field("date", &request.date)?;
    let shift: ShiftToken = request.shift.parse().map_err(translate_domain_error)?;
    let employee: Employee = persistence
        .get_employee(EmployeeId::new(request.employee_id))
        .map_err(translate_persistence_error)?;
    let destination: Brigade = persistence
        .get_brigade(BrigadeId::new(request.destination_brigade_id))
        .map_err(translate_persistence_error)?;
    let latest: Option<AssignmentRecord> = persistence
        .latest_assignment(employee.employee_id, date)
        .map_err(translate_persistence_error)?;

    let outcome: WorkflowOutcome = guardia::require_firefighter(
        &employee,
        latest.as_ref(),
        destination.brigade_id,
        date,
        shift,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;
    let receipt: CommitReceipt = commit(persistence, &outcome)?;

    let mut records = appended_records(&outcome, &receipt, AssignmentSource::Requirement)
        .into_iter();
    let (Some(outbound), Some(return_record)) = (records.next(), records.next()) else {
        return Err(ApiError::Internal {
            message: String::from("Requirement did not produce an outbound/return pair"),
        });
    };

    Ok(RequireFirefighterResponse {
        outbound,
        return_record,
        event_id: receipt.event_id,
        message: format!(
            "Employee {} required into '{}' on {date} ({shift})",
            employee.employee_id, destination.name
        ),
    })
}

/// Appends an open-ended roster record moving an employee into a brigade.
///
/// # Errors
///
/// Returns an error if the date or shift cannot be parsed, or the employee
/// or brigade does not exist.
pub fn assign_to_brigade(
    persistence: &mut Persistence,
    request: &AssignToBrigadeRequest,
    actor: Actor,
    cause: Cause,
) -> Result<AssignToBrigadeResponse, ApiError> {
    let date: Date = parse_date_field("date", &request.date)?;
    let shift: Shift = request.shift.parse().map_err(translate_domain_error)?;
    let employee: Employee = persistence
        .get_employee(EmployeeId::new(request.employee_id))
        .map_err(translate_persistence_error)?;
    let brigade: Brigade = persistence
        .get_brigade(BrigadeId::new(request.brigade_id))
        .map_err(translate_persistence_error)?;
    let latest: Option<AssignmentRecord> = persistence
        .latest_assignment(employee.employee_id, date)
        .map_err(translate_persistence_error)?;

    let outcome: WorkflowOutcome = guardia::assign_to_brigade(
        &employee,
        latest.as_ref(),
        brigade.brigade_id,
        date,
        shift,
        actor,
        cause,
    );
    let receipt: CommitReceipt = commit(persistence, &outcome)?;
    let record: AssignmentInfo = appended_records(&outcome, &receipt, AssignmentSource::Roster)
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Roster assignment did not produce a record"),
        })?;

    Ok(AssignToBrigadeResponse {
        record,
        event_id: receipt.event_id,
        message: format!(
            "Employee {} assigned to '{}' from {date} ({shift})",
            employee.employee_id, brigade.name
        ),
    })
}

// ============================================================================
// Read-only views
// ============================================================================

/// Returns an employee's full ledger in chronological order.
///
/// # Errors
///
/// Returns an error if the employee does not exist.
pub fn get_employee_ledger(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<EmployeeLedgerResponse, ApiError> {
    let employee: Employee = persistence
        .get_employee(EmployeeId::new(employee_id))
        .map_err(translate_persistence_error)?;
    let records: Vec<AssignmentRecord> = persistence
        .assignments_for_employee(employee.employee_id)
        .map_err(translate_persistence_error)?;
    Ok(EmployeeLedgerResponse {
        employee_id,
        records: records.iter().map(AssignmentInfo::from).collect(),
    })
}

/// Returns the audit events recorded for an employee, oldest first.
///
/// # Errors
///
/// Returns an error if the employee does not exist.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<AuditTimelineResponse, ApiError> {
    let employee: Employee = persistence
        .get_employee(EmployeeId::new(employee_id))
        .map_err(translate_persistence_error)?;
    let events: Vec<AuditEvent> = persistence
        .get_audit_timeline(employee.employee_id)
        .map_err(translate_persistence_error)?;
    Ok(AuditTimelineResponse {
        employee_id,
        events: events.iter().map(AuditEventInfo::from).collect(),
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Parses a `YYYY-MM-DD` date, reporting failures against `field`.
fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|err| match translate_domain_error(err) {
        ApiError::InvalidInput { message, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        other => other,
    })
}

fn commit(
    persistence: &mut Persistence,
    outcome: &WorkflowOutcome,
) -> Result<CommitReceipt, ApiError> {
    let receipt: CommitReceipt = persistence
        .commit(outcome)
        .map_err(translate_persistence_error)?;
    info!(
        action = %outcome.audit_event.action.name,
        entity_id = ?receipt.entity_id,
        appended = receipt.assignment_ids.len(),
        removed = receipt.removed,
        event_id = receipt.event_id,
        "Workflow applied"
    );
    Ok(receipt)
}

fn committed_entity_id(receipt: &CommitReceipt) -> Result<i64, ApiError> {
    receipt.entity_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Commit did not report the new entity id"),
    })
}

fn owned_records(
    persistence: &mut Persistence,
    source: AssignmentSource,
) -> Result<Vec<AssignmentInfo>, ApiError> {
    let records: Vec<AssignmentRecord> = persistence
        .assignments_for_source(source)
        .map_err(translate_persistence_error)?;
    Ok(records.iter().map(AssignmentInfo::from).collect())
}

/// Rebuilds the appended records of an outcome without an owning entity.
fn appended_records(
    outcome: &WorkflowOutcome,
    receipt: &CommitReceipt,
    source: AssignmentSource,
) -> Vec<AssignmentInfo> {
    outcome
        .appends
        .iter()
        .zip(&receipt.assignment_ids)
        .map(|(planned, assignment_id)| {
            AssignmentInfo::from(&AssignmentRecord {
                assignment_id: *assignment_id,
                employee_id: planned.employee_id,
                date: planned.date,
                shift: planned.shift,
                origin_brigade_id: planned.origin_brigade_id,
                destination_brigade_id: planned.destination_brigade_id,
                kind: planned.kind,
                source,
            })
        })
        .collect()
}
