// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API layer.
//!
//! Requests carry raw tokens (dates, shifts, states, roles) exactly as a
//! caller supplies them; handlers parse and validate them so a bad value is
//! reported against its field. Responses carry plain, serializable views.

use guardia_audit::AuditEvent;
use guardia_domain::{
    AssignmentRecord, AssignmentSource, AvailabilityReason, Brigade, EmployeeBalances,
    ExclusionVariant, LeaveRequest, Quantity, RoleFilter, ShiftChangeRequest, Transfer,
};

// ============================================================================
// Directory
// ============================================================================

/// API request to create a brigade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBrigadeRequest {
    /// Unique brigade name.
    pub name: String,
    /// The park the brigade belongs to.
    pub park_id: Option<i64>,
    /// Whether the brigade is non-operational.
    pub is_special: bool,
}

/// Serializable view of a brigade.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BrigadeInfo {
    /// The brigade id.
    pub brigade_id: i64,
    /// The brigade name.
    pub name: String,
    /// The park, if any.
    pub park_id: Option<i64>,
    /// Whether the brigade is non-operational.
    pub is_special: bool,
}

impl From<&Brigade> for BrigadeInfo {
    fn from(brigade: &Brigade) -> Self {
        Self {
            brigade_id: brigade.brigade_id.value(),
            name: brigade.name.clone(),
            park_id: brigade.park_id,
            is_special: brigade.is_special,
        }
    }
}

/// API response for brigade creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateBrigadeResponse {
    /// The created brigade.
    pub brigade: BrigadeInfo,
    /// A success message.
    pub message: String,
}

/// API response listing brigades.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListBrigadesResponse {
    /// All brigades, ordered by id.
    pub brigades: Vec<BrigadeInfo>,
}

/// API request to create an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeRequest {
    /// Display name.
    pub name: String,
    /// Role token (`Firefighter`, `Command`, `Head`).
    pub role: String,
    /// Default brigade used when the ledger holds nothing earlier.
    pub home_brigade_id: Option<i64>,
    /// Initial entitlement counters.
    pub balances: EmployeeBalances,
}

/// API response for employee creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateEmployeeResponse {
    /// The new employee id.
    pub employee_id: i64,
    /// Display name.
    pub name: String,
    /// Canonical role.
    pub role: String,
    /// Initial entitlement counters.
    pub balances: EmployeeBalances,
    /// A success message.
    pub message: String,
}

/// API request to schedule a guard day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleGuardDayRequest {
    /// The brigade on guard.
    pub brigade_id: i64,
    /// The guard date (`YYYY-MM-DD`).
    pub date: String,
}

/// API response for guard scheduling.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleGuardDayResponse {
    /// The brigade on guard.
    pub brigade_id: i64,
    /// The guard date.
    pub date: String,
    /// A success message.
    pub message: String,
}

// ============================================================================
// Ledger
// ============================================================================

/// Serializable view of a ledger record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignmentInfo {
    /// The record id.
    pub assignment_id: i64,
    /// The employee moved.
    pub employee_id: i64,
    /// Effective date.
    pub date: String,
    /// Effective shift.
    pub shift: String,
    /// Brigade left, if known.
    pub origin_brigade_id: Option<i64>,
    /// Brigade entered.
    pub destination_brigade_id: i64,
    /// `Outbound` or `Return`.
    pub kind: String,
    /// What produced the record.
    pub source: String,
    /// Id of the owning request, if any.
    pub source_id: Option<i64>,
}

impl From<&AssignmentRecord> for AssignmentInfo {
    fn from(record: &AssignmentRecord) -> Self {
        let source_id: Option<i64> = match record.source {
            AssignmentSource::Roster | AssignmentSource::Requirement => None,
            AssignmentSource::Leave(id) => Some(id.value()),
            AssignmentSource::ShiftChange(id) => Some(id.value()),
            AssignmentSource::Transfer(id) => Some(id.value()),
        };
        Self {
            assignment_id: record.assignment_id.value(),
            employee_id: record.employee_id.value(),
            date: record.date.to_string(),
            shift: record.shift.to_string(),
            origin_brigade_id: record.origin_brigade_id.map(|id| id.value()),
            destination_brigade_id: record.destination_brigade_id.value(),
            kind: record.kind.to_string(),
            source: record.source.tag().to_string(),
            source_id,
        }
    }
}

/// API request to append a standing roster assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignToBrigadeRequest {
    /// The employee.
    pub employee_id: i64,
    /// The brigade the employee joins.
    pub brigade_id: i64,
    /// First date of the assignment.
    pub date: String,
    /// Single shift (`Morning`, `Afternoon`, `Night`).
    pub shift: String,
}

/// API response for a roster assignment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignToBrigadeResponse {
    /// The appended record.
    pub record: AssignmentInfo,
    /// The audit event id.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to pull an employee into a brigade for one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireFirefighterRequest {
    /// The employee.
    pub employee_id: i64,
    /// The brigade that needs cover.
    pub destination_brigade_id: i64,
    /// Date of the window.
    pub date: String,
    /// Shift token of the window.
    pub shift: String,
}

/// API response for a requirement.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RequireFirefighterResponse {
    /// The move into the destination brigade.
    pub outbound: AssignmentInfo,
    /// The move back.
    pub return_record: AssignmentInfo,
    /// The audit event id.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response with an employee's full ledger.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeLedgerResponse {
    /// The employee.
    pub employee_id: i64,
    /// Records in chronological order.
    pub records: Vec<AssignmentInfo>,
}

// ============================================================================
// Availability
// ============================================================================

/// API request to list available employees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveAvailabilityRequest {
    /// The query date (`YYYY-MM-DD`).
    pub date: String,
    /// Which roles form the pool.
    pub role_filter: RoleFilter,
    /// How far guard days widen the excluded set.
    pub variant: ExclusionVariant,
}

/// One employee's availability decision.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AvailabilityEntry {
    /// The employee.
    pub employee_id: i64,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: String,
    /// Name of the latest brigade, if one resolved.
    pub brigade: Option<String>,
    /// The rule that decided.
    pub reason: AvailabilityReason,
    /// Whether the employee can be required.
    pub available: bool,
}

/// API response for an availability query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolveAvailabilityResponse {
    /// The query date.
    pub date: String,
    /// Every employee of the pool with their decision.
    pub entries: Vec<AvailabilityEntry>,
}

impl ResolveAvailabilityResponse {
    /// Ids of the employees judged available.
    #[must_use]
    pub fn available_ids(&self) -> Vec<i64> {
        self.entries
            .iter()
            .filter(|entry| entry.available)
            .map(|entry| entry.employee_id)
            .collect()
    }
}

/// API request to check one employee's availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckAvailabilityRequest {
    /// The employee.
    pub employee_id: i64,
    /// The query date.
    pub date: String,
    /// How far guard days widen the excluded set.
    pub variant: ExclusionVariant,
}

// ============================================================================
// Leave requests
// ============================================================================

/// Serializable view of a leave request.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LeaveRequestInfo {
    /// The request id.
    pub leave_request_id: i64,
    /// The requesting employee.
    pub employee_id: i64,
    /// Leave type.
    pub leave_type: String,
    /// First day.
    pub start_date: String,
    /// Last day (inclusive).
    pub end_date: String,
    /// Shift window, if any.
    pub shift: Option<String>,
    /// Hours, if any.
    pub hours: Option<f64>,
    /// Current state.
    pub state: String,
}

impl From<&LeaveRequest> for LeaveRequestInfo {
    fn from(request: &LeaveRequest) -> Self {
        Self {
            leave_request_id: request.leave_request_id.value(),
            employee_id: request.details.employee_id.value(),
            leave_type: request.details.leave_type.to_string(),
            start_date: request.details.start_date.to_string(),
            end_date: request.details.end_date.to_string(),
            shift: request.details.shift.map(|shift| shift.to_string()),
            hours: request.details.hours.map(Quantity::to_decimal),
            state: request.state.to_string(),
        }
    }
}

/// API request to create a leave request.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateLeaveRequestRequest {
    /// The requesting employee.
    pub employee_id: i64,
    /// Leave type token.
    pub leave_type: String,
    /// First day (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day (`YYYY-MM-DD`, inclusive).
    pub end_date: String,
    /// Shift token, required for shift-scoped types.
    pub shift: Option<String>,
    /// Hours, required for hour-scoped types.
    pub hours: Option<f64>,
}

/// API response for leave request creation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateLeaveRequestResponse {
    /// The created request.
    pub leave_request: LeaveRequestInfo,
    /// The audit event id.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to move a leave request to another state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionLeaveRequestRequest {
    /// The request.
    pub leave_request_id: i64,
    /// Target state token.
    pub state: String,
}

/// API response for a leave request transition.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionLeaveRequestResponse {
    /// The request after the transition.
    pub leave_request: LeaveRequestInfo,
    /// The employee's counters after the transition.
    pub balances: EmployeeBalances,
    /// Ledger records the request now owns.
    pub records: Vec<AssignmentInfo>,
    /// Number of ledger records removed.
    pub removed: usize,
    /// The audit event id.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for leave request deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteLeaveRequestResponse {
    /// The deleted request id.
    pub leave_request_id: i64,
    /// The employee's counters after the deletion.
    pub balances: EmployeeBalances,
    /// Number of ledger records removed.
    pub removed: usize,
    /// The audit event id.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

// ============================================================================
// Shift changes
// ============================================================================

/// Serializable view of a shift-change request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShiftChangeInfo {
    /// The request id.
    pub shift_change_request_id: i64,
    /// First employee.
    pub employee1_id: i64,
    /// Second employee.
    pub employee2_id: i64,
    /// First employee's brigade at creation.
    pub brigade1_id: i64,
    /// Second employee's brigade at creation.
    pub brigade2_id: i64,
    /// Swap date.
    pub date: String,
    /// Optional secondary date.
    pub secondary_date: Option<String>,
    /// Swap window.
    pub shift: String,
    /// Free-text reason.
    pub reason: String,
    /// Current state.
    pub state: String,
}

impl From<&ShiftChangeRequest> for ShiftChangeInfo {
    fn from(request: &ShiftChangeRequest) -> Self {
        let details = &request.details;
        Self {
            shift_change_request_id: request.shift_change_request_id.value(),
            employee1_id: details.employee1_id.value(),
            employee2_id: details.employee2_id.value(),
            brigade1_id: details.brigade1_id.value(),
            brigade2_id: details.brigade2_id.value(),
            date: details.date.to_string(),
            secondary_date: details.secondary_date.map(|date| date.to_string()),
            shift: details.shift.to_string(),
            reason: details.reason.clone(),
            state: request.state.to_string(),
        }
    }
}

/// API request to create a shift-change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateShiftChangeRequest {
    /// First employee.
    pub employee1_id: i64,
    /// Second employee.
    pub employee2_id: i64,
    /// Swap date (`YYYY-MM-DD`).
    pub date: String,
    /// Optional secondary date.
    pub secondary_date: Option<String>,
    /// Swap window token.
    pub shift: String,
    /// Free-text reason.
    pub reason: String,
}

/// API response for shift-change creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateShiftChangeResponse {
    /// The created request.
    pub shift_change: ShiftChangeInfo,
    /// The audit event id.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to move a shift-change request to another state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionShiftChangeRequest {
    /// The request.
    pub shift_change_request_id: i64,
    /// Target state token.
    pub state: String,
}

/// API response for a shift-change transition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionShiftChangeResponse {
    /// The request after the transition.
    pub shift_change: ShiftChangeInfo,
    /// Ledger records the request now owns.
    pub records: Vec<AssignmentInfo>,
    /// Number of ledger records removed.
    pub removed: usize,
    /// The audit event id.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for shift-change deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteShiftChangeResponse {
    /// The deleted request id.
    pub shift_change_request_id: i64,
    /// Number of ledger records removed.
    pub removed: usize,
    /// The audit event id.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

// ============================================================================
// Transfers
// ============================================================================

/// Serializable view of a transfer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransferInfo {
    /// The transfer id.
    pub transfer_id: i64,
    /// The employee relocated.
    pub employee_id: i64,
    /// Brigade left.
    pub origin_brigade_id: i64,
    /// Brigade covered.
    pub destination_brigade_id: i64,
    /// Date.
    pub date: String,
    /// Shift window.
    pub shift: String,
    /// Hour cost.
    pub hours: f64,
}

impl From<&Transfer> for TransferInfo {
    fn from(transfer: &Transfer) -> Self {
        Self {
            transfer_id: transfer.transfer_id.value(),
            employee_id: transfer.details.employee_id.value(),
            origin_brigade_id: transfer.details.origin_brigade_id.value(),
            destination_brigade_id: transfer.details.destination_brigade_id.value(),
            date: transfer.details.date.to_string(),
            shift: transfer.details.shift.to_string(),
            hours: transfer.details.hours.to_decimal(),
        }
    }
}

/// API request to create a transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTransferRequest {
    /// The employee relocated.
    pub employee_id: i64,
    /// Brigade left; resolved from the ledger when omitted.
    pub origin_brigade_id: Option<i64>,
    /// Brigade covered.
    pub destination_brigade_id: i64,
    /// Date (`YYYY-MM-DD`).
    pub date: String,
    /// Shift window token.
    pub shift: String,
    /// Hour cost.
    pub hours: f64,
}

/// API request to change a transfer's window and hours.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTransferRequest {
    /// The transfer.
    pub transfer_id: i64,
    /// New shift window token.
    pub shift: String,
    /// New hour cost.
    pub hours: f64,
}

/// API response for transfer creation and update.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransferResponse {
    /// The transfer after the operation.
    pub transfer: TransferInfo,
    /// The employee's transferred-hours counter afterwards.
    pub transferred_hours: f64,
    /// Ledger records the transfer owns.
    pub records: Vec<AssignmentInfo>,
    /// Number of ledger records removed.
    pub removed: usize,
    /// The audit event id.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for transfer deletion.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeleteTransferResponse {
    /// The deleted transfer id.
    pub transfer_id: i64,
    /// The employee's transferred-hours counter afterwards.
    pub transferred_hours: f64,
    /// Number of ledger records removed.
    pub removed: usize,
    /// The audit event id.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

// ============================================================================
// Audit
// ============================================================================

/// Serializable view of an audit event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// The event id.
    pub event_id: Option<i64>,
    /// Who acted.
    pub actor_id: String,
    /// Why.
    pub cause: String,
    /// Action name.
    pub action: String,
    /// Action details.
    pub details: Option<String>,
    /// State before.
    pub before: String,
    /// State after.
    pub after: String,
}

impl From<&AuditEvent> for AuditEventInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            actor_id: event.actor.id.clone(),
            cause: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
        }
    }
}

/// API response with an employee's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTimelineResponse {
    /// The employee.
    pub employee_id: i64,
    /// Events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
