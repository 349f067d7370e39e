// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine boundary for the Guardia brigade assignment engine.
//!
//! Callers resolve an [`EngineConfig`] once into an [`EngineContext`] and
//! then drive the engine through the handler functions: availability
//! queries, leave/shift-change/transfer workflows, ad-hoc requirements and
//! the directory seeding used by operators and tests. Every handler takes
//! raw caller input, reports field-level validation errors, and translates
//! domain, core and persistence errors into [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, EngineConfig, EngineContext};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    assign_to_brigade, available_firefighters, available_firefighters_and_command,
    available_firefighters_and_command_without_adjacent_guards,
    available_firefighters_without_adjacent_guards, check_availability, create_brigade,
    create_employee, create_leave_request, create_shift_change, create_transfer,
    delete_leave_request, delete_shift_change, delete_transfer, get_audit_timeline,
    get_employee_ledger, is_available, list_brigades, require_firefighter, resolve_availability,
    schedule_guard_day, transition_leave_request, transition_shift_change, update_transfer,
};
pub use request_response::{
    AssignToBrigadeRequest, AssignToBrigadeResponse, AssignmentInfo, AuditEventInfo,
    AuditTimelineResponse, AvailabilityEntry, BrigadeInfo, CheckAvailabilityRequest,
    CreateBrigadeRequest, CreateBrigadeResponse, CreateEmployeeRequest, CreateEmployeeResponse,
    CreateLeaveRequestRequest, CreateLeaveRequestResponse, CreateShiftChangeRequest,
    CreateShiftChangeResponse, CreateTransferRequest, DeleteLeaveRequestResponse,
    DeleteShiftChangeResponse, DeleteTransferResponse, EmployeeLedgerResponse, LeaveRequestInfo,
    ListBrigadesResponse, RequireFirefighterRequest, RequireFirefighterResponse,
    ResolveAvailabilityRequest, ResolveAvailabilityResponse, ScheduleGuardDayRequest,
    ScheduleGuardDayResponse, ShiftChangeInfo, TransferInfo, TransferResponse,
    TransitionLeaveRequestRequest, TransitionLeaveRequestResponse, TransitionShiftChangeRequest,
    TransitionShiftChangeResponse, UpdateTransferRequest,
};
