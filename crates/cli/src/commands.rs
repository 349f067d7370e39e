// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command execution.
//!
//! Every command opens the database, resolves the engine configuration and
//! prints the engine's response as pretty JSON on stdout. Logs go to stderr.

use std::path::Path;

use guardia_api::{
    AssignToBrigadeRequest, CheckAvailabilityRequest, CreateBrigadeRequest,
    CreateEmployeeRequest, CreateLeaveRequestRequest, CreateShiftChangeRequest,
    CreateTransferRequest, EngineConfig, EngineContext, RequireFirefighterRequest,
    ResolveAvailabilityRequest, ScheduleGuardDayRequest, TransitionLeaveRequestRequest,
    TransitionShiftChangeRequest, UpdateTransferRequest,
};
use guardia_audit::{Actor, Cause};
use guardia_domain::{EmployeeBalances, Quantity};
use guardia_persistence::Persistence;
use serde_json::{Value, json, to_value};
use tracing::{debug, info};

use crate::cli::{
    Args, BrigadeCommand, Command, EmployeeCommand, LeaveCommand, ShiftChangeCommand,
    TransferCommand, exclusion_variant,
};
use crate::error::CliError;

/// Runs the parsed command line and returns the JSON to print.
///
/// # Errors
///
/// Returns an error if the configuration or database cannot be opened, or
/// the engine rejects the command.
pub fn run(args: &Args) -> Result<String, CliError> {
    let config: EngineConfig = load_config(args.config.as_deref())?;
    let mut persistence: Persistence = open_database(args.database.as_deref())?;
    let context: EngineContext = config.resolve(&mut persistence)?;
    let actor: Actor = Actor::new(args.actor.clone(), String::from("operator"));

    execute(&mut persistence, &context, actor, &args.command)
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading engine configuration");
            Ok(EngineConfig::from_path(path)?)
        }
        None => {
            debug!("No configuration file given, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

fn open_database(path: Option<&Path>) -> Result<Persistence, CliError> {
    let persistence: Persistence = if let Some(db_path) = path {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    Ok(persistence)
}

/// Executes one command against an open engine.
///
/// # Errors
///
/// Returns an error if the engine rejects the command or the response
/// cannot be serialized.
#[allow(clippy::too_many_lines)]
pub fn execute(
    persistence: &mut Persistence,
    context: &EngineContext,
    actor: Actor,
    command: &Command,
) -> Result<String, CliError> {
    let cause: Cause = Cause::new(
        format!("cli:{}", command.name()),
        format!("guardia {}", command.name()),
    );
    debug!(command = command.name(), actor = %actor.id, "Executing command");

    let output: Value = match command {
        Command::Init => describe_context(persistence, context)?,
        Command::Brigade(BrigadeCommand::Create {
            name,
            park,
            special,
        }) => to_value(guardia_api::create_brigade(
            persistence,
            &CreateBrigadeRequest {
                name: name.clone(),
                park_id: *park,
                is_special: *special,
            },
        )?)?,
        Command::Brigade(BrigadeCommand::List) => {
            to_value(guardia_api::list_brigades(persistence)?)?
        }
        Command::Employee(EmployeeCommand::Create {
            name,
            role,
            home,
            vacation_days,
            module_days,
            personal_affairs_days,
            special_group_compensation_days,
            union_hours,
            personal_outing_hours,
        }) => to_value(guardia_api::create_employee(
            persistence,
            &CreateEmployeeRequest {
                name: name.clone(),
                role: role.clone(),
                home_brigade_id: *home,
                balances: EmployeeBalances {
                    vacation_days: *vacation_days,
                    module_days: *module_days,
                    personal_affairs_days: *personal_affairs_days,
                    special_group_compensation_days: *special_group_compensation_days,
                    union_hours: *union_hours,
                    personal_outing_hours: *personal_outing_hours,
                    transferred_hours: Quantity::ZERO,
                },
            },
        )?)?,
        Command::GuardDay { brigade_id, date } => to_value(guardia_api::schedule_guard_day(
            persistence,
            &ScheduleGuardDayRequest {
                brigade_id: *brigade_id,
                date: date.clone(),
            },
        )?)?,
        Command::Assign {
            employee_id,
            brigade_id,
            date,
            shift,
        } => to_value(guardia_api::assign_to_brigade(
            persistence,
            &AssignToBrigadeRequest {
                employee_id: *employee_id,
                brigade_id: *brigade_id,
                date: date.clone(),
                shift: shift.clone(),
            },
            actor,
            cause,
        )?)?,
        Command::Available {
            date,
            pool,
            without_adjacent_guards,
            employee,
        } => {
            let variant = exclusion_variant(*without_adjacent_guards);
            match employee {
                Some(employee_id) => to_value(guardia_api::check_availability(
                    persistence,
                    context,
                    &CheckAvailabilityRequest {
                        employee_id: *employee_id,
                        date: date.clone(),
                        variant,
                    },
                )?)?,
                None => to_value(guardia_api::resolve_availability(
                    persistence,
                    context,
                    &ResolveAvailabilityRequest {
                        date: date.clone(),
                        role_filter: (*pool).into(),
                        variant,
                    },
                )?)?,
            }
        }
        Command::Leave(leave) => execute_leave(persistence, context, actor, cause, leave)?,
        Command::ShiftChange(shift_change) => {
            execute_shift_change(persistence, actor, cause, shift_change)?
        }
        Command::Transfer(transfer) => execute_transfer(persistence, actor, cause, transfer)?,
        Command::Require {
            employee_id,
            brigade_id,
            date,
            shift,
        } => to_value(guardia_api::require_firefighter(
            persistence,
            &RequireFirefighterRequest {
                employee_id: *employee_id,
                destination_brigade_id: *brigade_id,
                date: date.clone(),
                shift: shift.clone(),
            },
            actor,
            cause,
        )?)?,
        Command::Ledger { employee_id } => {
            to_value(guardia_api::get_employee_ledger(persistence, *employee_id)?)?
        }
        Command::Audit { employee_id } => {
            to_value(guardia_api::get_audit_timeline(persistence, *employee_id)?)?
        }
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

fn execute_leave(
    persistence: &mut Persistence,
    context: &EngineContext,
    actor: Actor,
    cause: Cause,
    command: &LeaveCommand,
) -> Result<Value, CliError> {
    let output: Value = match command {
        LeaveCommand::Create {
            employee_id,
            leave_type,
            start_date,
            end_date,
            shift,
            hours,
        } => to_value(guardia_api::create_leave_request(
            persistence,
            &CreateLeaveRequestRequest {
                employee_id: *employee_id,
                leave_type: leave_type.clone(),
                start_date: start_date.clone(),
                end_date: end_date.clone(),
                shift: shift.clone(),
                hours: *hours,
            },
            actor,
            cause,
        )?)?,
        LeaveCommand::Transition {
            leave_request_id,
            state,
        } => to_value(guardia_api::transition_leave_request(
            persistence,
            context,
            &TransitionLeaveRequestRequest {
                leave_request_id: *leave_request_id,
                state: state.clone(),
            },
            actor,
            cause,
        )?)?,
        LeaveCommand::Delete { leave_request_id } => to_value(guardia_api::delete_leave_request(
            persistence,
            *leave_request_id,
            actor,
            cause,
        )?)?,
    };
    Ok(output)
}

fn execute_shift_change(
    persistence: &mut Persistence,
    actor: Actor,
    cause: Cause,
    command: &ShiftChangeCommand,
) -> Result<Value, CliError> {
    let output: Value = match command {
        ShiftChangeCommand::Create {
            employee1_id,
            employee2_id,
            date,
            shift,
            secondary_date,
            reason,
        } => to_value(guardia_api::create_shift_change(
            persistence,
            &CreateShiftChangeRequest {
                employee1_id: *employee1_id,
                employee2_id: *employee2_id,
                date: date.clone(),
                secondary_date: secondary_date.clone(),
                shift: shift.clone(),
                reason: reason.clone(),
            },
            actor,
            cause,
        )?)?,
        ShiftChangeCommand::Transition {
            shift_change_request_id,
            state,
        } => to_value(guardia_api::transition_shift_change(
            persistence,
            &TransitionShiftChangeRequest {
                shift_change_request_id: *shift_change_request_id,
                state: state.clone(),
            },
            actor,
            cause,
        )?)?,
        ShiftChangeCommand::Delete {
            shift_change_request_id,
        } => to_value(guardia_api::delete_shift_change(
            persistence,
            *shift_change_request_id,
            actor,
            cause,
        )?)?,
    };
    Ok(output)
}

fn execute_transfer(
    persistence: &mut Persistence,
    actor: Actor,
    cause: Cause,
    command: &TransferCommand,
) -> Result<Value, CliError> {
    let output: Value = match command {
        TransferCommand::Create {
            employee_id,
            destination_brigade_id,
            date,
            shift,
            hours,
            origin,
        } => to_value(guardia_api::create_transfer(
            persistence,
            &CreateTransferRequest {
                employee_id: *employee_id,
                origin_brigade_id: *origin,
                destination_brigade_id: *destination_brigade_id,
                date: date.clone(),
                shift: shift.clone(),
                hours: *hours,
            },
            actor,
            cause,
        )?)?,
        TransferCommand::Update {
            transfer_id,
            shift,
            hours,
        } => to_value(guardia_api::update_transfer(
            persistence,
            &UpdateTransferRequest {
                transfer_id: *transfer_id,
                shift: shift.clone(),
                hours: *hours,
            },
            actor,
            cause,
        )?)?,
        TransferCommand::Delete { transfer_id } => to_value(guardia_api::delete_transfer(
            persistence,
            *transfer_id,
            actor,
            cause,
        )?)?,
    };
    Ok(output)
}

/// Summarizes the resolved leave brigades and the always-excluded set.
fn describe_context(
    persistence: &mut Persistence,
    context: &EngineContext,
) -> Result<Value, CliError> {
    let leave_brigades: serde_json::Map<String, Value> = context
        .leave_brigades
        .iter()
        .map(|(leave_type, brigade_id)| (leave_type.to_string(), json!(brigade_id.value())))
        .collect();
    let brigades = guardia_api::list_brigades(persistence)?;

    Ok(json!({
        "leave_brigades": leave_brigades,
        "excluded_brigades": context.excluded_brigades,
        "brigades": brigades.brigades,
    }))
}
