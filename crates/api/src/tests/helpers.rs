// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;

use guardia_audit::{Actor, Cause};
use guardia_domain::{EmployeeBalances, Quantity};
use guardia_persistence::Persistence;

use crate::{
    AssignToBrigadeRequest, CreateBrigadeRequest, CreateEmployeeRequest,
    CreateLeaveRequestRequest, EngineConfig, EngineContext, TransitionLeaveRequestRequest,
    TransitionLeaveRequestResponse, assign_to_brigade, create_brigade, create_employee,
    create_leave_request, transition_leave_request,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("approver-1"), String::from("approver"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-789"), String::from("Roster office"))
}

pub fn create_test_balances() -> EmployeeBalances {
    EmployeeBalances {
        vacation_days: Quantity::whole(22),
        module_days: Quantity::whole(5),
        personal_affairs_days: Quantity::whole(6),
        special_group_compensation_days: Quantity::whole(4),
        union_hours: Quantity::whole(10),
        personal_outing_hours: Quantity::whole(3),
        transferred_hours: Quantity::ZERO,
    }
}

/// A provisioned engine with two operational brigades.
pub struct TestEngine {
    pub persistence: Persistence,
    pub context: EngineContext,
    pub brigade_b1: i64,
    pub brigade_b2: i64,
}

pub fn setup() -> TestEngine {
    setup_with_config(&EngineConfig::default())
}

pub fn setup_with_config(config: &EngineConfig) -> TestEngine {
    provision(Persistence::new_in_memory().unwrap(), config)
}

/// A file-backed engine, for tests that reach the database directly.
pub fn setup_on_file(path: &Path) -> TestEngine {
    provision(
        Persistence::new_with_file(path).unwrap(),
        &EngineConfig::default(),
    )
}

fn provision(mut persistence: Persistence, config: &EngineConfig) -> TestEngine {
    let context: EngineContext = config.resolve(&mut persistence).unwrap();
    let brigade_b1: i64 = add_brigade(&mut persistence, "B1");
    let brigade_b2: i64 = add_brigade(&mut persistence, "B2");
    TestEngine {
        persistence,
        context,
        brigade_b1,
        brigade_b2,
    }
}

pub fn add_brigade(persistence: &mut Persistence, name: &str) -> i64 {
    create_brigade(
        persistence,
        &CreateBrigadeRequest {
            name: name.to_string(),
            park_id: Some(1),
            is_special: false,
        },
    )
    .unwrap()
    .brigade
    .brigade_id
}

pub fn add_employee(
    persistence: &mut Persistence,
    name: &str,
    role: &str,
    home_brigade_id: Option<i64>,
) -> i64 {
    create_employee(
        persistence,
        &CreateEmployeeRequest {
            name: name.to_string(),
            role: role.to_string(),
            home_brigade_id,
            balances: create_test_balances(),
        },
    )
    .unwrap()
    .employee_id
}

/// Places an employee in a brigade from the morning of `date`.
pub fn roster(persistence: &mut Persistence, employee_id: i64, brigade_id: i64, date: &str) {
    assign_to_brigade(
        persistence,
        &AssignToBrigadeRequest {
            employee_id,
            brigade_id,
            date: date.to_string(),
            shift: String::from("Morning"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
}

/// A firefighter rostered into B1 on 2024-05-01.
pub fn rostered_firefighter(engine: &mut TestEngine, name: &str) -> i64 {
    let employee_id: i64 = add_employee(
        &mut engine.persistence,
        name,
        "Firefighter",
        Some(engine.brigade_b1),
    );
    roster(
        &mut engine.persistence,
        employee_id,
        engine.brigade_b1,
        "2024-05-01",
    );
    employee_id
}

pub fn request_leave(
    engine: &mut TestEngine,
    employee_id: i64,
    leave_type: &str,
    start_date: &str,
    end_date: &str,
    shift: Option<&str>,
    hours: Option<f64>,
) -> i64 {
    create_leave_request(
        &mut engine.persistence,
        &CreateLeaveRequestRequest {
            employee_id,
            leave_type: leave_type.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            shift: shift.map(str::to_string),
            hours,
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .leave_request
    .leave_request_id
}

pub fn move_leave(
    engine: &mut TestEngine,
    leave_request_id: i64,
    state: &str,
) -> TransitionLeaveRequestResponse {
    transition_leave_request(
        &mut engine.persistence,
        &engine.context,
        &TransitionLeaveRequestRequest {
            leave_request_id,
            state: state.to_string(),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
}
