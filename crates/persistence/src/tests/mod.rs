// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod directory_tests;
mod ledger_tests;

use std::collections::BTreeMap;

use guardia::assign_to_brigade;
use guardia_audit::{Actor, Cause};
use guardia_domain::{
    BrigadeId, EmployeeBalances, EmployeeId, LeaveBrigadeMap, LeaveType, Quantity, Role, Shift,
    parse_date,
};
use time::Date;

use crate::Persistence;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("approver-1"), String::from("approver"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-123"), String::from("Test operation"))
}

pub fn date(value: &str) -> Date {
    parse_date(value).unwrap()
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

/// A seeded database: two parks, every leave brigade and one firefighter.
pub struct Fixture {
    pub persistence: Persistence,
    pub brigade_a: BrigadeId,
    pub brigade_b: BrigadeId,
    pub leave_brigades: LeaveBrigadeMap,
    pub employee_id: EmployeeId,
}

pub fn setup() -> Fixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let brigade_a: BrigadeId = persistence
        .create_brigade("Brigada A", Some(1), false)
        .unwrap();
    let brigade_b: BrigadeId = persistence
        .create_brigade("Brigada B", Some(2), false)
        .unwrap();

    let mut by_name: BTreeMap<String, BrigadeId> = BTreeMap::new();
    for leave_type in LeaveType::ALL {
        let name: &str = leave_type.default_brigade_name();
        let id: BrigadeId = persistence.ensure_special_brigade(name).unwrap();
        by_name.insert(name.to_string(), id);
    }
    let leave_brigades: LeaveBrigadeMap = LeaveBrigadeMap::resolve(
        |leave_type| leave_type.default_brigade_name().to_string(),
        |name| by_name.get(name).copied(),
    )
    .unwrap();

    let employee_id: EmployeeId = persistence
        .create_employee(
            "Ana",
            Role::Firefighter,
            Some(brigade_a),
            &create_test_balances(),
        )
        .unwrap();

    Fixture {
        persistence,
        brigade_a,
        brigade_b,
        leave_brigades,
        employee_id,
    }
}

/// Commits a roster assignment.
pub fn roster(
    persistence: &mut Persistence,
    employee_id: EmployeeId,
    brigade_id: BrigadeId,
    day: &str,
    shift: Shift,
) {
    let employee = persistence.get_employee(employee_id).unwrap();
    let outcome = assign_to_brigade(
        &employee,
        None,
        brigade_id,
        date(day),
        shift,
        create_test_actor(),
        create_test_cause(),
    );
    persistence.commit(&outcome).unwrap();
}
