// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guardia_domain::{BrigadeId, Employee, LeaveType, Role};

use super::{Fixture, create_test_balances, date, setup};
use crate::PersistenceError;

#[test]
fn test_created_brigade_round_trips() {
    let mut fixture: Fixture = setup();

    let brigade = fixture.persistence.get_brigade(fixture.brigade_b).unwrap();
    assert_eq!(brigade.name, "Brigada B");
    assert_eq!(brigade.park_id, Some(2));
    assert!(!brigade.is_special);
}

#[test]
fn test_duplicate_brigade_name_is_rejected() {
    let mut fixture: Fixture = setup();

    let result = fixture.persistence.create_brigade("Brigada A", None, false);
    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}

#[test]
fn test_ensure_special_brigade_is_idempotent() {
    let mut fixture: Fixture = setup();
    let name: &str = LeaveType::Vacation.default_brigade_name();

    let first: BrigadeId = fixture.persistence.ensure_special_brigade(name).unwrap();
    let second: BrigadeId = fixture.persistence.ensure_special_brigade(name).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        fixture.leave_brigades.brigade_for(LeaveType::Vacation).unwrap(),
        first
    );
    assert!(fixture.persistence.get_brigade(first).unwrap().is_special);
    // two parks plus one brigade per leave type
    assert_eq!(
        fixture.persistence.list_brigades().unwrap().len(),
        2 + LeaveType::ALL.len()
    );
}

#[test]
fn test_created_employee_round_trips() {
    let mut fixture: Fixture = setup();

    let employee: Employee = fixture.persistence.get_employee(fixture.employee_id).unwrap();
    assert_eq!(employee.name, "Ana");
    assert_eq!(employee.role, Role::Firefighter);
    assert_eq!(employee.home_brigade_id, Some(fixture.brigade_a));
    assert_eq!(employee.balances, create_test_balances());
}

#[test]
fn test_employee_with_unknown_home_brigade_is_rejected() {
    let mut fixture: Fixture = setup();

    let result = fixture.persistence.create_employee(
        "Luis",
        Role::Command,
        Some(BrigadeId::new(9_999)),
        &create_test_balances(),
    );
    assert!(result.is_err());
}

#[test]
fn test_list_employees_filters_by_role() {
    let mut fixture: Fixture = setup();
    fixture
        .persistence
        .create_employee("Luis", Role::Command, None, &create_test_balances())
        .unwrap();
    fixture
        .persistence
        .create_employee("Marta", Role::Head, None, &create_test_balances())
        .unwrap();

    let firefighters: Vec<Employee> = fixture
        .persistence
        .list_employees_with_roles(&[Role::Firefighter])
        .unwrap();
    assert_eq!(firefighters.len(), 1);

    let with_command: Vec<Employee> = fixture
        .persistence
        .list_employees_with_roles(&[Role::Firefighter, Role::Command])
        .unwrap();
    assert_eq!(with_command.len(), 2);
    assert!(with_command.iter().all(|e| e.role != Role::Head));
}

#[test]
fn test_guard_brigade_names_covers_requested_dates() {
    let mut fixture: Fixture = setup();
    fixture
        .persistence
        .schedule_guard_day(fixture.brigade_a, date("2026-03-09"))
        .unwrap();
    fixture
        .persistence
        .schedule_guard_day(fixture.brigade_a, date("2026-03-09"))
        .unwrap();
    fixture
        .persistence
        .schedule_guard_day(fixture.brigade_b, date("2026-03-11"))
        .unwrap();

    let on_day: Vec<String> = fixture
        .persistence
        .guard_brigade_names(&[date("2026-03-10")])
        .unwrap();
    assert!(on_day.is_empty());

    let around: Vec<String> = fixture
        .persistence
        .guard_brigade_names(&[date("2026-03-09"), date("2026-03-10"), date("2026-03-11")])
        .unwrap();
    assert_eq!(around, vec![String::from("Brigada A"), String::from("Brigada B")]);
}
