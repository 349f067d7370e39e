// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use guardia_domain::{AvailabilityReason, ExclusionVariant};

use super::helpers::{
    TestEngine, add_brigade, add_employee, move_leave, request_leave, roster,
    rostered_firefighter, setup, setup_on_file, setup_with_config,
};
use crate::{
    ApiError, AvailabilityEntry, CheckAvailabilityRequest, EngineConfig,
    ResolveAvailabilityResponse, ScheduleGuardDayRequest, available_firefighters,
    available_firefighters_and_command, available_firefighters_and_command_without_adjacent_guards,
    available_firefighters_without_adjacent_guards, check_availability, is_available,
    schedule_guard_day,
};

fn check(engine: &mut TestEngine, employee_id: i64, date: &str) -> AvailabilityEntry {
    check_availability(
        &mut engine.persistence,
        &engine.context,
        &CheckAvailabilityRequest {
            employee_id,
            date: date.to_string(),
            variant: ExclusionVariant::WithAdjacentGuards,
        },
    )
    .unwrap()
}

fn guard(engine: &mut TestEngine, brigade_id: i64, date: &str) {
    schedule_guard_day(
        &mut engine.persistence,
        &ScheduleGuardDayRequest {
            brigade_id,
            date: date.to_string(),
        },
    )
    .unwrap();
}

#[test]
fn test_rostered_employee_outside_excluded_brigades_is_available() {
    let mut engine: TestEngine = setup();
    let employee_id: i64 = rostered_firefighter(&mut engine, "Ana");
    let excluded: BTreeSet<String> = BTreeSet::from([String::from("Vacaciones")]);

    let available: bool = is_available(
        &mut engine.persistence,
        employee_id,
        "2024-05-02",
        &excluded,
    )
    .unwrap();

    assert!(available);
}

#[test]
fn test_employee_in_excluded_brigade_is_unavailable() {
    let mut engine: TestEngine = setup();
    let employee_id: i64 = rostered_firefighter(&mut engine, "Ana");
    let excluded: BTreeSet<String> = BTreeSet::from([String::from("B1")]);

    assert!(
        !is_available(
            &mut engine.persistence,
            employee_id,
            "2024-05-02",
            &excluded
        )
        .unwrap()
    );
}

#[test]
fn test_employee_without_assignment_is_unavailable() {
    let mut engine: TestEngine = setup();
    let employee_id: i64 = add_employee(
        &mut engine.persistence,
        "Luis",
        "Firefighter",
        Some(engine.brigade_b1),
    );

    let entry: AvailabilityEntry = check(&mut engine, employee_id, "2024-05-02");

    assert_eq!(entry.reason, AvailabilityReason::NoAssignment);
    assert!(!entry.available);
    assert_eq!(entry.brigade, None);
}

#[test]
fn test_confirmed_vacation_excludes_and_protects_adjacent_days() {
    let mut engine: TestEngine = setup();
    let employee_id: i64 = rostered_firefighter(&mut engine, "Ana");
    let leave_id: i64 = request_leave(
        &mut engine,
        employee_id,
        "Vacation",
        "2024-06-01",
        "2024-06-10",
        None,
        None,
    );

    let pending: AvailabilityEntry = check(&mut engine, employee_id, "2024-06-05");
    assert_eq!(pending.reason, AvailabilityReason::Free);

    move_leave(&mut engine, leave_id, "Confirmed");

    let during: AvailabilityEntry = check(&mut engine, employee_id, "2024-06-05");
    assert_eq!(during.reason, AvailabilityReason::OnLeave);
    assert!(!during.available);

    let after: AvailabilityEntry = check(&mut engine, employee_id, "2024-06-11");
    assert_eq!(after.reason, AvailabilityReason::ProtectedByAdjacentLeave);
    assert!(after.available);

    let before: AvailabilityEntry = check(&mut engine, employee_id, "2024-05-31");
    assert_eq!(before.reason, AvailabilityReason::ProtectedByAdjacentLeave);

    let later: AvailabilityEntry = check(&mut engine, employee_id, "2024-06-12");
    assert_eq!(later.reason, AvailabilityReason::Free);
    assert_eq!(later.brigade.as_deref(), Some("B1"));
}

#[test]
fn test_composite_shift_leave_protects_despite_leave_brigade() {
    let mut engine: TestEngine = setup();
    let employee_id: i64 = rostered_firefighter(&mut engine, "Ana");
    let leave_id: i64 = request_leave(
        &mut engine,
        employee_id,
        "PersonalAffairs",
        "2024-07-01",
        "2024-07-01",
        Some("FullDay"),
        None,
    );
    move_leave(&mut engine, leave_id, "Confirmed");

    let entry: AvailabilityEntry = check(&mut engine, employee_id, "2024-07-01");

    assert_eq!(entry.brigade.as_deref(), Some("Asuntos Propios"));
    assert_eq!(entry.reason, AvailabilityReason::ProtectedByShiftLeave);
    assert!(entry.available);
}

#[test]
fn test_guard_before_vacation_keeps_employee_unavailable() {
    let mut engine: TestEngine = setup();
    let employee_id: i64 = rostered_firefighter(&mut engine, "Ana");
    let brigade_b1: i64 = engine.brigade_b1;
    guard(&mut engine, brigade_b1, "2024-06-01");
    let leave_id: i64 = request_leave(
        &mut engine,
        employee_id,
        "Vacation",
        "2024-06-02",
        "2024-06-05",
        None,
        None,
    );
    move_leave(&mut engine, leave_id, "Confirmed");

    let entry: AvailabilityEntry = check(&mut engine, employee_id, "2024-06-01");
    assert_eq!(entry.reason, AvailabilityReason::ExcludedBrigade);
    assert!(!entry.available);

    let excluded: BTreeSet<String> = BTreeSet::from([String::from("B1")]);
    assert!(
        !is_available(
            &mut engine.persistence,
            employee_id,
            "2024-06-01",
            &excluded
        )
        .unwrap()
    );

    let listed: ResolveAvailabilityResponse =
        available_firefighters(&mut engine.persistence, &engine.context, "2024-06-01").unwrap();
    assert!(listed.available_ids().is_empty());
}

#[test]
fn test_guard_days_widen_exclusion_per_variant() {
    let mut engine: TestEngine = setup();
    let employee_id: i64 = rostered_firefighter(&mut engine, "Ana");
    let brigade_b1: i64 = engine.brigade_b1;
    guard(&mut engine, brigade_b1, "2024-05-03");

    let with_adjacent: ResolveAvailabilityResponse =
        available_firefighters(&mut engine.persistence, &engine.context, "2024-05-02").unwrap();
    assert_eq!(with_adjacent.entries.len(), 1);
    assert_eq!(
        with_adjacent.entries[0].reason,
        AvailabilityReason::ExcludedBrigade
    );
    assert!(with_adjacent.available_ids().is_empty());

    let without_adjacent: ResolveAvailabilityResponse =
        available_firefighters_without_adjacent_guards(
            &mut engine.persistence,
            &engine.context,
            "2024-05-02",
        )
        .unwrap();
    assert_eq!(without_adjacent.available_ids(), vec![employee_id]);

    let on_guard_day: ResolveAvailabilityResponse =
        available_firefighters_without_adjacent_guards(
            &mut engine.persistence,
            &engine.context,
            "2024-05-03",
        )
        .unwrap();
    assert!(on_guard_day.available_ids().is_empty());
}

#[test]
fn test_role_filter_selects_the_pool() {
    let mut engine: TestEngine = setup();
    let firefighter: i64 = rostered_firefighter(&mut engine, "Ana");
    let brigade_b2: i64 = engine.brigade_b2;
    let command: i64 = add_employee(&mut engine.persistence, "Marta", "mando", None);
    roster(&mut engine.persistence, command, brigade_b2, "2024-05-01");
    let head: i64 = add_employee(&mut engine.persistence, "Jefe", "Head", None);
    roster(&mut engine.persistence, head, brigade_b2, "2024-05-01");

    let everyone: ResolveAvailabilityResponse = available_firefighters_and_command(
        &mut engine.persistence,
        &engine.context,
        "2024-05-02",
    )
    .unwrap();
    let mut ids: Vec<i64> = everyone.available_ids();
    ids.sort_unstable();
    assert_eq!(ids, vec![firefighter, command]);

    let same_without_guards: ResolveAvailabilityResponse =
        available_firefighters_and_command_without_adjacent_guards(
            &mut engine.persistence,
            &engine.context,
            "2024-05-02",
        )
        .unwrap();
    assert_eq!(same_without_guards.entries.len(), 2);

    let firefighters: ResolveAvailabilityResponse =
        available_firefighters(&mut engine.persistence, &engine.context, "2024-05-02").unwrap();
    assert_eq!(firefighters.available_ids(), vec![firefighter]);
}

#[test]
fn test_configured_unavailable_brigade_excludes() {
    let config: EngineConfig = EngineConfig {
        unavailable_brigades: vec![String::from("Retén")],
        ..EngineConfig::default()
    };
    let mut engine: TestEngine = setup_with_config(&config);
    let reten: i64 = add_brigade(&mut engine.persistence, "Retén");
    let employee_id: i64 = add_employee(&mut engine.persistence, "Ana", "Firefighter", None);
    roster(&mut engine.persistence, employee_id, reten, "2024-05-01");

    let entry: AvailabilityEntry = check(&mut engine, employee_id, "2024-05-02");

    assert_eq!(entry.reason, AvailabilityReason::ExcludedBrigade);
}

#[test]
fn test_resolution_is_repeatable_and_read_only() {
    let mut engine: TestEngine = setup();
    let employee_id: i64 = rostered_firefighter(&mut engine, "Ana");
    rostered_firefighter(&mut engine, "Luis");
    let leave_id: i64 = request_leave(
        &mut engine,
        employee_id,
        "Vacation",
        "2024-06-01",
        "2024-06-03",
        None,
        None,
    );
    move_leave(&mut engine, leave_id, "Confirmed");
    let brigade_b2: i64 = engine.brigade_b2;
    guard(&mut engine, brigade_b2, "2024-06-04");
    let records_before: usize = engine.persistence.count_assignments().unwrap();
    let events_before: usize = engine.persistence.get_all_audit_events().unwrap().len();

    let first: ResolveAvailabilityResponse =
        available_firefighters(&mut engine.persistence, &engine.context, "2024-06-04").unwrap();
    let second: ResolveAvailabilityResponse =
        available_firefighters(&mut engine.persistence, &engine.context, "2024-06-04").unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.persistence.count_assignments().unwrap(), records_before);
    assert_eq!(
        engine.persistence.get_all_audit_events().unwrap().len(),
        events_before
    );
}

#[test]
fn test_invalid_date_and_unknown_employee() {
    let mut engine: TestEngine = setup();

    let bad_date = available_firefighters(&mut engine.persistence, &engine.context, "05/02/2024");
    assert!(matches!(
        bad_date,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));

    let missing = check_availability(
        &mut engine.persistence,
        &engine.context,
        &CheckAvailabilityRequest {
            employee_id: 404,
            date: String::from("2024-05-02"),
            variant: ExclusionVariant::WithoutAdjacentGuards,
        },
    );
    assert!(matches!(missing, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_unreadable_leave_row_only_affects_its_owner() {
    let path = std::env::temp_dir().join(format!(
        "guardia_unreadable_leave_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let mut engine: TestEngine = setup_on_file(&path);
    let broken: i64 = rostered_firefighter(&mut engine, "Ana");
    let healthy: i64 = rostered_firefighter(&mut engine, "Luis");
    let leave_id: i64 = request_leave(
        &mut engine,
        broken,
        "Vacation",
        "2024-06-02",
        "2024-06-05",
        None,
        None,
    );
    move_leave(&mut engine, leave_id, "Confirmed");

    let mut raw: SqliteConnection =
        SqliteConnection::establish(path.to_str().unwrap()).unwrap();
    diesel::sql_query(format!(
        "UPDATE leave_requests SET leave_type = 'Sabbatical' WHERE leave_request_id = {leave_id}"
    ))
    .execute(&mut raw)
    .unwrap();
    drop(raw);

    let response: ResolveAvailabilityResponse =
        available_firefighters(&mut engine.persistence, &engine.context, "2024-06-03").unwrap();
    assert_eq!(response.entries.len(), 2);
    let entry_for = |employee_id: i64| {
        response
            .entries
            .iter()
            .find(|entry| entry.employee_id == employee_id)
            .unwrap()
    };
    assert_eq!(entry_for(broken).reason, AvailabilityReason::UnreadableLeave);
    assert!(!entry_for(broken).available);
    assert_eq!(entry_for(healthy).reason, AvailabilityReason::Free);
    assert!(entry_for(healthy).available);

    assert_eq!(
        check(&mut engine, broken, "2024-06-03").reason,
        AvailabilityReason::UnreadableLeave
    );
    assert!(
        !is_available(&mut engine.persistence, broken, "2024-06-03", &BTreeSet::new()).unwrap()
    );

    drop(engine);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
