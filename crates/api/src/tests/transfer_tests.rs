// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TestEngine, add_brigade, create_test_actor, create_test_cause, rostered_firefighter, setup,
};
use crate::{
    ApiError, AssignmentInfo, CreateTransferRequest, DeleteTransferResponse, TransferResponse,
    UpdateTransferRequest, create_transfer, delete_transfer, update_transfer,
};

fn transfer(
    engine: &mut TestEngine,
    employee_id: i64,
    origin_brigade_id: Option<i64>,
    destination_brigade_id: i64,
    shift: &str,
    hours: f64,
) -> Result<TransferResponse, ApiError> {
    create_transfer(
        &mut engine.persistence,
        &CreateTransferRequest {
            employee_id,
            origin_brigade_id,
            destination_brigade_id,
            date: String::from("2024-09-10"),
            shift: shift.to_string(),
            hours,
        },
        create_test_actor(),
        create_test_cause(),
    )
}

fn kind<'a>(records: &'a [AssignmentInfo], kind: &str) -> &'a AssignmentInfo {
    records.iter().find(|record| record.kind == kind).unwrap()
}

#[test]
fn test_transfer_lifecycle_moves_hours_and_pair() {
    let mut engine: TestEngine = setup();
    let employee_id: i64 = rostered_firefighter(&mut engine, "Ana");
    let (brigade_b1, brigade_b2) = (engine.brigade_b1, engine.brigade_b2);

    let created: TransferResponse =
        transfer(&mut engine, employee_id, None, brigade_b2, "Morning", 4.0).unwrap();

    assert!((created.transferred_hours - 4.0).abs() < f64::EPSILON);
    assert_eq!(created.transfer.origin_brigade_id, brigade_b1);
    assert_eq!(created.records.len(), 2);
    let outbound: &AssignmentInfo = kind(&created.records, "Outbound");
    assert_eq!(outbound.shift, "Morning");
    assert_eq!(outbound.destination_brigade_id, brigade_b2);
    let back: &AssignmentInfo = kind(&created.records, "Return");
    assert_eq!(back.date, "2024-09-10");
    assert_eq!(back.shift, "Afternoon");
    assert_eq!(back.destination_brigade_id, brigade_b1);

    let updated: TransferResponse = update_transfer(
        &mut engine.persistence,
        &UpdateTransferRequest {
            transfer_id: created.transfer.transfer_id,
            shift: String::from("Night"),
            hours: 6.0,
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert!((updated.transferred_hours - 6.0).abs() < f64::EPSILON);
    assert_eq!(updated.removed, 2);
    assert_eq!(updated.transfer.shift, "Night");
    assert_eq!(updated.records.len(), 2);
    let back: &AssignmentInfo = kind(&updated.records, "Return");
    assert_eq!(back.date, "2024-09-11");
    assert_eq!(back.shift, "Morning");

    let deleted: DeleteTransferResponse = delete_transfer(
        &mut engine.persistence,
        created.transfer.transfer_id,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert!(deleted.transferred_hours.abs() < f64::EPSILON);
    assert_eq!(deleted.removed, 2);
}

#[test]
fn test_explicit_origin_is_honored() {
    let mut engine: TestEngine = setup();
    let employee_id: i64 = rostered_firefighter(&mut engine, "Ana");
    let reten: i64 = add_brigade(&mut engine.persistence, "Retén");
    let brigade_b2: i64 = engine.brigade_b2;

    let created: TransferResponse = transfer(
        &mut engine,
        employee_id,
        Some(reten),
        brigade_b2,
        "Afternoon",
        2.5,
    )
    .unwrap();

    assert_eq!(created.transfer.origin_brigade_id, reten);
    assert_eq!(kind(&created.records, "Return").destination_brigade_id, reten);
}

#[test]
fn test_transfer_validation() {
    let mut engine: TestEngine = setup();
    let employee_id: i64 = rostered_firefighter(&mut engine, "Ana");
    let (brigade_b1, brigade_b2) = (engine.brigade_b1, engine.brigade_b2);

    assert!(matches!(
        transfer(&mut engine, employee_id, None, brigade_b2, "Evening", 4.0),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "shift"
    ));
    assert!(matches!(
        transfer(&mut engine, employee_id, None, brigade_b1, "Morning", 4.0),
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "distinct_brigades"
    ));
    assert!(matches!(
        transfer(&mut engine, employee_id, None, brigade_b2, "Morning", 0.0),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "hours"
    ));
    assert!(matches!(
        delete_transfer(
            &mut engine.persistence,
            404,
            create_test_actor(),
            create_test_cause()
        ),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
