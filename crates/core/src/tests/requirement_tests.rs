// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    HOME_BRIGADE, OTHER_BRIGADE, create_test_actor, create_test_cause, create_test_employee, date,
    roster_record,
};
use crate::{
    CoreError, EntityWrite, RecordOwner, WorkflowOutcome, assign_to_brigade, require_firefighter,
};
use guardia_domain::{BrigadeId, DomainError, Employee, Shift, ShiftToken};

#[test]
fn test_require_plans_pair_from_latest_brigade() {
    let employee: Employee = create_test_employee(42);
    let latest = roster_record(42, "2024-05-01", 4);

    let outcome: WorkflowOutcome = require_firefighter(
        &employee,
        Some(&latest),
        BrigadeId::new(OTHER_BRIGADE),
        date("2024-05-02"),
        ShiftToken::AfternoonNight,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(outcome.owner, RecordOwner::Requirement);
    assert_eq!(outcome.entity, EntityWrite::None);
    assert_eq!(outcome.appends[0].origin_brigade_id, Some(BrigadeId::new(4)));
    assert_eq!(outcome.appends[0].shift, Shift::Afternoon);
    assert_eq!(outcome.appends[1].destination_brigade_id, BrigadeId::new(4));
    assert_eq!(outcome.appends[1].date, date("2024-05-03"));
}

#[test]
fn test_require_into_own_brigade_fails() {
    let employee: Employee = create_test_employee(42);

    let result = require_firefighter(
        &employee,
        None,
        BrigadeId::new(HOME_BRIGADE),
        date("2024-05-02"),
        ShiftToken::Morning,
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::SameBrigade))
    );
}

#[test]
fn test_assign_to_brigade_appends_single_roster_record() {
    let employee: Employee = create_test_employee(42);

    let outcome: WorkflowOutcome = assign_to_brigade(
        &employee,
        None,
        BrigadeId::new(OTHER_BRIGADE),
        date("2024-05-01"),
        Shift::Morning,
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(outcome.owner, RecordOwner::Roster);
    assert_eq!(outcome.appends.len(), 1);
    assert_eq!(
        outcome.appends[0].origin_brigade_id,
        Some(BrigadeId::new(HOME_BRIGADE))
    );
    assert_eq!(outcome.audit_event.before.data, "brigade=1");
}
