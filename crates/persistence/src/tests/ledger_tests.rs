// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guardia_domain::{AssignmentRecord, AssignmentSource, Shift};

use super::{Fixture, date, roster, setup};

#[test]
fn test_latest_assignment_is_none_before_any_record() {
    let mut fixture: Fixture = setup();
    roster(
        &mut fixture.persistence,
        fixture.employee_id,
        fixture.brigade_a,
        "2026-03-01",
        Shift::Morning,
    );

    let latest = fixture
        .persistence
        .latest_assignment(fixture.employee_id, date("2026-02-28"))
        .unwrap();
    assert!(latest.is_none());
}

#[test]
fn test_latest_assignment_prefers_later_date_and_ignores_future() {
    let mut fixture: Fixture = setup();
    roster(
        &mut fixture.persistence,
        fixture.employee_id,
        fixture.brigade_a,
        "2026-03-01",
        Shift::Night,
    );
    roster(
        &mut fixture.persistence,
        fixture.employee_id,
        fixture.brigade_b,
        "2026-03-05",
        Shift::Morning,
    );

    let on_fourth: AssignmentRecord = fixture
        .persistence
        .latest_assignment(fixture.employee_id, date("2026-03-04"))
        .unwrap()
        .unwrap();
    assert_eq!(on_fourth.destination_brigade_id, fixture.brigade_a);

    let on_fifth: AssignmentRecord = fixture
        .persistence
        .latest_assignment(fixture.employee_id, date("2026-03-05"))
        .unwrap()
        .unwrap();
    assert_eq!(on_fifth.destination_brigade_id, fixture.brigade_b);
    assert_eq!(on_fifth.source, AssignmentSource::Roster);
}

#[test]
fn test_latest_assignment_breaks_same_day_ties_by_shift() {
    let mut fixture: Fixture = setup();
    roster(
        &mut fixture.persistence,
        fixture.employee_id,
        fixture.brigade_b,
        "2026-03-05",
        Shift::Night,
    );
    roster(
        &mut fixture.persistence,
        fixture.employee_id,
        fixture.brigade_a,
        "2026-03-05",
        Shift::Morning,
    );

    let latest: AssignmentRecord = fixture
        .persistence
        .latest_assignment(fixture.employee_id, date("2026-03-05"))
        .unwrap()
        .unwrap();
    assert_eq!(latest.shift, Shift::Night);
    assert_eq!(latest.destination_brigade_id, fixture.brigade_b);
}

#[test]
fn test_assignments_on_are_sorted_by_shift_then_insertion() {
    let mut fixture: Fixture = setup();
    for shift in [Shift::Night, Shift::Morning, Shift::Afternoon, Shift::Morning] {
        roster(
            &mut fixture.persistence,
            fixture.employee_id,
            fixture.brigade_a,
            "2026-03-05",
            shift,
        );
    }

    let records: Vec<AssignmentRecord> = fixture
        .persistence
        .assignments_on(fixture.employee_id, date("2026-03-05"))
        .unwrap();
    let shifts: Vec<Shift> = records.iter().map(|r| r.shift).collect();
    assert_eq!(
        shifts,
        vec![Shift::Morning, Shift::Morning, Shift::Afternoon, Shift::Night]
    );
    assert!(records[0].assignment_id < records[1].assignment_id);
    assert_eq!(fixture.persistence.count_assignments().unwrap(), 4);
}

#[test]
fn test_employee_ledger_is_chronological() {
    let mut fixture: Fixture = setup();
    roster(
        &mut fixture.persistence,
        fixture.employee_id,
        fixture.brigade_b,
        "2026-03-07",
        Shift::Morning,
    );
    roster(
        &mut fixture.persistence,
        fixture.employee_id,
        fixture.brigade_a,
        "2026-03-02",
        Shift::Morning,
    );

    let ledger: Vec<AssignmentRecord> = fixture
        .persistence
        .assignments_for_employee(fixture.employee_id)
        .unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger[0].date, date("2026-03-02"));
    assert_eq!(ledger[1].date, date("2026-03-07"));
}
