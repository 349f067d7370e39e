// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AvailabilityReason, EmployeeId, ExclusionVariant, LeaveDetails, LeaveRequest, LeaveRequestId,
    LeaveState, LeaveType, ShiftToken, evaluate, parse_date,
};
use std::collections::BTreeSet;

fn leave(
    leave_type: LeaveType,
    start: &str,
    end: &str,
    shift: Option<ShiftToken>,
    state: LeaveState,
) -> LeaveRequest {
    LeaveRequest {
        leave_request_id: LeaveRequestId::new(1),
        details: LeaveDetails {
            employee_id: EmployeeId::new(42),
            leave_type,
            start_date: parse_date(start).unwrap(),
            end_date: parse_date(end).unwrap(),
            shift,
            hours: None,
        },
        state,
    }
}

fn excluded(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

#[test]
fn test_free_when_brigade_not_excluded() {
    let reason = evaluate(
        parse_date("2024-05-02").unwrap(),
        Some("B1"),
        &[],
        &excluded(&["Vacaciones"]),
    );
    assert_eq!(reason, AvailabilityReason::Free);
    assert!(reason.is_available());
}

#[test]
fn test_excluded_brigade_is_unavailable() {
    let reason = evaluate(
        parse_date("2024-05-02").unwrap(),
        Some("Vacaciones"),
        &[],
        &excluded(&["Vacaciones"]),
    );
    assert_eq!(reason, AvailabilityReason::ExcludedBrigade);
    assert!(!reason.is_available());
}

#[test]
fn test_no_assignment_is_unavailable() {
    let reason = evaluate(parse_date("2024-05-02").unwrap(), None, &[], &BTreeSet::new());
    assert_eq!(reason, AvailabilityReason::NoAssignment);
}

#[test]
fn test_confirmed_vacation_covering_date_is_unavailable() {
    let leaves = [leave(
        LeaveType::Vacation,
        "2024-06-01",
        "2024-06-10",
        None,
        LeaveState::Confirmed,
    )];
    let reason = evaluate(
        parse_date("2024-06-05").unwrap(),
        Some("B1"),
        &leaves,
        &BTreeSet::new(),
    );
    assert_eq!(reason, AvailabilityReason::OnLeave);
}

#[test]
fn test_pending_leave_is_ignored() {
    let leaves = [leave(
        LeaveType::Vacation,
        "2024-06-01",
        "2024-06-10",
        None,
        LeaveState::Pending,
    )];
    let reason = evaluate(
        parse_date("2024-06-05").unwrap(),
        Some("B1"),
        &leaves,
        &BTreeSet::new(),
    );
    assert_eq!(reason, AvailabilityReason::Free);
}

#[test]
fn test_composite_shift_leave_protects_over_excluded_brigade() {
    let leaves = [leave(
        LeaveType::PersonalAffairs,
        "2024-07-01",
        "2024-07-01",
        Some(ShiftToken::FullDay),
        LeaveState::Confirmed,
    )];
    let reason = evaluate(
        parse_date("2024-07-01").unwrap(),
        Some("Asuntos Propios"),
        &leaves,
        &excluded(&["Asuntos Propios"]),
    );
    assert_eq!(reason, AvailabilityReason::ProtectedByShiftLeave);
}

#[test]
fn test_single_shift_leave_does_not_protect() {
    let leaves = [leave(
        LeaveType::PersonalAffairs,
        "2024-07-01",
        "2024-07-01",
        Some(ShiftToken::Morning),
        LeaveState::Confirmed,
    )];
    let reason = evaluate(
        parse_date("2024-07-01").unwrap(),
        Some("Asuntos Propios"),
        &leaves,
        &excluded(&["Asuntos Propios"]),
    );
    assert_eq!(reason, AvailabilityReason::ExcludedBrigade);
}

#[test]
fn test_adjacent_vacation_protects() {
    let leaves = [leave(
        LeaveType::Vacation,
        "2024-06-01",
        "2024-06-10",
        None,
        LeaveState::Confirmed,
    )];
    let after = evaluate(
        parse_date("2024-06-11").unwrap(),
        Some("B1"),
        &leaves,
        &excluded(&["Vacaciones"]),
    );
    let before = evaluate(parse_date("2024-05-31").unwrap(), None, &leaves, &BTreeSet::new());
    assert_eq!(after, AvailabilityReason::ProtectedByAdjacentLeave);
    assert_eq!(before, AvailabilityReason::ProtectedByAdjacentLeave);
}

#[test]
fn test_excluded_brigade_wins_over_adjacent_vacation() {
    let leaves = [leave(
        LeaveType::Vacation,
        "2024-06-02",
        "2024-06-05",
        None,
        LeaveState::Confirmed,
    )];
    let reason = evaluate(
        parse_date("2024-06-01").unwrap(),
        Some("B1"),
        &leaves,
        &excluded(&["B1"]),
    );
    assert_eq!(reason, AvailabilityReason::ExcludedBrigade);
    assert!(!reason.is_available());
}

#[test]
fn test_composite_shift_leave_protects_over_whole_day_leave() {
    let leaves = [
        leave(
            LeaveType::Vacation,
            "2024-07-01",
            "2024-07-03",
            None,
            LeaveState::Confirmed,
        ),
        leave(
            LeaveType::ShiftLicense,
            "2024-07-02",
            "2024-07-02",
            Some(ShiftToken::AfternoonNight),
            LeaveState::Confirmed,
        ),
    ];
    let reason = evaluate(
        parse_date("2024-07-02").unwrap(),
        Some("Vacaciones"),
        &leaves,
        &excluded(&["Vacaciones"]),
    );
    assert_eq!(reason, AvailabilityReason::ProtectedByShiftLeave);
}

#[test]
fn test_evaluate_is_pure() {
    let leaves = [leave(
        LeaveType::Module,
        "2024-06-01",
        "2024-06-03",
        None,
        LeaveState::Confirmed,
    )];
    let set = excluded(&["B2"]);
    let date = parse_date("2024-06-04").unwrap();
    assert_eq!(
        evaluate(date, Some("B2"), &leaves, &set),
        evaluate(date, Some("B2"), &leaves, &set)
    );
}

#[test]
fn test_guard_dates_per_variant() {
    let date = parse_date("2024-05-02").unwrap();
    assert_eq!(
        ExclusionVariant::WithoutAdjacentGuards.guard_dates(date),
        vec![date]
    );
    assert_eq!(
        ExclusionVariant::WithAdjacentGuards.guard_dates(date),
        vec![
            parse_date("2024-05-01").unwrap(),
            date,
            parse_date("2024-05-03").unwrap()
        ]
    );
}

#[test]
fn test_unreadable_leave_is_unavailable() {
    let reason: AvailabilityReason = AvailabilityReason::UnreadableLeave;
    assert!(!reason.is_available());
    assert_eq!(reason.to_string(), "UnreadableLeave");
}
