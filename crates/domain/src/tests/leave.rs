// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BalanceAccount, BrigadeId, DomainError, EmployeeId, LeaveBrigadeMap, LeaveDetails,
    LeaveScope, LeaveState, LeaveType, Quantity, ShiftToken, parse_date,
};

fn details(
    leave_type: LeaveType,
    start: &str,
    end: &str,
    shift: Option<ShiftToken>,
    hours: Option<Quantity>,
) -> LeaveDetails {
    LeaveDetails {
        employee_id: EmployeeId::new(42),
        leave_type,
        start_date: parse_date(start).unwrap(),
        end_date: parse_date(end).unwrap(),
        shift,
        hours,
    }
}

#[test]
fn test_vacation_quantity_is_inclusive_day_span() {
    let leave = details(LeaveType::Vacation, "2024-06-01", "2024-06-10", None, None);
    assert_eq!(leave.quantity().unwrap(), Quantity::whole(10));
}

#[test]
fn test_full_day_personal_affairs_costs_three_jornadas() {
    let leave = details(
        LeaveType::PersonalAffairs,
        "2024-07-01",
        "2024-07-01",
        Some(ShiftToken::FullDay),
        None,
    );
    assert_eq!(leave.quantity().unwrap(), Quantity::whole(3));
}

#[test]
fn test_shift_quantity_scales_with_day_span() {
    let leave = details(
        LeaveType::SpecialGroupCompensation,
        "2024-07-01",
        "2024-07-02",
        Some(ShiftToken::MorningAfternoon),
        None,
    );
    assert_eq!(leave.quantity().unwrap(), Quantity::whole(4));
}

#[test]
fn test_hour_quantity_is_requested_hours() {
    let leave = details(
        LeaveType::UnionHours,
        "2024-07-01",
        "2024-07-01",
        None,
        Some(Quantity::from_hundredths(250)),
    );
    assert_eq!(leave.quantity().unwrap(), Quantity::from_hundredths(250));
}

#[test]
fn test_shift_scoped_leave_requires_shift() {
    let leave = details(LeaveType::ShiftLicense, "2024-07-01", "2024-07-01", None, None);
    assert_eq!(
        leave.validate(),
        Err(DomainError::MissingShift(LeaveType::ShiftLicense))
    );
}

#[test]
fn test_hour_scoped_leave_requires_hours() {
    let leave = details(
        LeaveType::PersonalOuting,
        "2024-07-01",
        "2024-07-01",
        Some(ShiftToken::Morning),
        None,
    );
    assert_eq!(
        leave.validate(),
        Err(DomainError::MissingHours(LeaveType::PersonalOuting))
    );
}

#[test]
fn test_reversed_leave_range_rejected() {
    let leave = details(LeaveType::Vacation, "2024-06-10", "2024-06-01", None, None);
    assert!(matches!(
        leave.quantity(),
        Err(DomainError::InvalidDateRange { .. })
    ));
}

#[test]
fn test_scopes_and_accounts() {
    assert_eq!(LeaveType::Module.scope(), LeaveScope::Days);
    assert_eq!(LeaveType::ShiftLicense.scope(), LeaveScope::Shifts);
    assert_eq!(LeaveType::PersonalOuting.scope(), LeaveScope::Hours);
    assert_eq!(
        LeaveType::PersonalAffairs.balance_account(),
        Some(BalanceAccount::PersonalAffairsDays)
    );
    assert_eq!(LeaveType::DayLicense.balance_account(), None);
}

#[test]
fn test_leave_type_parses_spanish_names() {
    assert_eq!(
        "asuntos propios".parse::<LeaveType>().unwrap(),
        LeaveType::PersonalAffairs
    );
    assert_eq!("Vacaciones".parse::<LeaveType>().unwrap(), LeaveType::Vacation);
    assert_eq!("Módulo".parse::<LeaveType>().unwrap(), LeaveType::Module);
    for leave_type in LeaveType::ALL {
        assert_eq!(leave_type.as_str().parse::<LeaveType>().unwrap(), leave_type);
    }
}

#[test]
fn test_leave_state_transitions() {
    assert!(LeaveState::Pending.can_transition_to(LeaveState::Confirmed));
    assert!(LeaveState::Confirmed.can_transition_to(LeaveState::Pending));
    assert!(LeaveState::Denied.can_transition_to(LeaveState::Confirmed));
    assert!(!LeaveState::Confirmed.can_transition_to(LeaveState::Confirmed));
    assert!(!LeaveState::Cancelled.can_transition_to(LeaveState::Denied));
}

#[test]
fn test_leave_brigade_map_fails_fast_on_missing_name() {
    let result = LeaveBrigadeMap::resolve(
        |leave_type| leave_type.default_brigade_name().to_string(),
        |name| (name != "Horas sindicales").then_some(BrigadeId::new(1)),
    );
    assert_eq!(
        result,
        Err(DomainError::MissingLeaveBrigade(LeaveType::UnionHours))
    );
}

#[test]
fn test_leave_brigade_map_resolves_every_type() {
    let map = LeaveBrigadeMap::resolve(
        |leave_type| leave_type.default_brigade_name().to_string(),
        |name| {
            LeaveType::ALL
                .iter()
                .position(|t| t.default_brigade_name() == name)
                .map(|index| BrigadeId::new(100 + i64::try_from(index).unwrap()))
        },
    )
    .unwrap();
    assert_eq!(map.brigade_for(LeaveType::Vacation).unwrap(), BrigadeId::new(100));
    assert_eq!(map.iter().count(), LeaveType::ALL.len());
}
