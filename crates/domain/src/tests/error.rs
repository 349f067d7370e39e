// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, EmployeeId, LeaveType, Quantity, parse_date};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidShiftToken(String::from("Siesta"));
    assert_eq!(format!("{err}"), "Invalid shift token: 'Siesta'");

    let err: DomainError = DomainError::InsufficientBalance {
        leave_type: LeaveType::Vacation,
        requested: Quantity::whole(10),
        available: Quantity::from_hundredths(400),
    };
    assert_eq!(
        format!("{err}"),
        "Insufficient balance for 'Vacation': requested 10.00, available 4.00"
    );

    let err: DomainError = DomainError::NoOriginBrigade(EmployeeId::new(42));
    assert_eq!(
        format!("{err}"),
        "No origin brigade could be resolved for employee 42"
    );

    let err: DomainError = DomainError::NoBrigadeAssignment {
        employee_id: EmployeeId::new(10),
        date: parse_date("2024-08-05").unwrap(),
    };
    assert_eq!(
        format!("{err}"),
        "Employee 10 has no brigade assignment on or before 2024-08-05"
    );

    let err: DomainError = DomainError::MissingLeaveBrigade(LeaveType::PersonalAffairs);
    assert_eq!(
        format!("{err}"),
        "No brigade is configured for leave type 'PersonalAffairs'"
    );

    let err: DomainError = DomainError::MissingShift(LeaveType::ShiftLicense);
    assert_eq!(format!("{err}"), "Leave type 'ShiftLicense' requires a shift");

    let err: DomainError = DomainError::SameBrigade;
    assert_eq!(format!("{err}"), "Origin and destination brigades must differ");
}

#[test]
fn test_invalid_date_range_display() {
    let err: DomainError = DomainError::InvalidDateRange {
        start_date: parse_date("2024-06-10").unwrap(),
        end_date: parse_date("2024-06-01").unwrap(),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid date range: end date 2024-06-01 is before start date 2024-06-10"
    );
}
