// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guardia::CoreError;
use guardia_domain::{DomainError, EmployeeId, LeaveType, Quantity};
use guardia_persistence::PersistenceError;

use crate::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};

#[test]
fn test_parse_failures_name_the_field() {
    let cases: Vec<(DomainError, &str)> = vec![
        (DomainError::InvalidShiftToken(String::from("X")), "shift"),
        (DomainError::InvalidLeaveType(String::from("X")), "leave_type"),
        (DomainError::InvalidLeaveState(String::from("X")), "state"),
        (DomainError::InvalidRole(String::from("X")), "role"),
        (DomainError::MissingShift(LeaveType::ShiftLicense), "shift"),
        (DomainError::MissingHours(LeaveType::UnionHours), "hours"),
        (DomainError::InvalidHours(String::from("0.00")), "hours"),
        (DomainError::InvalidQuantity(String::from("1.234")), "balances"),
    ];

    for (error, expected) in cases {
        match translate_domain_error(error) {
            ApiError::InvalidInput { field, .. } => assert_eq!(field, expected),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}

#[test]
fn test_rule_violations_carry_stable_rule_names() {
    let cases: Vec<(DomainError, &str)> = vec![
        (
            DomainError::InsufficientBalance {
                leave_type: LeaveType::Vacation,
                requested: Quantity::whole(10),
                available: Quantity::whole(2),
            },
            "insufficient_balance",
        ),
        (
            DomainError::NoOriginBrigade(EmployeeId::new(7)),
            "no_origin_brigade",
        ),
        (
            DomainError::SameEmployee(EmployeeId::new(7)),
            "distinct_employees",
        ),
        (DomainError::SameBrigade, "distinct_brigades"),
        (
            DomainError::InvalidStateTransition {
                from: String::from("Pending"),
                to: String::from("Pending"),
            },
            "state_transition",
        ),
    ];

    for (error, expected) in cases {
        match translate_domain_error(error) {
            ApiError::DomainRuleViolation { rule, .. } => assert_eq!(rule, expected),
            other => panic!("expected DomainRuleViolation, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_leave_brigade_is_a_configuration_problem() {
    let api: ApiError = translate_core_error(CoreError::DomainViolation(
        DomainError::MissingLeaveBrigade(LeaveType::Module),
    ));

    assert_eq!(
        api,
        ApiError::Configuration {
            message: String::from("No brigade is configured for Module leave"),
        }
    );
}

#[test]
fn test_persistence_lookups_become_not_found() {
    let api: ApiError = translate_persistence_error(PersistenceError::EmployeeNotFound(9));
    assert_eq!(
        api,
        ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: String::from("Employee 9 does not exist"),
        }
    );

    let api: ApiError =
        translate_persistence_error(PersistenceError::QueryFailed(String::from("locked")));
    assert!(matches!(api, ApiError::Internal { .. }));
}

#[test]
fn test_display_formats() {
    let violation: ApiError = ApiError::DomainRuleViolation {
        rule: String::from("distinct_brigades"),
        message: String::from("Origin and destination brigade must differ"),
    };
    assert_eq!(
        violation.to_string(),
        "Domain rule violation (distinct_brigades): Origin and destination brigade must differ"
    );

    let invalid: ApiError = ApiError::InvalidInput {
        field: String::from("date"),
        message: String::from("bad"),
    };
    assert_eq!(invalid.to_string(), "Invalid input for field 'date': bad");
}
