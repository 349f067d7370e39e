// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BalanceAccount, DomainError, EmployeeBalances, Quantity};

#[test]
fn test_parse_exact_decimals() {
    assert_eq!("22".parse::<Quantity>().unwrap(), Quantity::whole(22));
    assert_eq!(
        "0.41".parse::<Quantity>().unwrap(),
        Quantity::from_hundredths(41)
    );
    assert_eq!(
        " 2.5 ".parse::<Quantity>().unwrap(),
        Quantity::from_hundredths(250)
    );
    assert_eq!(".5".parse::<Quantity>().unwrap(), Quantity::from_hundredths(50));
    assert_eq!(
        "-1.25".parse::<Quantity>().unwrap(),
        Quantity::from_hundredths(-125)
    );
}

#[test]
fn test_parse_rejects_malformed_amounts() {
    for value in ["", ".", "1.234", "1,5", "abc", "1.-5", "--1"] {
        assert_eq!(
            value.parse::<Quantity>(),
            Err(DomainError::InvalidQuantity(value.to_string())),
            "accepted '{value}'"
        );
    }
}

#[test]
fn test_display_uses_two_decimals() {
    assert_eq!(Quantity::from_hundredths(41).to_string(), "0.41");
    assert_eq!(Quantity::whole(12).to_string(), "12.00");
    assert_eq!(Quantity::from_hundredths(-5).to_string(), "-0.05");
}

#[test]
fn test_from_decimal_rounds_and_rejects_non_finite() {
    assert_eq!(Quantity::from_decimal(0.1), Some(Quantity::from_hundredths(10)));
    assert_eq!(Quantity::from_decimal(2.005), Some(Quantity::from_hundredths(200)));
    assert_eq!(Quantity::from_decimal(f64::NAN), None);
    assert_eq!(Quantity::from_decimal(f64::NEG_INFINITY), None);
}

#[test]
fn test_repeated_small_debits_and_credits_do_not_drift() {
    let start: EmployeeBalances = EmployeeBalances {
        union_hours: Quantity::from_hundredths(41),
        ..EmployeeBalances::default()
    };
    let step: Quantity = Quantity::from_hundredths(10);

    let mut balances: EmployeeBalances = start;
    for _ in 0..100 {
        balances = balances
            .debited(BalanceAccount::UnionHours, step)
            .credited(BalanceAccount::UnionHours, step);
    }

    assert_eq!(balances, start);
}

#[test]
fn test_balances_read_and_write_decimal_json() {
    let balances: EmployeeBalances = serde_json::from_str(
        r#"{"vacation_days":22,"module_days":5.5,"personal_affairs_days":0,
            "special_group_compensation_days":0,"union_hours":0.41,
            "personal_outing_hours":0,"transferred_hours":0}"#,
    )
    .unwrap();

    assert_eq!(balances.vacation_days, Quantity::whole(22));
    assert_eq!(balances.module_days, Quantity::from_hundredths(550));
    assert_eq!(balances.union_hours, Quantity::from_hundredths(41));

    let value: serde_json::Value = serde_json::to_value(balances).unwrap();
    assert_eq!(value["union_hours"], 0.41);
    assert_eq!(value["vacation_days"], 22.0);
}
