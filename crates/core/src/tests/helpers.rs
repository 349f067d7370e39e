// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guardia_audit::{Actor, Cause};
use guardia_domain::{
    AssignmentId, AssignmentKind, AssignmentRecord, AssignmentSource, BrigadeId, Employee,
    EmployeeBalances, EmployeeId, LeaveBrigadeMap, LeaveType, Quantity, Role, Shift, parse_date,
};
use time::Date;

pub const HOME_BRIGADE: i64 = 1;
pub const OTHER_BRIGADE: i64 = 2;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("approver-1"), String::from("approver"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Approver decision"))
}

pub fn date(value: &str) -> Date {
    parse_date(value).unwrap()
}

pub fn create_test_employee(id: i64) -> Employee {
    Employee {
        employee_id: EmployeeId::new(id),
        name: format!("Employee {id}"),
        role: Role::Firefighter,
        home_brigade_id: Some(BrigadeId::new(HOME_BRIGADE)),
        balances: EmployeeBalances {
            vacation_days: Quantity::whole(22),
            module_days: Quantity::whole(5),
            personal_affairs_days: Quantity::whole(6),
            special_group_compensation_days: Quantity::whole(4),
            union_hours: Quantity::whole(10),
            personal_outing_hours: Quantity::whole(3),
            transferred_hours: Quantity::ZERO,
        },
    }
}

pub fn roster_record(employee: i64, day: &str, brigade: i64) -> AssignmentRecord {
    AssignmentRecord {
        assignment_id: AssignmentId::new(1),
        employee_id: EmployeeId::new(employee),
        date: date(day),
        shift: Shift::Morning,
        origin_brigade_id: None,
        destination_brigade_id: BrigadeId::new(brigade),
        kind: AssignmentKind::Outbound,
        source: AssignmentSource::Roster,
    }
}

/// Leave brigades numbered 100.. in `LeaveType::ALL` order.
pub fn create_test_leave_brigades() -> LeaveBrigadeMap {
    LeaveBrigadeMap::resolve(
        |leave_type| leave_type.default_brigade_name().to_string(),
        |name| {
            LeaveType::ALL
                .iter()
                .position(|t| t.default_brigade_name() == name)
                .map(|index| BrigadeId::new(100 + i64::try_from(index).unwrap()))
        },
    )
    .unwrap()
}
