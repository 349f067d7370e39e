// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Brigade, employee and guard-calendar writes.
//!
//! These seed the directory the workflows read from; they are not part of
//! any workflow transition and produce no audit events.

use diesel::prelude::*;
use diesel::SqliteConnection;
use guardia_domain::{BrigadeId, EmployeeBalances, EmployeeId, Role, format_date};
use time::Date;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{brigades, employees, guard_days};
use crate::error::PersistenceError;
use crate::queries::directory::find_brigade_by_name;

/// Inserts a brigade.
///
/// # Errors
///
/// Returns an error if the name is already taken or the insert fails.
pub fn create_brigade(
    conn: &mut SqliteConnection,
    name: &str,
    park_id: Option<i64>,
    is_special: bool,
) -> Result<BrigadeId, PersistenceError> {
    diesel::insert_into(brigades::table)
        .values((
            brigades::name.eq(name),
            brigades::park_id.eq(park_id),
            brigades::is_special.eq(i32::from(is_special)),
        ))
        .execute(conn)?;
    let brigade_id: i64 = conn.get_last_insert_rowid()?;
    info!(brigade_id, name, "Created brigade");
    Ok(BrigadeId::new(brigade_id))
}

/// Returns the id of the named brigade, creating it as a special brigade if
/// it does not exist yet.
///
/// # Errors
///
/// Returns an error if the lookup or insert fails.
pub fn ensure_special_brigade(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<BrigadeId, PersistenceError> {
    if let Some(existing) = find_brigade_by_name(conn, name)? {
        debug!(name, brigade_id = %existing.brigade_id, "Brigade already present");
        return Ok(existing.brigade_id);
    }
    create_brigade(conn, name, None, true)
}

/// Inserts an employee with the given opening balances.
///
/// # Errors
///
/// Returns an error if a balance is negative, the home brigade does not
/// exist, or the insert fails.
pub fn create_employee(
    conn: &mut SqliteConnection,
    name: &str,
    role: Role,
    home_brigade_id: Option<BrigadeId>,
    balances: &EmployeeBalances,
) -> Result<EmployeeId, PersistenceError> {
    diesel::insert_into(employees::table)
        .values((
            employees::name.eq(name),
            employees::role.eq(role.as_str()),
            employees::home_brigade_id.eq(home_brigade_id.map(|id| id.value())),
            employees::vacation_days.eq(balances.vacation_days.hundredths()),
            employees::module_days.eq(balances.module_days.hundredths()),
            employees::personal_affairs_days.eq(balances.personal_affairs_days.hundredths()),
            employees::special_group_compensation_days
                .eq(balances.special_group_compensation_days.hundredths()),
            employees::union_hours.eq(balances.union_hours.hundredths()),
            employees::personal_outing_hours.eq(balances.personal_outing_hours.hundredths()),
            employees::transferred_hours.eq(balances.transferred_hours.hundredths()),
        ))
        .execute(conn)?;
    let employee_id: i64 = conn.get_last_insert_rowid()?;
    info!(employee_id, name, role = role.as_str(), "Created employee");
    Ok(EmployeeId::new(employee_id))
}

/// Overwrites all balance counters of an employee.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if no row was updated.
pub fn update_balances(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    balances: &EmployeeBalances,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id.value()))
        .set((
            employees::vacation_days.eq(balances.vacation_days.hundredths()),
            employees::module_days.eq(balances.module_days.hundredths()),
            employees::personal_affairs_days.eq(balances.personal_affairs_days.hundredths()),
            employees::special_group_compensation_days
                .eq(balances.special_group_compensation_days.hundredths()),
            employees::union_hours.eq(balances.union_hours.hundredths()),
            employees::personal_outing_hours.eq(balances.personal_outing_hours.hundredths()),
            employees::transferred_hours.eq(balances.transferred_hours.hundredths()),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id.value()));
    }
    Ok(())
}

/// Records that a brigade has a scheduled guard on a date.
///
/// Scheduling the same guard twice is a no-op.
///
/// # Errors
///
/// Returns an error if the brigade does not exist or the insert fails.
pub fn schedule_guard_day(
    conn: &mut SqliteConnection,
    brigade_id: BrigadeId,
    date: Date,
) -> Result<(), PersistenceError> {
    diesel::insert_or_ignore_into(guard_days::table)
        .values((
            guard_days::brigade_id.eq(brigade_id.value()),
            guard_days::date.eq(format_date(date)?),
        ))
        .execute(conn)?;
    debug!(brigade_id = %brigade_id, %date, "Scheduled guard day");
    Ok(())
}
