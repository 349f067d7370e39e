// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Brigade, employee and guard-calendar lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;
use guardia_domain::{Brigade, BrigadeId, Employee, EmployeeId, Role, format_date};
use time::Date;
use tracing::debug;

use crate::data_models::{BrigadeRow, EmployeeRow};
use crate::diesel_schema::{brigades, employees, guard_days};
use crate::error::PersistenceError;

/// Retrieves a brigade by id.
///
/// # Errors
///
/// Returns `BrigadeNotFound` if no such brigade exists.
pub fn get_brigade(
    conn: &mut SqliteConnection,
    brigade_id: BrigadeId,
) -> Result<Brigade, PersistenceError> {
    brigades::table
        .filter(brigades::brigade_id.eq(brigade_id.value()))
        .select(BrigadeRow::as_select())
        .first::<BrigadeRow>(conn)
        .optional()?
        .map(Brigade::from)
        .ok_or_else(|| PersistenceError::BrigadeNotFound(brigade_id.to_string()))
}

/// Looks up a brigade by its exact name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_brigade_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<Brigade>, PersistenceError> {
    debug!("Looking up brigade by name: {}", name);
    Ok(brigades::table
        .filter(brigades::name.eq(name))
        .select(BrigadeRow::as_select())
        .first::<BrigadeRow>(conn)
        .optional()?
        .map(Brigade::from))
}

/// Lists every brigade ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_brigades(conn: &mut SqliteConnection) -> Result<Vec<Brigade>, PersistenceError> {
    Ok(brigades::table
        .order(brigades::brigade_id.asc())
        .select(BrigadeRow::as_select())
        .load::<BrigadeRow>(conn)?
        .into_iter()
        .map(Brigade::from)
        .collect())
}

/// Retrieves an employee by id.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if no such employee exists, or a
/// reconstruction error if the stored role is invalid.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Employee, PersistenceError> {
    let row: EmployeeRow = employees::table
        .filter(employees::employee_id.eq(employee_id.value()))
        .select(EmployeeRow::as_select())
        .first::<EmployeeRow>(conn)
        .optional()?
        .ok_or(PersistenceError::EmployeeNotFound(employee_id.value()))?;
    Employee::try_from(row)
}

/// Lists employees holding any of the given roles, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_employees_with_roles(
    conn: &mut SqliteConnection,
    roles: &[Role],
) -> Result<Vec<Employee>, PersistenceError> {
    let role_names: Vec<&str> = roles.iter().map(Role::as_str).collect();
    employees::table
        .filter(employees::role.eq_any(role_names))
        .order(employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load::<EmployeeRow>(conn)?
        .into_iter()
        .map(Employee::try_from)
        .collect()
}

/// Names of the brigades with a scheduled guard on any of the given dates.
///
/// # Errors
///
/// Returns an error if the query fails or a date cannot be formatted.
pub fn guard_brigade_names(
    conn: &mut SqliteConnection,
    dates: &[Date],
) -> Result<Vec<String>, PersistenceError> {
    let keys: Vec<String> = dates
        .iter()
        .map(|date| format_date(*date))
        .collect::<Result<_, _>>()?;
    Ok(guard_days::table
        .inner_join(brigades::table)
        .filter(guard_days::date.eq_any(keys))
        .select(brigades::name)
        .distinct()
        .order(brigades::name.asc())
        .load::<String>(conn)?)
}
