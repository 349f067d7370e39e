// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::quantity::Quantity;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// ISO calendar date format used at every boundary (`YYYY-MM-DD`).
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Minimum cost of an hour-scoped leave or a transfer.
pub const MIN_HOURS: Quantity = Quantity::from_hundredths(1);

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as ISO `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, DomainError> {
    date.format(DATE_FORMAT)
        .map_err(|e| DomainError::DateParseError {
            date_string: date.to_string(),
            error: e.to_string(),
        })
}

/// Returns the calendar day after `date`.
///
/// # Errors
///
/// Returns an error if `date` is the last representable date.
pub fn next_day(date: Date) -> Result<Date, DomainError> {
    date.next_day()
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing the day after {date}"),
        })
}

/// Returns the calendar day before `date`.
///
/// # Errors
///
/// Returns an error if `date` is the first representable date.
pub fn previous_day(date: Date) -> Result<Date, DomainError> {
    date.previous_day()
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing the day before {date}"),
        })
}

/// Validates that `start_date <= end_date`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if the end precedes the start.
pub fn validate_date_range(start_date: Date, end_date: Date) -> Result<(), DomainError> {
    if end_date < start_date {
        return Err(DomainError::InvalidDateRange {
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// Counts the days in `start_date..=end_date`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if the end precedes the start.
pub fn inclusive_days(start_date: Date, end_date: Date) -> Result<u32, DomainError> {
    validate_date_range(start_date, end_date)?;
    let span: i64 = (end_date - start_date).whole_days() + 1;
    u32::try_from(span).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("counting days between {start_date} and {end_date}"),
    })
}

/// Validates an hour quantity for hour-scoped leave and transfers.
///
/// # Errors
///
/// Returns `DomainError::InvalidHours` if `hours` is below 0.01.
pub fn validate_hours(hours: Quantity) -> Result<(), DomainError> {
    if hours < MIN_HOURS {
        return Err(DomainError::InvalidHours(hours.to_string()));
    }
    Ok(())
}

/// Converts a decimal hour value to a quantity, rounding to the nearest
/// hundredth. The minimum is checked by `validate_hours`.
///
/// # Errors
///
/// Returns `DomainError::InvalidHours` if `hours` is not finite or out of range.
pub fn hours_from_decimal(hours: f64) -> Result<Quantity, DomainError> {
    Quantity::from_decimal(hours).ok_or_else(|| DomainError::InvalidHours(hours.to_string()))
}
