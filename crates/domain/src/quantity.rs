// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed-point amounts for balance counters and hour costs.
//!
//! Amounts are held as whole hundredths, so debiting a quantity and crediting
//! it back restores the counter exactly. At the JSON boundary an amount reads
//! and writes as a plain decimal number.

use crate::error::DomainError;
use num_traits::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

const SCALE: i64 = 100;

/// A day, jornada or hour amount with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Quantity(i64);

impl Quantity {
    /// Nothing.
    pub const ZERO: Self = Self(0);

    /// Creates a quantity from a count of hundredths.
    #[must_use]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Returns the quantity as a count of hundredths.
    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// Creates a quantity of whole units.
    #[must_use]
    pub fn whole(units: u32) -> Self {
        Self(i64::from(units) * SCALE)
    }

    /// Rounds a decimal value to the nearest hundredth.
    ///
    /// Returns `None` for NaN, infinities and values out of range.
    #[must_use]
    pub fn from_decimal(value: f64) -> Option<Self> {
        (value * 100.0).round().to_i64().map(Self)
    }

    /// Returns the quantity as a decimal value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Quantity {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign: &str = if self.0 < 0 { "-" } else { "" };
        let magnitude: u64 = self.0.unsigned_abs();
        let scale: u64 = SCALE.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / scale, magnitude % scale)
    }
}

/// Parses a decimal with at most two fractional digits, without rounding.
impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidQuantity(s.to_string());
        let trimmed: &str = s.trim();
        let (negative, digits) = trimmed
            .strip_prefix('-')
            .map_or((false, trimmed), |rest| (true, rest));
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty())
            || fraction.len() > 2
            || !all_digits(whole)
            || !all_digits(fraction)
        {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|_| invalid())?
        };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse::<i64>().map_err(|_| invalid())?,
        };

        let hundredths: i64 = whole_value
            .checked_mul(SCALE)
            .and_then(|value| value.checked_add(fraction_value))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -hundredths } else { hundredths }))
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: f64 = f64::deserialize(deserializer)?;
        Self::from_decimal(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid quantity: {value}")))
    }
}
