// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift and shift-token transition rules.
//!
//! A request names a [`ShiftToken`]; the ledger only ever stores a single
//! [`Shift`]. The [`transition`] table converts a token into the shift the
//! employee leaves on, the shift they come back on, and whether the return
//! falls on the following calendar day. Leave, shift-change, transfer and
//! requirement planning all go through this one table.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single duty shift as stored in the ledger.
///
/// The derived ordering is chronological within a day:
/// `Morning < Afternoon < Night`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shift {
    /// Mañana.
    Morning,
    /// Tarde.
    Afternoon,
    /// Noche.
    Night,
}

impl Shift {
    /// Converts this shift to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Night => "Night",
        }
    }
}

impl FromStr for Shift {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "morning" | "manana" => Ok(Self::Morning),
            "afternoon" | "tarde" => Ok(Self::Afternoon),
            "night" | "noche" => Ok(Self::Night),
            _ => Err(DomainError::InvalidShift(s.to_string())),
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A requested shift window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftToken {
    /// Mañana.
    Morning,
    /// Tarde.
    Afternoon,
    /// Noche.
    Night,
    /// Día completo.
    FullDay,
    /// Mañana y tarde.
    MorningAfternoon,
    /// Tarde y noche.
    AfternoonNight,
}

impl ShiftToken {
    /// All six recognised tokens.
    pub const ALL: [Self; 6] = [
        Self::Morning,
        Self::Afternoon,
        Self::Night,
        Self::FullDay,
        Self::MorningAfternoon,
        Self::AfternoonNight,
    ];

    /// Converts this token to its canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Night => "Night",
            Self::FullDay => "FullDay",
            Self::MorningAfternoon => "MorningAfternoon",
            Self::AfternoonNight => "AfternoonNight",
        }
    }

    /// Number of jornadas this window costs against a shift-scoped balance.
    ///
    /// Full day costs 3, a two-part window costs 2, a single shift costs 1.
    #[must_use]
    pub const fn jornadas(&self) -> u8 {
        match self {
            Self::Morning | Self::Afternoon | Self::Night => 1,
            Self::MorningAfternoon | Self::AfternoonNight => 2,
            Self::FullDay => 3,
        }
    }

    /// Whether the window spans more than one shift.
    ///
    /// Scoped leave over one of these windows protects the employee from
    /// being listed as unavailable.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(
            self,
            Self::FullDay | Self::MorningAfternoon | Self::AfternoonNight
        )
    }
}

impl FromStr for ShiftToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "morning" | "manana" => Ok(Self::Morning),
            "afternoon" | "tarde" => Ok(Self::Afternoon),
            "night" | "noche" => Ok(Self::Night),
            "fullday" | "full-day" | "full day" | "diacompleto" | "dia completo" => {
                Ok(Self::FullDay)
            }
            "morningafternoon" | "morning+afternoon" | "manana y tarde" => {
                Ok(Self::MorningAfternoon)
            }
            "afternoonnight" | "afternoon+night" | "tarde y noche" => Ok(Self::AfternoonNight),
            _ => Err(DomainError::InvalidShiftToken(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outbound and return shifts derived from a [`ShiftToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTransition {
    /// The shift on which the employee leaves their brigade.
    pub outbound: Shift,
    /// The shift on which the employee is back in their brigade.
    pub return_shift: Shift,
    /// Whether the return shift falls on the day after the outbound date.
    pub return_is_next_day: bool,
}

/// Maps a shift token to its outbound shift, return shift and next-day flag.
///
/// | token              | outbound  | return    | next day |
/// |--------------------|-----------|-----------|----------|
/// | Morning            | Morning   | Afternoon | no       |
/// | Afternoon          | Afternoon | Night     | no       |
/// | Night              | Night     | Morning   | yes      |
/// | `FullDay`          | Morning   | Morning   | yes      |
/// | `MorningAfternoon` | Morning   | Night     | no       |
/// | `AfternoonNight`   | Afternoon | Morning   | yes      |
#[must_use]
pub const fn transition(token: ShiftToken) -> ShiftTransition {
    let (outbound, return_shift, return_is_next_day): (Shift, Shift, bool) = match token {
        ShiftToken::Morning => (Shift::Morning, Shift::Afternoon, false),
        ShiftToken::Afternoon => (Shift::Afternoon, Shift::Night, false),
        ShiftToken::Night => (Shift::Night, Shift::Morning, true),
        ShiftToken::FullDay => (Shift::Morning, Shift::Morning, true),
        ShiftToken::MorningAfternoon => (Shift::Morning, Shift::Night, false),
        ShiftToken::AfternoonNight => (Shift::Afternoon, Shift::Morning, true),
    };
    ShiftTransition {
        outbound,
        return_shift,
        return_is_next_day,
    }
}

/// Parses a raw token and applies [`transition`].
///
/// # Errors
///
/// Returns `DomainError::InvalidShiftToken` for anything other than the six
/// recognised tokens.
pub fn transition_for(token: &str) -> Result<ShiftTransition, DomainError> {
    let token: ShiftToken = token.parse()?;
    Ok(transition(token))
}

/// Lowercases, trims and strips the Spanish accents the source data uses.
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace('ñ', "n")
        .replace('í', "i")
        .replace('_', " ")
}
