// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::leave::LeaveType;
use crate::types::BrigadeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resolved mapping from leave type to the synthetic brigade representing it.
///
/// Built once at startup. Every leave type must be mapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBrigadeMap {
    brigades: BTreeMap<LeaveType, BrigadeId>,
}

impl LeaveBrigadeMap {
    /// Resolves brigade names to ids for every leave type.
    ///
    /// `name_for` returns the configured brigade name of a leave type and
    /// `lookup` resolves a brigade name against the directory.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingLeaveBrigade` for the first leave type
    /// whose brigade cannot be resolved.
    pub fn resolve<N, L>(name_for: N, lookup: L) -> Result<Self, DomainError>
    where
        N: Fn(LeaveType) -> String,
        L: Fn(&str) -> Option<BrigadeId>,
    {
        let mut brigades: BTreeMap<LeaveType, BrigadeId> = BTreeMap::new();
        for leave_type in LeaveType::ALL {
            let brigade_id: BrigadeId = lookup(&name_for(leave_type))
                .ok_or(DomainError::MissingLeaveBrigade(leave_type))?;
            brigades.insert(leave_type, brigade_id);
        }
        Ok(Self { brigades })
    }

    /// Returns the brigade for a leave type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingLeaveBrigade` if the type is not mapped.
    pub fn brigade_for(&self, leave_type: LeaveType) -> Result<BrigadeId, DomainError> {
        self.brigades
            .get(&leave_type)
            .copied()
            .ok_or(DomainError::MissingLeaveBrigade(leave_type))
    }

    /// Iterates the mapping in leave-type order.
    pub fn iter(&self) -> impl Iterator<Item = (LeaveType, BrigadeId)> + '_ {
        self.brigades.iter().map(|(t, b)| (*t, *b))
    }
}
