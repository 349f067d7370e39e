// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine configuration.
//!
//! The configuration names the synthetic brigade of every leave type and any
//! extra brigades that always count as "on duty elsewhere". It is resolved
//! once against the brigade directory into an [`EngineContext`], which every
//! workflow handler then receives explicitly.

use guardia_domain::{BrigadeId, LeaveBrigadeMap, LeaveType};
use guardia_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};

/// Errors raised while loading a configuration file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration file '{path}': {message}")]
    Read {
        /// The file path.
        path: String,
        /// The underlying I/O error.
        message: String,
    },
    /// The configuration is not valid JSON for [`EngineConfig`].
    #[error("Invalid configuration: {0}")]
    Parse(String),
    /// A brigade name in the configuration is empty.
    #[error("Brigade name for {0} must not be empty")]
    EmptyBrigadeName(String),
}

/// Engine configuration as read from JSON.
///
/// Every field is optional in the file. Leave types missing from
/// `leave_brigades` fall back to their default brigade name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Leave type to synthetic brigade name.
    pub leave_brigades: BTreeMap<LeaveType, String>,
    /// Extra brigade names that always make an employee unavailable.
    pub unavailable_brigades: Vec<String>,
    /// Create missing leave brigades instead of failing.
    pub auto_provision: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            leave_brigades: LeaveType::ALL
                .into_iter()
                .map(|leave_type| (leave_type, leave_type.default_brigade_name().to_string()))
                .collect(),
            unavailable_brigades: Vec::new(),
            auto_provision: true,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid or names an empty brigade.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path: &Path = path.as_ref();
        let json: String = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// The configured brigade name for a leave type.
    #[must_use]
    pub fn brigade_name(&self, leave_type: LeaveType) -> String {
        self.leave_brigades
            .get(&leave_type)
            .cloned()
            .unwrap_or_else(|| leave_type.default_brigade_name().to_string())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some((leave_type, _)) = self
            .leave_brigades
            .iter()
            .find(|(_, name)| name.trim().is_empty())
        {
            return Err(ConfigError::EmptyBrigadeName(leave_type.to_string()));
        }
        if self
            .unavailable_brigades
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err(ConfigError::EmptyBrigadeName(String::from(
                "an unavailable brigade",
            )));
        }
        Ok(())
    }

    /// Resolves the configuration against the brigade directory.
    ///
    /// With `auto_provision` set, missing leave brigades are created as
    /// special brigades. Otherwise a missing brigade fails with a
    /// configuration error naming the leave type.
    ///
    /// # Errors
    ///
    /// Returns an error if a leave brigade cannot be resolved or created.
    pub fn resolve(&self, persistence: &mut Persistence) -> Result<EngineContext, ApiError> {
        let mut by_name: BTreeMap<String, BrigadeId> = BTreeMap::new();
        for leave_type in LeaveType::ALL {
            let name: String = self.brigade_name(leave_type);
            let brigade_id: Option<BrigadeId> = if self.auto_provision {
                Some(
                    persistence
                        .ensure_special_brigade(&name)
                        .map_err(translate_persistence_error)?,
                )
            } else {
                persistence
                    .find_brigade_by_name(&name)
                    .map_err(translate_persistence_error)?
                    .map(|brigade| brigade.brigade_id)
            };
            debug!(%leave_type, %name, ?brigade_id, "Resolved leave brigade");
            if let Some(brigade_id) = brigade_id {
                by_name.insert(name, brigade_id);
            }
        }

        let leave_brigades: LeaveBrigadeMap = LeaveBrigadeMap::resolve(
            |leave_type| self.brigade_name(leave_type),
            |name| by_name.get(name).copied(),
        )
        .map_err(translate_domain_error)?;

        let excluded_brigades: BTreeSet<String> = by_name
            .into_keys()
            .chain(self.unavailable_brigades.iter().cloned())
            .collect();

        info!(
            excluded = excluded_brigades.len(),
            auto_provision = self.auto_provision,
            "Engine configuration resolved"
        );

        Ok(EngineContext {
            leave_brigades,
            excluded_brigades,
        })
    }
}

/// Startup-resolved engine state shared by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineContext {
    /// Leave type to brigade id.
    pub leave_brigades: LeaveBrigadeMap,
    /// Brigade names that always make an employee unavailable: every leave
    /// brigade plus the configured extras.
    pub excluded_brigades: BTreeSet<String>,
}
