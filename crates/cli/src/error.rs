// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guardia_api::{ApiError, ConfigError};
use guardia_persistence::PersistenceError;
use thiserror::Error;

/// Everything that can stop a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Failed to open database: {0}")]
    Database(#[from] PersistenceError),
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("Invalid log filter '{directive}': {message}")]
    LogFilter { directive: String, message: String },
}
