// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::error::CliError;

fn main() -> ExitCode {
    let args: Args = Args::parse();

    if let Err(err) = init_tracing(args.log_level.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    info!(command = args.command.name(), "Starting guardia");

    match commands::run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr log subscriber.
///
/// An explicit `--log-level` wins over `RUST_LOG`; with neither, `info`.
fn init_tracing(directive: Option<&str>) -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directive)?)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn log_filter(directive: Option<&str>) -> Result<EnvFilter, CliError> {
    match directive {
        Some(directive) => {
            EnvFilter::try_new(directive).map_err(|e| CliError::LogFilter {
                directive: directive.to_string(),
                message: e.to_string(),
            })
        }
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}
