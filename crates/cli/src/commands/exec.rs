//! `exec` command: run a program with the merged variables.

use anyhow::{Context, Result};
use envlayer_config::render_value;
use std::process::Command;

use super::load_store;
use crate::args::LoadOptions;
use crate::error::ExitCode;

/// Run `program` and return its exit code.
///
/// A child terminated by a signal reports `GeneralError`.
pub fn run(options: &LoadOptions, program: &str, args: &[String]) -> Result<i32> {
    let store = load_store(options)?;

    let status = Command::new(program)
        .args(args)
        .envs(
            store
                .vars()
                .iter()
                .map(|(key, value)| (key, render_value(value))),
        )
        .status()
        .with_context(|| format!("Failed to run {}", program))?;

    Ok(status.code().unwrap_or(ExitCode::GeneralError.as_i32()))
}
