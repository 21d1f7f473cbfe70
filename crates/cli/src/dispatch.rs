//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::error::ExitCode;

/// Dispatch CLI commands to their respective handlers.
///
/// Returns the process exit code: `0` for `show`/`check`, the child's code
/// for `exec`.
pub(crate) fn run_command(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Show { format, keys } => {
            commands::show::run(&cli.load, format, &keys)?;
            Ok(ExitCode::Success.as_i32())
        }
        Commands::Check { schema } => {
            commands::check::run(&cli.load, &schema)?;
            Ok(ExitCode::Success.as_i32())
        }
        Commands::Exec { program, args } => commands::exec::run(&cli.load, &program, &args),
    }
}
