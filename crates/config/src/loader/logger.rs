//! Logging seam for load and validation events.
//!
//! Responsibilities:
//! - Define the `LoadLogger` trait the loader reports progress and failures to.
//! - Provide a `tracing`-backed logger and a plain stdout/stderr logger.
//!
//! Invariants:
//! - Error events receive the full current mapping, but the bundled loggers
//!   only ever print key names, never values.

use std::collections::BTreeMap;
use std::error::Error;

use serde_json::Value;

/// Structured context attached to an error event.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    /// The failure being reported.
    pub cause: &'a (dyn Error + 'static),
    /// Every binding in the store at the time of the failure.
    pub vars: &'a BTreeMap<String, Value>,
}

impl ErrorContext<'_> {
    /// Comma-separated key names of the current mapping.
    pub fn key_list(&self) -> String {
        self.vars.keys().map(String::as_str).collect::<Vec<_>>().join(",")
    }
}

/// Receives informational and error events from the loader.
pub trait LoadLogger {
    fn info(&self, message: &str);
    fn error(&self, message: &str, context: &ErrorContext<'_>);
}

/// Emits events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl LoadLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str, context: &ErrorContext<'_>) {
        tracing::error!(
            error = %context.cause,
            var_count = context.vars.len(),
            keys = %context.key_list(),
            "{message}"
        );
    }
}

/// Writes info events to stdout and error events to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioLogger;

impl LoadLogger for StdioLogger {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str, context: &ErrorContext<'_>) {
        eprintln!("{message}: {}", context.cause);
        eprintln!("  loaded keys: [{}]", context.key_list());
    }
}
