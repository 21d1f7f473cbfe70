//! Error types for env loading.
//!
//! Responsibilities:
//! - Define the failures that abort a load: unreadable files and rejected
//!   validation.
//!
//! Does NOT handle:
//! - Malformed env-file lines, which are tolerated by the tokenizer.
//!
//! Invariants:
//! - File errors carry the path and the underlying I/O error.
//! - Error messages never include env-file contents or values.

use std::path::PathBuf;
use thiserror::Error;

use crate::validate::ValidationError;

/// Errors that abort a load call.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read environment file at {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl LoadError {
    /// Path of the file that failed to load, for `FileRead` errors.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            LoadError::FileRead { path, .. } => Some(path),
            LoadError::Validation(_) => None,
        }
    }
}
