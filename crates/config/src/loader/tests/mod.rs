//! Tests for env-file loading.
//!
//! Responsibilities:
//! - Test tokenizer edge cases (blocks, comments, continuations).
//! - Test value normalization and coercion through the parser.
//! - Test load ordering, profiles, and error propagation.
//! - Test validation through the loader.
//!
//! Invariants:
//! - Tests prefer `MemoryStore` and in-memory readers over the real process
//!   environment and filesystem.
//! - Tests touching process-global state use `serial_test` and `env_lock()`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;

use super::logger::{ErrorContext, LoadLogger};
use crate::constants::DEFAULT_PROFILE_VAR;
use super::reader::FileReader;

pub mod coercion_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Run `f` while no profile selector is set in the process environment.
///
/// Loads that find no selector in the store fall back to the process
/// environment, so tests asserting an exact file sequence need this.
pub fn without_ambient_profiles<R>(f: impl FnOnce() -> R) -> R {
    let _lock = env_lock().lock().unwrap_or_else(|e| e.into_inner());
    temp_env::with_var_unset(DEFAULT_PROFILE_VAR, f)
}

/// In-memory file reader that records every path it was asked for.
#[derive(Clone, Default)]
pub struct MapReader {
    files: HashMap<PathBuf, String>,
    requests: Rc<RefCell<Vec<PathBuf>>>,
}

impl MapReader {
    pub fn new<I, P, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Self {
            files: files
                .into_iter()
                .map(|(path, content)| (path.into(), content.into()))
                .collect(),
            requests: Rc::default(),
        }
    }

    /// Shared handle to the list of requested paths.
    pub fn requests(&self) -> Rc<RefCell<Vec<PathBuf>>> {
        Rc::clone(&self.requests)
    }
}

impl FileReader for MapReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.requests.borrow_mut().push(path.to_path_buf());
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

/// Logger that keeps every event as a line of text.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    events: Rc<RefCell<Vec<String>>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl LoadLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.events.borrow_mut().push(format!("info: {message}"));
    }

    fn error(&self, message: &str, context: &ErrorContext<'_>) {
        self.events.borrow_mut().push(format!(
            "error: {message} [{}] keys={}",
            context.cause,
            context.key_list()
        ));
    }
}
