//! Env loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `EnvLoader` that sequences explicit files and
//!   profile-derived files.
//! - Merge each file's parse result into an `EnvStore` with last-write-wins.
//! - Hand the merged mapping to a `Validator` on demand.
//!
//! Does NOT handle:
//! - Tokenizing or normalizing file content (see tokenizer.rs, normalize.rs).
//! - Choosing where variables end up (see store.rs).
//!
//! Invariants / Assumptions:
//! - Explicit paths load strictly before profile paths, each group in order.
//! - Each file is read, parsed and merged before the next one is read.
//! - The first unreadable required file aborts the load; nothing after it runs.
//! - The profile selector is read after all explicit files are merged, unless
//!   an explicit profile list was given.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::error::LoadError;
use super::logger::{ErrorContext, LoadLogger, TracingLogger};
use super::parse::parse;
use super::profile::{profile_path, resolve_profiles};
use super::reader::{FileReader, FsReader};
use crate::constants::{DEFAULT_PROFILE_PREFIX, DEFAULT_PROFILE_VAR};
use crate::store::EnvStore;
use crate::validate::{ValidationError, Validator};

#[derive(Debug, Clone, PartialEq, Eq)]
struct FileSpec {
    path: PathBuf,
    optional: bool,
}

/// Summary of one load call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Files read and merged, in load order.
    pub files_loaded: Vec<PathBuf>,
    /// Optional files that did not exist.
    pub files_skipped: Vec<PathBuf>,
    /// Profiles selected for this load, in order.
    pub profiles: Vec<String>,
    /// Number of store writes performed.
    pub keys_set: usize,
}

/// Loads env files into a store.
pub struct EnvLoader {
    files: Vec<FileSpec>,
    coerce: bool,
    profile_prefix: PathBuf,
    profile_var: String,
    profiles: Option<Vec<String>>,
    reader: Box<dyn FileReader>,
    logger: Box<dyn LoadLogger>,
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvLoader {
    /// Create a loader with no explicit files, coercion off, profile prefix
    /// `.env` and selector variable `PROFILES`.
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            coerce: false,
            profile_prefix: PathBuf::from(DEFAULT_PROFILE_PREFIX),
            profile_var: DEFAULT_PROFILE_VAR.to_string(),
            profiles: None,
            reader: Box::new(FsReader),
            logger: Box::new(TracingLogger),
        }
    }

    /// Add a required file. Missing or unreadable files fail the load.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(FileSpec {
            path: path.into(),
            optional: false,
        });
        self
    }

    /// Add several required files, loaded in iteration order.
    pub fn with_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for path in paths {
            self = self.with_path(path);
        }
        self
    }

    /// Add a file that is skipped when it does not exist.
    ///
    /// Other read errors (permissions, invalid UTF-8) still fail the load.
    pub fn with_optional_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(FileSpec {
            path: path.into(),
            optional: true,
        });
        self
    }

    /// Enable or disable type coercion of loaded values.
    pub fn with_coercion(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    /// Set the prefix profile file paths are derived from (`<prefix>.<profile>`).
    pub fn with_profile_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.profile_prefix = prefix.into();
        self
    }

    /// Set the variable holding the comma-separated profile list.
    pub fn with_profile_var(mut self, var: impl Into<String>) -> Self {
        self.profile_var = var.into();
        self
    }

    /// Use this profile list instead of reading the selector variable.
    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles = Some(profiles.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the file reader (primarily for testing).
    pub fn with_reader(mut self, reader: impl FileReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    /// Replace the logger.
    pub fn with_logger(mut self, logger: impl LoadLogger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    pub fn coercion(&self) -> bool {
        self.coerce
    }

    pub fn profile_prefix(&self) -> &Path {
        &self.profile_prefix
    }

    pub fn profile_var(&self) -> &str {
        &self.profile_var
    }

    /// Load every explicit file, then every profile file, into `store`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::FileRead` for the first file that cannot be read.
    /// Writes made by files loaded before the failure remain in the store.
    pub fn load(&self, store: &mut dyn EnvStore) -> Result<LoadReport, LoadError> {
        let mut report = LoadReport::default();

        for file in &self.files {
            self.load_file(file, store, &mut report)?;
        }

        let profiles = match &self.profiles {
            Some(profiles) => profiles.clone(),
            None => resolve_profiles(store, &self.profile_var),
        };
        if !profiles.is_empty() {
            tracing::debug!(?profiles, "Selected profiles");
        }
        for profile in &profiles {
            let file = FileSpec {
                path: profile_path(&self.profile_prefix, profile),
                optional: false,
            };
            self.load_file(&file, store, &mut report)?;
        }

        report.profiles = profiles;
        Ok(report)
    }

    /// Load into `store`, then validate the merged mapping.
    pub fn load_and_validate<V: Validator>(
        &self,
        store: &mut dyn EnvStore,
        validator: &V,
    ) -> Result<V::Output, LoadError> {
        self.load(store)?;
        self.validate(store, validator)
    }

    /// Validate the current contents of `store`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Validation` carrying every issue the validator reported.
    pub fn validate<V: Validator>(
        &self,
        store: &dyn EnvStore,
        validator: &V,
    ) -> Result<V::Output, LoadError> {
        self.logger.info("Validating environment variables");
        let vars = store.snapshot();
        validator.validate(&vars).map_err(|issues| {
            let error = ValidationError::new(issues);
            self.report_error("Environment validation failed", &error, &vars);
            LoadError::Validation(error)
        })
    }

    fn load_file(
        &self,
        file: &FileSpec,
        store: &mut dyn EnvStore,
        report: &mut LoadReport,
    ) -> Result<(), LoadError> {
        self.logger.info(&format!(
            "Loading environment variables from {}",
            file.path.display()
        ));

        let content = match self.reader.read_to_string(&file.path) {
            Ok(content) => content,
            Err(e) if file.optional && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %file.path.display(), "Optional env file not found, skipping");
                report.files_skipped.push(file.path.clone());
                return Ok(());
            }
            Err(source) => {
                let error = LoadError::FileRead {
                    path: file.path.clone(),
                    source,
                };
                self.report_error(
                    "Failed to load environment variables",
                    &error,
                    &store.snapshot(),
                );
                return Err(error);
            }
        };

        let parsed = parse(&content, self.coerce);
        tracing::debug!(
            path = %file.path.display(),
            keys = parsed.len(),
            "Parsed environment file"
        );
        for (key, value) in parsed {
            store.set(&key, value);
            report.keys_set += 1;
        }
        report.files_loaded.push(file.path.clone());
        Ok(())
    }

    fn report_error(
        &self,
        message: &str,
        cause: &(dyn std::error::Error + 'static),
        vars: &BTreeMap<String, Value>,
    ) {
        self.logger.error(message, &ErrorContext { cause, vars });
    }
}
