//! Layered `.env` loading for envlayer.
//!
//! This crate provides the env-file tokenizer, value normalization and
//! coercion, profile-aware layered loading into an injectable key/value
//! store, and schema validation of the merged result.

pub mod constants;
mod loader;
pub mod store;
pub mod validate;

pub use loader::{
    Entry, EnvLoader, ErrorContext, FileReader, FsReader, LineState, LoadError, LoadLogger,
    LoadReport, ParseResult, StdioLogger, TracingLogger, coerce, env_var_or_none, normalize,
    parse, parse_profiles, parse_raw, profile_path, tokenize,
};
pub use store::{EnvStore, MemoryStore, ProcessEnv, render_value};
pub use validate::{
    FieldKind, FieldSpec, Schema, SchemaError, Typed, ValidatedConfig, ValidationError,
    ValidationIssue, Validator,
};
