//! Env-file loading.
//!
//! Responsibilities:
//! - Tokenize env-file text, including triple-quoted multi-line blocks.
//! - Normalize quoted values and optionally coerce them into typed values.
//! - Provide a builder-pattern `EnvLoader` that layers files and profiles
//!   into a store and validates the result.
//!
//! Does NOT handle:
//! - Where merged variables live (see `store.rs`).
//! - What counts as a valid configuration (see `validate.rs`).
//!
//! Invariants / Assumptions:
//! - Later files override earlier ones key by key.
//! - Profile files (`<prefix>.<profile>`) load after all explicit files.
//! - Malformed lines never fail a load.

mod builder;
mod env;
mod error;
mod logger;
mod normalize;
mod parse;
mod profile;
mod reader;
mod tokenizer;

#[cfg(test)]
mod tests;

pub use builder::{EnvLoader, LoadReport};
pub use env::env_var_or_none;
pub use error::LoadError;
pub use logger::{ErrorContext, LoadLogger, StdioLogger, TracingLogger};
pub use normalize::{coerce, normalize};
pub use parse::{ParseResult, parse};
pub use profile::{parse_profiles, profile_path};
pub use reader::{FileReader, FsReader};
pub use tokenizer::{Entry, LineState, parse_raw, tokenize};
