//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Translate load options into an `EnvLoader` and a seeded store.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Args, Parser, Subcommand};
use envlayer_config::constants::{DEFAULT_PROFILE_PREFIX, DEFAULT_PROFILE_VAR};
use envlayer_config::{EnvLoader, MemoryStore, parse_profiles};
use std::path::PathBuf;

use crate::formatters::OutputFormat;

#[derive(Parser)]
#[command(name = "envlayer")]
#[command(about = "Load layered .env files with profiles, coercion and validation", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envlayer -f .env show\n  envlayer -f .env --profiles dev,local show --format json\n  envlayer -f .env --coerce check --schema env.schema.json\n  envlayer -f .env exec -- ./server --port 8080\n"
)]
pub struct Cli {
    #[command(flatten)]
    pub load: LoadOptions,

    /// Only log warnings and errors (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug, Default)]
pub struct LoadOptions {
    /// Env file to load; repeat to layer files (later files win)
    #[arg(short, long = "file", global = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Env file to load if it exists; repeat as needed
    #[arg(long = "optional-file", global = true, value_name = "FILE")]
    pub optional_files: Vec<PathBuf>,

    /// Coerce values into numbers, booleans, null and JSON
    #[arg(long, global = true)]
    pub coerce: bool,

    /// Prefix that profile files are derived from (`<prefix>.<profile>`)
    #[arg(long, global = true, default_value = DEFAULT_PROFILE_PREFIX, value_name = "PREFIX")]
    pub profile_prefix: PathBuf,

    /// Comma-separated profiles to load, instead of the selector variable
    #[arg(long, global = true, value_name = "LIST")]
    pub profiles: Option<String>,

    /// Variable holding the comma-separated profile list
    #[arg(long, global = true, default_value = DEFAULT_PROFILE_VAR, value_name = "NAME")]
    pub profile_var: String,

    /// Start from the current process environment instead of an empty store
    #[arg(long, global = true)]
    pub inherit_env: bool,
}

impl LoadOptions {
    /// Build the loader described by these options.
    pub fn loader(&self) -> EnvLoader {
        let mut loader = EnvLoader::new()
            .with_coercion(self.coerce)
            .with_profile_prefix(self.profile_prefix.clone())
            .with_profile_var(self.profile_var.clone());

        // Optional files are layered after the required ones.
        loader = loader.with_paths(self.files.iter().cloned());
        for path in &self.optional_files {
            loader = loader.with_optional_path(path.clone());
        }

        if let Some(profiles) = &self.profiles {
            loader = loader.with_profiles(parse_profiles(profiles));
        }
        loader
    }

    /// Build the store the loader writes into.
    pub fn store(&self) -> MemoryStore {
        if self.inherit_env {
            MemoryStore::from_process_env()
        } else {
            MemoryStore::new()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the merged variables
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Dotenv)]
        format: OutputFormat,

        /// Only print these keys
        keys: Vec<String>,
    },

    /// Validate the merged variables against a JSON schema document
    Check {
        /// Schema file, e.g. {"fields": [{"name": "PORT", "type": "integer"}]}
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,
    },

    /// Run a program with the merged variables added to its environment
    Exec {
        /// Program to run
        program: String,

        /// Arguments passed to the program
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}
