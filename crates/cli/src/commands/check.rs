//! `check` command: validate the merged variables against a schema file.

use anyhow::{Context, Result};
use envlayer_config::Schema;
use std::path::Path;

use crate::args::LoadOptions;

pub fn run(options: &LoadOptions, schema_path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(schema_path)
        .with_context(|| format!("Failed to read schema file {}", schema_path.display()))?;
    let schema = Schema::from_json(&text)
        .with_context(|| format!("Invalid schema file {}", schema_path.display()))?;

    let mut store = options.store();
    let config = options
        .loader()
        .load_and_validate(&mut store, &schema)
        .context("Failed to load environment")?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
