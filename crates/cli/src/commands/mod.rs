//! CLI command implementations.

pub mod check;
pub mod exec;
pub mod show;

use anyhow::{Context, Result};
use envlayer_config::{EnvStore, MemoryStore};

use crate::args::LoadOptions;

/// Load the configured files into a fresh store.
pub fn load_store(options: &LoadOptions) -> Result<MemoryStore> {
    let mut store = options.store();
    let report = options
        .loader()
        .load(&mut store)
        .context("Failed to load environment")?;
    tracing::debug!(
        files = report.files_loaded.len(),
        skipped = report.files_skipped.len(),
        keys_set = report.keys_set,
        "Environment loaded"
    );
    Ok(store)
}

/// Keys of `store` that `keys` selects; all keys when `keys` is empty.
pub fn select_vars(
    store: &dyn EnvStore,
    keys: &[String],
) -> std::collections::BTreeMap<String, serde_json::Value> {
    let mut vars = store.snapshot();
    if !keys.is_empty() {
        vars.retain(|key, _| keys.contains(key));
    }
    vars
}
