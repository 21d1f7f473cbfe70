//! `show` command: print the merged variables.

use anyhow::{Result, bail};

use super::{load_store, select_vars};
use crate::args::LoadOptions;
use crate::formatters::{OutputFormat, format_vars};

pub fn run(options: &LoadOptions, format: OutputFormat, keys: &[String]) -> Result<()> {
    let store = load_store(options)?;
    let vars = select_vars(&store, keys);

    if let Some(missing) = keys.iter().find(|key| !vars.contains_key(*key)) {
        bail!("Variable '{}' is not defined", missing);
    }

    let output = format_vars(&vars, format)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
