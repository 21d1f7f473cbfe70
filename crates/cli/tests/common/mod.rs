//! Shared test utilities for envlayer integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//! - Write env fixtures into a temporary directory.
//!
//! Invariants / Assumptions:
//! - The host's `PROFILES` and `RUST_LOG` never reach the child process.

use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// Returns a hermetic `envlayer` command running inside `dir`.
pub fn envlayer_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envlayer");
    cmd.current_dir(dir);

    // Clear potential host leakage
    cmd.env_remove("PROFILES").env_remove("RUST_LOG");

    cmd
}

/// Write `content` to `dir/name` and return the full path.
#[allow(dead_code)]
pub fn write_env(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}
