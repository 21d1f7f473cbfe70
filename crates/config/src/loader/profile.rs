//! Profile selection for layered loading.
//!
//! Responsibilities:
//! - Parse the comma-separated profile selector.
//! - Derive `<prefix>.<profile>` file paths.
//! - Resolve the selector from the store, falling back to the process environment.
//!
//! Invariants:
//! - Profile order is preserved; later profiles override earlier ones.
//! - Empty or whitespace-only entries are discarded.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::env::env_var_or_none;
use crate::constants::PROFILE_SEPARATOR;
use crate::store::{EnvStore, render_value};

/// Split a selector such as `"dev, local"` into profile names.
pub fn parse_profiles(selector: &str) -> Vec<String> {
    selector
        .split(PROFILE_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Path of the file backing `profile`: `<prefix>.<profile>`.
pub fn profile_path(prefix: &Path, profile: &str) -> PathBuf {
    let mut path = OsString::from(prefix.as_os_str());
    path.push(".");
    path.push(profile);
    PathBuf::from(path)
}

/// Read the selector named `var` and parse it into profile names.
///
/// The store is consulted first; when it has no binding for `var` the
/// process environment is used instead.
pub(crate) fn resolve_profiles(store: &dyn EnvStore, var: &str) -> Vec<String> {
    let selector = match store.get(var) {
        Some(value) => Some(render_value(&value)),
        None => env_var_or_none(var),
    };
    selector.as_deref().map(parse_profiles).unwrap_or_default()
}
