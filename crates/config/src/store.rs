//! Key/value stores that loaded env files are merged into.
//!
//! Responsibilities:
//! - Define the `EnvStore` seam used by the loader and validators.
//! - Provide an isolated in-memory store and a process-environment store.
//!
//! Does NOT handle:
//! - Ordering of writes (the loader applies files sequentially).
//!
//! Invariants:
//! - `set` overwrites; the last write for a key wins.
//! - `ProcessEnv` stores text only: non-string values are written as JSON.
//! - `ProcessEnv` never panics on a key or value the OS rejects; it skips it.

use std::collections::BTreeMap;

use serde_json::Value;

/// Render a stored value as environment-variable text.
///
/// Strings are returned verbatim; every other value uses its JSON form.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Destination mapping for loaded variables.
pub trait EnvStore {
    /// Current value bound to `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Bind `key` to `value`, replacing any earlier binding.
    fn set(&mut self, key: &str, value: Value);

    /// Copy of every binding, sorted by key.
    fn snapshot(&self) -> BTreeMap<String, Value>;
}

/// An isolated store backed by a sorted map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    vars: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with every variable of the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process_env() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| {
                Some((key.into_string().ok()?, Value::String(value.into_string().ok()?)))
            })
            .collect();
        Self { vars }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Borrow the underlying map.
    pub fn vars(&self) -> &BTreeMap<String, Value> {
        &self.vars
    }

    pub fn into_vars(self) -> BTreeMap<String, Value> {
        self.vars
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(key, value)| (key.into(), value)).collect(),
        }
    }
}

impl EnvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.vars.insert(key.to_string(), value);
    }

    fn snapshot(&self) -> BTreeMap<String, Value> {
        self.vars.clone()
    }
}

fn is_settable(key: &str, value: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0']) && !value.contains('\0')
}

/// The real process environment.
///
/// Writes are visible to the whole process and to child processes spawned
/// afterwards. Callers must not load into it from several threads at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<Value> {
        std::env::var(key).ok().map(Value::String)
    }

    /// Keys containing `=` or NUL, empty keys, and values containing NUL
    /// cannot be represented in the process environment and are skipped.
    fn set(&mut self, key: &str, value: Value) {
        let text = render_value(&value);
        if !is_settable(key, &text) {
            tracing::warn!(key, "Skipping variable that cannot be set in the process environment");
            return;
        }
        // SAFETY: loading is single-threaded; the loader never runs
        // concurrently with other environment readers.
        unsafe {
            std::env::set_var(key, text);
        }
    }

    fn snapshot(&self) -> BTreeMap<String, Value> {
        std::env::vars_os()
            .filter_map(|(key, value)| {
                Some((key.into_string().ok()?, Value::String(value.into_string().ok()?)))
            })
            .collect()
    }
}
