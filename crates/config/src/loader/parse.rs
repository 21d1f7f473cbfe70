//! Per-file parse results.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use super::normalize::coerce;
use super::tokenizer::parse_raw;

/// Ordered key/value mapping produced from one file's content.
///
/// Keys are unique; re-inserting a key replaces its value in place so the
/// first-seen order is kept. Lookups and inserts are O(1).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl ParseResult {
    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        match self.index.get(&key).copied() {
            Some(position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Convenience accessor for string values.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn into_map(self) -> BTreeMap<String, Value> {
        self.entries.into_iter().collect()
    }

    fn map_values(self, f: impl Fn(Value) -> Value) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .map(|(key, value)| (key, f(value)))
                .collect(),
            index: self.index,
        }
    }
}

impl IntoIterator for ParseResult {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Parse env-file content, coercing values when `coerce_values` is set.
pub fn parse(content: &str, coerce_values: bool) -> ParseResult {
    let raw = parse_raw(content);
    if !coerce_values {
        return raw;
    }
    raw.map_values(|value| match value {
        Value::String(text) => coerce(&text),
        other => other,
    })
}
