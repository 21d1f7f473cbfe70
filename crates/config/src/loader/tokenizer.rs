//! Line tokenizer for env files.
//!
//! Responsibilities:
//! - Split env-file text into ordered `Entry` values in a single forward pass.
//! - Track multi-line blocks opened and closed by a triple double-quote marker.
//! - Absorb unquoted continuation lines into the pending value.
//!
//! Does NOT handle:
//! - Quote stripping or trimming of single-line values (see normalize.rs).
//! - Type coercion (see normalize.rs).
//! - Merging results across files (see builder.rs).
//!
//! Invariants:
//! - The tokenizer never fails; malformed lines are dropped or absorbed.
//! - Comments and blank lines are data inside a multi-line block.
//! - Only the triple-quote marker opens a multi-line block. A lone double
//!   quote without a closing partner is kept as literal text.

use super::normalize::{normalize, unescape_quotes};
use super::parse::ParseResult;
use crate::constants::{COMMENT_PREFIX, TRIPLE_QUOTE};
use serde_json::Value;

/// Tokenizer state between two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    /// No key is pending; the next assignment line starts one.
    #[default]
    ExpectKey,
    /// A key is pending whose value started on its assignment line.
    InSingleLineValue,
    /// A key is pending whose value is a triple-quoted block.
    InMultilineBlock,
}

/// One completed `KEY=value` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Key text before the first `=`, trimmed. Never empty.
    pub key: String,
    /// Value lines joined with `\n`, before finalization.
    pub raw_value: String,
    /// True only when the value was opened with a triple-quote marker.
    pub was_multiline_block: bool,
    /// Zero-based index of the line that opened this entry.
    pub line: usize,
}

impl Entry {
    /// The finalized string value.
    ///
    /// Block payloads keep their content and line breaks and only have `\"`
    /// unescaped. Everything else goes through [`normalize`].
    pub fn value(&self) -> String {
        if self.was_multiline_block {
            unescape_quotes(&self.raw_value)
        } else {
            normalize(&self.raw_value)
        }
    }
}

#[derive(Debug)]
struct Pending {
    key: String,
    lines: Vec<String>,
    was_block: bool,
    line: usize,
}

#[derive(Debug, Default)]
struct Tokenizer {
    state: LineState,
    pending: Option<Pending>,
    entries: Vec<Entry>,
}

impl Tokenizer {
    fn feed(&mut self, index: usize, line: &str) {
        if self.state == LineState::InMultilineBlock {
            self.push_block_line(line);
            return;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            return;
        }

        if let Some((key, rest)) = split_assignment(line) {
            self.finish();
            self.open(index, key, rest);
            return;
        }

        match (self.state, self.pending.as_mut()) {
            (LineState::InSingleLineValue, Some(pending)) => pending.lines.push(line.to_string()),
            _ => tracing::trace!(line = index, "Dropping line outside of any assignment"),
        }
    }

    fn open(&mut self, index: usize, key: &str, rest: &str) {
        let mut pending = Pending {
            key: key.to_string(),
            lines: Vec::new(),
            was_block: false,
            line: index,
        };

        let Some(body) = rest.trim_start().strip_prefix(TRIPLE_QUOTE) else {
            pending.lines.push(rest.to_string());
            self.pending = Some(pending);
            self.state = LineState::InSingleLineValue;
            return;
        };

        pending.was_block = true;
        if let Some(inner) = body.trim_end().strip_suffix(TRIPLE_QUOTE) {
            // Opened and closed on the same line.
            pending.lines.push(inner.to_string());
            self.pending = Some(pending);
            self.finish();
            return;
        }

        if !body.trim().is_empty() {
            pending.lines.push(body.to_string());
        }
        self.pending = Some(pending);
        self.state = LineState::InMultilineBlock;
    }

    fn push_block_line(&mut self, line: &str) {
        let Some(pending) = self.pending.as_mut() else {
            self.state = LineState::ExpectKey;
            return;
        };

        match line.trim_end().strip_suffix(TRIPLE_QUOTE) {
            Some(head) => {
                if !head.trim().is_empty() {
                    pending.lines.push(head.to_string());
                }
                self.finish();
            }
            None => pending.lines.push(line.to_string()),
        }
    }

    fn finish(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.entries.push(Entry {
                key: pending.key,
                raw_value: pending.lines.join("\n"),
                was_multiline_block: pending.was_block,
                line: pending.line,
            });
        }
        self.state = LineState::ExpectKey;
    }
}

/// Split an assignment line at its first unescaped `=`.
///
/// Returns `None` when there is no such `=` or the key before it is blank.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '\\' => escaped = !escaped,
            '=' if !escaped => {
                let key = line[..idx].trim();
                return (!key.is_empty()).then(|| (key, &line[idx + 1..]));
            }
            _ => escaped = false,
        }
    }
    None
}

/// Tokenize env-file content into entries, in file order.
///
/// Repeated keys produce repeated entries; see [`parse_raw`] for the
/// collapsed mapping.
pub fn tokenize(content: &str) -> Vec<Entry> {
    let mut tokenizer = Tokenizer::default();
    for (index, line) in content.lines().enumerate() {
        tokenizer.feed(index, line);
    }
    tokenizer.finish();
    tokenizer.entries
}

/// Tokenize and finalize env-file content into string values.
///
/// When a key repeats within the content, the last occurrence wins.
pub fn parse_raw(content: &str) -> ParseResult {
    let mut result = ParseResult::default();
    for entry in tokenize(content) {
        let value = entry.value();
        result.insert(entry.key, Value::String(value));
    }
    result
}
