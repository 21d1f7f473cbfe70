//! Output formatters for the `show` command.
//!
//! Provides dotenv, shell `export`, and JSON renderings of a variable map.

use anyhow::Result;
use clap::ValueEnum;
use envlayer_config::render_value;
use serde_json::Value;
use std::collections::BTreeMap;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `KEY=value` lines that envlayer can read back
    Dotenv,
    /// `export KEY='value'` lines for POSIX shells
    Shell,
    /// A JSON object keeping coerced types
    Json,
}

/// Render `vars` in the requested format.
pub fn format_vars(vars: &BTreeMap<String, Value>, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(vars)?,
        OutputFormat::Dotenv => vars
            .iter()
            .map(|(key, value)| format!("{}={}", key, dotenv_value(&render_value(value))))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Shell => vars
            .iter()
            .map(|(key, value)| format!("export {}={}", key, shell_quote(&render_value(value))))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(output)
}

/// Quote a value so the env-file tokenizer reads it back unchanged.
fn dotenv_value(value: &str) -> String {
    let needs_quotes = value.starts_with('"')
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace);
    if !value.contains('\n') && !needs_quotes {
        return value.to_string();
    }

    let escaped = value.replace('"', "\\\"");
    // A double-quoted value may not end in `\"`, so a trailing backslash
    // needs a block.
    if value.contains('\n') || escaped.ends_with('\\') {
        format!("\"\"\"\n{}\n\"\"\"", escaped)
    } else {
        format!("\"{}\"", escaped)
    }
}

/// Single-quote a value for POSIX shells.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use envlayer_config::parse_raw;
    use serde_json::json;

    fn vars(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_dotenv_output() {
        let output = format_vars(
            &vars(&[("B", json!("two words")), ("A", json!(1))]),
            OutputFormat::Dotenv,
        )
        .unwrap();
        assert_eq!(output, "A=1\nB=two words");
    }

    #[test]
    fn test_dotenv_output_reads_back() {
        let original = vars(&[
            ("MULTI", json!("line one\n  line \"two\"")),
            ("PADDED", json!("  padded ")),
            ("QUOTED", json!("\"already\"")),
            ("HASH", json!("a # b")),
            ("TRAILING_BACKSLASH", json!("\"a\\")),
            ("PADDED_BACKSLASH", json!(" dir\\")),
        ]);
        let output = format_vars(&original, OutputFormat::Dotenv).unwrap();
        let parsed = parse_raw(&output).into_map();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_trailing_backslash_uses_block() {
        let output =
            format_vars(&vars(&[("K", json!("\"a\\"))]), OutputFormat::Dotenv).unwrap();
        assert_eq!(output, "K=\"\"\"\n\\\"a\\\n\"\"\"");
    }

    #[test]
    fn test_shell_output_escapes_single_quotes() {
        let output = format_vars(&vars(&[("S", json!("it's"))]), OutputFormat::Shell).unwrap();
        assert_eq!(output, "export S='it'\\''s'");
    }

    #[test]
    fn test_json_output_keeps_types() {
        let output = format_vars(
            &vars(&[("PORT", json!(3000)), ("DATA", json!({"a": 1}))]),
            OutputFormat::Json,
        )
        .unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, json!({"PORT": 3000, "DATA": {"a": 1}}));
    }
}
