//! Value normalization and optional type coercion.
//!
//! Responsibilities:
//! - Strip triple-quote and double-quote wrappers, unescaping `\"`.
//! - Trim unquoted values.
//! - Coerce normalized strings into JSON, boolean, null or numeric values.
//!
//! Does NOT handle:
//! - Splitting values into lists (a schema concern, see validate.rs).
//!
//! Invariants:
//! - Coercion never fails; anything unrecognized stays a string.
//! - Numbers are only produced for finite values that parse in full.

use crate::constants::{DOUBLE_QUOTE, TRIPLE_QUOTE};
use serde_json::{Number, Value};

/// Replace every escaped double quote (`\"`) with a bare one.
pub(crate) fn unescape_quotes(value: &str) -> String {
    value.replace("\\\"", "\"")
}

fn strip_triple(value: &str) -> Option<&str> {
    if value.len() < TRIPLE_QUOTE.len() * 2 {
        return None;
    }
    value.strip_prefix(TRIPLE_QUOTE)?.strip_suffix(TRIPLE_QUOTE)
}

fn strip_double(value: &str) -> Option<&str> {
    if value.len() < 2 || value.ends_with("\\\"") {
        return None;
    }
    value
        .strip_prefix(DOUBLE_QUOTE)?
        .strip_suffix(DOUBLE_QUOTE)
}

/// Map a raw assembled value to its final string form.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(inner) = strip_triple(trimmed) {
        return unescape_quotes(inner);
    }
    if let Some(inner) = strip_double(trimmed) {
        return unescape_quotes(inner);
    }
    trimmed.to_string()
}

fn parse_number(value: &str) -> Option<Number> {
    if let Ok(int) = value.parse::<i64>() {
        return Some(int.into());
    }
    if let Ok(uint) = value.parse::<u64>() {
        return Some(uint.into());
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|float| float.is_finite())
        .and_then(Number::from_f64)
}

/// Convert a normalized string into the richest value it spells.
///
/// Checked in order: JSON object or array, `true`/`false`, `null`
/// (all case-insensitive), finite number. Anything else, including JSON
/// that fails to parse, is returned as the original string.
pub fn coerce(value: &str) -> Value {
    let trimmed = value.trim();

    if (trimmed.starts_with('{') || trimmed.starts_with('['))
        && let Ok(parsed) = serde_json::from_str::<Value>(trimmed)
    {
        return parsed;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if trimmed.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if let Some(number) = parse_number(trimmed) {
        return Value::Number(number);
    }

    Value::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_trims_plain_values() {
        assert_eq!(normalize("  value  "), "value");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_strips_double_quotes_and_unescapes() {
        assert_eq!(normalize("\"hello world\""), "hello world");
        assert_eq!(normalize(" \"say \\\"hi\\\"\" "), "say \"hi\"");
        assert_eq!(normalize("\"\""), "");
    }

    #[test]
    fn test_normalize_keeps_unterminated_quote() {
        assert_eq!(normalize("\"open"), "\"open");
        assert_eq!(normalize("\""), "\"");
        assert_eq!(normalize("\"escaped end\\\""), "\"escaped end\\\"");
    }

    #[test]
    fn test_normalize_strips_triple_quotes_preserving_newlines() {
        assert_eq!(normalize("\"\"\"a\nb\"\"\""), "a\nb");
        assert_eq!(normalize("\"\"\"\"\"\""), "");
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce("3000"), json!(3000));
        assert_eq!(coerce("-12"), json!(-12));
        assert_eq!(coerce("2.5"), json!(2.5));
        assert_eq!(coerce("18446744073709551615"), json!(18446744073709551615u64));
        assert_eq!(coerce(" 42 "), json!(42));
    }

    #[test]
    fn test_coerce_rejects_non_finite_numbers() {
        assert_eq!(coerce("inf"), json!("inf"));
        assert_eq!(coerce("NaN"), json!("NaN"));
        assert_eq!(coerce("1e400"), json!("1e400"));
    }

    #[test]
    fn test_coerce_empty_string_stays_string() {
        assert_eq!(coerce(""), json!(""));
    }

    #[test]
    fn test_coerce_booleans_and_null_case_insensitive() {
        assert_eq!(coerce("true"), json!(true));
        assert_eq!(coerce("FALSE"), json!(false));
        assert_eq!(coerce("Null"), Value::Null);
    }

    #[test]
    fn test_coerce_json_structures() {
        assert_eq!(coerce("{\"a\":1}"), json!({"a": 1}));
        assert_eq!(coerce("[1, \"two\"]"), json!([1, "two"]));
    }

    #[test]
    fn test_coerce_malformed_json_falls_back_to_string() {
        assert_eq!(coerce("{a: }"), json!("{a: }"));
        assert_eq!(coerce("[1,"), json!("[1,"));
    }

    #[test]
    fn test_coerce_does_not_split_lists() {
        assert_eq!(coerce("a,b,c"), json!("a,b,c"));
        assert_eq!(coerce("1,2"), json!("1,2"));
    }
}
