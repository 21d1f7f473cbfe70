//! Parse-with-coercion tests.
//!
//! Responsibilities:
//! - Test that coercion is opt-in per parse.
//! - Test typed results for numbers, booleans, null and JSON.
//! - Test the string fallback for malformed JSON.

use serde_json::{Value, json};

use crate::loader::parse::parse;

#[test]
fn test_coercion_disabled_keeps_strings() {
    let result = parse("PORT=3000\nFLAG=true\nDATA={\"a\":1}", false);
    assert_eq!(result.get("PORT"), Some(&json!("3000")));
    assert_eq!(result.get("FLAG"), Some(&json!("true")));
    assert_eq!(result.get("DATA"), Some(&json!("{\"a\":1}")));
}

#[test]
fn test_coercion_produces_typed_values() {
    let result = parse(
        "PORT=3000\nFLAG=true\nDATA={\"a\":1}\nS=hello\nNOTHING=null\nRATIO=0.25",
        true,
    );
    assert_eq!(result.get("PORT"), Some(&json!(3000)));
    assert_eq!(result.get("FLAG"), Some(&json!(true)));
    assert_eq!(result.get("DATA"), Some(&json!({"a": 1})));
    assert_eq!(result.get("S"), Some(&json!("hello")));
    assert_eq!(result.get("NOTHING"), Some(&Value::Null));
    assert_eq!(result.get("RATIO"), Some(&json!(0.25)));
}

#[test]
fn test_coercion_malformed_json_falls_back_to_string() {
    let result = parse("BAD={a: }", true);
    assert_eq!(result.get("BAD"), Some(&json!("{a: }")));
}

#[test]
fn test_coercion_applies_after_quote_stripping() {
    let result = parse("QUOTED=\"42\"\nLIST=\"[1,2]\"", true);
    assert_eq!(result.get("QUOTED"), Some(&json!(42)));
    assert_eq!(result.get("LIST"), Some(&json!([1, 2])));
}

#[test]
fn test_coercion_of_multiline_json_block() {
    let content = "CONFIG=\"\"\"\n{\n  \"retries\": 3,\n  \"hosts\": [\"a\", \"b\"]\n}\n\"\"\"";
    let result = parse(content, true);
    assert_eq!(
        result.get("CONFIG"),
        Some(&json!({"retries": 3, "hosts": ["a", "b"]}))
    );
}

#[test]
fn test_coercion_leaves_comma_separated_values_alone() {
    let result = parse("HOSTS=a,b,c", true);
    assert_eq!(result.get("HOSTS"), Some(&json!("a,b,c")));
}
