//! Integration tests for env loading through the public API.
//!
//! These tests exercise whole load sessions against files on disk, covering
//! the observable contract: layering order, profiles, coercion, and
//! validation failures.

use std::fs;
use std::path::Path;

use envlayer_config::{
    EnvLoader, EnvStore, FieldKind, LoadError, MemoryStore, ProcessEnv, Schema, parse,
    parse_raw,
};
use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// Base file, local overrides, then two profiles.
#[test]
#[serial]
fn test_full_layering_session() {
    let temp_dir = TempDir::new().unwrap();
    let base = write(
        temp_dir.path(),
        ".env",
        "\
# application defaults
APP_NAME=demo
PORT=3000
PROFILES=dev,local
BANNER=\"\"\"
Welcome!
# not a comment
\"\"\"
",
    );
    let overrides = write(temp_dir.path(), ".env.overrides", "PORT=4000\n");
    write(temp_dir.path(), ".env.dev", "PORT=5000\nDEBUG=true\n");
    write(temp_dir.path(), ".env.local", "APP_NAME=demo-local\n");

    temp_env::with_var_unset("PROFILES", || {
        let mut store = MemoryStore::new();
        let report = EnvLoader::new()
            .with_paths([&base, &overrides])
            .with_profile_prefix(&base)
            .with_coercion(true)
            .load(&mut store)
            .unwrap();

        assert_eq!(report.files_loaded.len(), 4);
        assert_eq!(report.profiles, vec!["dev", "local"]);
        assert_eq!(store.get("APP_NAME"), Some(json!("demo-local")));
        assert_eq!(store.get("PORT"), Some(json!(5000)));
        assert_eq!(store.get("DEBUG"), Some(json!(true)));
        assert_eq!(store.get("BANNER"), Some(json!("Welcome!\n# not a comment")));
    });
}

#[test]
fn test_round_trip_of_simple_value() {
    assert_eq!(parse_raw("KEY=value").get_str("KEY"), Some("value"));
}

#[test]
fn test_coercion_of_common_values() {
    let result = parse("PORT=3000\nFLAG=true\nDATA={\"a\":1}\nS=hello\nBAD={a: }", true);
    assert_eq!(result.get("PORT"), Some(&json!(3000)));
    assert_eq!(result.get("FLAG"), Some(&json!(true)));
    assert_eq!(result.get("DATA"), Some(&json!({"a": 1})));
    assert_eq!(result.get("S"), Some(&json!("hello")));
    assert_eq!(result.get("BAD"), Some(&json!("{a: }")));
}

#[test]
#[serial]
fn test_validation_error_is_fatal_and_lists_missing_key() {
    let temp_dir = TempDir::new().unwrap();
    let env = write(temp_dir.path(), ".env", "A=1\n");
    let schema = Schema::new()
        .required("A", FieldKind::Integer)
        .required("B", FieldKind::String);

    temp_env::with_var_unset("PROFILES", || {
        let mut store = MemoryStore::new();
        let err = EnvLoader::new()
            .with_path(&env)
            .load_and_validate(&mut store, &schema)
            .unwrap_err();

        assert!(matches!(err, LoadError::Validation(_)));
        assert!(err.to_string().lines().any(|line| line.starts_with("B:")));
    });
}

#[test]
#[serial]
fn test_process_env_store_receives_loaded_values() {
    let temp_dir = TempDir::new().unwrap();
    let env = write(
        temp_dir.path(),
        ".env",
        "_ENVLAYER_IT_PORT=8080\n_ENVLAYER_IT_JSON={\"a\":1}\n",
    );

    temp_env::with_vars(
        [
            ("PROFILES", None::<&str>),
            ("_ENVLAYER_IT_PORT", None),
            ("_ENVLAYER_IT_JSON", None),
        ],
        || {
            let mut store = ProcessEnv;
            EnvLoader::new()
                .with_path(&env)
                .with_coercion(true)
                .load(&mut store)
                .unwrap();

            assert_eq!(std::env::var("_ENVLAYER_IT_PORT").as_deref(), Ok("8080"));
            assert_eq!(
                std::env::var("_ENVLAYER_IT_JSON").as_deref(),
                Ok("{\"a\":1}")
            );
        },
    );
}

#[test]
#[serial]
fn test_ambient_profile_selector_is_used_when_store_has_none() {
    let temp_dir = TempDir::new().unwrap();
    let base = write(temp_dir.path(), ".env", "ENV=base\n");
    write(temp_dir.path(), ".env.ci", "ENV=ci\n");

    temp_env::with_var("PROFILES", Some("ci"), || {
        let mut store = MemoryStore::new();
        EnvLoader::new()
            .with_path(&base)
            .with_profile_prefix(&base)
            .load(&mut store)
            .unwrap();
        assert_eq!(store.get("ENV"), Some(json!("ci")));
    });
}
