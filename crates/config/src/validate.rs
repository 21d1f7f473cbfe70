//! Validation of loaded variables.
//!
//! Responsibilities:
//! - Define the `Validator` seam the loader hands the merged mapping to.
//! - Provide `Schema`, a declarative field validator that collects every issue.
//! - Provide `Typed<T>`, a validator backed by `serde` deserialization.
//! - Render validation failures as one `<path>: <message>` line per issue.
//!
//! Does NOT handle:
//! - Loading or merging files (see the loader).
//!
//! Invariants:
//! - `Schema` accepts both coerced values and raw strings for every kind.
//! - `Schema` output only contains declared fields.
//! - Issue messages name the expected type, never the offending value.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

use crate::constants::DEFAULT_LIST_SEPARATOR;
use crate::store::render_value;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Key (or `$` for the whole mapping) the issue applies to.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Aggregate validation failure.
///
/// Displays as `Validation error:` followed by one line per issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error:")?;
        for issue in &self.issues {
            write!(f, "\n{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Validates the merged key/value mapping.
pub trait Validator {
    type Output;

    fn validate(&self, vars: &BTreeMap<String, Value>) -> Result<Self::Output, Vec<ValidationIssue>>;
}

impl<F, T> Validator for F
where
    F: Fn(&BTreeMap<String, Value>) -> Result<T, Vec<ValidationIssue>>,
{
    type Output = T;

    fn validate(&self, vars: &BTreeMap<String, Value>) -> Result<T, Vec<ValidationIssue>> {
        self(vars)
    }
}

/// Errors raised while building a schema document.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to parse schema: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate field '{0}' in schema")]
    DuplicateField(String),

    #[error("Field at index {0} has an empty name")]
    EmptyName(usize),

    #[error("Enum field '{0}' must list at least one value")]
    EmptyEnum(String),
}

/// Expected type of a schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    Url,
    Json,
    /// Text split on `separator` into an array of trimmed, non-empty strings.
    List {
        #[serde(default = "default_separator")]
        separator: String,
    },
    Enum {
        values: Vec<String>,
    },
}

fn default_separator() -> String {
    DEFAULT_LIST_SEPARATOR.to_string()
}

fn default_required() -> bool {
    true
}

impl FieldKind {
    /// A comma-separated list.
    pub fn list() -> Self {
        FieldKind::List {
            separator: default_separator(),
        }
    }

    /// One of a fixed set of strings.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldKind::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    fn check(&self, value: &Value) -> Result<Value, String> {
        match self {
            FieldKind::String => Ok(Value::String(render_value(value))),
            FieldKind::Integer => check_integer(value),
            FieldKind::Number => check_number(value),
            FieldKind::Boolean => check_boolean(value),
            FieldKind::Url => check_url(value),
            FieldKind::Json => match value {
                Value::String(text) => serde_json::from_str(text)
                    .map_err(|e| format!("Invalid JSON: {e}")),
                other => Ok(other.clone()),
            },
            FieldKind::List { separator } => Ok(split_list(value, separator)),
            FieldKind::Enum { values } => {
                let text = render_value(value);
                if values.iter().any(|allowed| *allowed == text) {
                    Ok(Value::String(text))
                } else {
                    Err(format!("Expected one of {}", values.join(", ")))
                }
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_integer(value: &Value) -> Result<Value, String> {
    match value {
        Value::Number(number) if number.is_i64() || number.is_u64() => Ok(value.clone()),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(int) = text.parse::<i64>() {
                Ok(int.into())
            } else if let Ok(uint) = text.parse::<u64>() {
                Ok(uint.into())
            } else {
                Err("Expected integer, received string".to_string())
            }
        }
        other => Err(format!("Expected integer, received {}", type_name(other))),
    }
}

fn check_number(value: &Value) -> Result<Value, String> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(int) = text.parse::<i64>() {
                return Ok(int.into());
            }
            text.parse::<f64>()
                .ok()
                .filter(|float| float.is_finite())
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| "Expected number, received string".to_string())
        }
        other => Err(format!("Expected number, received {}", type_name(other))),
    }
}

fn check_boolean(value: &Value) -> Result<Value, String> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
            "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
            _ => Err("Expected boolean, received string".to_string()),
        },
        other => Err(format!("Expected boolean, received {}", type_name(other))),
    }
}

fn check_url(value: &Value) -> Result<Value, String> {
    let Value::String(text) = value else {
        return Err(format!("Expected url, received {}", type_name(value)));
    };
    url::Url::parse(text.trim())
        .map(|_| Value::String(text.trim().to_string()))
        .map_err(|e| format!("Invalid url: {e}"))
}

fn split_list(value: &Value, separator: &str) -> Value {
    match value {
        Value::Array(_) => value.clone(),
        Value::String(text) => Value::Array(
            text.split(separator)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        ),
        other => Value::Array(vec![Value::String(render_value(other))]),
    }
}

/// One declared variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default = "default_required")]
    pub required: bool,
    /// Used when the variable is absent. A default makes `required` moot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    /// A required field of the given kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
            description: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn resolve(&self, vars: &BTreeMap<String, Value>) -> Result<Option<Value>, String> {
        match vars.get(&self.name) {
            Some(value) => self.kind.check(value).map(Some),
            None => match &self.default {
                Some(default) => self.kind.check(default).map(Some),
                None if self.required => Err("Required".to_string()),
                None => Ok(None),
            },
        }
    }
}

/// Declarative validator over named fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Add a required field.
    pub fn required(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldSpec::new(name, kind))
    }

    /// Add an optional field.
    pub fn optional(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldSpec::new(name, kind).optional())
    }

    /// Parse a JSON schema document such as
    /// `{"fields": [{"name": "PORT", "type": "integer"}]}`.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_str(text)?;
        schema.check()?;
        Ok(schema)
    }

    /// Reject duplicate or empty names and empty enums.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyName(index));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if let FieldKind::Enum { values } = &field.kind
                && values.is_empty()
            {
                return Err(SchemaError::EmptyEnum(field.name.clone()));
            }
        }
        Ok(())
    }
}

impl Validator for Schema {
    type Output = ValidatedConfig;

    fn validate(&self, vars: &BTreeMap<String, Value>) -> Result<ValidatedConfig, Vec<ValidationIssue>> {
        let mut values = BTreeMap::new();
        let mut issues = Vec::new();

        for field in &self.fields {
            match field.resolve(vars) {
                Ok(Some(value)) => {
                    values.insert(field.name.clone(), value);
                }
                Ok(None) => {}
                Err(message) => issues.push(ValidationIssue::new(&field.name, message)),
            }
        }

        if issues.is_empty() {
            Ok(ValidatedConfig { values })
        } else {
            Err(issues)
        }
    }
}

/// Typed output of a [`Schema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedConfig {
    values: BTreeMap<String, Value>,
}

impl ValidatedConfig {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.values
    }

    /// Deserialize the validated values into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(
            self.values
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ))
    }
}

/// Validator that deserializes the whole mapping into `T`.
///
/// Values are passed as stored, so numeric or boolean fields in `T` need
/// coercion to be enabled on the loader.
pub struct Typed<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Typed<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Typed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed").finish()
    }
}

impl<T: DeserializeOwned> Validator for Typed<T> {
    type Output = T;

    fn validate(&self, vars: &BTreeMap<String, Value>) -> Result<T, Vec<ValidationIssue>> {
        let object = Value::Object(
            vars.iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        );
        serde_json::from_value(object).map_err(|e| vec![ValidationIssue::new("$", e.to_string())])
    }
}
