//! Evaluated configuration YAML loading
//!
//! YAML is converted to a canonical `serde_json::Value` before building a
//! snapshot: mappings become key-ordered objects and tags are dropped.
//! Non-string mapping keys are rendered to text behind their core schema
//! tag (`1` becomes `!!int 1`), so they never coincide with a string key.
//! Two definitions are then equal exactly when their canonical values are
//! equal.

use crate::errors::{io_error, yaml_parse, Result};
use evgverify_core::model::ConfigSnapshot;
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;

/// Parse evaluated configuration text into a snapshot.
///
/// An empty document yields an empty snapshot. Merge keys (`<<`) are
/// resolved before conversion.
///
/// # Errors
///
/// - `ERR_YAML_PARSE` if the text is not valid YAML
/// - `ERR_INVALID_SNAPSHOT` / `ERR_MISSING_FIELD` if the document does not
///   have the shape of a project configuration
pub fn parse_snapshot_str(content: &str) -> Result<ConfigSnapshot> {
    if content.trim().is_empty() {
        return Ok(ConfigSnapshot::default());
    }
    let mut value: serde_yaml::Value = serde_yaml::from_str(content).map_err(yaml_parse)?;
    value.apply_merge().map_err(yaml_parse)?;
    Ok(ConfigSnapshot::from_value(to_canonical(value))?)
}

/// Read and parse an evaluated configuration file.
///
/// # Errors
///
/// `ERR_NOT_FOUND` / `ERR_IO` if the file cannot be read, otherwise as
/// [`parse_snapshot_str`].
pub fn load_snapshot_file(path: &Path) -> Result<ConfigSnapshot> {
    let content = fs::read_to_string(path).map_err(|e| {
        let message = format!("Failed to read {}: {}", path.display(), e);
        io_error("read_config", e).with_message(message)
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Read evaluated configuration.");
    parse_snapshot_str(&content)
}

/// Convert a YAML value to its canonical JSON form
pub fn to_canonical(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => canonical_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(to_canonical).collect())
        }
        serde_yaml::Value::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(k, v)| (key_text(k), to_canonical(v)))
                .collect::<Map<String, Value>>(),
        ),
        serde_yaml::Value::Tagged(tagged) => to_canonical(tagged.value),
    }
}

fn canonical_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        // NaN and infinities have no JSON number form
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(n.to_string()))
    }
}

/// Text of a mapping key.
///
/// String keys are kept as they are unless they start with `!!`, which is
/// reserved for the tagged rendering of every other key kind.
fn key_text(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) if s.starts_with(TAG_PREFIX) => format!("!!str {}", s),
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => "!!null".to_string(),
        serde_yaml::Value::Bool(b) => format!("!!bool {}", b),
        serde_yaml::Value::Number(n) if n.is_f64() => format!("!!float {}", n),
        serde_yaml::Value::Number(n) => format!("!!int {}", n),
        serde_yaml::Value::Tagged(tagged) => key_text(tagged.value),
        serde_yaml::Value::Sequence(items) => {
            format!("!!seq {}", to_canonical(serde_yaml::Value::Sequence(items)))
        }
        serde_yaml::Value::Mapping(mapping) => {
            format!("!!map {}", to_canonical(serde_yaml::Value::Mapping(mapping)))
        }
    }
}

const TAG_PREFIX: &str = "!!";
