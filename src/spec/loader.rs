//! Reads YAML or JSON documents into order-preserving value trees.

use crate::constants;
use crate::error::Error;
use serde_json::{Map, Number, Value};
use std::path::Path;
use tracing::debug;

/// Properties that should be boolean but are sometimes authored as 0/1
const BOOLEAN_PROPERTIES: &[&str] = &[
    constants::FIELD_REQUIRED,
    constants::FIELD_READ_ONLY,
    constants::FIELD_NULLABLE,
    "deprecated",
    "writeOnly",
    "uniqueItems",
    "allowEmptyValue",
    "explode",
    "allowReserved",
];

/// Rewrites `readOnly: 1` style flags to real booleans.
///
/// Only integer `0`/`1` values under a flag key change; other numbers and
/// text inside strings are left alone.
fn fix_numeric_booleans(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, item) in map.iter_mut() {
                if BOOLEAN_PROPERTIES.contains(&key.as_str()) {
                    match item.as_u64() {
                        Some(0) => *item = Value::Bool(false),
                        Some(1) => *item = Value::Bool(true),
                        _ => fix_numeric_booleans(item),
                    }
                } else {
                    fix_numeric_booleans(item);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(fix_numeric_booleans),
        _ => {}
    }
}

/// Parses a YAML or JSON document into an order-preserving value tree.
///
/// Mapping keys keep their document order, which every downstream output
/// relies on. Non-string YAML keys (such as unquoted `200:` response codes)
/// become their string form.
///
/// # Errors
///
/// Returns `Error::SpecLoad` if the content is neither valid YAML nor JSON,
/// or if the top level is not a mapping.
pub fn parse_document(content: &str) -> Result<Value, Error> {
    let mut value = if content.trim_start().starts_with('{') {
        match serde_json::from_str::<Value>(content) {
            Ok(value) => value,
            Err(json_err) => serde_yaml::from_str::<serde_yaml::Value>(content)
                .map_err(|_| Error::spec_load(format!("Failed to parse document as JSON: {json_err}")))
                .and_then(yaml_to_json)?,
        }
    } else {
        let yaml = serde_yaml::from_str::<serde_yaml::Value>(content)
            .map_err(|e| Error::spec_load(format!("Failed to parse document as YAML: {e}")))?;
        yaml_to_json(yaml)?
    };

    if !value.is_object() {
        return Err(Error::spec_load("Document root must be a mapping"));
    }
    fix_numeric_booleans(&mut value);
    Ok(value)
}

/// Reads and parses a document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<Value, Error> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Io(e).with_context(&format!("Failed to read {}", path.display())))?;
    debug!(
        target: "oastool::loader",
        path = %path.display(),
        bytes = content.len(),
        "Loaded document"
    );
    parse_document(&content)
}

fn yaml_key_to_string(key: serde_yaml::Value) -> Result<String, Error> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key_to_string(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => {
            Err(Error::spec_load("Mapping keys must be scalar values"))
        }
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, Error> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| Error::spec_load(format!("Unsupported number '{n}'")))?
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, item) in mapping {
                map.insert(yaml_key_to_string(key)?, yaml_to_json(item)?);
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}
