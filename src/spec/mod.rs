//! `OpenAPI` document handling
//!
//! Documents are kept as order-preserving `serde_json::Value` trees. The
//! submodules index operations, build the model reference graph, answer
//! path and tag lookups, diff two documents and rewrite a document down to a
//! subset of its operations.

use crate::constants;
use serde_json::{Map, Value};

pub mod diff;
pub mod editor;
pub mod loader;
pub mod operations;
pub mod query;
pub mod references;

pub use diff::{count_values, find_diffs, DiffChange, DiffEntry, PathSegment};
pub use loader::{load_document, parse_document};
pub use operations::{OperationIndex, OperationRecord, Parameter, ParameterLocation};
pub use query::{find_paths, operations_by_tag, path_operations, summarize, SpecSummary};
pub use references::{filter_models, find_references, ReferenceGraph};

/// Models defined under `components.schemas`, if any
#[must_use]
pub fn models(spec: &Value) -> Option<&Map<String, Value>> {
    spec.get(constants::FIELD_COMPONENTS)?
        .get(constants::FIELD_SCHEMAS)?
        .as_object()
}

/// The `paths` mapping, if any
#[must_use]
pub fn paths(spec: &Value) -> Option<&Map<String, Value>> {
    spec.get(constants::FIELD_PATHS)?.as_object()
}

/// URL of the first server entry, or an empty string
#[must_use]
pub fn default_host(spec: &Value) -> String {
    spec.get(constants::FIELD_SERVERS)
        .and_then(Value::as_array)
        .and_then(|servers| servers.first())
        .and_then(|server| server.get(constants::FIELD_URL))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// String field of a mapping
#[must_use]
pub fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}

/// Boolean field of a mapping, treating absence as `false`
#[must_use]
pub fn bool_field(value: &Value, field: &str) -> bool {
    value.get(field).and_then(Value::as_bool).unwrap_or(false)
}
