//! Operation index: flattens `paths` into records keyed by `operationId`.

use crate::constants;
use crate::error::{Error, OperationLocation};
use crate::spec::{bool_field, paths, str_field};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

/// Where a parameter is carried in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => constants::PARAM_LOCATION_PATH,
            Self::Query => constants::PARAM_LOCATION_QUERY,
            Self::Header => constants::PARAM_LOCATION_HEADER,
            Self::Cookie => constants::PARAM_LOCATION_COOKIE,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            constants::PARAM_LOCATION_PATH => Some(Self::Path),
            constants::PARAM_LOCATION_QUERY => Some(Self::Query),
            constants::PARAM_LOCATION_HEADER => Some(Self::Header),
            constants::PARAM_LOCATION_COOKIE => Some(Self::Cookie),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved operation or path-level parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub description: Option<String>,
    /// The parameter's `schema`, or an empty mapping when absent
    pub schema: Value,
}

impl Parameter {
    fn from_value(value: &Value) -> Result<Self, Error> {
        let name = str_field(value, constants::FIELD_NAME)
            .ok_or_else(|| Error::spec_load("Parameter is missing 'name'"))?;
        let location_str = str_field(value, constants::FIELD_IN).ok_or_else(|| {
            Error::spec_load(format!("Parameter '{name}' is missing 'in'"))
        })?;
        let location = ParameterLocation::parse(location_str).ok_or_else(|| {
            Error::spec_load(format!(
                "Parameter '{name}' has unknown location '{location_str}'"
            ))
        })?;

        Ok(Self {
            name: name.to_string(),
            location,
            required: bool_field(value, constants::FIELD_REQUIRED),
            description: str_field(value, constants::FIELD_DESCRIPTION).map(str::to_string),
            schema: value
                .get(constants::FIELD_SCHEMA)
                .cloned()
                .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
        })
    }
}

/// One method+path combination from the spec
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRecord {
    pub operation_id: String,
    /// Lowercase method key as written in the path item
    pub method: String,
    pub path: String,
    /// Parameters declared on the path item, in document order
    pub path_parameters: Vec<Parameter>,
    /// Parameters declared on the operation, in document order
    pub parameters: Vec<Parameter>,
    pub request_body: Option<Value>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// The operation mapping exactly as written
    pub raw: Value,
}

impl OperationRecord {
    #[must_use]
    pub fn location(&self) -> OperationLocation {
        OperationLocation {
            method: self.method.clone(),
            path: self.path.clone(),
        }
    }

    /// `content` mapping of the request body, if any
    #[must_use]
    pub fn request_content(&self) -> Option<&serde_json::Map<String, Value>> {
        self.request_body
            .as_ref()?
            .get(constants::FIELD_CONTENT)?
            .as_object()
    }
}

/// Operation records keyed by identifier, in document order
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationIndex {
    operations: IndexMap<String, OperationRecord>,
}

impl OperationIndex {
    /// Builds the index from a spec document.
    ///
    /// Path-level parameters are kept separately from operation-level ones so
    /// they can be listed first. Operations without an `operationId` are
    /// skipped. Parameter `$ref`s into `components.parameters` are resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The same `operationId` appears under two path/method pairs
    /// - A parameter is malformed or its reference cannot be resolved
    pub fn build(spec: &Value) -> Result<Self, Error> {
        let mut operations: IndexMap<String, OperationRecord> = IndexMap::new();
        let Some(path_map) = paths(spec) else {
            debug!(target: "oastool::operations", "Spec has no paths section");
            return Ok(Self { operations });
        };

        for (path, path_item) in path_map {
            let path_parameters = resolve_parameters(spec, path_item.get(constants::FIELD_PARAMETERS))?;

            let Some(item) = path_item.as_object() else {
                continue;
            };
            for (method, operation) in item {
                if !constants::is_http_method(method) {
                    continue;
                }
                let Some(operation_id) = str_field(operation, constants::FIELD_OPERATION_ID) else {
                    debug!(
                        target: "oastool::operations",
                        method = %method,
                        path = %path,
                        "Skipping operation without operationId"
                    );
                    continue;
                };

                let record = OperationRecord {
                    operation_id: operation_id.to_string(),
                    method: method.to_lowercase(),
                    path: path.clone(),
                    path_parameters: path_parameters.clone(),
                    parameters: resolve_parameters(spec, operation.get(constants::FIELD_PARAMETERS))?,
                    request_body: operation.get(constants::FIELD_REQUEST_BODY).cloned(),
                    tags: operation
                        .get(constants::FIELD_TAGS)
                        .and_then(Value::as_array)
                        .map(|tags| {
                            tags.iter()
                                .filter_map(Value::as_str)
                                .map(str::to_string)
                                .collect()
                        })
                        .unwrap_or_default(),
                    summary: str_field(operation, constants::FIELD_SUMMARY).map(str::to_string),
                    description: str_field(operation, constants::FIELD_DESCRIPTION)
                        .map(str::to_string),
                    raw: operation.clone(),
                };

                match operations.entry(record.operation_id.clone()) {
                    Entry::Occupied(existing) => {
                        return Err(Error::DuplicateOperationId {
                            operation_id: record.operation_id.clone(),
                            first: existing.get().location(),
                            second: record.location(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(record);
                    }
                }
            }
        }

        info!(
            target: "oastool::operations",
            count = operations.len(),
            "Indexed operations"
        );
        Ok(Self { operations })
    }

    #[must_use]
    pub fn get(&self, operation_id: &str) -> Option<&OperationRecord> {
        self.operations.get(operation_id)
    }

    #[must_use]
    pub fn contains(&self, operation_id: &str) -> bool {
        self.operations.contains_key(operation_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Records in document order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &OperationRecord)> {
        self.operations.iter()
    }

    /// Operation identifiers in document order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}

/// Parameters of `record` carried in `location`.
///
/// Path-level parameters come first since they are more likely required,
/// then operation-level parameters, each group in document order.
#[must_use]
pub fn parameters_for(record: &OperationRecord, location: ParameterLocation) -> Vec<&Parameter> {
    record
        .path_parameters
        .iter()
        .chain(record.parameters.iter())
        .filter(|param| param.location == location)
        .collect()
}

fn resolve_parameters(spec: &Value, parameters: Option<&Value>) -> Result<Vec<Parameter>, Error> {
    let Some(items) = parameters.and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .map(|item| match str_field(item, constants::FIELD_REF) {
            Some(reference) => {
                let resolved = resolve_parameter_reference(spec, reference)?;
                Parameter::from_value(resolved)
            }
            None => Parameter::from_value(item),
        })
        .collect()
}

/// Resolves a `#/components/parameters/{name}` reference to its definition
///
/// # Errors
///
/// Returns an error if:
/// - The reference format is invalid
/// - The referenced parameter doesn't exist
/// - Circular references are detected
/// - Maximum reference depth is exceeded
pub fn resolve_parameter_reference<'a>(spec: &'a Value, reference: &str) -> Result<&'a Value, Error> {
    let mut visited = HashSet::new();
    resolve_parameter_reference_with_visited(spec, reference, &mut visited, 0)
}

fn resolve_parameter_reference_with_visited<'a>(
    spec: &'a Value,
    reference: &str,
    visited: &mut HashSet<String>,
    depth: usize,
) -> Result<&'a Value, Error> {
    if depth >= constants::MAX_REFERENCE_DEPTH {
        return Err(Error::ReferenceDepthExceeded {
            reference: reference.to_string(),
            max_depth: constants::MAX_REFERENCE_DEPTH,
        });
    }

    if !visited.insert(reference.to_string()) {
        return Err(Error::CircularReference {
            reference: reference.to_string(),
        });
    }

    let param_name = reference
        .strip_prefix(constants::REF_PREFIX_PARAMETERS)
        .ok_or_else(|| {
            Error::spec_load(format!(
                "Invalid parameter reference format: '{reference}'. Expected format: {}{{name}}",
                constants::REF_PREFIX_PARAMETERS
            ))
        })?;

    let param = spec
        .get(constants::FIELD_COMPONENTS)
        .and_then(|components| components.get(constants::FIELD_PARAMETERS))
        .and_then(|params| params.get(param_name))
        .ok_or_else(|| Error::unresolved_reference(reference))?;

    // A reference pointing to another reference
    match str_field(param, constants::FIELD_REF) {
        Some(nested) => resolve_parameter_reference_with_visited(spec, nested, visited, depth + 1),
        None => Ok(param),
    }
}
