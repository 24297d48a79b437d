//! Document rewriting: pruning operations, tags and required lists.
//!
//! Every function returns an edited copy and leaves its input untouched.

use crate::constants;
use crate::error::Error;
use crate::spec::references::{find_references, ReferenceGraph};
use crate::spec::{bool_field, paths, str_field};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

/// Which operations survive [`schema_operations`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationFilter {
    /// Drop the listed operations, keep everything else
    Remove(BTreeSet<String>),
    /// Keep only the listed operations
    Allow(BTreeSet<String>),
}

struct PathOperation {
    path: String,
    method: String,
    path_parameters: Option<Value>,
    operation: Value,
}

fn collect_operations(spec: &Value) -> Vec<(String, PathOperation)> {
    let mut found = Vec::new();
    let Some(path_map) = paths(spec) else {
        return found;
    };
    for (path, item) in path_map {
        let Some(item_map) = item.as_object() else {
            continue;
        };
        let path_parameters = item_map.get(constants::FIELD_PARAMETERS).cloned();
        for (method, operation) in item_map {
            if !constants::is_http_method(method) {
                continue;
            }
            let Some(operation_id) = str_field(operation, constants::FIELD_OPERATION_ID) else {
                continue;
            };
            found.push((
                operation_id.to_string(),
                PathOperation {
                    path: path.clone(),
                    method: method.clone(),
                    path_parameters: path_parameters.clone(),
                    operation: operation.clone(),
                },
            ));
        }
    }
    found
}

/// Reduces `spec` to a subset of its operations.
///
/// `paths` is rebuilt from the surviving operations (keeping path-level
/// parameters), models no longer reachable from them are dropped, and
/// top-level tag definitions no surviving operation uses are dropped.
///
/// # Errors
///
/// Returns `Error::SpecLoad` if the filter names operations the spec lacks.
pub fn schema_operations(spec: &Value, filter: &OperationFilter) -> Result<Value, Error> {
    let mut result = spec.clone();
    let operations = collect_operations(spec);
    let known: HashSet<&str> = operations.iter().map(|(id, _)| id.as_str()).collect();

    let requested = match filter {
        OperationFilter::Remove(ops) | OperationFilter::Allow(ops) => ops,
    };
    let missing: Vec<&str> = requested
        .iter()
        .map(String::as_str)
        .filter(|op| !known.contains(op))
        .collect();
    if !missing.is_empty() {
        return Err(Error::spec_load(format!(
            "Spec is missing operations: {}",
            missing.join(", ")
        )));
    }

    let keep = |operation_id: &str| match filter {
        OperationFilter::Remove(ops) => !ops.contains(operation_id),
        OperationFilter::Allow(ops) => ops.contains(operation_id),
    };

    let mut new_paths = Map::new();
    let mut kept_refs = BTreeSet::new();
    let mut used_tags: HashSet<String> = HashSet::new();
    for (operation_id, entry) in &operations {
        if !keep(operation_id.as_str()) {
            debug!(target: "oastool::editor", operation = %operation_id, "Removing operation");
            continue;
        }
        kept_refs.extend(find_references(&entry.operation));
        if let Some(params) = &entry.path_parameters {
            kept_refs.extend(find_references(params));
        }
        if let Some(tags) = entry.operation.get(constants::FIELD_TAGS).and_then(Value::as_array) {
            used_tags.extend(tags.iter().filter_map(Value::as_str).map(str::to_string));
        }

        let item = new_paths
            .entry(entry.path.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(item_map) = item {
            if let Some(params) = &entry.path_parameters {
                item_map
                    .entry(constants::FIELD_PARAMETERS)
                    .or_insert_with(|| params.clone());
            }
            item_map.insert(entry.method.clone(), entry.operation.clone());
        }
    }

    if let Value::Object(root) = &mut result {
        root.insert(constants::FIELD_PATHS.to_string(), Value::Object(new_paths));
    }

    let graph = ReferenceGraph::from_spec(spec);
    let reachable: Vec<&String> = kept_refs.iter().collect();
    let mut used_models = graph.unroll(&reachable);
    used_models.extend(kept_refs);
    if let Some(schemas) = result
        .get_mut(constants::FIELD_COMPONENTS)
        .and_then(|c| c.get_mut(constants::FIELD_SCHEMAS))
        .and_then(Value::as_object_mut)
    {
        let before = schemas.len();
        schemas.retain(|name, _| used_models.contains(name));
        debug!(
            target: "oastool::editor",
            removed = before - schemas.len(),
            "Removed unused models"
        );
    }

    if let Value::Object(root) = &mut result {
        if let Some(Value::Array(tag_defs)) = root.get_mut(constants::FIELD_TAGS) {
            tag_defs.retain(|tag| {
                str_field(tag, constants::FIELD_NAME).is_some_and(|name| used_tags.contains(name))
            });
            if tag_defs.is_empty() {
                root.shift_remove(constants::FIELD_TAGS);
            }
        }
    }

    info!(
        target: "oastool::editor",
        operations = operations.iter().filter(|(id, _)| keep(id.as_str())).count(),
        "Pruned spec"
    );
    Ok(result)
}

/// Removes operation tags and the top-level tag definitions
#[must_use]
pub fn remove_schema_tags(spec: &Value) -> Value {
    let mut result = spec.clone();

    // Only operation mappings carry tags; a model property may be named "tags"
    if let Some(path_map) = result
        .get_mut(constants::FIELD_PATHS)
        .and_then(Value::as_object_mut)
    {
        for item in path_map.values_mut() {
            let Some(item_map) = item.as_object_mut() else {
                continue;
            };
            for (method, operation) in item_map.iter_mut() {
                if !constants::is_http_method(method) {
                    continue;
                }
                if let Some(op) = operation.as_object_mut() {
                    op.shift_remove(constants::FIELD_TAGS);
                }
            }
        }
    }

    if let Some(root) = result.as_object_mut() {
        root.shift_remove(constants::FIELD_TAGS);
    }
    result
}

/// Drops nullable properties from each model's `required` list.
///
/// A `required` list left empty is removed.
#[must_use]
pub fn set_nullable_not_required(spec: &Value) -> Value {
    let mut result = spec.clone();
    let Some(schemas) = result
        .get_mut(constants::FIELD_COMPONENTS)
        .and_then(|c| c.get_mut(constants::FIELD_SCHEMAS))
        .and_then(Value::as_object_mut)
    else {
        return result;
    };

    for model in schemas.values_mut() {
        let Some(model_map) = model.as_object_mut() else {
            continue;
        };
        let Some(Value::Array(required)) = model_map.get(constants::FIELD_REQUIRED) else {
            continue;
        };
        let properties = model_map.get(constants::FIELD_PROPERTIES);
        let kept: Vec<Value> = required
            .iter()
            .filter(|name| {
                let nullable = name
                    .as_str()
                    .and_then(|n| properties.and_then(|p| p.get(n)))
                    .is_some_and(|prop| bool_field(prop, constants::FIELD_NULLABLE));
                !nullable
            })
            .cloned()
            .collect();
        if kept.is_empty() {
            model_map.shift_remove(constants::FIELD_REQUIRED);
        } else {
            model_map.insert(constants::FIELD_REQUIRED.to_string(), Value::Array(kept));
        }
    }
    result
}

/// Operations whose references touch `model` or any model that transitively uses it
#[must_use]
pub fn operations_using_model(spec: &Value, model: &str) -> Vec<String> {
    let graph = ReferenceGraph::from_spec(spec);
    let mut targets = graph.reverse_closure(model);
    targets.insert(model.to_string());

    collect_operations(spec)
        .into_iter()
        .filter(|(_, entry)| {
            find_references(&entry.operation)
                .iter()
                .any(|name| targets.contains(name))
        })
        .map(|(operation_id, _)| operation_id)
        .collect()
}

/// Models an operation references, directly or through other models
///
/// # Errors
///
/// Returns `Error::SpecLoad` if `operation_id` is not in the spec.
pub fn models_used_by_operation(spec: &Value, operation_id: &str) -> Result<BTreeSet<String>, Error> {
    let (_, entry) = collect_operations(spec)
        .into_iter()
        .find(|(id, _)| id == operation_id)
        .ok_or_else(|| Error::spec_load(format!("Spec is missing operations: {operation_id}")))?;

    let direct = find_references(&entry.operation);
    let start: Vec<&String> = direct.iter().collect();
    let mut used = ReferenceGraph::from_spec(spec).unroll(&start);
    used.extend(direct);
    Ok(used)
}
