//! Read-only lookups over `paths` and operation tags.

use crate::constants;
use crate::spec::{models, paths, str_field, OperationIndex};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// True when `path` equals `search` or, with `sub_paths`, lies beneath it.
///
/// Sub-paths are matched on segment boundaries, so `/pets` covers
/// `/pets/{petId}` but not `/petsitters`.
fn path_matches(path: &str, search: &str, sub_paths: bool) -> bool {
    if path == search {
        return true;
    }
    if !sub_paths {
        return false;
    }
    let base = search.trim_end_matches('/');
    path.strip_prefix(base)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Path items whose template matches `search`, in document order.
///
/// Without a search term every path item is returned.
#[must_use]
pub fn find_paths(spec: &Value, search: Option<&str>, sub_paths: bool) -> Map<String, Value> {
    let Some(all) = paths(spec) else {
        return Map::new();
    };
    all.iter()
        .filter(|(path, _)| search.map_or(true, |term| path_matches(path, term, sub_paths)))
        .map(|(path, item)| (path.clone(), item.clone()))
        .collect()
}

/// Operation ids declared under each matching path, in document order.
///
/// Paths without any identified operation are left out.
#[must_use]
pub fn path_operations(spec: &Value, search: &str, sub_paths: bool) -> IndexMap<String, Vec<String>> {
    let mut result = IndexMap::new();
    for (path, item) in find_paths(spec, Some(search), sub_paths) {
        let Some(methods) = item.as_object() else {
            continue;
        };
        let ids: Vec<String> = methods
            .iter()
            .filter(|(key, _)| constants::is_http_method(key))
            .filter_map(|(_, operation)| str_field(operation, constants::FIELD_OPERATION_ID))
            .map(str::to_string)
            .collect();
        if !ids.is_empty() {
            result.insert(path, ids);
        }
    }
    result
}

/// Tag name to the operations carrying it.
///
/// Tags are sorted by name; operations keep document order. Tags come from
/// the operations rather than the top-level `tags` list, which many documents
/// omit.
#[must_use]
pub fn operations_by_tag(index: &OperationIndex) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (operation_id, record) in index.iter() {
        for tag in &record.tags {
            grouped
                .entry(tag.clone())
                .or_default()
                .push(operation_id.clone());
        }
    }
    grouped
}

/// Counts describing the overall shape of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpecSummary {
    pub models: usize,
    pub paths: usize,
    pub operations: usize,
    /// Operations per method; methods that never appear are left out
    pub methods: IndexMap<String, usize>,
    /// Operations per tag, in order of first use
    pub tags: IndexMap<String, usize>,
}

/// Summarizes `spec` without requiring unique operation ids
#[must_use]
pub fn summarize(spec: &Value) -> SpecSummary {
    let mut summary = SpecSummary {
        models: models(spec).map_or(0, Map::len),
        ..SpecSummary::default()
    };
    let mut method_counts: IndexMap<&str, usize> =
        constants::HTTP_METHODS.iter().map(|m| (*m, 0)).collect();

    for item in paths(spec).into_iter().flat_map(Map::values) {
        summary.paths += 1;
        let Some(item) = item.as_object() else {
            continue;
        };
        for (method, operation) in item {
            let Some(count) = method_counts.get_mut(method.to_ascii_lowercase().as_str()) else {
                continue;
            };
            *count += 1;
            summary.operations += 1;
            let tags = operation
                .get(constants::FIELD_TAGS)
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(Value::as_str);
            for tag in tags {
                *summary.tags.entry(tag.to_string()).or_default() += 1;
            }
        }
    }

    summary.methods = method_counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(method, count)| (method.to_string(), count))
        .collect();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> Value {
        json!({
            "paths": {
                "/pets": {"get": {"operationId": "listPets", "tags": ["pets"]}},
                "/pets/{petId}": {
                    "parameters": [],
                    "get": {"operationId": "getPet", "tags": ["pets"]},
                    "delete": {"operationId": "deletePet", "tags": ["pets", "admin"]}
                },
                "/petsitters": {"get": {"operationId": "listSitters"}},
                "/health": {"get": {}}
            },
            "components": {"schemas": {"Pet": {}, "Sitter": {}}}
        })
    }

    fn keys(found: &Map<String, Value>) -> Vec<&str> {
        found.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_find_paths_exact_and_sub_paths() {
        let spec = spec();
        assert_eq!(keys(&find_paths(&spec, Some("/pets"), false)), vec!["/pets"]);
        assert_eq!(
            keys(&find_paths(&spec, Some("/pets"), true)),
            vec!["/pets", "/pets/{petId}"]
        );
        assert_eq!(
            keys(&find_paths(&spec, Some("/pets/"), true)),
            vec!["/pets/{petId}"]
        );
        assert!(find_paths(&spec, Some("/nope"), true).is_empty());
        assert_eq!(find_paths(&spec, None, false).len(), 4);
    }

    #[test]
    fn test_path_operations_skips_unidentified() {
        let spec = spec();
        let ops = path_operations(&spec, "/pets", true);
        assert_eq!(ops["/pets"], vec!["listPets"]);
        assert_eq!(ops["/pets/{petId}"], vec!["getPet", "deletePet"]);
        assert!(path_operations(&spec, "/health", false).is_empty());
    }

    #[test]
    fn test_operations_by_tag() {
        let index = OperationIndex::build(&spec()).unwrap();
        let grouped = operations_by_tag(&index);
        let tags: Vec<&String> = grouped.keys().collect();
        assert_eq!(tags, vec!["admin", "pets"]);
        assert_eq!(grouped["pets"], vec!["listPets", "getPet", "deletePet"]);
        assert_eq!(grouped["admin"], vec!["deletePet"]);
    }

    #[test]
    fn test_summarize_counts() {
        let summary = summarize(&spec());
        assert_eq!(summary.models, 2);
        assert_eq!(summary.paths, 4);
        assert_eq!(summary.operations, 5);
        assert_eq!(summary.methods.get("get"), Some(&4));
        assert_eq!(summary.methods.get("delete"), Some(&1));
        assert!(!summary.methods.contains_key("post"));
        let tags: Vec<&String> = summary.tags.keys().collect();
        assert_eq!(tags, vec!["pets", "admin"]);
        assert_eq!(summary.tags["pets"], 3);
        assert_eq!(summary.tags["admin"], 1);
    }

    #[test]
    fn test_summarize_empty_document() {
        assert_eq!(summarize(&json!({})), SpecSummary::default());
    }
}
