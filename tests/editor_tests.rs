mod common;

use common::load_fixture;
use oastool::error::Error;
use oastool::spec::editor::{
    models_used_by_operation, operations_using_model, remove_schema_tags, schema_operations,
    set_nullable_not_required, OperationFilter,
};
use oastool::spec::OperationIndex;
use serde_json::json;
use std::collections::BTreeSet;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(ToString::to_string).collect()
}

#[test]
fn test_allow_list_prunes_paths_models_and_tags() {
    let spec = load_fixture("petstore.yaml");
    let pruned = schema_operations(&spec, &OperationFilter::Allow(set(&["getPet"]))).unwrap();

    let paths: Vec<&String> = pruned["paths"].as_object().unwrap().keys().collect();
    assert_eq!(paths, vec!["/pets/{petId}"]);

    let models: Vec<&String> = pruned["components"]["schemas"].as_object().unwrap().keys().collect();
    assert_eq!(models, vec!["Pet", "Category"]);
    assert_eq!(pruned["tags"], json!([{"name": "pets"}]));

    // The result still indexes cleanly and keeps the path-level parameter
    let index = OperationIndex::build(&pruned).unwrap();
    assert_eq!(index.ids().collect::<Vec<_>>(), vec!["getPet"]);
    assert_eq!(index.get("getPet").unwrap().path_parameters.len(), 1);
}

#[test]
fn test_remove_list_keeps_unrelated_sections() {
    let spec = load_fixture("petstore.yaml");
    let pruned =
        schema_operations(&spec, &OperationFilter::Remove(set(&["listOwners"]))).unwrap();

    assert!(pruned["paths"].get("/owners").is_none());
    assert!(pruned["components"]["schemas"].get("Owner").is_none());
    assert!(pruned["components"]["schemas"].get("NewPet").is_some());
    assert_eq!(pruned["info"], spec["info"]);
    assert_eq!(pruned["components"]["parameters"], spec["components"]["parameters"]);
}

#[test]
fn test_unknown_operation_is_rejected() {
    let spec = load_fixture("petstore.yaml");
    match schema_operations(&spec, &OperationFilter::Allow(set(&["getPet", "ghost"]))) {
        Err(Error::SpecLoad(msg)) => assert_eq!(msg, "Spec is missing operations: ghost"),
        other => panic!("Expected SpecLoad, got {other:?}"),
    }
}

#[test]
fn test_input_is_left_untouched() {
    let spec = load_fixture("petstore.yaml");
    let before = spec.clone();
    let _ = schema_operations(&spec, &OperationFilter::Allow(set(&["getPet"]))).unwrap();
    let _ = remove_schema_tags(&spec);
    let _ = set_nullable_not_required(&spec);
    assert_eq!(spec, before);
}

#[test]
fn test_remove_schema_tags_keeps_model_properties_named_tags() {
    let spec = json!({
        "tags": [{"name": "pets"}],
        "paths": {"/pets": {"get": {"operationId": "listPets", "tags": ["pets"]}}},
        "components": {"schemas": {"Pet": {"properties": {"tags": {"type": "string"}}}}}
    });
    let cleaned = remove_schema_tags(&spec);
    assert!(cleaned.get("tags").is_none());
    assert!(cleaned["paths"]["/pets"]["get"].get("tags").is_none());
    assert!(cleaned["components"]["schemas"]["Pet"]["properties"].get("tags").is_some());
}

#[test]
fn test_set_nullable_not_required_drops_empty_lists() {
    let spec = json!({"components": {"schemas": {
        "Pet": {
            "required": ["name", "tag"],
            "properties": {"name": {"type": "string"}, "tag": {"type": "string", "nullable": true}}
        },
        "Note": {
            "required": ["text"],
            "properties": {"text": {"type": "string", "nullable": true}}
        }
    }}});
    let updated = set_nullable_not_required(&spec);
    assert_eq!(updated["components"]["schemas"]["Pet"]["required"], json!(["name"]));
    assert!(updated["components"]["schemas"]["Note"].get("required").is_none());
}

#[test]
fn test_operations_using_model() {
    let spec = load_fixture("petstore.yaml");
    assert_eq!(
        operations_using_model(&spec, "Category"),
        vec!["listPets", "getPet", "listOwners"]
    );
    assert_eq!(operations_using_model(&spec, "NewPet"), vec!["createPet"]);
}

#[test]
fn test_models_used_by_operation() {
    let spec = load_fixture("petstore.yaml");
    assert_eq!(
        models_used_by_operation(&spec, "listOwners").unwrap(),
        set(&["Category", "Owner", "Pet"])
    );
    assert!(models_used_by_operation(&spec, "deletePet").unwrap().is_empty());
}
