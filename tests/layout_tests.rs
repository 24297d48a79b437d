mod common;

use common::{fixture, load_fixture};
use oastool::error::Error;
use oastool::layout::{self, check_layout, load_layout, parse_tree, validate};
use oastool::spec::OperationIndex;
use serde_json::json;

#[test]
fn test_load_fixture_tree() {
    let tree = load_layout(&fixture("layout.yaml"), "main").unwrap();
    assert_eq!(tree.identifier, "main");
    assert_eq!(tree.description, "Pet store CLI");

    let groups: Vec<&str> = tree.subcommands(false).iter().map(|n| n.command.as_str()).collect();
    assert_eq!(groups, vec!["owners", "pets"]);

    let get = tree.find(&["pets", "get"]).unwrap();
    assert!(get.is_leaf());
    assert_eq!(get.identifier, "getPet");
    assert_eq!(get.summary_fields, vec!["name", "category"]);
    assert!(tree.find(&["pets", "missing"]).is_none());
}

#[test]
fn test_bug_tagged_leaves_are_hidden_by_default() {
    let tree = load_layout(&fixture("layout.yaml"), "main").unwrap();
    let owners = tree.find(&["owners"]).unwrap();
    assert!(owners.operations(false).is_empty());

    let all = owners.operations(true);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].bugs, vec!["OWN-12"]);
}

#[test]
fn test_fixture_layout_is_clean() {
    let data = layout::load_layout_document(&fixture("layout.yaml")).unwrap();
    let report = check_layout(data.as_object().unwrap(), "main");
    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn test_check_collects_every_finding() {
    let data = json!({
        "main": {"description": "Top", "operations": [
            {"name": "zoo", "subcommandId": "zoo"},
            {"name": "alpha", "subcommandId": "alpha"}
        ]},
        "alpha": {"description": "A", "operations": [
            {"name": "list", "operationId": "listA"},
            {"name": "get", "operationId": "getA"},
            {"name": "get", "operationId": "getA2"}
        ]},
        "unused": {"operations": []}
    });
    let report = check_layout(data.as_object().unwrap(), "main");

    assert_eq!(report.missing_subcommands, vec!["zoo"]);
    assert_eq!(report.unused_subcommands, vec!["unused"]);
    assert_eq!(report.duplicate_operations["alpha"], "get at 1, 2");
    assert_eq!(report.misordered_operations["main"], "alpha, zoo");
    assert_eq!(report.misordered_operations["alpha"], "get, get, list");
    assert_eq!(report.missing_properties["unused"], "description");
    assert!(!report.is_clean());
}

#[test]
fn test_validate_fixture_has_no_findings() {
    let tree = load_layout(&fixture("layout.yaml"), "main").unwrap();
    let index = OperationIndex::build(&load_fixture("petstore.yaml")).unwrap();
    let report = validate(&tree, &index);
    assert!(!report.has_errors());
    assert!(report.unreferenced_operations.is_empty());
}

#[test]
fn test_validate_reports_missing_and_unreferenced() {
    let data = json!({
        "main": {"description": "Top", "operations": [{"name": "pets", "subcommandId": "pets"}]},
        "pets": {"description": "Pets", "operations": [
            {"name": "get", "operationId": "getPetX"},
            {"name": "list", "operationId": "listPets"}
        ]}
    });
    let tree = parse_tree(&data, "main").unwrap();
    let index = OperationIndex::build(&load_fixture("petstore.yaml")).unwrap();
    let report = validate(&tree, &index);

    assert!(report.has_errors());
    assert_eq!(report.missing_operations.len(), 1);
    assert_eq!(report.missing_operations["pets"], vec!["getPetX"]);

    let unreferenced: Vec<&String> = report.unreferenced_operations.keys().collect();
    assert_eq!(unreferenced, vec!["createPet", "getPet", "deletePet", "listOwners"]);
    assert!(report
        .warnings()
        .contains(&"Operation 'deletePet' (DELETE /pets/{petId}) is not referenced by any command".to_string()));
}

#[test]
fn test_subcommand_cycle_is_rejected() {
    let data = json!({
        "main": {"operations": [{"name": "a", "subcommandId": "a"}]},
        "a": {"operations": [{"name": "back", "subcommandId": "main"}]}
    });
    assert!(matches!(parse_tree(&data, "main"), Err(Error::LayoutLoad(_))));
}

#[test]
fn test_missing_start_entry() {
    let data = json!({"other": {"operations": []}});
    match parse_tree(&data, "main") {
        Err(Error::LayoutLoad(msg)) => assert!(msg.contains("main")),
        other => panic!("Expected LayoutLoad, got {other:?}"),
    }
}

#[test]
fn test_nested_layout_shape() {
    let data = json!({
        "command": "petstore",
        "children": [
            {"command": "pets", "children": [
                {"command": "get", "identifier": "getPet", "bugIds": ["B-1", "B-2"]}
            ]}
        ]
    });
    let tree = parse_tree(&data, "main").unwrap();
    let leaf = tree.find(&["pets", "get"]).unwrap();
    assert_eq!(leaf.identifier, "getPet");
    assert!(leaf.is_bugged());
    assert_eq!(leaf.bugs, vec!["B-1", "B-2"]);
}

#[test]
fn test_unreadable_layout_is_io_error() {
    let result = load_layout(&fixture("does-not-exist.yaml"), "main");
    assert!(result.is_err());
}
