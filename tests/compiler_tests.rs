mod common;

use common::{fixture, load_fixture};
use oastool::config::models::CompilerConfig;
use oastool::engine::compiler::{ArgType, ArgumentKind, ArgumentSource, UrlSegment};
use oastool::engine::ParameterCompiler;
use oastool::error::Error;
use oastool::layout::{load_layout, parse_tree, CommandNode};
use oastool::spec::OperationIndex;
use serde_json::json;

fn fixture_tree() -> CommandNode {
    load_layout(&fixture("layout.yaml"), "main").unwrap()
}

#[test]
fn test_compile_get_pet_end_to_end() {
    let spec = load_fixture("petstore.yaml");
    let index = OperationIndex::build(&spec).unwrap();
    let tree = fixture_tree();
    let config = CompilerConfig::default();
    let compiler = ParameterCompiler::new(&spec, &config);

    let node = tree.find(&["pets", "get"]).unwrap();
    let compiled = compiler.compile(index.get("getPet").unwrap(), node).unwrap();

    let order: Vec<&str> = compiled.arguments.iter().map(|a| a.variable.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "pet_id",
            "limit",
            "_api_host",
            "_api_key",
            "_api_timeout",
            "_log_level",
            "_out_fmt",
            "_out_style",
            "_details",
        ]
    );
    assert_eq!(compiled.required_flags, vec!["--api-key"]);

    let pet_id = compiled.argument("pet_id").unwrap();
    assert_eq!(pet_id.kind, ArgumentKind::Positional);
    assert_eq!(pet_id.source, ArgumentSource::Path);
    assert_eq!(pet_id.wire_name, "petId");
    assert!(pet_id.required);
    assert!(!pet_id.nullable);
    assert!(pet_id.default.is_none());
    assert!(!pet_id.show_default);
    assert!(pet_id.option.is_none());

    let limit = compiled.argument("limit").unwrap();
    assert_eq!(limit.kind, ArgumentKind::Option);
    assert_eq!(limit.source, ArgumentSource::Query);
    assert_eq!(limit.arg_type, ArgType::Int);
    assert_eq!(limit.default, Some(json!(10)));
    assert!(limit.show_default);
    assert!(!limit.required);

    assert_eq!(compiled.method, "GET");
    assert_eq!(compiled.command, "get");
    assert_eq!(compiled.function, "get_pet");
    assert_eq!(compiled.short_help, "Get a single pet");
    assert_eq!(compiled.long_help, "Get a single pet. Returns the full record.");
    assert_eq!(
        compiled.url_segments,
        vec![UrlSegment::Literal("pets".into()), UrlSegment::Param("pet_id".into())]
    );
    assert_eq!(compiled.summary_fields, vec!["name", "category"]);
    assert!(compiled.content_type.is_none());
}

#[test]
fn test_infrastructure_defaults_come_from_spec_and_config() {
    let spec = load_fixture("petstore.yaml");
    let index = OperationIndex::build(&spec).unwrap();
    let tree = fixture_tree();
    let config = CompilerConfig {
        default_timeout_secs: 30,
        default_output_format: "json".to_string(),
        ..CompilerConfig::default()
    };
    let compiler = ParameterCompiler::new(&spec, &config);
    let node = tree.find(&["pets", "list"]).unwrap();
    let compiled = compiler.compile(index.get("listPets").unwrap(), node).unwrap();

    let host = compiled.argument("_api_host").unwrap();
    assert_eq!(host.default, Some(json!("https://petstore.example.com/v1")));
    assert_eq!(compiled.argument("_api_timeout").unwrap().default, Some(json!(30)));

    let out_fmt = compiled.argument("_out_fmt").unwrap();
    assert_eq!(out_fmt.option.as_deref(), Some("--out-fmt"));
    assert_eq!(out_fmt.default, Some(json!("json")));
    assert_eq!(
        out_fmt.arg_type,
        ArgType::Choice(vec!["table".into(), "json".into(), "yaml".into()])
    );
    assert!(compiled.argument("_details").is_none());
}

#[test]
fn test_referenced_query_parameter() {
    let spec = load_fixture("petstore.yaml");
    let index = OperationIndex::build(&spec).unwrap();
    let tree = fixture_tree();
    let config = CompilerConfig::default();
    let compiler = ParameterCompiler::new(&spec, &config);
    let node = tree.find(&["pets", "list"]).unwrap();
    let compiled = compiler.compile(index.get("listPets").unwrap(), node).unwrap();

    let page_size = compiled.argument("page_size").unwrap();
    assert_eq!(page_size.option.as_deref(), Some("--page-size"));
    assert_eq!(page_size.help, "Results per page");
    assert_eq!(page_size.default, Some(json!(20)));
    assert_eq!(page_size.minimum, Some(json!(1)));
    assert_eq!(page_size.maximum, Some(json!(100)));
    assert_eq!(compiled.short_help, "List all pets");
    assert_eq!(compiled.long_help, "List all pets");
}

#[test]
fn test_request_body_properties() {
    let spec = load_fixture("petstore.yaml");
    let index = OperationIndex::build(&spec).unwrap();
    let tree = fixture_tree();
    let config = CompilerConfig::default();
    let compiler = ParameterCompiler::new(&spec, &config);
    let node = tree.find(&["pets", "create"]).unwrap();
    let compiled = compiler.compile(index.get("createPet").unwrap(), node).unwrap();

    let body: Vec<&str> = compiled
        .arguments_from(ArgumentSource::Body)
        .map(|a| a.variable.as_str())
        .collect();
    assert_eq!(body, vec!["name", "tag", "born"]);

    let name = compiled.argument("name").unwrap();
    assert_eq!(name.kind, ArgumentKind::Option);
    assert!(name.required);
    assert!(name.nullable);
    assert_eq!(name.help, "Name of the pet");
    assert_eq!(compiled.argument("born").unwrap().arg_type, ArgType::DateTime);

    assert_eq!(compiled.required_flags, vec!["--api-key", "--name"]);
    assert_eq!(compiled.content_type.as_deref(), Some("application/json"));
}

#[test]
fn test_required_query_parameters_join_checklist_even_with_default() {
    let spec = json!({"paths": {"/search": {"get": {
        "operationId": "search",
        "parameters": [
            {"name": "searchTerm", "in": "query", "required": true, "schema": {"type": "string"}},
            {"name": "page", "in": "query", "required": true, "schema": {"type": "integer", "default": 1}}
        ]
    }}}});
    let index = OperationIndex::build(&spec).unwrap();
    let config = CompilerConfig::default();
    let compiler = ParameterCompiler::new(&spec, &config);
    let node = CommandNode {
        command: "search".to_string(),
        identifier: "search".to_string(),
        ..CommandNode::default()
    };
    let compiled = compiler.compile(index.get("search").unwrap(), &node).unwrap();

    let term = compiled.argument("search_term").unwrap();
    assert_eq!(term.kind, ArgumentKind::Option);
    assert!(term.required);
    assert!(term.nullable);
    assert_eq!(term.option.as_deref(), Some("--search-term"));

    let page = compiled.argument("page").unwrap();
    assert!(!page.required);
    assert!(page.show_default);

    assert_eq!(
        compiled.required_flags,
        vec!["--api-key", "--search-term", "--page"]
    );
}

#[test]
fn test_array_parameter_is_unsupported() {
    let spec = json!({"paths": {"/tags": {"get": {
        "operationId": "listTags",
        "parameters": [{"name": "ids", "in": "query", "schema": {"type": "array"}}]
    }}}});
    let index = OperationIndex::build(&spec).unwrap();
    let config = CompilerConfig::default();
    let compiler = ParameterCompiler::new(&spec, &config);
    let tree = parse_tree(
        &json!({"main": {"operations": [{"name": "tags", "operationId": "listTags"}]}}),
        "main",
    )
    .unwrap();

    match compiler.compile_tree(&tree, &index, false) {
        Err(err @ Error::UnsupportedSchemaType { .. }) => {
            assert_eq!(err.to_string(), "Unable to determine type for array");
        }
        other => panic!("Expected UnsupportedSchemaType, got {other:?}"),
    }
}

#[test]
fn test_compile_tree_skips_bugged_unless_requested() {
    let spec = load_fixture("petstore.yaml");
    let index = OperationIndex::build(&spec).unwrap();
    let tree = fixture_tree();
    let config = CompilerConfig::default();
    let compiler = ParameterCompiler::new(&spec, &config);

    let ids: Vec<String> = compiler
        .compile_tree(&tree, &index, false)
        .unwrap()
        .into_iter()
        .map(|c| c.operation_id)
        .collect();
    assert_eq!(ids, vec!["createPet", "deletePet", "getPet", "listPets"]);

    let ids: Vec<String> = compiler
        .compile_tree(&tree, &index, true)
        .unwrap()
        .into_iter()
        .map(|c| c.operation_id)
        .collect();
    assert_eq!(
        ids,
        vec!["listOwners", "createPet", "deletePet", "getPet", "listPets"]
    );
}

#[test]
fn test_compile_tree_skips_unknown_operations() {
    let spec = load_fixture("petstore.yaml");
    let index = OperationIndex::build(&spec).unwrap();
    let config = CompilerConfig::default();
    let compiler = ParameterCompiler::new(&spec, &config);
    let tree = parse_tree(
        &json!({"main": {"operations": [
            {"name": "ghost", "operationId": "ghostOp"},
            {"name": "list", "operationId": "listOwners"}
        ]}}),
        "main",
    )
    .unwrap();

    let compiled = compiler.compile_tree(&tree, &index, false).unwrap();
    assert_eq!(compiled.len(), 1);
    assert_eq!(compiled[0].operation_id, "listOwners");
}

#[test]
fn test_compile_tree_follows_layout_order() {
    let spec = load_fixture("petstore.yaml");
    let index = OperationIndex::build(&spec).unwrap();
    let config = CompilerConfig::default();
    let compiler = ParameterCompiler::new(&spec, &config);
    let tree = parse_tree(
        &json!({
            "main": {"operations": [
                {"name": "pets", "subcommandId": "pets"},
                {"name": "owners", "operationId": "listOwners"}
            ]},
            "pets": {"operations": [{"name": "get", "operationId": "getPet"}]}
        }),
        "main",
    )
    .unwrap();

    let ids: Vec<String> = compiler
        .compile_tree(&tree, &index, false)
        .unwrap()
        .into_iter()
        .map(|c| c.operation_id)
        .collect();
    assert_eq!(ids, vec!["getPet", "listOwners"]);
}

#[test]
fn test_compiled_output_is_deterministic() {
    let spec = load_fixture("petstore.yaml");
    let index = OperationIndex::build(&spec).unwrap();
    let tree = fixture_tree();
    let config = CompilerConfig::default();
    let compiler = ParameterCompiler::new(&spec, &config);

    let first = serde_json::to_string(&compiler.compile_tree(&tree, &index, true).unwrap()).unwrap();
    let second = serde_json::to_string(&compiler.compile_tree(&tree, &index, true).unwrap()).unwrap();
    assert_eq!(first, second);
}
