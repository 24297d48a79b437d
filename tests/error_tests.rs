use oastool::error::{Error, OperationLocation};

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err = Error::Io(io_err);
    assert_eq!(format!("{err}"), "I/O error: file not found");
}

#[test]
fn test_yaml_error_display() {
    let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("key: - value").unwrap_err();
    let err = Error::Yaml(yaml_err);
    assert!(format!("{err}").starts_with("YAML parsing error: "));
}

#[test]
fn test_json_error_display() {
    let json_err = serde_json::from_str::<serde_json::Value>("{\"key\": ").unwrap_err();
    let err = Error::Json(json_err);
    assert!(format!("{err}").starts_with("JSON parsing error: "));
}

#[test]
fn test_toml_error_display() {
    let toml_err = toml::from_str::<toml::Value>("key = ").unwrap_err();
    let err = Error::Toml(toml_err);
    assert!(format!("{err}").starts_with("TOML parsing error: "));
}

#[test]
fn test_duplicate_operation_display() {
    let err = Error::DuplicateOperationId {
        operation_id: "getPet".to_string(),
        first: OperationLocation {
            method: "get".to_string(),
            path: "/pets/{id}".to_string(),
        },
        second: OperationLocation {
            method: "get".to_string(),
            path: "/animals/{id}".to_string(),
        },
    };
    assert_eq!(
        err.to_string(),
        "Duplicate operation id 'getPet': found at GET /pets/{id} and GET /animals/{id}"
    );
}

#[test]
fn test_unresolved_reference_display() {
    let err = Error::unresolved_reference("#/components/schemas/Ghost");
    assert_eq!(
        err.to_string(),
        "Unresolved reference '#/components/schemas/Ghost'"
    );
}

#[test]
fn test_unsupported_schema_type_display() {
    let err = Error::unsupported_schema_type(Some("object"), None);
    assert_eq!(err.to_string(), "Unable to determine type for object");
    let err = Error::unsupported_schema_type(Some("string"), Some("binary"));
    assert_eq!(err.to_string(), "Unable to determine type for string (binary)");
}

#[test]
fn test_missing_required_arguments_lists_every_flag() {
    let err = Error::MissingRequiredArguments {
        flags: vec!["--api-key".to_string(), "--name".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Missing required parameters, please provide: --api-key, --name"
    );
}

#[test]
fn test_to_json_error_types() {
    let cases = [
        (Error::spec_load("bad"), "SpecLoad"),
        (Error::layout_load("bad"), "LayoutLoad"),
        (Error::unresolved_reference("#/x"), "UnresolvedReference"),
        (Error::unsupported_schema_type(None, None), "UnsupportedSchemaType"),
        (
            Error::CircularReference {
                reference: "#/components/parameters/A".to_string(),
            },
            "InvalidReference",
        ),
        (
            Error::MissingRequiredArguments { flags: Vec::new() },
            "MissingRequiredArguments",
        ),
    ];
    for (err, expected) in cases {
        let json = err.to_json();
        assert_eq!(json.error_type, expected);
        assert_eq!(json.message, err.to_string());
        assert!(json.context.is_some());
    }
}

#[test]
fn test_with_context_wraps_io_errors() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err = Error::Io(io_err).with_context("Failed to read spec.yaml");
    match err {
        Error::SpecLoad(msg) => assert_eq!(msg, "Failed to read spec.yaml: gone"),
        other => panic!("Expected SpecLoad, got {other:?}"),
    }
}

#[test]
fn test_anyhow_error_is_transparent() {
    let err = Error::from(anyhow::anyhow!("unexpected state"));
    assert_eq!(err.to_string(), "unexpected state");
    assert_eq!(err.to_json().error_type, "Unexpected");
}
