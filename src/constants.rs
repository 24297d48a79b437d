//! Centralized string constants for oastool
//!
//! Field names of the `OpenAPI` and layout documents are plain mapping keys.
//! Spec-walking code looks them up by name and never assumes a typed schema.

// OpenAPI Field Names
pub const FIELD_COMPONENTS: &str = "components";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_DEFAULT: &str = "default";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_FORMAT: &str = "format";
pub const FIELD_IN: &str = "in";
pub const FIELD_MAXIMUM: &str = "maximum";
pub const FIELD_MINIMUM: &str = "minimum";
pub const FIELD_NAME: &str = "name";
pub const FIELD_NULLABLE: &str = "nullable";
pub const FIELD_OPERATION_ID: &str = "operationId";
pub const FIELD_PARAMETERS: &str = "parameters";
pub const FIELD_PATHS: &str = "paths";
pub const FIELD_PROPERTIES: &str = "properties";
pub const FIELD_READ_ONLY: &str = "readOnly";
pub const FIELD_REF: &str = "$ref";
pub const FIELD_REQUEST_BODY: &str = "requestBody";
pub const FIELD_REQUIRED: &str = "required";
pub const FIELD_SCHEMA: &str = "schema";
pub const FIELD_SCHEMAS: &str = "schemas";
pub const FIELD_SERVERS: &str = "servers";
pub const FIELD_SUMMARY: &str = "summary";
pub const FIELD_TAGS: &str = "tags";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_URL: &str = "url";

// Layout Field Names
pub const LAYOUT_BUG_IDS: &str = "bugIds";
pub const LAYOUT_CHILDREN: &str = "children";
pub const LAYOUT_COMMAND: &str = "command";
pub const LAYOUT_DESCRIPTION: &str = "description";
pub const LAYOUT_IDENTIFIER: &str = "identifier";
pub const LAYOUT_NAME: &str = "name";
pub const LAYOUT_OPERATION_ID: &str = "operationId";
pub const LAYOUT_OPERATIONS: &str = "operations";
pub const LAYOUT_SUBCOMMAND_ID: &str = "subcommandId";
pub const LAYOUT_SUMMARY_FIELDS: &str = "summaryFields";

/// Every key the layout parser consumes; anything else is kept as node extras.
pub const LAYOUT_FIELDS: &[&str] = &[
    LAYOUT_BUG_IDS,
    LAYOUT_CHILDREN,
    LAYOUT_COMMAND,
    LAYOUT_DESCRIPTION,
    LAYOUT_IDENTIFIER,
    LAYOUT_NAME,
    LAYOUT_OPERATION_ID,
    LAYOUT_OPERATIONS,
    LAYOUT_SUBCOMMAND_ID,
    LAYOUT_SUMMARY_FIELDS,
];

// Reference prefixes
pub const REF_PREFIX_PARAMETERS: &str = "#/components/parameters/";
pub const REF_PREFIX_SCHEMAS: &str = "#/components/schemas/";

// Content Types
pub const CONTENT_TYPE_JSON: &str = "application/json";

// Schema Types
pub const SCHEMA_TYPE_STRING: &str = "string";
pub const SCHEMA_TYPE_NUMBER: &str = "number";
pub const SCHEMA_TYPE_INTEGER: &str = "integer";
pub const SCHEMA_TYPE_BOOLEAN: &str = "boolean";

// Schema Formats
pub const SCHEMA_FORMAT_DATE_TIME: &str = "date-time";

// HTTP Methods, in the order they are recognized inside a path item
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

// Parameter Locations
pub const PARAM_LOCATION_PATH: &str = "path";
pub const PARAM_LOCATION_QUERY: &str = "query";
pub const PARAM_LOCATION_HEADER: &str = "header";
pub const PARAM_LOCATION_COOKIE: &str = "cookie";

// Infrastructure argument names
pub const ARG_API_HOST: &str = "_api_host";
pub const ARG_API_KEY: &str = "_api_key";
pub const ARG_API_TIMEOUT: &str = "_api_timeout";
pub const ARG_LOG_LEVEL: &str = "_log_level";
pub const ARG_OUTPUT_FORMAT: &str = "_out_fmt";
pub const ARG_OUTPUT_STYLE: &str = "_out_style";
pub const ARG_DETAILS: &str = "_details";

/// Long option of the credential, always part of the required-field checklist.
pub const FLAG_API_KEY: &str = "--api-key";

// Infrastructure choices
pub const LOG_LEVELS: &[&str] = &["critical", "error", "warn", "info", "debug"];
pub const OUTPUT_FORMATS: &[&str] = &["table", "json", "yaml"];
pub const OUTPUT_STYLES: &[&str] = &["none", "bold", "all"];

// Default Values
pub const DEFAULT_START: &str = "main";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_OUTPUT_FORMAT: &str = "table";
pub const DEFAULT_OUTPUT_STYLE: &str = "all";

/// Maximum depth for resolving parameter references to prevent stack overflow
pub const MAX_REFERENCE_DEPTH: usize = 10;

// Environment Variables
pub const ENV_OASTOOL_CONFIG: &str = "OASTOOL_CONFIG";
pub const ENV_OASTOOL_LOG: &str = "OASTOOL_LOG";
pub const ENV_OASTOOL_LOG_FORMAT: &str = "OASTOOL_LOG_FORMAT";
pub const ENV_OASTOOL_LOG_FILE: &str = "OASTOOL_LOG_FILE";

// Error Context Messages
pub const ERR_FILE_NOT_FOUND: &str = "Check that the file path is correct and the file exists.";
pub const ERR_PERMISSION: &str = "Check file permissions or run with appropriate privileges.";
pub const ERR_YAML_SYNTAX: &str = "Check that your document is valid YAML syntax.";
pub const ERR_JSON_SYNTAX: &str = "Check that your document is valid JSON syntax.";
pub const ERR_TOML_SYNTAX: &str = "Check that your configuration file is valid TOML syntax.";
pub const ERR_OPENAPI_FORMAT: &str =
    "Check that your OpenAPI specification follows the required format.";
pub const ERR_LAYOUT_FORMAT: &str = "Check that your layout file follows the required format.";
pub const ERR_DUPLICATE_OPERATION: &str = "Every operationId must be unique across all paths.";
pub const ERR_UNRESOLVED_REFERENCE: &str =
    "Check that the referenced model is defined under components.schemas.";
pub const ERR_UNSUPPORTED_TYPE: &str =
    "Only boolean, integer, number and string schemas can be turned into arguments.";
pub const ERR_MISSING_ARGUMENTS: &str = "Provide every listed option and try again.";

/// Check if a path-item key names an HTTP method
#[must_use]
pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.contains(&key.to_ascii_lowercase().as_str())
}
