use crate::constants;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where an operation lives inside the `paths` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationLocation {
    pub method: String,
    pub path: String,
}

impl fmt::Display for OperationLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method.to_uppercase(), self.path)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Spec load error: {0}")]
    SpecLoad(String),
    #[error("Layout error: {0}")]
    LayoutLoad(String),
    #[error("Duplicate operation id '{operation_id}': found at {first} and {second}")]
    DuplicateOperationId {
        operation_id: String,
        first: OperationLocation,
        second: OperationLocation,
    },
    #[error("Unresolved reference '{reference}'")]
    UnresolvedReference { reference: String },
    #[error("Circular reference detected: '{reference}' is part of a reference cycle")]
    CircularReference { reference: String },
    #[error("Maximum reference depth ({max_depth}) exceeded while resolving '{reference}'")]
    ReferenceDepthExceeded { reference: String, max_depth: usize },
    #[error("Unable to determine type for {}", describe_type(.schema_type.as_deref(), .format.as_deref()))]
    UnsupportedSchemaType {
        schema_type: Option<String>,
        format: Option<String>,
    },
    #[error("Missing required parameters, please provide: {}", .flags.join(", "))]
    MissingRequiredArguments { flags: Vec<String> },
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

fn describe_type(schema_type: Option<&str>, format: Option<&str>) -> String {
    let base = schema_type.unwrap_or("<none>");
    match format {
        Some(fmt) => format!("{base} ({fmt})"),
        None => base.to_string(),
    }
}

/// JSON representation of an error for structured output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonError {
    pub error_type: String,
    pub message: String,
    pub context: Option<String>,
}

impl Error {
    /// Shorthand for a malformed spec document
    pub fn spec_load(message: impl Into<String>) -> Self {
        Self::SpecLoad(message.into())
    }

    /// Shorthand for a malformed layout document
    pub fn layout_load(message: impl Into<String>) -> Self {
        Self::LayoutLoad(message.into())
    }

    pub fn unresolved_reference(reference: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            reference: reference.into(),
        }
    }

    pub fn unsupported_schema_type(schema_type: Option<&str>, format: Option<&str>) -> Self {
        Self::UnsupportedSchemaType {
            schema_type: schema_type.map(str::to_string),
            format: format.map(str::to_string),
        }
    }

    /// Add context to an error for better user messaging
    #[must_use]
    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::Io(e) => Self::SpecLoad(format!("{context}: {e}")),
            Self::Yaml(e) => Self::SpecLoad(format!("{context}: {e}")),
            Self::Json(e) => Self::SpecLoad(format!("{context}: {e}")),
            _ => self,
        }
    }

    /// Convert error to JSON representation for structured output
    #[must_use]
    pub fn to_json(&self) -> JsonError {
        let (error_type, context) = match self {
            Self::Io(io_err) => {
                let context = match io_err.kind() {
                    std::io::ErrorKind::NotFound => Some(constants::ERR_FILE_NOT_FOUND),
                    std::io::ErrorKind::PermissionDenied => Some(constants::ERR_PERMISSION),
                    _ => None,
                };
                ("FileSystem", context)
            }
            Self::Yaml(_) => ("YAMLParsing", Some(constants::ERR_YAML_SYNTAX)),
            Self::Json(_) => ("JSONParsing", Some(constants::ERR_JSON_SYNTAX)),
            Self::Toml(_) => ("TOMLParsing", Some(constants::ERR_TOML_SYNTAX)),
            Self::SpecLoad(_) => ("SpecLoad", Some(constants::ERR_OPENAPI_FORMAT)),
            Self::LayoutLoad(_) => ("LayoutLoad", Some(constants::ERR_LAYOUT_FORMAT)),
            Self::DuplicateOperationId { .. } => {
                ("DuplicateOperationId", Some(constants::ERR_DUPLICATE_OPERATION))
            }
            Self::UnresolvedReference { .. } => {
                ("UnresolvedReference", Some(constants::ERR_UNRESOLVED_REFERENCE))
            }
            Self::CircularReference { .. } | Self::ReferenceDepthExceeded { .. } => {
                ("InvalidReference", Some(constants::ERR_OPENAPI_FORMAT))
            }
            Self::UnsupportedSchemaType { .. } => {
                ("UnsupportedSchemaType", Some(constants::ERR_UNSUPPORTED_TYPE))
            }
            Self::MissingRequiredArguments { .. } => {
                ("MissingRequiredArguments", Some(constants::ERR_MISSING_ARGUMENTS))
            }
            Self::Anyhow(_) => (
                "Unexpected",
                Some("This may be a bug. Please report it with the command you were running."),
            ),
        };

        JsonError {
            error_type: error_type.to_string(),
            message: self.to_string(),
            context: context.map(str::to_string),
        }
    }
}
