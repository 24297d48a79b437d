//! Turns an operation and its command node into an ordered argument list.
//!
//! Arguments are assembled in a fixed order: path parameters, query
//! parameters, settable request-body properties, then the infrastructure
//! options every generated command carries. Within each group the order is
//! document order, so identical inputs always compile to identical output.

use crate::config::models::CompilerConfig;
use crate::constants;
use crate::error::Error;
use crate::layout::CommandNode;
use crate::spec::operations::parameters_for;
use crate::spec::{
    bool_field, default_host, models, str_field, OperationIndex, OperationRecord, Parameter,
    ParameterLocation,
};
use crate::utils::{option_name, short_reference_name, variable_name};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Value type of a generated argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "choices")]
pub enum ArgType {
    Bool,
    Int,
    Float,
    Text,
    DateTime,
    /// Closed set of text values
    Choice(Vec<String>),
}

impl ArgType {
    /// Maps a schema `(type, format)` pair to an argument type.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedSchemaType` for anything but boolean,
    /// integer, number and string schemas.
    pub fn from_schema(schema_type: Option<&str>, format: Option<&str>) -> Result<Self, Error> {
        match (schema_type, format) {
            (Some(constants::SCHEMA_TYPE_BOOLEAN), _) => Ok(Self::Bool),
            (Some(constants::SCHEMA_TYPE_INTEGER), _) => Ok(Self::Int),
            (Some(constants::SCHEMA_TYPE_NUMBER), _) => Ok(Self::Float),
            (Some(constants::SCHEMA_TYPE_STRING), Some(constants::SCHEMA_FORMAT_DATE_TIME)) => {
                Ok(Self::DateTime)
            }
            (Some(constants::SCHEMA_TYPE_STRING), _) => Ok(Self::Text),
            _ => Err(Error::unsupported_schema_type(schema_type, format)),
        }
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

/// Where the argument's value ends up in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentSource {
    Path,
    Query,
    Body,
    /// Host, credentials and presentation settings
    Infrastructure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentKind {
    Positional,
    Option,
}

/// One argument of a compiled command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentSpec {
    /// Identifier in generated code
    pub variable: String,
    /// Name as sent on the wire
    pub wire_name: String,
    pub source: ArgumentSource,
    pub kind: ArgumentKind,
    #[serde(flatten)]
    pub arg_type: ArgType,
    /// Absent values are allowed and mean "not sent"
    pub nullable: bool,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub show_default: bool,
    pub help: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,
    /// Long option token, `None` for positional arguments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
}

/// A piece of the URL template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum UrlSegment {
    /// Literal text, segments re-joined with `/`
    Literal(String),
    /// Variable name of a path argument
    Param(String),
}

/// Everything an emitter needs to produce one command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledOperation {
    pub operation_id: String,
    pub command: String,
    pub function: String,
    /// Uppercase HTTP method
    pub method: String,
    pub path: String,
    pub short_help: String,
    pub long_help: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub arguments: Vec<ArgumentSpec>,
    /// Options to report together when unset at run time
    pub required_flags: Vec<String>,
    pub url_segments: Vec<UrlSegment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary_fields: Vec<String>,
}

impl CompiledOperation {
    /// Arguments from one source, in order
    pub fn arguments_from(&self, source: ArgumentSource) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments.iter().filter(move |arg| arg.source == source)
    }

    #[must_use]
    pub fn argument(&self, variable: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|arg| arg.variable == variable)
    }

    /// Pre-flight check for consumers of the compiled command.
    ///
    /// `is_set` is asked about every checklist flag; all unset flags are
    /// reported together, in checklist order.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingRequiredArguments` if any flag is unset.
    pub fn check_required(&self, is_set: impl Fn(&str) -> bool) -> Result<(), Error> {
        let flags: Vec<String> = self
            .required_flags
            .iter()
            .filter(|flag| !is_set(flag.as_str()))
            .cloned()
            .collect();
        if flags.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingRequiredArguments { flags })
        }
    }
}

/// Compiles operations of one spec under one configuration
#[derive(Debug)]
pub struct ParameterCompiler<'a> {
    models: Option<&'a Map<String, Value>>,
    default_host: String,
    config: &'a CompilerConfig,
}

/// A body property that survived read-only filtering
struct BodyProperty<'s> {
    name: &'s str,
    schema: &'s Value,
    required: bool,
}

impl<'a> ParameterCompiler<'a> {
    #[must_use]
    pub fn new(spec: &'a Value, config: &'a CompilerConfig) -> Self {
        Self {
            models: models(spec),
            default_host: default_host(spec),
            config,
        }
    }

    /// Compiles one operation for the command `node`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A parameter or body property has a type no argument can hold
    /// - The request body names a model that does not exist
    pub fn compile(
        &self,
        record: &'a OperationRecord,
        node: &CommandNode,
    ) -> Result<CompiledOperation, Error> {
        let mut arguments = Vec::new();
        let mut required_flags = vec![constants::FLAG_API_KEY.to_string()];

        for param in parameters_for(record, ParameterLocation::Path) {
            arguments.push(param_to_argument(param, ArgumentSource::Path, true)?);
        }

        for param in parameters_for(record, ParameterLocation::Query) {
            let arg = param_to_argument(param, ArgumentSource::Query, false)?;
            if param.required {
                required_flags.push(option_name(&param.name));
            }
            arguments.push(arg);
        }

        let (content_type, body) = self.request_body(record)?;
        for property in &body {
            let arg = property_to_argument(property)?;
            if property.required {
                required_flags.push(option_name(property.name));
            }
            arguments.push(arg);
        }

        arguments.extend(self.infrastructure_arguments(node));

        debug!(
            target: "oastool::compiler",
            operation = %record.operation_id,
            arguments = arguments.len(),
            required = required_flags.len(),
            "Compiled operation"
        );

        Ok(CompiledOperation {
            operation_id: record.operation_id.clone(),
            command: node.command.clone(),
            function: variable_name(&node.identifier),
            method: record.method.to_uppercase(),
            path: record.path.clone(),
            short_help: short_help(record),
            long_help: long_help(record),
            content_type,
            arguments,
            required_flags,
            url_segments: url_segments(&record.path),
            summary_fields: node.summary_fields.clone(),
        })
    }

    /// Compiles every leaf of `tree` that names a known operation.
    ///
    /// Bug-tagged leaves and groups are skipped unless `include_bugged` is set.
    /// Leaves naming unknown operations are skipped with a warning; layout
    /// validation reports them.
    ///
    /// # Errors
    ///
    /// Returns the first compile error encountered.
    pub fn compile_tree(
        &self,
        tree: &CommandNode,
        index: &'a OperationIndex,
        include_bugged: bool,
    ) -> Result<Vec<CompiledOperation>, Error> {
        let mut compiled = Vec::new();
        self.compile_node(tree, index, include_bugged, &mut compiled)?;
        info!(
            target: "oastool::compiler",
            operations = compiled.len(),
            "Compiled command tree"
        );
        Ok(compiled)
    }

    fn compile_node(
        &self,
        node: &CommandNode,
        index: &'a OperationIndex,
        include_bugged: bool,
        out: &mut Vec<CompiledOperation>,
    ) -> Result<(), Error> {
        for child in node.visible_children(include_bugged) {
            if !child.is_leaf() {
                self.compile_node(child, index, include_bugged, out)?;
                continue;
            }
            let Some(record) = index.get(&child.identifier) else {
                warn!(
                    target: "oastool::compiler",
                    command = %child.command,
                    operation = %child.identifier,
                    "Skipping command for unknown operation"
                );
                continue;
            };
            out.push(self.compile(record, child)?);
        }
        Ok(())
    }

    /// Picks the first preferred media type the body offers and lists its
    /// settable properties
    fn request_body(
        &self,
        record: &'a OperationRecord,
    ) -> Result<(Option<String>, Vec<BodyProperty<'a>>), Error> {
        let Some(content) = record.request_content() else {
            return Ok((None, Vec::new()));
        };
        let Some((content_type, media)) = self.config.content_types.iter().find_map(|ct| {
            content
                .get(ct.as_str())
                .filter(|media| !is_empty_value(media))
                .map(|media| (ct.clone(), media))
        }) else {
            return Ok((None, Vec::new()));
        };

        let Some(mut schema) = media.get(constants::FIELD_SCHEMA) else {
            return Ok((Some(content_type), Vec::new()));
        };
        if let Some(reference) = str_field(schema, constants::FIELD_REF) {
            schema = self.resolve_model(reference)?;
        }

        let required: Vec<&str> = schema
            .get(constants::FIELD_REQUIRED)
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let properties = schema
            .get(constants::FIELD_PROPERTIES)
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .filter(|(_, data)| !bool_field(data, constants::FIELD_READ_ONLY))
                    .map(|(name, data)| BodyProperty {
                        name: name.as_str(),
                        schema: data,
                        required: required.contains(&name.as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok((Some(content_type), properties))
    }

    fn resolve_model(&self, reference: &str) -> Result<&'a Value, Error> {
        self.models
            .and_then(|models| models.get(short_reference_name(reference)))
            .ok_or_else(|| Error::unresolved_reference(reference))
    }

    fn infrastructure_arguments(&self, node: &CommandNode) -> Vec<ArgumentSpec> {
        let mut args = vec![
            infrastructure(
                constants::ARG_API_HOST,
                ArgType::Text,
                Some(Value::from(self.default_host.clone())),
                "API host address",
            ),
            infrastructure(constants::ARG_API_KEY, ArgType::Text, None, "API key for authentication"),
            infrastructure(
                constants::ARG_API_TIMEOUT,
                ArgType::Int,
                Some(Value::from(self.config.default_timeout_secs)),
                "API request timeout in seconds",
            ),
            infrastructure(
                constants::ARG_LOG_LEVEL,
                choice(constants::LOG_LEVELS),
                Some(Value::from(self.config.default_log_level.clone())),
                "Log level",
            ),
            infrastructure(
                constants::ARG_OUTPUT_FORMAT,
                choice(constants::OUTPUT_FORMATS),
                Some(Value::from(self.config.default_output_format.clone())),
                "Output format",
            ),
            infrastructure(
                constants::ARG_OUTPUT_STYLE,
                choice(constants::OUTPUT_STYLES),
                Some(Value::from(self.config.default_output_style.clone())),
                "Output style",
            ),
        ];
        if !node.summary_fields.is_empty() {
            args.push(infrastructure(
                constants::ARG_DETAILS,
                ArgType::Bool,
                Some(Value::Bool(false)),
                "Show all fields instead of the summary",
            ));
        }
        args
    }
}

fn choice(values: &[&str]) -> ArgType {
    ArgType::Choice(values.iter().map(ToString::to_string).collect())
}

fn infrastructure(
    variable: &str,
    arg_type: ArgType,
    default: Option<Value>,
    help: &str,
) -> ArgumentSpec {
    let flag = format!("--{}", variable.trim_start_matches('_').replace('_', "-"));
    ArgumentSpec {
        variable: variable.to_string(),
        wire_name: variable.to_string(),
        source: ArgumentSource::Infrastructure,
        kind: ArgumentKind::Option,
        arg_type,
        nullable: default.is_none(),
        required: false,
        show_default: default.is_some(),
        default,
        help: help.to_string(),
        minimum: None,
        maximum: None,
        option: Some(flag),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Applies the shared defaulting policy.
///
/// - required without default: positional when allowed, no displayed default
/// - optional without default: nullable option, default hidden
/// - explicit default: optional, default shown
fn build_argument(
    name: &str,
    source: ArgumentSource,
    schema: &Value,
    required: bool,
    help: String,
    allow_positional: bool,
) -> Result<ArgumentSpec, Error> {
    let arg_type = ArgType::from_schema(
        str_field(schema, constants::FIELD_TYPE),
        str_field(schema, constants::FIELD_FORMAT),
    )?;
    let default = schema
        .get(constants::FIELD_DEFAULT)
        .filter(|value| !value.is_null())
        .cloned();

    let (minimum, maximum) = if arg_type.is_numeric() {
        (
            schema.get(constants::FIELD_MINIMUM).cloned(),
            schema.get(constants::FIELD_MAXIMUM).cloned(),
        )
    } else {
        (None, None)
    };

    let (kind, nullable, required, show_default) = match (&default, required) {
        (None, true) if allow_positional => (ArgumentKind::Positional, false, true, false),
        (None, true) => (ArgumentKind::Option, true, true, false),
        (None, false) => (ArgumentKind::Option, true, false, false),
        (Some(_), _) => (ArgumentKind::Option, false, false, true),
    };

    Ok(ArgumentSpec {
        variable: variable_name(name),
        wire_name: name.to_string(),
        source,
        option: (kind == ArgumentKind::Option).then(|| option_name(name)),
        kind,
        arg_type,
        nullable,
        required,
        default,
        show_default,
        help,
        minimum,
        maximum,
    })
}

fn param_to_argument(
    param: &Parameter,
    source: ArgumentSource,
    allow_positional: bool,
) -> Result<ArgumentSpec, Error> {
    build_argument(
        &param.name,
        source,
        &param.schema,
        param.required,
        param.description.clone().unwrap_or_default(),
        allow_positional,
    )
}

fn property_to_argument(property: &BodyProperty<'_>) -> Result<ArgumentSpec, Error> {
    build_argument(
        property.name,
        ArgumentSource::Body,
        property.schema,
        property.required,
        str_field(property.schema, constants::FIELD_DESCRIPTION)
            .unwrap_or_default()
            .to_string(),
        false,
    )
}

/// Summary, else the first sentence of the description
#[must_use]
pub fn short_help(record: &OperationRecord) -> String {
    if let Some(summary) = record.summary.as_deref().filter(|s| !s.is_empty()) {
        return summary.to_string();
    }
    record
        .description
        .as_deref()
        .unwrap_or_default()
        .split(". ")
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Description, else summary
#[must_use]
pub fn long_help(record: &OperationRecord) -> String {
    record
        .description
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(record.summary.as_deref())
        .unwrap_or_default()
        .to_string()
}

/// Splits a path template into literal runs and parameter names.
///
/// `/sna/{foo}/bar` becomes `[Literal("sna"), Param("foo"), Literal("bar")]`.
#[must_use]
pub fn url_segments(path: &str) -> Vec<UrlSegment> {
    let mut segments = Vec::new();
    let mut literal: Vec<&str> = Vec::new();

    for part in path.split('/') {
        if part.contains('{') {
            if !literal.is_empty() {
                segments.push(UrlSegment::Literal(literal.join("/")));
                literal.clear();
            }
            let name = part.replace(['{', '}'], "");
            segments.push(UrlSegment::Param(variable_name(&name)));
        } else if !part.is_empty() {
            literal.push(part);
        }
    }
    if !literal.is_empty() {
        segments.push(UrlSegment::Literal(literal.join("/")));
    }
    segments
}
