//! Handler for `oastool compile`.

use crate::cli::render::Output;
use crate::cli::OutputFormat;
use crate::config::resolve_config;
use crate::engine::{ArgumentKind, ParameterCompiler};
use crate::error::Error;
use crate::layout;
use crate::spec::{load_document, OperationIndex};
use std::path::Path;

pub fn execute_compile(
    layout_path: &Path,
    spec_path: &Path,
    start: Option<&str>,
    config_path: Option<&Path>,
    include_bugged: bool,
    output: &Output,
) -> Result<bool, Error> {
    let config = resolve_config(config_path)?;
    let start = start.unwrap_or(&config.start);
    let tree = layout::load_layout(layout_path, start)?;
    let spec = load_document(spec_path)?;
    let index = OperationIndex::build(&spec)?;

    let compiler = ParameterCompiler::new(&spec, &config);
    let compiled = compiler.compile_tree(&tree, &index, include_bugged)?;

    if output.format() != OutputFormat::Text {
        output.data(&compiled)?;
        return Ok(true);
    }

    for operation in &compiled {
        output.line(format!(
            "{} -> {} {} ({})",
            operation.command, operation.method, operation.path, operation.operation_id
        ));
        for arg in &operation.arguments {
            let name = match arg.kind {
                ArgumentKind::Positional => arg.variable.to_uppercase(),
                ArgumentKind::Option => arg.option.clone().unwrap_or_default(),
            };
            let default = arg
                .default
                .as_ref()
                .filter(|_| arg.show_default)
                .map(|value| format!(" [default: {value}]"))
                .unwrap_or_default();
            let required = if arg.required { " (required)" } else { "" };
            output.line(format!("    {name}{required}{default}"));
        }
        output.line(format!("    missing check: {}", operation.required_flags.join(", ")));
    }
    Ok(true)
}
