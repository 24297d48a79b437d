//! Handlers for `oastool models` and `oastool ops`.

use crate::cli::render::Output;
use crate::cli::OutputFormat;
use crate::error::Error;
use crate::spec::editor::{models_used_by_operation, operations_using_model};
use crate::spec::{load_document, OperationIndex, ReferenceGraph};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

fn print_names<T: Serialize>(names: &T, lines: &[String], output: &Output) -> Result<(), Error> {
    if output.format() == OutputFormat::Text {
        for line in lines {
            output.line(line);
        }
        return Ok(());
    }
    output.data(names)
}

fn model_graph(spec: &Value, model: &str) -> Result<ReferenceGraph, Error> {
    let graph = ReferenceGraph::from_spec(spec);
    if !graph.contains(model) {
        return Err(Error::unresolved_reference(format!(
            "{}{model}",
            crate::constants::REF_PREFIX_SCHEMAS
        )));
    }
    Ok(graph)
}

pub fn execute_models_uses(spec_path: &Path, model: &str, output: &Output) -> Result<bool, Error> {
    let spec = load_document(spec_path)?;
    let graph = model_graph(&spec, model)?;
    let used: Vec<String> = graph.unroll(&[model]).into_iter().collect();
    print_names(&used, &used, output)?;
    Ok(true)
}

pub fn execute_models_used_by(spec_path: &Path, model: &str, output: &Output) -> Result<bool, Error> {
    let spec = load_document(spec_path)?;
    let graph = model_graph(&spec, model)?;
    let users: Vec<String> = graph.reverse_closure(model).into_iter().collect();
    print_names(&users, &users, output)?;
    Ok(true)
}

pub fn execute_models_ops(spec_path: &Path, model: &str, output: &Output) -> Result<bool, Error> {
    let spec = load_document(spec_path)?;
    model_graph(&spec, model)?;
    let operations = operations_using_model(&spec, model);
    print_names(&operations, &operations, output)?;
    Ok(true)
}

pub fn execute_ops_list(spec_path: &Path, output: &Output) -> Result<bool, Error> {
    let spec = load_document(spec_path)?;
    let index = OperationIndex::build(&spec)?;

    if output.format() != OutputFormat::Text {
        let records: Vec<_> = index.iter().map(|(_, record)| record).collect();
        output.data(&records)?;
        return Ok(true);
    }
    for (operation_id, record) in index.iter() {
        output.line(format!("{operation_id}: {}", record.location()));
    }
    Ok(true)
}

pub fn execute_ops_models(spec_path: &Path, operation: &str, output: &Output) -> Result<bool, Error> {
    let spec = load_document(spec_path)?;
    let used: Vec<String> = models_used_by_operation(&spec, operation)?.into_iter().collect();
    print_names(&used, &used, output)?;
    Ok(true)
}
