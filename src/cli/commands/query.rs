//! Handlers for `oastool paths`, `oastool tags` and `oastool summary`.

use crate::cli::render::Output;
use crate::cli::OutputFormat;
use crate::error::Error;
use crate::spec::{
    find_paths, load_document, operations_by_tag, path_operations, summarize, OperationIndex,
};
use std::path::Path;

const INDENT: &str = "  ";

/// Case-insensitive substring filter; everything passes without a needle
fn contains_filter(names: impl IntoIterator<Item = String>, needle: Option<&str>) -> Vec<String> {
    let needle = needle.map(str::to_lowercase);
    names
        .into_iter()
        .filter(|name| {
            needle
                .as_deref()
                .map_or(true, |n| name.to_lowercase().contains(n))
        })
        .collect()
}

fn print_list(kind: &str, names: &[String], output: &Output) -> Result<(), Error> {
    if output.format() != OutputFormat::Text {
        return output.data(&names);
    }
    if names.is_empty() {
        output.info(format!("No {kind} found"));
    }
    for name in names {
        output.line(name);
    }
    Ok(())
}

pub fn execute_paths_list(
    spec_path: &Path,
    contains: Option<&str>,
    output: &Output,
) -> Result<bool, Error> {
    let spec = load_document(spec_path)?;
    let all = find_paths(&spec, None, false);
    let names = contains_filter(all.into_iter().map(|(path, _)| path), contains);
    print_list("paths", &names, output)?;
    Ok(true)
}

pub fn execute_paths_show(
    spec_path: &Path,
    path: &str,
    sub_paths: bool,
    output: &Output,
) -> Result<bool, Error> {
    let spec = load_document(spec_path)?;
    let found = find_paths(&spec, Some(path), sub_paths);
    if found.is_empty() {
        return Err(Error::spec_load(format!("Spec has no path matching '{path}'")));
    }
    output.data(&found)?;
    Ok(true)
}

pub fn execute_paths_ops(
    spec_path: &Path,
    path: &str,
    sub_paths: bool,
    output: &Output,
) -> Result<bool, Error> {
    let spec = load_document(spec_path)?;
    let found = path_operations(&spec, path, sub_paths);
    if found.is_empty() {
        return Err(Error::spec_load(format!(
            "Spec has no operations under path '{path}'"
        )));
    }

    if output.format() != OutputFormat::Text {
        output.data(&found)?;
        return Ok(true);
    }
    for (template, ids) in &found {
        output.line(format!("{template}: {}", ids.join(", ")));
    }
    Ok(true)
}

pub fn execute_tags_list(spec_path: &Path, contains: Option<&str>, output: &Output) -> Result<bool, Error> {
    let spec = load_document(spec_path)?;
    let index = OperationIndex::build(&spec)?;
    let names = contains_filter(operations_by_tag(&index).into_keys(), contains);
    print_list("tags", &names, output)?;
    Ok(true)
}

pub fn execute_tags_show(spec_path: &Path, tag: &str, output: &Output) -> Result<bool, Error> {
    let spec = load_document(spec_path)?;
    let index = OperationIndex::build(&spec)?;
    let Some(operations) = operations_by_tag(&index).remove(tag) else {
        return Err(Error::spec_load(format!("Spec has no operations tagged '{tag}'")));
    };
    print_list("operations", &operations, output)?;
    Ok(true)
}

pub fn execute_summary(spec_path: &Path, output: &Output) -> Result<bool, Error> {
    let spec = load_document(spec_path)?;
    let summary = summarize(&spec);

    if output.format() != OutputFormat::Text {
        output.data(&summary)?;
        return Ok(true);
    }
    output.line(format!("OpenAPI spec ({}):", spec_path.display()));
    output.line(format!("{INDENT}Models: {}", summary.models));
    output.line(format!("{INDENT}Paths: {}", summary.paths));
    output.line(format!("{INDENT}Operation methods ({}):", summary.operations));
    for (method, count) in &summary.methods {
        output.line(format!("{INDENT}{INDENT}{method}: {count}"));
    }
    output.line(format!("{INDENT}Tags ({}):", summary.tags.len()));
    for (tag, count) in &summary.tags {
        output.line(format!("{INDENT}{INDENT}{tag}: {count}"));
    }
    Ok(true)
}
