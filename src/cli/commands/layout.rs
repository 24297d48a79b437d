//! Handlers for `oastool layout`.

use crate::cli::render::Output;
use crate::cli::OutputFormat;
use crate::error::Error;
use crate::layout::{self, check_layout};
use crate::spec::{load_document, OperationIndex};
use indexmap::IndexMap;
use std::path::Path;

const SEP: &str = "\n    ";

fn map_to_text(errors: &IndexMap<String, String>) -> String {
    let lines: Vec<String> = errors.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    format!("{SEP}{}", lines.join(SEP))
}

pub fn execute_layout_check(layout_path: &Path, start: &str, output: &Output) -> Result<bool, Error> {
    let data = layout::load_layout_document(layout_path)?;
    let document = data
        .as_object()
        .ok_or_else(|| Error::layout_load("Layout document must be a mapping"))?;
    let report = check_layout(document, start);

    if output.format() != OutputFormat::Text {
        output.data(&report)?;
        return Ok(report.is_clean());
    }

    if !report.missing_subcommands.is_empty() {
        output.line(format!(
            "Missing sub-commands for:{SEP}{}",
            report.missing_subcommands.join(SEP)
        ));
    }
    if !report.unused_subcommands.is_empty() {
        output.line(format!(
            "Unused sub-commands for:{SEP}{}",
            report.unused_subcommands.join(SEP)
        ));
    }
    if !report.misordered_subcommands.is_empty() {
        output.line(format!(
            "Sub-commands are misordered:{SEP}{}",
            report.misordered_subcommands.join(SEP)
        ));
    }
    if !report.missing_properties.is_empty() {
        output.line(format!(
            "Sub-commands have missing properties:{}",
            map_to_text(&report.missing_properties)
        ));
    }
    if !report.duplicate_operations.is_empty() {
        output.line(format!(
            "Duplicate operations in sub-commands:{}",
            map_to_text(&report.duplicate_operations)
        ));
    }
    if !report.misordered_operations.is_empty() {
        output.line(format!(
            "Sub-command operation orders should be:{}",
            map_to_text(&report.misordered_operations)
        ));
    }

    if report.is_clean() {
        output.info(format!("No errors found in {}", layout_path.display()));
    }
    Ok(report.is_clean())
}

pub fn execute_layout_validate(
    layout_path: &Path,
    spec_path: &Path,
    start: &str,
    output: &Output,
) -> Result<bool, Error> {
    let tree = layout::load_layout(layout_path, start)?;
    let spec = load_document(spec_path)?;
    let index = OperationIndex::build(&spec)?;
    let report = layout::validate(&tree, &index);

    if output.format() != OutputFormat::Text {
        output.data(&report)?;
        return Ok(!report.has_errors());
    }

    if report.has_errors() {
        output.line("Layout references operations missing from the spec:");
        for (parent, leaves) in &report.missing_operations {
            output.line(format!("    {parent}: {}", leaves.join(", ")));
        }
    }
    if !report.unreferenced_operations.is_empty() {
        output.info("Operations not referenced by any command:");
        for warning in report.warnings() {
            output.info(format!("    {warning}"));
        }
    }
    if !report.has_errors() {
        output.info(format!(
            "All layout operations found in {}",
            spec_path.display()
        ));
    }
    Ok(!report.has_errors())
}
