//! Handlers for `oastool diff` and `oastool prune`.

use crate::cli::render::Output;
use crate::cli::OutputFormat;
use crate::error::Error;
use crate::spec::editor::{
    remove_schema_tags, schema_operations, set_nullable_not_required, OperationFilter,
};
use crate::spec::{count_values, find_diffs, load_document};
use std::path::Path;

pub fn execute_diff(old_path: &Path, new_path: &Path, summary: bool, output: &Output) -> Result<bool, Error> {
    let old = load_document(old_path)?;
    let new = load_document(new_path)?;
    let diffs = find_diffs(&old, &new);

    if summary {
        match output.format() {
            OutputFormat::Text => output.line(format!(
                "{} differences between {} and {}",
                count_values(&diffs),
                old_path.display(),
                new_path.display()
            )),
            _ => output.data(&serde_json::json!({ "count": count_values(&diffs) }))?,
        }
        return Ok(true);
    }

    if output.format() != OutputFormat::Text {
        output.data(&diffs)?;
        return Ok(true);
    }
    if diffs.is_empty() {
        output.info("No differences found");
    }
    for entry in &diffs {
        output.line(entry);
    }
    Ok(true)
}

pub fn execute_prune(
    spec_path: &Path,
    remove_ops: &[String],
    allow_ops: &[String],
    remove_tags: bool,
    nullable_not_required: bool,
    output: &Output,
) -> Result<bool, Error> {
    let mut spec = load_document(spec_path)?;

    if !allow_ops.is_empty() {
        let filter = OperationFilter::Allow(allow_ops.iter().cloned().collect());
        spec = schema_operations(&spec, &filter)?;
    } else if !remove_ops.is_empty() {
        let filter = OperationFilter::Remove(remove_ops.iter().cloned().collect());
        spec = schema_operations(&spec, &filter)?;
    }
    if remove_tags {
        spec = remove_schema_tags(&spec);
    }
    if nullable_not_required {
        spec = set_nullable_not_required(&spec);
    }

    output.data(&spec)?;
    Ok(true)
}
