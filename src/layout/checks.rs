//! Format checks for flat layout documents.
//!
//! Each check collects every finding instead of stopping at the first one,
//! so an author can fix a layout in a single pass.

use crate::constants;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::info;

/// Findings of [`check_layout`], grouped per check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    /// Subcommand identifier -> missing properties
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub missing_properties: IndexMap<String, String>,
    /// Subcommand identifier -> operation names used more than once
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub duplicate_operations: IndexMap<String, String>,
    /// Subcommand identifier -> expected operation order
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub misordered_operations: IndexMap<String, String>,
    /// Subcommands defined but never referenced
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unused_subcommands: Vec<String>,
    /// Subcommands referenced but never defined
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_subcommands: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub misordered_subcommands: Vec<String>,
}

impl LayoutReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing_properties.is_empty()
            && self.duplicate_operations.is_empty()
            && self.misordered_operations.is_empty()
            && self.unused_subcommands.is_empty()
            && self.missing_subcommands.is_empty()
            && self.misordered_subcommands.is_empty()
    }

    /// Total number of findings
    #[must_use]
    pub fn len(&self) -> usize {
        self.missing_properties.len()
            + self.duplicate_operations.len()
            + self.misordered_operations.len()
            + self.unused_subcommands.len()
            + self.missing_subcommands.len()
            + self.misordered_subcommands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_clean()
    }
}

/// Runs every format check over a flat layout document
#[must_use]
pub fn check_layout(data: &Map<String, Value>, start: &str) -> LayoutReport {
    let (unused_subcommands, missing_subcommands) = subcommand_references(data, start);
    let report = LayoutReport {
        missing_properties: subcommand_missing_properties(data),
        duplicate_operations: operation_duplicates(data),
        misordered_operations: operation_order(data),
        unused_subcommands,
        missing_subcommands,
        misordered_subcommands: subcommand_order(data, start),
    };
    info!(target: "oastool::layout", findings = report.len(), "Checked layout");
    report
}

fn operations_of(sub_data: &Value) -> &[Value] {
    sub_data
        .get(constants::LAYOUT_OPERATIONS)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn op_name(op_data: &Value) -> Option<&str> {
    op_data.get(constants::LAYOUT_NAME).and_then(Value::as_str)
}

/// Subcommands lacking `description`/`operations`, and operations lacking
/// a name or a target
#[must_use]
pub fn subcommand_missing_properties(data: &Map<String, Value>) -> IndexMap<String, String> {
    let mut errors = IndexMap::new();
    for (sub_name, sub_data) in data {
        let mut missing: Vec<String> = Vec::new();

        for key in [constants::LAYOUT_DESCRIPTION, constants::LAYOUT_OPERATIONS] {
            if sub_data.get(key).is_none() {
                missing.push(key.to_string());
            }
        }

        for (index, op_data) in operations_of(sub_data).iter().enumerate() {
            let identifier = op_name(op_data)
                .filter(|name| !name.is_empty())
                .map_or_else(|| format!("operation[{index}]"), str::to_string);
            if op_data.get(constants::LAYOUT_NAME).is_none() {
                missing.push(format!("{identifier} {}", constants::LAYOUT_NAME));
            }
            if op_data.get(constants::LAYOUT_OPERATION_ID).is_none()
                && op_data.get(constants::LAYOUT_SUBCOMMAND_ID).is_none()
            {
                missing.push(format!(
                    "{identifier} {} or {}",
                    constants::LAYOUT_OPERATION_ID,
                    constants::LAYOUT_SUBCOMMAND_ID
                ));
            }
        }

        if !missing.is_empty() {
            errors.insert(sub_name.clone(), missing.join(", "));
        }
    }
    errors
}

/// Operation names used more than once within one subcommand
#[must_use]
pub fn operation_duplicates(data: &Map<String, Value>) -> IndexMap<String, String> {
    let mut errors = IndexMap::new();
    for (sub_name, sub_data) in data {
        let mut positions: IndexMap<&str, Vec<usize>> = IndexMap::new();
        for (index, op_data) in operations_of(sub_data).iter().enumerate() {
            let Some(name) = op_name(op_data).filter(|name| !name.is_empty()) else {
                continue;
            };
            positions.entry(name).or_default().push(index);
        }

        let mut multiples: Vec<String> = positions
            .iter()
            .filter(|(_, indices)| indices.len() > 1)
            .map(|(name, indices)| {
                let joined: Vec<String> = indices.iter().map(ToString::to_string).collect();
                format!("{name} at {}", joined.join(", "))
            })
            .collect();

        if !multiples.is_empty() {
            multiples.sort();
            errors.insert(sub_name.clone(), multiples.join("; "));
        }
    }
    errors
}

/// Subcommands whose operations are not sorted by name; the value is the
/// sorted order
#[must_use]
pub fn operation_order(data: &Map<String, Value>) -> IndexMap<String, String> {
    let mut errors = IndexMap::new();
    for (sub_name, sub_data) in data {
        let names: Vec<&str> = operations_of(sub_data)
            .iter()
            .map(|op| op_name(op).unwrap_or_default())
            .collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        if names != sorted {
            errors.insert(sub_name.clone(), sorted.join(", "));
        }
    }
    errors
}

/// Subcommands never referenced (other than `start`), and references to
/// subcommands that are not defined; both sorted
#[must_use]
pub fn subcommand_references(data: &Map<String, Value>, start: &str) -> (Vec<String>, Vec<String>) {
    let referenced: BTreeSet<&str> = data
        .values()
        .flat_map(operations_of)
        .filter_map(|op| op.get(constants::LAYOUT_SUBCOMMAND_ID).and_then(Value::as_str))
        .filter(|sub_id| !sub_id.is_empty())
        .collect();

    let unused = data
        .keys()
        .filter(|name| name.as_str() != start && !referenced.contains(name.as_str()))
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();
    let missing = referenced
        .iter()
        .filter(|sub_id| !data.contains_key(**sub_id))
        .map(ToString::to_string)
        .collect();
    (unused, missing)
}

/// Subcommand entries must start with `start`, the rest sorted by name
#[must_use]
pub fn subcommand_order(data: &Map<String, Value>, start: &str) -> Vec<String> {
    let mut misordered = Vec::new();
    let mut names: Vec<&str> = data.keys().map(String::as_str).collect();
    let Some(first) = names.first() else {
        return misordered;
    };

    if *first == start {
        names.remove(0);
    } else {
        misordered.push(format!("First should be {start}"));
    }

    for pair in names.windows(2) {
        if pair[1] < pair[0] {
            misordered.push(format!("{} < {}", pair[1], pair[0]));
        }
    }
    misordered
}
