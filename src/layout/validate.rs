//! Cross-checks a command tree against the operation index.

use crate::layout::CommandNode;
use crate::spec::{OperationIndex, OperationRecord};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of [`validate`]; both parts are collected, never fail-fast
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Parent identifier -> leaf identifiers missing from the spec, in tree order
    pub missing_operations: IndexMap<String, Vec<String>>,
    /// Spec operations no leaf claims, in document order
    pub unreferenced_operations: IndexMap<String, OperationRecord>,
}

impl ValidationReport {
    /// Missing operations are authoring errors; unreferenced ones are advisory
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.missing_operations.is_empty()
    }

    /// Human-readable advisory lines for unreferenced operations
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.unreferenced_operations
            .values()
            .map(|record| {
                format!(
                    "Operation '{}' ({}) is not referenced by any command",
                    record.operation_id,
                    record.location()
                )
            })
            .collect()
    }
}

/// Leaves whose identifier is not a spec operation, grouped by parent
#[must_use]
pub fn missing_operations(tree: &CommandNode, index: &OperationIndex) -> IndexMap<String, Vec<String>> {
    let mut missing: IndexMap<String, Vec<String>> = IndexMap::new();
    tree.walk_leaves(&mut |parent, leaf| {
        if !index.contains(&leaf.identifier) {
            missing
                .entry(parent.identifier.clone())
                .or_default()
                .push(leaf.identifier.clone());
        }
    });
    missing
}

/// Spec operations that no leaf claims.
///
/// Bug-tagged leaves still claim their operation.
#[must_use]
pub fn unreferenced_operations(
    tree: &CommandNode,
    index: &OperationIndex,
) -> IndexMap<String, OperationRecord> {
    let mut claimed: IndexSet<&str> = IndexSet::new();
    tree.walk_leaves(&mut |_, leaf| {
        claimed.insert(leaf.identifier.as_str());
    });

    index
        .iter()
        .filter(|(operation_id, _)| !claimed.contains(operation_id.as_str()))
        .map(|(operation_id, record)| (operation_id.clone(), record.clone()))
        .collect()
}

/// Runs both checks
#[must_use]
pub fn validate(tree: &CommandNode, index: &OperationIndex) -> ValidationReport {
    let report = ValidationReport {
        missing_operations: missing_operations(tree, index),
        unreferenced_operations: unreferenced_operations(tree, index),
    };

    for (parent, leaves) in &report.missing_operations {
        warn!(
            target: "oastool::layout",
            subcommand = %parent,
            operations = %leaves.join(", "),
            "Layout references operations missing from the spec"
        );
    }
    info!(
        target: "oastool::layout",
        missing = report.missing_operations.values().map(Vec::len).sum::<usize>(),
        unreferenced = report.unreferenced_operations.len(),
        "Validated layout"
    );
    report
}
