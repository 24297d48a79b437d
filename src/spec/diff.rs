//! Structural differences between two document trees.

use crate::utils::shorten_text;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Display width for values in a diff summary line
const DISPLAY_WIDTH: usize = 16;

/// One step of a path into a document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// What happened at a path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "change", rename_all = "lowercase")]
pub enum DiffChange {
    Added { new: Value },
    Removed { old: Value },
    Changed { old: Value, new: Value },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffEntry {
    pub path: Vec<PathSegment>,
    #[serde(flatten)]
    pub change: DiffChange,
}

impl DiffEntry {
    /// Dotted path, e.g. `paths./pets.get.parameters[0].name`
    #[must_use]
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
            }
        }
        out
    }
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path_string();
        match &self.change {
            DiffChange::Added { .. } => write!(f, "{path}: added"),
            DiffChange::Removed { .. } => write!(f, "{path}: removed"),
            DiffChange::Changed { old, new } => write!(
                f,
                "{path}: {} != {}",
                shorten_text(&display_value(old), DISPLAY_WIDTH),
                shorten_text(&display_value(new), DISPLAY_WIDTH)
            ),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Computes the differences from `old` to `new`.
///
/// Mappings are compared key by key, keys from `old` first in document order,
/// then keys only present in `new`. Sequences are compared by position, so a
/// reordering shows up as changes. Equal values produce no entry.
#[must_use]
pub fn find_diffs(old: &Value, new: &Value) -> Vec<DiffEntry> {
    let mut entries = Vec::new();
    let mut path = Vec::new();
    diff_values(old, new, &mut path, &mut entries);
    tracing::debug!(target: "oastool::diff", entries = entries.len(), "Computed diff");
    entries
}

fn diff_values(old: &Value, new: &Value, path: &mut Vec<PathSegment>, out: &mut Vec<DiffEntry>) {
    match (old, new) {
        (Value::Object(old_map), Value::Object(new_map)) => {
            for (key, old_item) in old_map {
                path.push(PathSegment::Key(key.clone()));
                match new_map.get(key) {
                    Some(new_item) => diff_values(old_item, new_item, path, out),
                    None => out.push(DiffEntry {
                        path: path.clone(),
                        change: DiffChange::Removed {
                            old: old_item.clone(),
                        },
                    }),
                }
                path.pop();
            }
            for (key, new_item) in new_map {
                if old_map.contains_key(key) {
                    continue;
                }
                path.push(PathSegment::Key(key.clone()));
                out.push(DiffEntry {
                    path: path.clone(),
                    change: DiffChange::Added {
                        new: new_item.clone(),
                    },
                });
                path.pop();
            }
        }
        (Value::Array(old_items), Value::Array(new_items)) => {
            let longest = old_items.len().max(new_items.len());
            for index in 0..longest {
                path.push(PathSegment::Index(index));
                match (old_items.get(index), new_items.get(index)) {
                    (Some(o), Some(n)) => diff_values(o, n, path, out),
                    (Some(o), None) => out.push(DiffEntry {
                        path: path.clone(),
                        change: DiffChange::Removed { old: o.clone() },
                    }),
                    (None, Some(n)) => out.push(DiffEntry {
                        path: path.clone(),
                        change: DiffChange::Added { new: n.clone() },
                    }),
                    (None, None) => {}
                }
                path.pop();
            }
        }
        _ => {
            if old != new {
                out.push(DiffEntry {
                    path: path.clone(),
                    change: DiffChange::Changed {
                        old: old.clone(),
                        new: new.clone(),
                    },
                });
            }
        }
    }
}

/// Number of leaf change entries
#[must_use]
pub const fn count_values(entries: &[DiffEntry]) -> usize {
    entries.len()
}
