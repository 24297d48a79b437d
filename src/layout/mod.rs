//! Command layout: the authored tree of commands, subcommands and operations.
//!
//! Two document shapes are accepted. The flat shape maps each subcommand
//! identifier to `{description, operations: [...]}` and links groups through
//! `subcommandId`, starting from a named entry (`main` by default):
//!
//! ```yaml
//! main:
//!   description: Pet store
//!   operations:
//!     - name: pets
//!       subcommandId: pets
//! pets:
//!   description: Manage pets
//!   operations:
//!     - name: get
//!       operationId: getPet
//! ```
//!
//! The nested shape is a single root node whose `children` are nodes again.

pub mod checks;
pub mod validate;

use crate::constants;
use crate::error::Error;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

pub use checks::{check_layout, LayoutReport};
pub use validate::{validate, ValidationReport};

/// One node of the command tree.
///
/// A node with children is a subcommand group; a childless node is a leaf
/// bound to the operation named by `identifier`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommandNode {
    pub command: String,
    pub identifier: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bugs: Vec<String>,
    #[serde(rename = "summaryFields", skip_serializing_if = "Vec::is_empty")]
    pub summary_fields: Vec<String>,
    /// Keys the layout carried that the tree does not interpret
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CommandNode>,
}

impl CommandNode {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Bug-tagged nodes stay in the tree but are hidden from normal listings
    #[must_use]
    pub fn is_bugged(&self) -> bool {
        !self.bugs.is_empty()
    }

    /// Children in layout order, without bug-tagged ones unless `include_bugged`
    pub fn visible_children(&self, include_bugged: bool) -> impl Iterator<Item = &Self> {
        self.children
            .iter()
            .filter(move |child| include_bugged || !child.is_bugged())
    }

    /// Children that are groups themselves
    #[must_use]
    pub fn subcommands(&self, include_bugged: bool) -> Vec<&Self> {
        self.visible_children(include_bugged)
            .filter(|child| !child.is_leaf())
            .collect()
    }

    /// Children that are leaf operations
    #[must_use]
    pub fn operations(&self, include_bugged: bool) -> Vec<&Self> {
        self.visible_children(include_bugged)
            .filter(|child| child.is_leaf())
            .collect()
    }

    /// Descends by successive command tokens; `None` if any token has no match.
    #[must_use]
    pub fn find(&self, tokens: &[&str]) -> Option<&Self> {
        let Some((first, rest)) = tokens.split_first() else {
            return Some(self);
        };
        self.children
            .iter()
            .find(|child| child.command == *first)
            .and_then(|child| child.find(rest))
    }

    /// Visits every leaf with its parent, including bug-tagged ones
    pub fn walk_leaves<'a>(&'a self, visit: &mut dyn FnMut(&'a Self, &'a Self)) {
        for child in &self.children {
            if child.is_leaf() {
                visit(self, child);
            } else {
                child.walk_leaves(visit);
            }
        }
    }
}

/// Reads a layout field holding either a list or CSV text
#[must_use]
pub fn field_to_list(data: &Value, field: &str) -> Vec<String> {
    match data.get(field) {
        Some(Value::Array(items)) => items
            .iter()
            .map(scalar_text)
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        Some(Value::Null | Value::Bool(false)) | None => Vec::new(),
        Some(other) => scalar_text(other)
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_extras(data: &Value) -> Map<String, Value> {
    data.as_object()
        .map(|map| {
            map.iter()
                .filter(|(key, _)| !constants::LAYOUT_FIELDS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn text_field(data: &Value, field: &str) -> String {
    data.get(field).and_then(Value::as_str).unwrap_or_default().to_string()
}

/// Builds the tree from a layout document.
///
/// # Errors
///
/// Returns `Error::LayoutLoad` if the document is not a mapping, the start
/// entry is missing, or subcommand references form a cycle.
pub fn parse_tree(data: &Value, start: &str) -> Result<CommandNode, Error> {
    let Some(document) = data.as_object() else {
        return Err(Error::layout_load("Layout document must be a mapping"));
    };

    if is_nested(document) {
        return Ok(nested_to_node(data));
    }

    let top = document
        .get(start)
        .ok_or_else(|| Error::layout_load(format!("Layout has no '{start}' entry")))?;
    let mut stack = vec![start.to_string()];
    let root = flat_to_node(document, start, start, top, &mut stack)?;
    debug!(
        target: "oastool::layout",
        start,
        children = root.children.len(),
        "Parsed layout"
    );
    Ok(root)
}

/// Reads and parses a layout file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid layout.
pub fn load_layout(path: &Path, start: &str) -> Result<CommandNode, Error> {
    let data = load_layout_document(path)?;
    parse_tree(&data, start)
}

/// Reads a layout file without building the tree
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_layout_document(path: &Path) -> Result<Value, Error> {
    crate::spec::load_document(path).map_err(|e| match e {
        Error::SpecLoad(msg) => Error::LayoutLoad(msg),
        other => other,
    })
}

fn is_nested(document: &Map<String, Value>) -> bool {
    document.contains_key(constants::LAYOUT_CHILDREN)
        || document.contains_key(constants::LAYOUT_COMMAND)
        || document.contains_key(constants::LAYOUT_IDENTIFIER)
}

fn flat_to_node(
    document: &Map<String, Value>,
    identifier: &str,
    command: &str,
    item: &Value,
    stack: &mut Vec<String>,
) -> Result<CommandNode, Error> {
    let mut children = Vec::new();
    let operations = item
        .get(constants::LAYOUT_OPERATIONS)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for op_data in operations {
        let name = text_field(op_data, constants::LAYOUT_NAME);

        if let Some(sub_id) = op_data
            .get(constants::LAYOUT_SUBCOMMAND_ID)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
        {
            if stack.iter().any(|seen| seen == sub_id) {
                return Err(Error::layout_load(format!(
                    "Subcommand '{sub_id}' references itself through {}",
                    stack.join(" -> ")
                )));
            }
            let empty = Value::Object(Map::new());
            let sub_item = document.get(sub_id).unwrap_or(&empty);
            stack.push(sub_id.to_string());
            let mut child = flat_to_node(document, sub_id, &name, sub_item, stack)?;
            stack.pop();
            // Bug tags on the reference line apply to the group as well
            for bug in field_to_list(op_data, constants::LAYOUT_BUG_IDS) {
                if !child.bugs.contains(&bug) {
                    child.bugs.push(bug);
                }
            }
            children.push(child);
            continue;
        }

        let op_id = text_field(op_data, constants::LAYOUT_OPERATION_ID);
        children.push(CommandNode {
            command: name,
            identifier: op_id,
            description: text_field(op_data, constants::LAYOUT_DESCRIPTION),
            bugs: field_to_list(op_data, constants::LAYOUT_BUG_IDS),
            summary_fields: field_to_list(op_data, constants::LAYOUT_SUMMARY_FIELDS),
            extra: parse_extras(op_data),
            children: Vec::new(),
        });
    }

    Ok(CommandNode {
        command: command.to_string(),
        identifier: identifier.to_string(),
        description: text_field(item, constants::LAYOUT_DESCRIPTION),
        bugs: field_to_list(item, constants::LAYOUT_BUG_IDS),
        summary_fields: field_to_list(item, constants::LAYOUT_SUMMARY_FIELDS),
        extra: parse_extras(item),
        children,
    })
}

fn nested_to_node(item: &Value) -> CommandNode {
    let command = item
        .get(constants::LAYOUT_COMMAND)
        .or_else(|| item.get(constants::LAYOUT_NAME))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let identifier = item
        .get(constants::LAYOUT_IDENTIFIER)
        .or_else(|| item.get(constants::LAYOUT_OPERATION_ID))
        .and_then(Value::as_str)
        .map_or_else(|| command.clone(), str::to_string);

    let children = item
        .get(constants::LAYOUT_CHILDREN)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(nested_to_node).collect())
        .unwrap_or_default();

    CommandNode {
        command,
        identifier,
        description: text_field(item, constants::LAYOUT_DESCRIPTION),
        bugs: field_to_list(item, constants::LAYOUT_BUG_IDS),
        summary_fields: field_to_list(item, constants::LAYOUT_SUMMARY_FIELDS),
        extra: parse_extras(item),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layout() -> Value {
        json!({
            "main": {
                "description": "Pet store",
                "operations": [
                    {"name": "owners", "subcommandId": "owners"},
                    {"name": "pets", "subcommandId": "pets"},
                    {"name": "version", "operationId": "getVersion", "bugIds": "BUG-1, BUG-2"}
                ]
            },
            "owners": {
                "description": "Owners",
                "operations": [{"name": "list", "operationId": "listOwners"}],
                "bugIds": ["BUG-9"]
            },
            "pets": {
                "description": "Pets",
                "operations": [
                    {"name": "get", "operationId": "getPet", "summaryFields": ["name", "tag"], "x-hint": 3},
                    {"name": "list", "operationId": "listPets"}
                ]
            }
        })
    }

    #[test]
    fn test_parse_flat_layout() {
        let tree = parse_tree(&layout(), "main").unwrap();
        assert_eq!(tree.identifier, "main");
        assert_eq!(tree.description, "Pet store");
        assert_eq!(tree.children.len(), 3);

        let get = tree.find(&["pets", "get"]).unwrap();
        assert_eq!(get.identifier, "getPet");
        assert_eq!(get.summary_fields, vec!["name", "tag"]);
        assert_eq!(get.extra.get("x-hint"), Some(&json!(3)));
    }

    #[test]
    fn test_bug_filtering() {
        let tree = parse_tree(&layout(), "main").unwrap();
        let subs: Vec<&str> = tree.subcommands(false).iter().map(|n| n.command.as_str()).collect();
        assert_eq!(subs, vec!["pets"]);
        assert_eq!(tree.subcommands(true).len(), 2);
        assert!(tree.operations(false).is_empty());

        let bugged = tree.operations(true);
        assert_eq!(bugged.len(), 1);
        assert_eq!(bugged[0].bugs, vec!["BUG-1", "BUG-2"]);
    }

    #[test]
    fn test_find_missing_segment_returns_none() {
        let tree = parse_tree(&layout(), "main").unwrap();
        assert!(tree.find(&["pets", "delete"]).is_none());
        assert!(tree.find(&["nothing"]).is_none());
        assert_eq!(tree.find(&[]).map(|n| n.identifier.as_str()), Some("main"));
    }

    #[test]
    fn test_missing_start_is_error() {
        assert!(matches!(
            parse_tree(&layout(), "other"),
            Err(Error::LayoutLoad(_))
        ));
    }

    #[test]
    fn test_subcommand_cycle_is_error() {
        let data = json!({
            "main": {"operations": [{"name": "a", "subcommandId": "a"}]},
            "a": {"operations": [{"name": "back", "subcommandId": "main"}]}
        });
        assert!(matches!(parse_tree(&data, "main"), Err(Error::LayoutLoad(_))));
    }

    #[test]
    fn test_parse_nested_layout() {
        let data = json!({
            "command": "main",
            "identifier": "main",
            "children": [
                {"command": "pets", "identifier": "pets", "children": [
                    {"command": "get", "identifier": "getPet", "bugIds": ["B1"]}
                ]}
            ]
        });
        let tree = parse_tree(&data, "ignored").unwrap();
        let get = tree.find(&["pets", "get"]).unwrap();
        assert!(get.is_bugged());
        assert_eq!(get.identifier, "getPet");
    }

    #[test]
    fn test_field_to_list_variants() {
        let data = json!({"csv": "a, b,,c", "list": ["x", " ", 7], "empty": ""});
        assert_eq!(field_to_list(&data, "csv"), vec!["a", "b", "c"]);
        assert_eq!(field_to_list(&data, "list"), vec!["x", "7"]);
        assert!(field_to_list(&data, "empty").is_empty());
        assert!(field_to_list(&data, "missing").is_empty());
    }
}
