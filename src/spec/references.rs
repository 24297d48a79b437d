//! Model reference graph and closure queries.
//!
//! Nodes are model names from `components.schemas`; an edge `A -> B` means the
//! body of `A` names `B` through a `$ref` somewhere (properties, composition
//! branches, array items). Cycles and self-references are ordinary input, so
//! every traversal carries a visited set.

use crate::constants;
use crate::utils::short_reference_name;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet, VecDeque};
use tracing::debug;

/// Short names of every `$ref` target found anywhere inside `fragment`.
///
/// A one-shot extraction; references are not followed through the model table.
#[must_use]
pub fn find_references(fragment: &Value) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    collect_references(fragment, &mut found);
    found
}

fn collect_references(value: &Value, found: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, item) in map {
                if key == constants::FIELD_REF {
                    if let Some(target) = item.as_str() {
                        found.insert(short_reference_name(target).to_string());
                    }
                } else {
                    collect_references(item, found);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_references(item, found);
            }
        }
        _ => {}
    }
}

/// Directed graph of model-to-model references
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceGraph {
    edges: IndexMap<String, IndexSet<String>>,
}

impl ReferenceGraph {
    /// Builds the graph from a model table, one node per model in document order.
    ///
    /// Edges to names missing from the table are kept; queries simply find no
    /// outgoing edges for them.
    #[must_use]
    pub fn build(models: &Map<String, Value>) -> Self {
        let edges: IndexMap<String, IndexSet<String>> = models
            .iter()
            .map(|(name, body)| {
                let mut direct = BTreeSet::new();
                collect_references(body, &mut direct);
                (name.clone(), direct.into_iter().collect())
            })
            .collect();

        debug!(
            target: "oastool::references",
            models = edges.len(),
            edges = edges.values().map(IndexSet::len).sum::<usize>(),
            "Built reference graph"
        );
        Self { edges }
    }

    /// Builds the graph from the `components.schemas` section of a spec
    #[must_use]
    pub fn from_spec(spec: &Value) -> Self {
        crate::spec::models(spec).map_or_else(Self::default, Self::build)
    }

    /// Direct references of `model`
    #[must_use]
    pub fn direct(&self, model: &str) -> Option<&IndexSet<String>> {
        self.edges.get(model)
    }

    #[must_use]
    pub fn contains(&self, model: &str) -> bool {
        self.edges.contains_key(model)
    }

    /// Model names in document order
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Every model reachable from `start` through at least one edge.
    ///
    /// A start name is part of the result only when a different start name
    /// reaches it. A cycle leading back to the same name does not count.
    #[must_use]
    pub fn unroll<S: AsRef<str>>(&self, start: &[S]) -> BTreeSet<String> {
        let starting: IndexSet<&str> = start.iter().map(AsRef::as_ref).collect();
        let mut result: BTreeSet<String> = BTreeSet::new();

        for &origin in &starting {
            for reached in self.reachable_from(origin) {
                if reached != origin {
                    result.insert(reached.to_string());
                }
            }
        }
        result
    }

    /// Forward BFS over edges, not counting `origin` unless an edge leads to it
    fn reachable_from(&self, origin: &str) -> HashSet<&str> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([origin]);

        while let Some(current) = queue.pop_front() {
            for next in self.edges.get(current).into_iter().flatten() {
                if visited.insert(next.as_str()) {
                    queue.push_back(next.as_str());
                }
            }
        }
        visited
    }

    /// Every model whose closure includes `target`; the inverse of [`Self::unroll`].
    #[must_use]
    pub fn reverse_closure(&self, target: &str) -> BTreeSet<String> {
        let reverse = self.reverse_edges();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([target]);

        while let Some(current) = queue.pop_front() {
            for &prev in reverse.get(current).into_iter().flatten() {
                if visited.insert(prev) {
                    queue.push_back(prev);
                }
            }
        }

        visited.remove(target);
        visited.into_iter().map(str::to_string).collect()
    }

    fn reverse_edges(&self) -> IndexMap<&str, Vec<&str>> {
        let mut reverse: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (source, targets) in &self.edges {
            for target in targets {
                reverse.entry(target.as_str()).or_default().push(source.as_str());
            }
        }
        reverse
    }
}

/// Sub-table of `models` restricted to `wanted`, bodies untouched and in table order
#[must_use]
pub fn filter_models<S: AsRef<str>>(models: &Map<String, Value>, wanted: &[S]) -> Map<String, Value> {
    let wanted: HashSet<&str> = wanted.iter().map(AsRef::as_ref).collect();
    models
        .iter()
        .filter(|(name, _)| wanted.contains(name.as_str()))
        .map(|(name, body)| (name.clone(), body.clone()))
        .collect()
}
