use super::inversion::InvertedRelations;
use std::collections::{BTreeMap, BTreeSet};

/// Undirected graph over package names.
///
/// Adjacency is stored in both directions, so `neighbors(a)` contains `b`
/// exactly when `neighbors(b)` contains `a`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from a target -> dependents index.
    ///
    /// Each key becomes a node and gets an edge to every package listed for it.
    pub fn build(inverted: &InvertedRelations) -> Self {
        let mut graph = Self::new();

        for (package, related) in inverted {
            graph.add_node(package);
            for other in related {
                graph.add_edge(package, other);
            }
        }

        graph
    }

    pub fn add_node(&mut self, name: &str) {
        if !self.adjacency.contains_key(name) {
            self.adjacency.insert(name.to_string(), BTreeSet::new());
        }
    }

    /// Add `a <-> b`, creating either endpoint on first reference.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        self.add_node(a);
        self.add_node(b);
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.insert(b.to_string());
        }
        if let Some(neighbors) = self.adjacency.get_mut(b) {
            neighbors.insert(a.to_string());
        }
    }

    /// Neighbors of `name`; empty for unknown names.
    pub fn neighbors(&self, name: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(name)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Node names in enumeration order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges. A self-loop counts once.
    pub fn edge_count(&self) -> usize {
        let (loops, others) = self
            .adjacency
            .iter()
            .flat_map(|(node, set)| set.iter().map(move |n| n == node))
            .fold((0usize, 0usize), |(l, o), is_loop| {
                if is_loop { (l + 1, o) } else { (l, o + 1) }
            });
        loops + others / 2
    }
}
