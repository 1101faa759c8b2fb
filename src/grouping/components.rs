use super::graph::RelationGraph;
use std::collections::HashSet;

/// Package names that are mutually reachable, in depth-first pre-order.
pub type Component = Vec<String>;

/// Splits a relation graph into connected components.
pub struct ComponentFinder;

impl ComponentFinder {
    /// Partition the graph's nodes into maximal connected components.
    ///
    /// Nodes are seeded in the graph's enumeration order. Within a component,
    /// names appear in the order a recursive depth-first walk would visit
    /// them; the walk itself uses an explicit stack so deep chains cannot
    /// exhaust the call stack.
    pub fn find(graph: &RelationGraph) -> Vec<Component> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut components = Vec::new();

        for node in graph.nodes() {
            if visited.contains(node) {
                continue;
            }

            let mut component = Component::new();
            let mut stack = vec![node];

            while let Some(current) = stack.pop() {
                if !visited.insert(current) {
                    continue;
                }
                component.push(current.to_string());

                // Reversed so the first neighbor is walked first.
                let pending: Vec<&str> = graph
                    .neighbors(current)
                    .filter(|n| !visited.contains(n))
                    .collect();
                stack.extend(pending.into_iter().rev());
            }

            components.push(component);
        }

        components
    }
}
