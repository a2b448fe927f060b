//! Name-based module links over petgraph.
//!
//! An edge `pkg.x` in module A links A to every analyzed module whose stem
//! is `pkg`. This is a heuristic: nothing is resolved against the file
//! system, and modules sharing a stem are all linked.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use super::engine::DependencyGraph;
use super::types::ModuleId;

/// Weight of a link: how many dependency edges produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkData {
    pub count: usize,
}

/// Directed module-to-module links derived from a [`DependencyGraph`].
pub struct ModuleLinks<'g> {
    graph: DiGraph<&'g ModuleId, LinkData>,
    /// Node for each module, indexed by the module's graph position.
    nodes: Vec<NodeIndex>,
}

impl<'g> ModuleLinks<'g> {
    pub fn build(deps: &'g DependencyGraph) -> Self {
        let mut graph: DiGraph<&'g ModuleId, LinkData> =
            DiGraph::with_capacity(deps.len(), deps.edge_count());
        let nodes: Vec<NodeIndex> = deps.modules().map(|m| graph.add_node(m)).collect();

        for (position, (_, edges)) in deps.iter().enumerate() {
            let from = nodes[position];
            for edge in edges {
                for &target in deps.positions_with_stem(edge.leading_segment()) {
                    let to = nodes[target];
                    match graph.find_edge(from, to) {
                        Some(existing) => graph[existing].count += 1,
                        None => {
                            graph.add_edge(from, to, LinkData { count: 1 });
                        }
                    }
                }
            }
        }

        Self { graph, nodes }
    }

    /// Number of dependency edges pointing at the module at `position`.
    pub fn incoming_count(&self, position: usize) -> usize {
        self.nodes
            .get(position)
            .map(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .map(|e| e.weight().count)
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Whether the module at `from` has at least one edge naming the module at `to`.
    pub fn links(&self, from: usize, to: usize) -> bool {
        match (self.nodes.get(from), self.nodes.get(to)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }
}
