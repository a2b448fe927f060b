//! Direct circular dependency detection.
//!
//! Reports pairs of modules that name each other in their imports
//! (A imports from B and B imports from A). Longer cycles such as
//! A -> B -> C -> A are out of reach by construction.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::engine::DependencyGraph;
use super::links::ModuleLinks;

/// Two module short names that depend on each other, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CyclePair {
    pub module_a: String,
    pub module_b: String,
}

impl CyclePair {
    /// Build a pair with its names in canonical (sorted) order.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        let (first, second) = (first.into(), second.into());
        if first <= second {
            Self {
                module_a: first,
                module_b: second,
            }
        } else {
            Self {
                module_a: second,
                module_b: first,
            }
        }
    }

    pub fn as_tuple(&self) -> (&str, &str) {
        (&self.module_a, &self.module_b)
    }
}

/// Find mutual dependencies, each pair once, in discovery order.
pub fn detect_cycles(deps: &DependencyGraph) -> Vec<CyclePair> {
    let links = ModuleLinks::build(deps);
    detect_cycles_with(deps, &links)
}

/// Same as [`detect_cycles`], reusing already-built links.
pub fn detect_cycles_with(deps: &DependencyGraph, links: &ModuleLinks<'_>) -> Vec<CyclePair> {
    let mut seen: HashSet<CyclePair> = HashSet::new();
    let mut cycles = Vec::new();

    for (position, (module, edges)) in deps.iter().enumerate() {
        let name = module.stem();
        for edge in edges {
            let dep_name = edge.leading_segment();
            if dep_name == name {
                continue;
            }
            for &target in deps.positions_with_stem(dep_name) {
                if !links.links(target, position) {
                    continue;
                }
                let pair = CyclePair::new(name.as_str(), dep_name);
                if seen.insert(pair.clone()) {
                    cycles.push(pair);
                }
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{DependencyEdge, ModuleId};

    fn graph(modules: &[(&str, &[&str])]) -> DependencyGraph {
        let mut builder = DependencyGraph::builder();
        for (path, edges) in modules {
            let edges = edges.iter().map(|e| DependencyEdge::from(*e)).collect();
            builder.insert(ModuleId::new(*path), edges).unwrap();
        }
        builder.build()
    }

    #[test]
    fn test_mutual_pair_reported_once() {
        let deps = graph(&[("a.py", &["b.foo"]), ("b.py", &["a.bar"])]);
        let cycles = detect_cycles(&deps);
        assert_eq!(cycles, vec![CyclePair::new("a", "b")]);
        assert_eq!(cycles[0].as_tuple(), ("a", "b"));
    }

    #[test]
    fn test_pair_is_canonicalized() {
        let deps = graph(&[("zeta.py", &["alpha.x", "alpha.y"]), ("alpha.py", &["zeta"])]);
        let cycles = detect_cycles(&deps);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].module_a, "alpha");
        assert_eq!(cycles[0].module_b, "zeta");
    }

    #[test]
    fn test_one_way_dependency_is_not_a_cycle() {
        let deps = graph(&[("a.py", &["b.foo"]), ("b.py", &["os"])]);
        assert!(detect_cycles(&deps).is_empty());
    }

    #[test]
    fn test_self_reference_excluded() {
        let deps = graph(&[("a.py", &["a.helper"])]);
        assert!(detect_cycles(&deps).is_empty());
    }

    #[test]
    fn test_three_node_cycle_not_detected() {
        let deps = graph(&[("a.py", &["b.x"]), ("b.py", &["c.x"]), ("c.py", &["a.x"])]);
        assert!(detect_cycles(&deps).is_empty());
    }

    #[test]
    fn test_relative_edges_ignored() {
        let deps = graph(&[("a.py", &[".b"]), ("b.py", &[".a"])]);
        assert!(detect_cycles(&deps).is_empty());
    }

    #[test]
    fn test_discovery_order() {
        let deps = graph(&[
            ("c.py", &["d.x"]),
            ("d.py", &["c.x"]),
            ("a.py", &["b.x"]),
            ("b.py", &["a.x"]),
        ]);
        let cycles = detect_cycles(&deps);
        assert_eq!(cycles, vec![CyclePair::new("c", "d"), CyclePair::new("a", "b")]);
    }
}
