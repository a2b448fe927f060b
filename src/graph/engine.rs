//! The dependency graph: every analyzed module and what it imports.
//!
//! Built once through [`DependencyGraphBuilder`] and read-only afterwards.
//! Metrics and cycle detection borrow it and return plain values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::types::{DependencyEdge, ModuleId};
use crate::error::{ModgraphError, Result};

/// Ordered mapping from module to its dependency edges.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Modules in insertion order, each with its edges in discovery order.
    entries: Vec<(ModuleId, Vec<DependencyEdge>)>,
    /// Index: module -> position in `entries`.
    module_index: HashMap<ModuleId, usize>,
    /// Index: module stem -> positions of every module with that stem.
    stem_index: HashMap<String, Vec<usize>>,
}

impl DependencyGraph {
    /// Start building a new graph.
    pub fn builder() -> DependencyGraphBuilder {
        DependencyGraphBuilder::default()
    }

    // ─── Query Operations ───────────────────────────────────────

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the module was analyzed successfully.
    pub fn contains(&self, module: &ModuleId) -> bool {
        self.module_index.contains_key(module)
    }

    /// Edges of a module, or `None` if the module is not in the graph.
    pub fn dependencies(&self, module: &ModuleId) -> Option<&[DependencyEdge]> {
        self.module_index
            .get(module)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    /// All modules in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleId> {
        self.entries.iter().map(|(module, _)| module)
    }

    /// Iterate `(module, edges)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ModuleId, &[DependencyEdge])> {
        self.entries
            .iter()
            .map(|(module, edges)| (module, edges.as_slice()))
    }

    /// Positions of all modules whose short name equals `stem`.
    pub fn positions_with_stem(&self, stem: &str) -> &[usize] {
        self.stem_index
            .get(stem)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    /// Total number of edges across all modules, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|(_, edges)| edges.len()).sum()
    }

    /// Absolute vs relative edge totals across the graph.
    pub fn import_counts(&self) -> ImportCounts {
        let mut counts = ImportCounts::default();
        for edge in self.entries.iter().flat_map(|(_, edges)| edges) {
            if edge.is_relative() {
                counts.relative += 1;
            } else {
                counts.absolute += 1;
            }
        }
        counts
    }
}

/// Accumulates resolved modules, then freezes them into a [`DependencyGraph`].
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    graph: DependencyGraph,
}

impl DependencyGraphBuilder {
    /// Add a module with its resolved edges. A module may only be added once.
    pub fn insert(&mut self, module: ModuleId, edges: Vec<DependencyEdge>) -> Result<()> {
        if self.graph.module_index.contains_key(&module) {
            return Err(ModgraphError::DuplicateModule(module.path().to_path_buf()));
        }

        let position = self.graph.entries.len();
        self.graph
            .stem_index
            .entry(module.stem())
            .or_default()
            .push(position);
        self.graph.module_index.insert(module.clone(), position);
        self.graph.entries.push((module, edges));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.graph.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.entries.is_empty()
    }

    pub fn build(self) -> DependencyGraph {
        debug!(
            modules = self.graph.len(),
            edges = self.graph.edge_count(),
            "dependency graph assembled"
        );
        self.graph
    }
}

/// Counts of absolute and relative dependency edges.
///
/// An edge is relative when its string starts with `.`, whatever its shape
/// (per-symbol, wildcard or bare module).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCounts {
    pub absolute: usize,
    pub relative: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(values: &[&str]) -> Vec<DependencyEdge> {
        values.iter().map(|v| DependencyEdge::from(*v)).collect()
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::builder().build();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.import_counts(), ImportCounts::default());
    }

    #[test]
    fn test_module_without_imports_is_present() {
        let mut builder = DependencyGraph::builder();
        builder.insert(ModuleId::new("empty.py"), Vec::new()).unwrap();
        let graph = builder.build();

        let deps = graph.dependencies(&ModuleId::new("empty.py"));
        assert_eq!(deps, Some(&[][..]));
        assert!(graph.dependencies(&ModuleId::new("other.py")).is_none());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut builder = DependencyGraph::builder();
        builder.insert(ModuleId::new("z.py"), edges(&["os"])).unwrap();
        builder.insert(ModuleId::new("a.py"), edges(&["z.x"])).unwrap();
        let graph = builder.build();

        let order: Vec<String> = graph.modules().map(|m| m.stem()).collect();
        assert_eq!(order, vec!["z", "a"]);
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let mut builder = DependencyGraph::builder();
        builder.insert(ModuleId::new("a.py"), Vec::new()).unwrap();
        let err = builder.insert(ModuleId::new("a.py"), edges(&["os"])).unwrap_err();
        assert!(matches!(err, ModgraphError::DuplicateModule(_)));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_stem_lookup_spans_packages() {
        let mut builder = DependencyGraph::builder();
        builder.insert(ModuleId::new("pkg1/utils.py"), Vec::new()).unwrap();
        builder.insert(ModuleId::new("pkg2/utils.py"), Vec::new()).unwrap();
        builder.insert(ModuleId::new("main.py"), Vec::new()).unwrap();
        let graph = builder.build();

        assert_eq!(graph.positions_with_stem("utils"), &[0, 1]);
        assert_eq!(graph.positions_with_stem("main"), &[2]);
        assert!(graph.positions_with_stem("missing").is_empty());
    }

    #[test]
    fn test_import_counts_by_leading_dot() {
        let mut builder = DependencyGraph::builder();
        builder
            .insert(ModuleId::new("a.py"), edges(&["os", ".e", "..pkg.*", "pkg.*"]))
            .unwrap();
        let graph = builder.build();

        let counts = graph.import_counts();
        assert_eq!(counts.absolute, 2);
        assert_eq!(counts.relative, 2);
        assert_eq!(graph.edge_count(), 4);
    }
}
