//! Coupling metrics over the dependency graph.
//!
//! - **Ce (efferent)**: edges leaving a module, duplicates included.
//! - **Ca (afferent)**: edges anywhere in the graph whose leading segment
//!   names this module's stem. Name-based, so modules sharing a stem share
//!   their incoming count.
//! - **Instability**: Ce / (Ca + Ce), 0.0 when both are zero.

use serde::{Deserialize, Serialize};

use crate::graph::links::ModuleLinks;
use crate::graph::{DependencyGraph, ModuleId};

/// Coupling numbers for one module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouplingResult {
    pub afferent: usize,
    pub efferent: usize,
    /// Full precision; round only when displaying.
    pub instability: f64,
}

impl CouplingResult {
    pub fn new(afferent: usize, efferent: usize) -> Self {
        Self {
            afferent,
            efferent,
            instability: instability(afferent, efferent),
        }
    }
}

/// Ce / (Ca + Ce), or 0.0 when the module has no coupling at all.
pub fn instability(afferent: usize, efferent: usize) -> f64 {
    let total = afferent + efferent;
    if total == 0 {
        0.0
    } else {
        efferent as f64 / total as f64
    }
}

/// Per-module coupling, in graph order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouplingReport {
    entries: Vec<(ModuleId, CouplingResult)>,
}

impl CouplingReport {
    pub fn get(&self, module: &ModuleId) -> Option<&CouplingResult> {
        self.entries
            .iter()
            .find(|(m, _)| m == module)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModuleId, &CouplingResult)> {
        self.entries.iter().map(|(m, r)| (m, r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute coupling for every module in the graph.
pub fn compute_coupling(graph: &DependencyGraph) -> CouplingReport {
    let links = ModuleLinks::build(graph);
    compute_coupling_with(graph, &links)
}

/// Same as [`compute_coupling`], reusing already-built links.
pub fn compute_coupling_with(graph: &DependencyGraph, links: &ModuleLinks<'_>) -> CouplingReport {
    let entries = graph
        .iter()
        .enumerate()
        .map(|(position, (module, edges))| {
            let result = CouplingResult::new(links.incoming_count(position), edges.len());
            (module.clone(), result)
        })
        .collect();

    CouplingReport { entries }
}
