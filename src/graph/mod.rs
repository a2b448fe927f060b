//! Dependency graph: the structural backbone of modgraph.
//!
//! Provides the data model, import resolution, the graph itself, the
//! name-based link view, cycle detection and directory building.

pub mod builder;
pub mod cycles;
pub mod engine;
pub mod links;
pub mod resolver;
pub mod types;

pub use builder::{build_from_files, build_from_sources, build_graph, BuildOutcome};
pub use cycles::{detect_cycles, CyclePair};
pub use engine::{DependencyGraph, DependencyGraphBuilder, ImportCounts};
pub use links::ModuleLinks;
pub use resolver::resolve_imports;
pub use types::{
    DependencyEdge, FileExtractions, ImportKind, ImportStatement, ImportedName, ModuleFailure,
    ModuleId,
};
