//! # modgraph
//!
//! Module dependency graph for Python repositories.
//!
//! modgraph discovers the Python modules under a project root, extracts their
//! imports, and reports how tightly the modules are coupled.
//!
//! ## Key Features
//!
//! - **Import graph**: one fully-qualified edge per imported symbol
//! - **Coupling**: afferent, efferent and instability per module
//! - **Cycles**: mutual `A <-> B` imports between modules
//! - **Fault isolation**: a broken file is reported, never fatal
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modgraph::{analyze_repository, AnalyzerConfig};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let analysis = analyze_repository(root, &AnalyzerConfig::discover(root));
//!
//! for pair in &analysis.cycles {
//!     println!("{} <-> {}", pair.module_a, pair.module_b);
//! }
//! println!("{}", analysis.report().to_json().unwrap());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod lint;
pub mod metrics;
pub mod parser;
pub mod report;

// Re-exports for convenience
pub use error::{ModgraphError, Result};

pub use analysis::{analyze_repository, Analysis};
pub use config::{AnalyzerConfig, OutputFormat, RunOptions};
pub use discovery::discover_modules;
pub use graph::{
    build_from_files, build_from_sources, build_graph, detect_cycles, resolve_imports,
    BuildOutcome, CyclePair, DependencyEdge, DependencyGraph, ImportStatement, ModuleFailure,
    ModuleId,
};
pub use lint::{check_sources, LintReport};
pub use metrics::{compute_coupling, CouplingReport, CouplingResult};
pub use parser::{extract_file, SupportedLanguage};
pub use report::AnalysisReport;
