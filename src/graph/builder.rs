//! Graph builder: scans a directory and builds the dependency graph.
//!
//! Reads and parses every discovered module in parallel, resolves its
//! imports, and assembles the graph in discovery order. A module that
//! cannot be read or parsed is left out and reported as a failure; it
//! never stops the rest of the run.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::engine::DependencyGraph;
use super::resolver::resolve_imports;
use super::types::{FileExtractions, ModuleFailure};
use crate::config::AnalyzerConfig;
use crate::discovery::discover_modules;
use crate::error::ModgraphError;
use crate::parser::extract_file;

/// Everything produced by one build.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub graph: DependencyGraph,
    /// Successful extractions, in the same order as the graph.
    pub extractions: Vec<FileExtractions>,
    /// Modules left out of the graph and why.
    pub failures: Vec<ModuleFailure>,
}

impl BuildOutcome {
    /// Modules attempted, successful or not.
    pub fn attempted(&self) -> usize {
        self.graph.len() + self.failures.len()
    }
}

/// Discover and analyze every module under `root`.
pub fn build_graph(root: &Path, config: &AnalyzerConfig) -> BuildOutcome {
    let files = discover_modules(root, config);
    let outcome = build_from_files(&files);
    info!(
        root = %root.display(),
        modules = outcome.graph.len(),
        edges = outcome.graph.edge_count(),
        failed = outcome.failures.len(),
        "dependency graph built"
    );
    outcome
}

/// Read and analyze the given files.
pub fn build_from_files(files: &[PathBuf]) -> BuildOutcome {
    let sources: Vec<(PathBuf, Result<String, ModgraphError>)> = files
        .par_iter()
        .map(|path| {
            let source = fs::read_to_string(path).map_err(|source| ModgraphError::Io {
                path: path.clone(),
                source,
            });
            (path.clone(), source)
        })
        .collect();

    let mut failures = Vec::new();
    let readable: Vec<(PathBuf, String)> = sources
        .into_iter()
        .filter_map(|(path, source)| match source {
            Ok(text) => Some((path, text)),
            Err(e) => {
                warn!(error = %e, "module unreadable");
                failures.push(ModuleFailure::new(path, e));
                None
            }
        })
        .collect();

    let mut outcome = build_from_sources(readable);
    failures.append(&mut outcome.failures);
    outcome.failures = failures;
    outcome
}

/// Analyze in-memory `(path, source)` pairs.
///
/// Extraction runs in parallel; results are merged in input order by a
/// single builder, so no module is duplicated or lost.
pub fn build_from_sources<I, P>(sources: I) -> BuildOutcome
where
    I: IntoIterator<Item = (P, String)>,
    P: Into<PathBuf>,
{
    let sources: Vec<(PathBuf, String)> = sources
        .into_iter()
        .map(|(path, text)| (path.into(), text))
        .collect();

    let results: Vec<(PathBuf, Result<FileExtractions, ModgraphError>)> = sources
        .par_iter()
        .map(|(path, text)| (path.clone(), extract_file(path, text)))
        .collect();

    let mut builder = DependencyGraph::builder();
    let mut extractions = Vec::with_capacity(results.len());
    let mut failures = Vec::new();

    for (path, result) in results {
        let extraction = match result {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!(error = %e, "module skipped");
                failures.push(ModuleFailure::new(path, e));
                continue;
            }
        };

        let edges = resolve_imports(&extraction.imports);
        if let Err(e) = builder.insert(extraction.module.clone(), edges) {
            warn!(error = %e, "module skipped");
            failures.push(ModuleFailure::new(extraction.module.clone(), e));
            continue;
        }
        extractions.push(extraction);
    }

    BuildOutcome {
        graph: builder.build(),
        extractions,
        failures,
    }
}
