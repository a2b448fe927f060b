//! Whole-repository analysis: build the graph, then compute coupling and
//! cycles side by side over the same read-only graph.

use std::path::Path;
use tracing::info;

use crate::config::AnalyzerConfig;
use crate::graph::cycles::detect_cycles_with;
use crate::graph::{build_graph, BuildOutcome, CyclePair, ModuleLinks};
use crate::metrics::coupling::compute_coupling_with;
use crate::metrics::{CouplingReport, ModuleShape};
use crate::report::AnalysisReport;

/// Graph plus everything derived from it for one run.
#[derive(Debug)]
pub struct Analysis {
    pub outcome: BuildOutcome,
    pub coupling: CouplingReport,
    pub cycles: Vec<CyclePair>,
    /// Function and size figures, in graph order.
    pub shapes: Vec<ModuleShape>,
}

impl Analysis {
    /// Compute metrics and cycles for an already built graph.
    pub fn from_outcome(outcome: BuildOutcome) -> Self {
        let (coupling, cycles) = {
            let links = ModuleLinks::build(&outcome.graph);
            rayon::join(
                || compute_coupling_with(&outcome.graph, &links),
                || detect_cycles_with(&outcome.graph, &links),
            )
        };

        let shapes = outcome
            .extractions
            .iter()
            .map(ModuleShape::from_extraction)
            .collect();

        info!(
            attempted = outcome.attempted(),
            modules = outcome.graph.len(),
            cycles = cycles.len(),
            failed = outcome.failures.len(),
            "analysis complete"
        );

        Self {
            outcome,
            coupling,
            cycles,
            shapes,
        }
    }

    /// The serializable summary document.
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport::new(self)
    }
}

/// Discover, parse and analyze every module under `root`.
pub fn analyze_repository(root: &Path, config: &AnalyzerConfig) -> Analysis {
    Analysis::from_outcome(build_graph(root, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_from_sources;

    #[test]
    fn test_from_outcome() {
        let outcome = build_from_sources(vec![
            ("a.py", "from b import foo\n".to_string()),
            ("b.py", "from a import bar\nimport os\n".to_string()),
        ]);
        let analysis = Analysis::from_outcome(outcome);

        assert_eq!(analysis.coupling.len(), 2);
        assert_eq!(analysis.cycles, vec![CyclePair::new("a", "b")]);
        assert_eq!(analysis.shapes.len(), 2);
        assert_eq!(analysis.shapes[1].line_count, 2);
    }
}
