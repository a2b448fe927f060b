//! Encapsulation lint for pre-commit hooks.
//!
//! Flags modules where too few functions are private (leading `_`),
//! suggesting the public surface be narrowed. Only plain `def` functions
//! count; `async def` is not part of the ratio.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ModgraphError;
use crate::graph::ModuleFailure;
use crate::metrics::private_function_ratio;
use crate::parser::extract_file;

/// A module whose private ratio fell below the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub path: PathBuf,
    pub private_ratio: f64,
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Consider making some functions in {} private",
            self.path.display()
        )
    }
}

/// Outcome of linting a set of files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LintReport {
    pub checked: usize,
    pub suggestions: Vec<Suggestion>,
    pub failures: Vec<ModuleFailure>,
}

impl LintReport {
    /// Whether the hook should pass.
    pub fn is_clean(&self) -> bool {
        self.suggestions.is_empty() && self.failures.is_empty()
    }

    /// Process exit code for a pre-commit hook: 0 clean, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            0
        } else {
            1
        }
    }
}

/// Suggest a change if the source's private ratio is below `threshold`.
pub fn check_source(path: &Path, source: &str, threshold: f64) -> crate::Result<Option<Suggestion>> {
    let extraction = extract_file(path, source)?;
    let ratio = private_function_ratio(&extraction.functions);
    debug!(file = %path.display(), ratio, threshold, "checked private ratio");

    if ratio >= threshold {
        return Ok(None);
    }
    Ok(Some(Suggestion {
        path: path.to_path_buf(),
        private_ratio: ratio,
    }))
}

/// Lint every path, collecting suggestions and per-file failures.
pub fn check_sources(paths: &[PathBuf], threshold: f64) -> LintReport {
    let mut report = LintReport::default();

    for path in paths {
        report.checked += 1;
        let result = fs::read_to_string(path)
            .map_err(|source| ModgraphError::Io {
                path: path.clone(),
                source,
            })
            .and_then(|source| check_source(path, &source, threshold));

        match result {
            Ok(Some(suggestion)) => report.suggestions.push(suggestion),
            Ok(None) => {}
            Err(e) => report.failures.push(ModuleFailure::new(path.clone(), e)),
        }
    }

    report
}
