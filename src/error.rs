//! Error types for modgraph.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the analysis library.
#[derive(Debug, Error)]
pub enum ModgraphError {
    /// The file is not a Python source file.
    #[error("unsupported language: {}", .0.display())]
    UnsupportedLanguage(PathBuf),

    /// The source text is not valid Python.
    #[error("syntax error in {} at {line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The same module was inserted into a graph twice.
    #[error("module already present in graph: {}", .0.display())]
    DuplicateModule(PathBuf),

    /// A configuration file exists but could not be understood.
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModgraphError>;
