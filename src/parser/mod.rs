//! Source parsing: turns one file's text into its raw import statements.

pub mod language;
mod python;

pub use language::SupportedLanguage;

use std::path::Path;

use tracing::debug;
use tree_sitter::Parser;

use crate::error::{ModgraphError, Result};
use crate::graph::types::{FileExtractions, ModuleId};

/// Parse a single source file and extract its imports and function names.
///
/// Fails with `UnsupportedLanguage` for non-Python paths and with `Parse`
/// when the text is not valid Python. Pure function of its inputs.
pub fn extract_file(path: &Path, source: &str) -> Result<FileExtractions> {
    let language = SupportedLanguage::from_path(path)
        .ok_or_else(|| ModgraphError::UnsupportedLanguage(path.to_path_buf()))?;

    let mut parser = Parser::new();
    parser
        .set_language(&language.tree_sitter_language())
        .map_err(|e| ModgraphError::Parse {
            path: path.to_path_buf(),
            line: 0,
            column: 0,
            message: format!("failed to load {} grammar: {}", language.name(), e),
        })?;

    let tree = parser.parse(source, None).ok_or_else(|| ModgraphError::Parse {
        path: path.to_path_buf(),
        line: 0,
        column: 0,
        message: "parser produced no tree".to_string(),
    })?;

    python::check_syntax(&tree, path, source.as_bytes())?;
    let items = python::extract_python_items(&tree.root_node(), source.as_bytes());

    debug!(
        file = %path.display(),
        imports = items.imports.len(),
        functions = items.functions.len(),
        "extracted file"
    );

    Ok(FileExtractions {
        module: ModuleId::from(path),
        imports: items.imports,
        functions: items.functions,
        line_count: source.lines().count(),
    })
}
