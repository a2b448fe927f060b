//! Core types for the module dependency graph.
//!
//! Defines module identities, the raw import statements produced by the
//! extractor, and the normalized dependency edges the graph stores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of one source module, derived from its location on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(PathBuf);

impl ModuleId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// The module's short name: the file name with its extension stripped.
    pub fn stem(&self) -> String {
        self.0
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<PathBuf> for ModuleId {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for ModuleId {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

/// Syntactic form of an import statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// `import a.b.c`
    Import,
    /// `from x import y`
    From,
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportKind::Import => write!(f, "import"),
            ImportKind::From => write!(f, "from"),
        }
    }
}

/// One name listed after `import` in a `from` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportedName {
    /// A specific symbol or submodule.
    Name(String),
    /// `*`
    Wildcard,
}

impl fmt::Display for ImportedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportedName::Name(name) => write!(f, "{}", name),
            ImportedName::Wildcard => write!(f, "*"),
        }
    }
}

/// An import statement as written in the source, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    pub kind: ImportKind,
    /// Dotted module path. Empty for `from . import x`.
    pub target: String,
    /// Names after `import` in a `from` statement. Always empty for `import a.b`.
    pub names: Vec<ImportedName>,
    /// Number of leading dots. 0 means absolute.
    pub relative_depth: usize,
    /// Line of the statement (1-indexed).
    pub line: usize,
}

impl ImportStatement {
    pub fn import(target: impl Into<String>, line: usize) -> Self {
        Self {
            kind: ImportKind::Import,
            target: target.into(),
            names: Vec::new(),
            relative_depth: 0,
            line,
        }
    }

    pub fn from_import(
        target: impl Into<String>,
        names: Vec<ImportedName>,
        relative_depth: usize,
        line: usize,
    ) -> Self {
        Self {
            kind: ImportKind::From,
            target: target.into(),
            names,
            relative_depth,
            line,
        }
    }

    pub fn is_relative(&self) -> bool {
        self.relative_depth > 0
    }
}

/// A normalized dependency identifier, e.g. `pkg.mod.name`, `..sibling.x` or `os`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyEdge(String);

impl DependencyEdge {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative edges carry their depth as leading dots.
    pub fn is_relative(&self) -> bool {
        self.0.starts_with('.')
    }

    /// Text before the first `.`; empty for relative edges.
    pub fn leading_segment(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DependencyEdge {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Everything extracted from a single source file.
#[derive(Debug, Clone)]
pub struct FileExtractions {
    pub module: ModuleId,
    /// Import statements in breadth-first tree order.
    pub imports: Vec<ImportStatement>,
    /// Names of every `def` in the file, including methods and nested functions.
    pub functions: Vec<String>,
    pub line_count: usize,
}

/// Why a module was left out of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFailure {
    pub module: ModuleId,
    pub reason: String,
}

impl ModuleFailure {
    pub fn new(module: impl Into<ModuleId>, reason: impl fmt::Display) -> Self {
        Self {
            module: module.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_stem() {
        assert_eq!(ModuleId::new("pkg/sub/views.py").stem(), "views");
        assert_eq!(ModuleId::new("__init__.py").stem(), "__init__");
        assert_eq!(ModuleId::new("a.py"), ModuleId::from(Path::new("a.py")));
    }

    #[test]
    fn test_edge_segments() {
        let edge = DependencyEdge::from("pkg.mod.name");
        assert_eq!(edge.leading_segment(), "pkg");
        assert!(!edge.is_relative());

        let edge = DependencyEdge::from("..sibling.x");
        assert_eq!(edge.leading_segment(), "");
        assert!(edge.is_relative());

        assert_eq!(DependencyEdge::from("os").leading_segment(), "os");
    }
}
