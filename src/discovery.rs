//! Module discovery: finds the Python files under a project root.
//!
//! Hidden directories and the configured exclusion list (virtual
//! environments, caches, build output) are skipped; only regular files
//! with a Python extension are returned, sorted by path.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::parser::SupportedLanguage;

/// Return every Python module path under `root`.
pub fn discover_modules(root: &Path, config: &AnalyzerConfig) -> Vec<PathBuf> {
    let exclusions = config.clone();
    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .ignore(config.respect_gitignore)
        .parents(config.respect_gitignore)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            if !is_dir || entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !exclusions.is_excluded_dir(&name)
        })
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| SupportedLanguage::from_path(entry.path()).is_some())
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    debug!(root = %root.display(), modules = files.len(), "discovered modules");
    files
}
