//! Analyzer configuration.
//!
//! Read from `.modgraph.toml` (or `.modgraph.yaml` / `.modgraph.yml`) in the
//! project root. A missing file means defaults; a malformed one is logged
//! and also falls back to defaults so analysis still runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ModgraphError, Result};

/// Config file names looked up in the project root, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = [".modgraph.toml", ".modgraph.yaml", ".modgraph.yml"];

/// Directories that never contain project modules.
const DEFAULT_EXCLUDE_DIRS: [&str; 17] = [
    ".venv",
    "venv",
    "env",
    ".env",
    "__pycache__",
    ".git",
    ".pytest_cache",
    "node_modules",
    ".tox",
    "htmlcov",
    "site-packages",
    "dist-packages",
    ".mypy_cache",
    ".coverage",
    "build",
    "dist",
    "egg-info",
];

/// Settings that shape discovery and linting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory names skipped during discovery. Names ending in
    /// `.egg-info` are skipped when `egg-info` is listed.
    pub exclude_dirs: Vec<String>,
    /// Also honour `.gitignore` files while walking.
    pub respect_gitignore: bool,
    /// Lint suggests making functions private below this private ratio.
    pub private_ratio_threshold: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            respect_gitignore: false,
            private_ratio_threshold: 0.3,
        }
    }
}

impl AnalyzerConfig {
    /// Load the first config file found in `root`, or defaults.
    pub fn discover(root: &Path) -> Self {
        match CONFIG_FILE_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
        {
            Some(path) => Self::load(&path),
            None => {
                debug!(root = %root.display(), "no config file, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from a file, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(config) => {
                debug!(config = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                warn!(error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Parse a config file, choosing YAML or TOML by extension.
    pub fn try_load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ModgraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config_error = |message: String| ModgraphError::Config {
            path: path.to_path_buf(),
            message,
        };

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => {
                if content.trim().is_empty() {
                    return Ok(Self::default());
                }
                serde_yaml::from_str(&content).map_err(|e| config_error(e.to_string()))?
            }
            _ => toml::from_str(&content).map_err(|e| config_error(e.to_string()))?,
        };

        if !(0.0..=1.0).contains(&config.private_ratio_threshold) {
            return Err(config_error(format!(
                "private_ratio_threshold must be within 0.0..=1.0, got {}",
                config.private_ratio_threshold
            )));
        }
        Ok(config)
    }

    /// Whether a directory with this name is skipped during discovery.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|excluded| {
            name == excluded
                || (excluded == "egg-info" && name.ends_with(".egg-info"))
        })
    }
}

/// How the analysis result is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Explicit options for one command run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Project root to analyze.
    pub root: PathBuf,
    /// Write the JSON report here instead of printing a summary.
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl RunOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: None,
            format: OutputFormat::Text,
            verbose: false,
        }
    }

    /// Fails when the root does not exist.
    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(ModgraphError::Io {
                path: self.root.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "project root does not exist",
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert!(config.is_excluded_dir("__pycache__"));
        assert!(config.is_excluded_dir("mypkg.egg-info"));
        assert!(!config.is_excluded_dir("src"));
        assert_eq!(config.private_ratio_threshold, 0.3);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AnalyzerConfig::discover(dir.path());
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_toml_partial_override() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".modgraph.toml"),
            "exclude_dirs = [\"legacy\"]\nprivate_ratio_threshold = 0.5\n",
        )
        .unwrap();

        let config = AnalyzerConfig::discover(dir.path());
        assert_eq!(config.exclude_dirs, vec!["legacy"]);
        assert_eq!(config.private_ratio_threshold, 0.5);
        assert!(!config.respect_gitignore);
    }

    #[test]
    fn test_yaml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".modgraph.yaml");
        fs::write(&path, "respect_gitignore: true\n").unwrap();

        let config = AnalyzerConfig::try_load(&path).unwrap();
        assert!(config.respect_gitignore);
        assert_eq!(config.exclude_dirs, AnalyzerConfig::default().exclude_dirs);
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".modgraph.toml");
        fs::write(&path, "exclude_dirs = 42").unwrap();

        assert!(matches!(
            AnalyzerConfig::try_load(&path),
            Err(ModgraphError::Config { .. })
        ));
        assert_eq!(AnalyzerConfig::load(&path), AnalyzerConfig::default());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".modgraph.toml");
        fs::write(&path, "private_ratio_threshold = 1.5").unwrap();
        assert!(AnalyzerConfig::try_load(&path).is_err());
    }

    #[test]
    fn test_run_options_validation() {
        let options = RunOptions::new("non_existent_path_xyz_123");
        assert!(options.validate().is_err());
        assert!(RunOptions::new(".").validate().is_ok());
    }
}
