//! CLI module for modgraph.
//!
//! Commands:
//! - repository: analyze a project, print a summary or write a JSON report
//! - lint: pre-commit encapsulation check over explicit files

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use crate::analysis::analyze_repository;
use crate::config::{AnalyzerConfig, OutputFormat, RunOptions};
use crate::lint::check_sources;

#[derive(Parser)]
#[command(name = "modgraph")]
#[command(about = "Module dependency graph, coupling metrics and import cycles for Python")]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every Python module under the root
    Repository {
        /// Write the JSON report to this file
        #[arg(long)]
        json_output: Option<PathBuf>,

        /// Output format for stdout
        #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
    },

    /// Suggest narrowing the public surface of the given files
    Lint {
        /// Files to check
        paths: Vec<PathBuf>,

        /// Minimum share of private functions (default from config, 0.3)
        #[arg(short, long)]
        threshold: Option<f64>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Options for a `repository` run.
    pub fn run_options(&self) -> RunOptions {
        let mut options = RunOptions::new(self.root.clone());
        options.verbose = self.verbose;
        if let Commands::Repository {
            json_output,
            format,
        } = &self.command
        {
            options.output = json_output.clone();
            options.format = (*format).into();
        }
        options
    }
}

/// Dispatch a command with explicit options. Returns the process exit code.
pub fn run(command: &Commands, options: &RunOptions) -> anyhow::Result<i32> {
    options.validate()?;
    let config = AnalyzerConfig::discover(&options.root);

    match command {
        Commands::Repository { .. } => run_repository(options, &config),
        Commands::Lint { paths, threshold } => {
            let threshold = threshold.unwrap_or(config.private_ratio_threshold);
            if !(0.0..=1.0).contains(&threshold) {
                anyhow::bail!("threshold must be within 0.0..=1.0, got {}", threshold);
            }
            run_lint(paths, threshold)
        }
    }
}

/// Analyze the root and emit the report as requested.
pub fn run_repository(options: &RunOptions, config: &AnalyzerConfig) -> anyhow::Result<i32> {
    let report = analyze_repository(&options.root, config).report();

    if let Some(path) = &options.output {
        std::fs::write(path, report.to_json()?)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(output = %path.display(), "wrote JSON report");
    }

    match options.format {
        OutputFormat::Json if options.output.is_none() => println!("{}", report.to_json()?),
        OutputFormat::Json => {}
        OutputFormat::Text => print!("{}", report.to_text()),
    }
    Ok(0)
}

fn run_lint(paths: &[PathBuf], threshold: f64) -> anyhow::Result<i32> {
    let report = check_sources(paths, threshold);

    for suggestion in &report.suggestions {
        println!("{}", suggestion);
    }
    for failure in &report.failures {
        eprintln!("{}: {}", failure.module, failure.reason);
    }
    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_repository_args() {
        let cli = Cli::parse_from([
            "modgraph",
            "--root",
            "proj",
            "repository",
            "--json-output",
            "out.json",
        ]);
        let options = cli.run_options();
        assert_eq!(options.root, PathBuf::from("proj"));
        assert_eq!(options.output, Some(PathBuf::from("out.json")));
        assert_eq!(options.format, OutputFormat::Text);
        assert!(!options.verbose);
    }

    #[test]
    fn test_parse_lint_args() {
        let cli = Cli::parse_from(["modgraph", "lint", "a.py", "b.py", "-t", "0.5", "-v"]);
        assert!(cli.run_options().verbose);
        match cli.command {
            Commands::Lint { paths, threshold } => {
                assert_eq!(paths.len(), 2);
                assert_eq!(threshold, Some(0.5));
            }
            _ => panic!("expected lint"),
        }
    }

    #[test]
    fn test_repository_writes_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.py"), "from b import x\n").unwrap();
        std::fs::write(dir.path().join("b.py"), "from a import y\n").unwrap();
        let out = dir.path().join("report.json");

        let mut options = RunOptions::new(dir.path());
        options.output = Some(out.clone());
        let code = run_repository(&options, &AnalyzerConfig::default()).unwrap();
        assert_eq!(code, 0);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["module_count"], 2);
        assert_eq!(json["circular_dependencies"][0][0], "a");
    }

    #[test]
    fn test_lint_exit_code() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("svc.py");
        std::fs::write(&file, "def handler():\n    pass\n").unwrap();

        let args: Vec<std::ffi::OsString> = vec![
            "modgraph".into(),
            "--root".into(),
            dir.path().into(),
            "lint".into(),
            file.clone().into(),
        ];
        let cli = Cli::parse_from(args);
        assert_eq!(run(&cli.command, &cli.run_options()).unwrap(), 1);
    }

    #[test]
    fn test_missing_root_is_error() {
        let cli = Cli::parse_from(["modgraph", "--root", "/no/such/dir", "repository"]);
        assert!(run(&cli.command, &cli.run_options()).is_err());
    }
}
