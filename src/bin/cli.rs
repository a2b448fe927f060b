//! modgraph CLI - module dependency graph for Python repositories.
//!
//! Usage:
//!   modgraph repository                       # Text summary of the current directory
//!   modgraph -r proj repository --format json # JSON report on stdout
//!   modgraph repository --json-output r.json  # Write the JSON report to a file
//!   modgraph lint a.py b.py                   # Pre-commit encapsulation check

use clap::Parser;
use modgraph::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let options = cli.run_options();

    // Logs go to stderr so stdout stays clean for reports
    let default_level = if options.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(&cli.command, &options) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
