//! Main CLI application structure

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{query, validate_cmd};
use crate::validate;

#[derive(Parser)]
#[command(name = "tasklint")]
#[command(author, version, about = "Validate JSONL task indexes and their detail files")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output (per-check pass lines, debug messages)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run all consistency checks against a task directory
    Validate {
        /// Task directory containing tasks.jsonl and detail files
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Print tasks in dependency-first execution order
    Order {
        /// Task directory containing tasks.jsonl and detail files
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Show a status summary with ready and blocked tasks
    Status {
        /// Task directory containing tasks.jsonl and detail files
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

/// Main entry point for the CLI
///
/// Exit code 0 when the command succeeds with no errors found, 1 when
/// validation recorded errors, 2 when the task directory or index file is
/// missing.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    match cli.command {
        Commands::Validate { dir } => validate_cmd::run(&output, &dir),
        Commands::Order { dir } => query::order(&output, &dir),
        Commands::Status { dir } => query::status(&output, &dir),
    }
}

/// Reports a fatal precondition failure, if any, and returns its exit code
///
/// In JSON mode the fatal shape is `{"valid": false, "error": ..., "checks": []}`.
pub(super) fn precondition_failure(output: &Output, dir: &Path) -> Option<ExitCode> {
    match validate::check_preconditions(dir) {
        Ok(()) => None,
        Err(e) => {
            if output.is_json() {
                println!(
                    "{}",
                    serde_json::json!({
                        "valid": false,
                        "error": e.to_string(),
                        "checks": []
                    })
                );
            } else {
                output.error(&e.to_string());
            }
            Some(ExitCode::from(2))
        }
    }
}
