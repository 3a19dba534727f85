//! # Command-Line Interface
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `validate [dir]` | Run every consistency check, report errors/warnings |
//! | `order [dir]` | Print tasks in dependency-first execution order |
//! | `status [dir]` | Status summary with ready and blocked tasks |
//!
//! All commands support `--format text|json` and `--verbose`. Exit codes:
//! 0 clean, 1 errors found, 2 missing task directory or index.

mod app;
mod output;
mod query;
mod validate_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
