//! Task index validation
//!
//! One batch pass: load the index, then run every check against the loaded
//! tasks and the detail files on disk. Only two conditions abort before the
//! checks run: the task directory or the index file being absent. Every
//! other problem becomes a finding on the report so a single run surfaces
//! all of them.

mod checks;
mod report;

use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

pub use report::{Report, ReportBuilder};

use crate::storage::IndexStore;

/// Fatal conditions checked before any validation runs
///
/// Distinct from validation failures: these mean there is nothing to
/// validate, and map to exit code 2.
#[derive(Debug, Error, PartialEq)]
pub enum PreconditionError {
    #[error("task directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error("task index not found: {0}")]
    MissingIndex(PathBuf),
}

/// Verifies the task directory and index file exist
pub fn check_preconditions(dir: &Path) -> Result<(), PreconditionError> {
    if !dir.is_dir() {
        return Err(PreconditionError::MissingDirectory(dir.to_path_buf()));
    }

    let index_path = IndexStore::for_dir(dir).path().to_path_buf();
    if !index_path.is_file() {
        return Err(PreconditionError::MissingIndex(index_path));
    }

    Ok(())
}

/// Runs every check against the task directory and returns the report
///
/// Assumes [`check_preconditions`] already passed; an index that vanishes
/// between the two calls surfaces as an I/O error.
pub fn run(dir: &Path) -> Result<Report> {
    let loaded = IndexStore::for_dir(dir).load()?;

    let mut report = ReportBuilder::new();
    for error in &loaded.errors {
        report.error(error.clone());
    }

    checks::check_file_references(&loaded.tasks, dir, &mut report);
    checks::check_orphans(&loaded.tasks, dir, &mut report)?;
    checks::check_frontmatter_sync(&loaded.tasks, dir, &mut report)?;
    checks::check_dependency_validity(&loaded.tasks, &mut report);
    checks::check_status_coherence(&loaded.tasks, &mut report);

    Ok(report.finish(loaded.tasks.len()))
}
