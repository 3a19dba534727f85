//! JSONL index loading
//!
//! The index lives in `tasks.jsonl` with one JSON object per non-blank
//! line. Loading is line-tolerant: a bad line becomes a diagnostic and is
//! excluded, and the rest of the file still loads so a single run surfaces
//! every problem. This tool only ever reads the index.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashSet;

use crate::domain::Task;

/// Filename of the task index within a task directory
pub const INDEX_FILE: &str = "tasks.jsonl";

/// Result of loading an index: the tasks that parsed, plus diagnostics for
/// the lines that did not
#[derive(Debug, Default)]
pub struct LoadedIndex {
    /// Tasks in declaration (line) order, one per clean line
    pub tasks: Vec<Task>,

    /// Parse diagnostics, each tagged with its 1-based line number
    pub errors: Vec<String>,
}

impl LoadedIndex {
    /// Returns true if every line parsed cleanly
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Read-only store for the task index
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    /// Creates a store for the given index file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the store for a task directory (`<dir>/tasks.jsonl`)
    pub fn for_dir(dir: &Path) -> Self {
        Self::new(dir.join(INDEX_FILE))
    }

    /// Returns the path to the index file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the index, collecting per-line diagnostics instead of failing
    ///
    /// Blank lines are skipped but still counted, so diagnostics carry the
    /// line numbers an editor would show. A line that is not a JSON object,
    /// or that lacks `id` or `file`, is reported and excluded. A duplicate
    /// id keeps its first occurrence; later ones are reported and excluded
    /// so downstream checks see a unique id set. An index with zero
    /// non-blank lines is itself an error.
    pub fn load(&self) -> Result<LoadedIndex> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open task index: {}", self.path.display()))?;

        let reader = BufReader::new(file);
        let mut loaded = LoadedIndex::default();
        let mut seen_ids = HashSet::new();
        let mut non_blank = 0usize;

        for (line_idx, line) in reader.lines().enumerate() {
            let line_num = line_idx + 1;
            let line =
                line.with_context(|| format!("Failed to read line {} of task index", line_num))?;

            if line.trim().is_empty() {
                continue;
            }
            non_blank += 1;

            let value: Value = match serde_json::from_str(&line) {
                Ok(value) => value,
                Err(e) => {
                    loaded.errors.push(format!("line {line_num}: invalid JSON ({e})"));
                    continue;
                }
            };

            if !value.is_object() {
                loaded
                    .errors
                    .push(format!("line {line_num}: expected a JSON object"));
                continue;
            }

            let task: Task = match serde_json::from_value(value) {
                Ok(task) => task,
                Err(e) => {
                    loaded.errors.push(format!("line {line_num}: {e}"));
                    continue;
                }
            };

            if !seen_ids.insert(task.id.clone()) {
                loaded
                    .errors
                    .push(format!("line {line_num}: duplicate task id '{}'", task.id));
                continue;
            }

            loaded.tasks.push(task);
        }

        if non_blank == 0 {
            loaded.errors.push("index is empty".to_string());
        }

        Ok(loaded)
    }
}
