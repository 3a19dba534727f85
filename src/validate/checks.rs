//! The individual consistency checks
//!
//! Each check walks the loaded tasks in declaration order and records its
//! findings into the shared [`ReportBuilder`]. Checks are independent and
//! never short-circuit; a defect found by one check does not stop the next.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::report::ReportBuilder;
use crate::domain::{DependencyGraph, Frontmatter, Task, TaskId};

/// Confirms every task's `file` field names an existing detail file
pub fn check_file_references(tasks: &[Task], dir: &Path, report: &mut ReportBuilder) {
    for task in tasks {
        if dir.join(&task.file).is_file() {
            report.pass(format!("{}: file '{}' present", task.id, task.file));
        } else {
            report.error(format!(
                "{}: referenced file '{}' not found",
                task.id, task.file
            ));
        }
    }
}

/// Confirms every detail file on disk is referenced by exactly one task
///
/// The reverse direction of the file-reference check. Files are listed in
/// sorted name order so findings are deterministic across platforms.
pub fn check_orphans(tasks: &[Task], dir: &Path, report: &mut ReportBuilder) -> Result<()> {
    let mut references: HashMap<&str, usize> = HashMap::new();
    for task in tasks {
        *references.entry(task.file.as_str()).or_insert(0) += 1;
    }

    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read task directory: {}", dir.display()))?
    {
        let entry = entry.context("Failed to read directory entry")?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_detail_file(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();

    for name in &names {
        match references.get(name.as_str()).copied().unwrap_or(0) {
            1 => report.pass(format!("'{name}' referenced by exactly one task")),
            0 => report.error(format!(
                "orphaned detail file '{name}' (not referenced by the index)"
            )),
            n => report.error(format!("detail file '{name}' referenced by {n} tasks")),
        }
    }

    Ok(())
}

/// Returns true for filenames following the detail-file convention:
/// an identifier prefix (letters and digits, at least one digit),
/// a hyphen, and the `.md` extension. `T001-setup.md` matches;
/// `README.md` and `my-notes.md` do not.
fn is_detail_file(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(".md") else {
        return false;
    };
    let Some((prefix, _)) = stem.split_once('-') else {
        return false;
    };

    !prefix.is_empty()
        && prefix.chars().all(|c| c.is_ascii_alphanumeric())
        && prefix.chars().any(|c| c.is_ascii_digit())
}

/// Confirms each detail file's frontmatter agrees with its index entry
///
/// `id` and `depends_on` disagreement is an error; `status` disagreement is
/// only a warning. A missing or malformed frontmatter block compares as
/// empty values, so it surfaces through the ordinary mismatch path. Tasks
/// whose file is missing are skipped; the file-reference check already
/// reported those.
pub fn check_frontmatter_sync(tasks: &[Task], dir: &Path, report: &mut ReportBuilder) -> Result<()> {
    for task in tasks {
        let path = dir.join(&task.file);
        if !path.is_file() {
            continue;
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read detail file: {}", path.display()))?;
        let fm = Frontmatter::extract(&content);

        if fm.id_value() == task.id.as_str() {
            report.pass(format!("{}: frontmatter id matches", task.id));
        } else {
            report.error(format!(
                "{}: frontmatter id mismatch (index '{}', file '{}')",
                task.id,
                task.id,
                fm.id_value()
            ));
        }

        if fm.status_value() == task.status.as_str() {
            report.pass(format!("{}: frontmatter status matches", task.id));
        } else {
            report.warning(format!(
                "{}: frontmatter status mismatch (index '{}', file '{}')",
                task.id,
                task.status,
                fm.status_value()
            ));
        }

        let index_deps: Vec<&str> = task.depends_on.iter().map(TaskId::as_str).collect();
        let file_deps: Vec<&str> = fm.depends_on_values().iter().map(String::as_str).collect();
        if index_deps == file_deps {
            report.pass(format!("{}: frontmatter depends_on matches", task.id));
        } else {
            report.error(format!(
                "{}: frontmatter depends_on mismatch (index [{}], file [{}])",
                task.id,
                index_deps.join(", "),
                file_deps.join(", ")
            ));
        }
    }

    Ok(())
}

/// Confirms every dependency resolves and the dependency graph is acyclic
///
/// Cycle findings are attributed to the task the walk started from, in
/// declaration order; a task that merely reaches a cycle downstream reports
/// it too. Unresolved dependency ids get no edge in the graph, so the walk
/// always terminates.
pub fn check_dependency_validity(tasks: &[Task], report: &mut ReportBuilder) {
    let known: HashSet<&TaskId> = tasks.iter().map(|t| &t.id).collect();

    for task in tasks {
        for dep_id in &task.depends_on {
            if known.contains(dep_id) {
                report.pass(format!("{}: dependency '{}' resolves", task.id, dep_id));
            } else {
                report.error(format!("{}: unknown dependency '{}'", task.id, dep_id));
            }
        }
    }

    let graph = DependencyGraph::from_tasks(tasks);
    for task in tasks {
        if graph.has_cycle_from(&task.id) {
            report.error(format!(
                "circular dependency detected involving task {}",
                task.id
            ));
        } else {
            report.pass(format!("{}: no dependency cycle", task.id));
        }
    }
}

/// Warns when a done task depends on a task that is not done
///
/// Soft invariant only: violations are warnings. Unresolved dependencies
/// are skipped here; the existence check already reported them.
pub fn check_status_coherence(tasks: &[Task], report: &mut ReportBuilder) {
    let statuses: HashMap<&TaskId, &Task> = tasks.iter().map(|t| (&t.id, t)).collect();

    for task in tasks {
        if !task.status.is_done() {
            continue;
        }

        for dep_id in &task.depends_on {
            let Some(dep) = statuses.get(dep_id) else {
                continue;
            };

            if dep.status.is_done() {
                report.pass(format!("{}: completed dependency '{}'", task.id, dep_id));
            } else {
                report.warning(format!(
                    "{} is done but depends on incomplete task {}",
                    task.id, dep_id
                ));
            }
        }
    }
}
