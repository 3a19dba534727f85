//! Query commands over a loaded index: `order` and `status`
//!
//! Both refuse to run when the index has parse errors; the point of these
//! views is a trustworthy picture, and `validate` is the tool for a broken
//! index. Unresolved dependency ids are tolerated (they affect readiness
//! but never crash a walk).

use std::collections::HashMap;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use super::app::precondition_failure;
use super::output::Output;
use crate::domain::{DependencyGraph, Task, TaskId, TaskStatus};
use crate::storage::{IndexStore, LoadedIndex};

/// Loads the index, printing parse diagnostics and bailing on a dirty load
fn load_clean(output: &Output, dir: &Path) -> Result<Option<LoadedIndex>> {
    let loaded = IndexStore::for_dir(dir).load()?;

    if !loaded.is_clean() {
        for error in &loaded.errors {
            output.error(error);
        }
        output.error("index has errors; run 'tasklint validate' for a full report");
        return Ok(None);
    }

    Ok(Some(loaded))
}

pub fn order(output: &Output, dir: &Path) -> Result<ExitCode> {
    if let Some(code) = precondition_failure(output, dir) {
        return Ok(code);
    }

    let Some(loaded) = load_clean(output, dir)? else {
        return Ok(ExitCode::from(1));
    };

    let graph = DependencyGraph::from_tasks(&loaded.tasks);
    let ordered = match graph.execution_order() {
        Ok(ordered) => ordered,
        Err(e) => {
            output.error(&e.to_string());
            return Ok(ExitCode::from(1));
        }
    };

    let by_id: HashMap<&TaskId, &Task> = loaded.tasks.iter().map(|t| (&t.id, t)).collect();

    if output.is_json() {
        let items: Vec<_> = ordered
            .iter()
            .filter_map(|id| by_id.get(id))
            .map(|task| {
                serde_json::json!({
                    "id": task.id,
                    "status": task.status,
                    "parallel": task.parallel,
                    "summary": task.summary,
                })
            })
            .collect();
        output.data(&items);
    } else {
        for (position, id) in ordered.iter().enumerate() {
            let Some(task) = by_id.get(id) else { continue };
            let marker = if task.parallel { " [parallel]" } else { "" };
            let summary = task.summary.as_deref().unwrap_or("");
            output.line(&format!(
                "{:>3}. {:<10} {}{}",
                position + 1,
                task.id,
                summary,
                marker
            ));
        }
    }

    Ok(ExitCode::SUCCESS)
}

pub fn status(output: &Output, dir: &Path) -> Result<ExitCode> {
    if let Some(code) = precondition_failure(output, dir) {
        return Ok(code);
    }

    let Some(loaded) = load_clean(output, dir)? else {
        return Ok(ExitCode::from(1));
    };

    let statuses: HashMap<TaskId, TaskStatus> = loaded
        .tasks
        .iter()
        .map(|t| (t.id.clone(), t.status.clone()))
        .collect();

    let done = loaded.tasks.iter().filter(|t| t.status.is_done()).count();
    let ready: Vec<&Task> = loaded
        .tasks
        .iter()
        .filter(|t| t.is_ready(&statuses))
        .collect();
    let blocked: Vec<&Task> = loaded
        .tasks
        .iter()
        .filter(|t| t.is_blocked(&statuses))
        .collect();

    if output.is_json() {
        output.data(&serde_json::json!({
            "tasks": loaded.tasks.len(),
            "done": done,
            "remaining": loaded.tasks.len() - done,
            "ready": ready.iter().map(|t| &t.id).collect::<Vec<_>>(),
            "blocked": blocked.iter().map(|t| &t.id).collect::<Vec<_>>(),
        }));
    } else {
        output.line(&format!(
            "Tasks: {} total, {} done, {} remaining",
            loaded.tasks.len(),
            done,
            loaded.tasks.len() - done
        ));

        if !ready.is_empty() {
            output.blank();
            output.line("Ready:");
            for task in &ready {
                let summary = task.summary.as_deref().unwrap_or("");
                output.line(&format!("  {:<10} {}", task.id, summary));
            }
        }

        if !blocked.is_empty() {
            output.blank();
            output.line("Blocked:");
            for task in &blocked {
                let waiting: Vec<String> = task
                    .incomplete_deps(&statuses)
                    .map(|id| id.to_string())
                    .collect();
                output.line(&format!(
                    "  {:<10} (waiting on {})",
                    task.id,
                    waiting.join(", ")
                ));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
