//! The `validate` command

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use super::app::precondition_failure;
use super::output::Output;
use crate::validate;

pub fn run(output: &Output, dir: &Path) -> Result<ExitCode> {
    if let Some(code) = precondition_failure(output, dir) {
        return Ok(code);
    }

    output.verbose(&format!("Validating task directory: {}", dir.display()));
    let report = validate::run(dir)?;

    if output.is_json() {
        output.data(&report);
    } else {
        if output.is_verbose() {
            for pass in &report.passes {
                output.line(&format!("  ok: {}", pass));
            }
        }

        output.line(&format!(
            "Results: {} tasks, {} checks passed, {} checks failed",
            report.tasks, report.checks_passed, report.checks_failed
        ));

        if !report.errors.is_empty() {
            output.blank();
            output.line("Errors:");
            for error in &report.errors {
                output.line(&format!("  - {}", error));
            }
        }

        if !report.warnings.is_empty() {
            output.blank();
            output.line("Warnings:");
            for warning in &report.warnings {
                output.line(&format!("  - {}", warning));
            }
        }

        output.blank();
        if report.valid {
            output.line("All checks passed");
        } else {
            output.line("Validation failed");
        }
    }

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
