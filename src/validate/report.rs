//! Validation report aggregation
//!
//! Checks record findings into a single mutable [`ReportBuilder`]; the
//! finished [`Report`] is what the CLI prints. Findings keep insertion
//! order, which the checks arrange to be index-declaration order followed
//! by directory order for orphan findings.

use serde::Serialize;

/// Final validation result
///
/// Serializes to the structured output shape:
/// `{valid, tasks, checks_passed, checks_failed, errors, warnings}`.
/// Pass messages are carried for verbose text output only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub valid: bool,
    pub tasks: usize,
    pub checks_passed: usize,
    pub checks_failed: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,

    #[serde(skip)]
    pub passes: Vec<String>,
}

/// Accumulator threaded through every check
#[derive(Debug, Default)]
pub struct ReportBuilder {
    passes: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a passed check
    pub fn pass(&mut self, message: impl Into<String>) {
        self.passes.push(message.into());
    }

    /// Records an error; any error makes the final report invalid
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Records a warning; warnings never fail validation
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Finalizes the report for an index of `task_count` tasks
    pub fn finish(self, task_count: usize) -> Report {
        Report {
            valid: self.errors.is_empty(),
            tasks: task_count,
            checks_passed: self.passes.len(),
            checks_failed: self.errors.len(),
            errors: self.errors,
            warnings: self.warnings,
            passes: self.passes,
        }
    }
}
