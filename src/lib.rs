//! tasklint - Consistency checks for JSONL task indexes
//!
//! Validates the task-tracking convention used by spec-driven agent
//! workflows: a `tasks.jsonl` index cross-referenced with per-task markdown
//! detail files. Checks referential integrity in both directions,
//! frontmatter agreement, dependency resolution and acyclicity, and status
//! coherence. Strictly read-only.

pub mod cli;
pub mod domain;
pub mod storage;
pub mod validate;

pub use domain::{Task, TaskId, TaskStatus};
pub use validate::{PreconditionError, Report};
