//! Domain models for tasklint
//!
//! Contains the core data types and graph logic without any I/O concerns.

mod frontmatter;
mod graph;
mod task;

pub use frontmatter::Frontmatter;
pub use graph::{DependencyGraph, GraphError};
pub use task::{Task, TaskId, TaskStatus};
