//! Task domain model
//!
//! A task is one line of the index file: an identifier, a pointer to its
//! detail file, a status, and the identifiers it depends on. The validator
//! never mutates tasks; everything here is plain data plus queries.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of a task, e.g. `T001`
///
/// Ids are opaque string tokens assigned by whatever generated the index.
/// Uniqueness within an index is a validation concern, not a type invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task ID from a string token
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a task
///
/// The convention only gives `pending` and `done` a meaning, but the field
/// is open to extension: any other string is carried through verbatim, and
/// a record without a status gets [`TaskStatus::Unspecified`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    /// No status present in the record (serialized as the empty string)
    #[default]
    Unspecified,
    Pending,
    Done,
    /// Any status string the convention does not name
    Other(String),
}

impl TaskStatus {
    /// Returns true if this status represents completion
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    /// Returns true if no status was recorded
    pub fn is_unspecified(&self) -> bool {
        matches!(self, TaskStatus::Unspecified)
    }

    /// Returns the status as the string it was read from
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Unspecified => "",
            TaskStatus::Pending => "pending",
            TaskStatus::Done => "done",
            TaskStatus::Other(s) => s,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "" => TaskStatus::Unspecified,
            "pending" => TaskStatus::Pending,
            "done" => TaskStatus::Done,
            _ => TaskStatus::Other(s),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the task index
///
/// `id` and `file` are required; everything else defaults when absent so a
/// sparse record still parses. Unknown keys in the JSON object are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Relative filename of the detail record
    pub file: String,

    /// Current status
    #[serde(default, skip_serializing_if = "TaskStatus::is_unspecified")]
    pub status: TaskStatus,

    /// Whether the task is eligible to run in parallel with its siblings
    #[serde(default, skip_serializing_if = "is_false")]
    pub parallel: bool,

    /// Identifiers of tasks that must complete before this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<TaskId>,

    /// One-line summary text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Task {
    /// Creates a task with the given ID and detail filename
    pub fn new(id: impl Into<TaskId>, file: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file: file.into(),
            status: TaskStatus::default(),
            parallel: false,
            depends_on: Vec::new(),
            summary: None,
        }
    }

    /// Returns true if this task is not done and all its dependencies are done
    ///
    /// A dependency missing from the status map counts as incomplete.
    pub fn is_ready(&self, statuses: &HashMap<TaskId, TaskStatus>) -> bool {
        if self.status.is_done() {
            return false;
        }

        self.depends_on
            .iter()
            .all(|dep_id| statuses.get(dep_id).map(|s| s.is_done()).unwrap_or(false))
    }

    /// Returns true if this task is not done and waiting on an incomplete dependency
    pub fn is_blocked(&self, statuses: &HashMap<TaskId, TaskStatus>) -> bool {
        if self.status.is_done() {
            return false;
        }

        self.depends_on.iter().any(|dep_id| {
            statuses
                .get(dep_id)
                .map(|s| !s.is_done())
                .unwrap_or(true) // unknown dependency = blocked
        })
    }

    /// Returns the dependency ids that are not yet done
    pub fn incomplete_deps<'a>(
        &'a self,
        statuses: &'a HashMap<TaskId, TaskStatus>,
    ) -> impl Iterator<Item = &'a TaskId> {
        self.depends_on
            .iter()
            .filter(|dep_id| statuses.get(dep_id).map(|s| !s.is_done()).unwrap_or(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(pairs: &[(&str, TaskStatus)]) -> HashMap<TaskId, TaskStatus> {
        pairs
            .iter()
            .map(|(id, s)| (TaskId::from(*id), s.clone()))
            .collect()
    }

    #[test]
    fn parses_full_record() {
        let line = r#"{"id":"T002","file":"T002-b.md","status":"pending","parallel":true,"depends_on":["T001"],"summary":"Second step"}"#;
        let task: Task = serde_json::from_str(line).unwrap();

        assert_eq!(task.id, TaskId::from("T002"));
        assert_eq!(task.file, "T002-b.md");
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.parallel);
        assert_eq!(task.depends_on, vec![TaskId::from("T001")]);
        assert_eq!(task.summary.as_deref(), Some("Second step"));
    }

    #[test]
    fn optional_fields_default() {
        let line = r#"{"id":"T001","file":"T001-a.md"}"#;
        let task: Task = serde_json::from_str(line).unwrap();

        assert_eq!(task.status, TaskStatus::Unspecified);
        assert!(!task.parallel);
        assert!(task.depends_on.is_empty());
        assert!(task.summary.is_none());
    }

    #[test]
    fn unknown_keys_ignored() {
        let line = r#"{"id":"T001","file":"T001-a.md","owner":"agent-3","estimate":5}"#;
        let task: Task = serde_json::from_str(line).unwrap();
        assert_eq!(task.id.as_str(), "T001");
    }

    #[test]
    fn missing_id_fails() {
        let line = r#"{"file":"T001-a.md"}"#;
        assert!(serde_json::from_str::<Task>(line).is_err());
    }

    #[test]
    fn missing_file_fails() {
        let line = r#"{"id":"T001"}"#;
        assert!(serde_json::from_str::<Task>(line).is_err());
    }

    #[test]
    fn status_open_to_extension() {
        assert_eq!(TaskStatus::from("done".to_string()), TaskStatus::Done);
        assert_eq!(TaskStatus::from("pending".to_string()), TaskStatus::Pending);
        assert_eq!(TaskStatus::from(String::new()), TaskStatus::Unspecified);
        assert_eq!(
            TaskStatus::from("in_review".to_string()),
            TaskStatus::Other("in_review".to_string())
        );
        assert_eq!(TaskStatus::Other("in_review".into()).as_str(), "in_review");
    }

    #[test]
    fn status_serde_roundtrip() {
        let task = Task {
            status: TaskStatus::Other("blocked".into()),
            ..Task::new("T001", "T001-a.md")
        };
        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.status, task.status);
    }

    #[test]
    fn task_without_deps_is_ready() {
        let task = Task::new("T001", "T001-a.md");
        let map = statuses(&[]);

        assert!(task.is_ready(&map));
        assert!(!task.is_blocked(&map));
    }

    #[test]
    fn ready_and_blocked_follow_dependency_status() {
        let mut task = Task::new("T003", "T003-c.md");
        task.depends_on = vec![TaskId::from("T001"), TaskId::from("T002")];

        let map = statuses(&[("T001", TaskStatus::Done), ("T002", TaskStatus::Pending)]);
        assert!(task.is_blocked(&map));
        assert!(!task.is_ready(&map));
        assert_eq!(
            task.incomplete_deps(&map).collect::<Vec<_>>(),
            vec![&TaskId::from("T002")]
        );

        let map = statuses(&[("T001", TaskStatus::Done), ("T002", TaskStatus::Done)]);
        assert!(task.is_ready(&map));
        assert!(!task.is_blocked(&map));
    }

    #[test]
    fn unknown_dependency_counts_as_blocking() {
        let mut task = Task::new("T002", "T002-b.md");
        task.depends_on = vec![TaskId::from("T099")];

        let map = statuses(&[]);
        assert!(task.is_blocked(&map));
        assert!(!task.is_ready(&map));
    }

    #[test]
    fn done_task_is_neither_ready_nor_blocked() {
        let mut task = Task::new("T001", "T001-a.md");
        task.status = TaskStatus::Done;

        let map = statuses(&[]);
        assert!(!task.is_ready(&map));
        assert!(!task.is_blocked(&map));
    }
}
