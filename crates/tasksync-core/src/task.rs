use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Task identifier as it appears in the tasks file: either a number or a
/// string. `Int(1)` and `Str("1")` are distinct identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Int(i64),
    Str(String),
}

impl TaskId {
    /// Parse a CLI-supplied identifier. Numeric input becomes `Int` so the
    /// start-from filter compares numerically against numeric task ids.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => TaskId::Int(n),
            Err(_) => TaskId::Str(raw.to_string()),
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Int(n) => write!(f, "{n}"),
            TaskId::Str(s) => f.write_str(s),
        }
    }
}

impl Ord for TaskId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (TaskId::Int(a), TaskId::Int(b)) => a.cmp(b),
            (TaskId::Str(a), TaskId::Str(b)) => a.cmp(b),
            // Mixed kinds fall back to comparing rendered forms
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl PartialOrd for TaskId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        TaskId::Int(n)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::Str(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Unrecognized values coerce to the default rather than erroring.
    pub fn parse(s: &str) -> Self {
        match s {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn de_priority<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(Priority::parse).unwrap_or_default())
}

/// Free-form notes field: a single block of text or an ordered list of
/// lines, as both shapes occur in generated task files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Notes {
    Text(String),
    Lines(Vec<String>),
}

impl Notes {
    /// Collapse into a single text block, joining list entries with newlines.
    pub fn joined(&self) -> String {
        match self {
            Notes::Text(s) => s.clone(),
            Notes::Lines(lines) => lines.join("\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Notes::Text(s) => s.trim().is_empty(),
            Notes::Lines(lines) => lines.iter().all(|l| l.trim().is_empty()),
        }
    }
}

fn default_status() -> String {
    "pending".to_string()
}

/// A top-level work item from the tasks file.
///
/// Dependencies reference other top-level task ids only, never subtasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: Option<Notes>,
    #[serde(default, rename = "testStrategy")]
    pub test_strategy: Option<Notes>,
    #[serde(default, deserialize_with = "de_priority")]
    pub priority: Priority,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default, rename = "assignedTo")]
    pub assigned_to: Option<String>,
}

/// A child work item. Subtasks carry no dependency list: they depend
/// implicitly and solely on their parent task's successful creation.
/// The id is unique within the parent, not globally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: Option<Notes>,
    #[serde(default, rename = "testStrategy")]
    pub test_strategy: Option<Notes>,
    #[serde(default, deserialize_with = "de_priority")]
    pub priority: Priority,
    #[serde(default = "default_status")]
    pub status: String,
}

/// Key into the run-scoped creation map: a top-level task, or a subtask
/// addressed by its parent's id plus its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueRef {
    Task(TaskId),
    Subtask { parent: TaskId, id: TaskId },
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueRef::Task(id) => write!(f, "{id}"),
            IssueRef::Subtask { parent, id } => write!(f, "{parent}-{id}"),
        }
    }
}
