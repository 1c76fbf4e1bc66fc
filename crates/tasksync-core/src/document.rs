use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::TaskDocError;
use crate::task::Task;

/// The persisted task list: a `master` container holding an ordered
/// sequence of tasks.
#[derive(Debug, Deserialize)]
pub struct TaskDocument {
    master: TaskGroup,
}

#[derive(Debug, Deserialize)]
struct TaskGroup {
    tasks: Vec<Task>,
}

impl TaskDocument {
    pub fn load(path: &Path) -> Result<Self, TaskDocError> {
        let raw = fs::read_to_string(path).map_err(|source| TaskDocError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    /// Parse the document, distinguishing malformed JSON from a
    /// structurally wrong document.
    pub fn parse(raw: &str) -> Result<Self, TaskDocError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(TaskDocError::InvalidJson)?;

        let has_tasks = value
            .get("master")
            .and_then(|m| m.get("tasks"))
            .map(serde_json::Value::is_array)
            .unwrap_or(false);
        if !has_tasks {
            return Err(TaskDocError::MissingContainer);
        }

        serde_json::from_value(value).map_err(TaskDocError::InvalidShape)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.master.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.master.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_valid_document() {
        let doc = TaskDocument::parse(
            r#"{"master": {"tasks": [{"id": 1, "title": "Setup"}, {"id": 2, "title": "API"}]}}"#,
        )
        .unwrap();
        assert_eq!(doc.tasks().len(), 2);
        assert_eq!(doc.tasks()[0].title, "Setup");
    }

    #[test]
    fn parse_empty_task_list() {
        let doc = TaskDocument::parse(r#"{"master": {"tasks": []}}"#).unwrap();
        assert!(doc.tasks().is_empty());
    }

    #[test]
    fn missing_master_container_is_rejected() {
        let err = TaskDocument::parse(r#"{"tasks": []}"#).unwrap_err();
        assert!(matches!(err, TaskDocError::MissingContainer));
    }

    #[test]
    fn missing_tasks_key_is_rejected() {
        let err = TaskDocument::parse(r#"{"master": {}}"#).unwrap_err();
        assert!(matches!(err, TaskDocError::MissingContainer));
    }

    #[test]
    fn tasks_must_be_an_array() {
        let err = TaskDocument::parse(r#"{"master": {"tasks": "nope"}}"#).unwrap_err();
        assert!(matches!(err, TaskDocError::MissingContainer));
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = TaskDocument::parse("{not json").unwrap_err();
        assert!(matches!(err, TaskDocError::InvalidJson(_)));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"master": {{"tasks": [{{"id": 1, "title": "From disk"}}]}}}}"#
        )
        .unwrap();
        let doc = TaskDocument::load(file.path()).unwrap();
        assert_eq!(doc.tasks()[0].title, "From disk");
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = TaskDocument::load(Path::new("/nonexistent/tasks.json")).unwrap_err();
        assert!(matches!(err, TaskDocError::NotFound { .. }));
        assert!(err.to_string().contains("/nonexistent/tasks.json"));
    }
}
