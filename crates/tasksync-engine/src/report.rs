use std::collections::HashMap;

use tasksync_core::{IssueRef, TaskId};
use tracing::info;

use crate::sequencer::SequenceWarning;

#[derive(Debug, Clone)]
pub struct Failure {
    pub item: IssueRef,
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct Skipped {
    pub item: IssueRef,
    /// The parent task whose failed creation caused the skip.
    pub parent: TaskId,
}

/// Outcome of one run: the creation map plus everything the operator
/// needs for a summary without re-deriving it. Run-scoped; discarded
/// after the run.
#[derive(Debug, Default)]
pub struct SyncReport {
    created: HashMap<IssueRef, String>,
    pub failures: Vec<Failure>,
    pub skipped: Vec<Skipped>,
    pub warnings: Vec<SequenceWarning>,
}

impl SyncReport {
    pub fn with_warnings(warnings: Vec<SequenceWarning>) -> Self {
        Self {
            warnings,
            ..Self::default()
        }
    }

    /// Record a created issue. A key already recorded for an identifier
    /// is never overwritten within the same run.
    pub fn record_created(&mut self, item: IssueRef, key: String) {
        self.created.entry(item).or_insert(key);
    }

    pub fn record_failed(&mut self, item: IssueRef, detail: String) {
        self.failures.push(Failure { item, detail });
    }

    pub fn record_skipped(&mut self, item: IssueRef, parent: TaskId) {
        self.skipped.push(Skipped { item, parent });
    }

    pub fn key_for(&self, item: &IssueRef) -> Option<&str> {
        self.created.get(item).map(String::as_str)
    }

    pub fn created_map(&self) -> &HashMap<IssueRef, String> {
        &self.created
    }

    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Render the final tally and the full id→key map as log lines.
    pub fn log_summary(&self) {
        info!(
            "sync complete: {} created, {} failed, {} skipped, {} warnings",
            self.created_count(),
            self.failed_count(),
            self.skipped_count(),
            self.warnings.len()
        );

        for failure in &self.failures {
            info!("failed: {} ({})", failure.item, failure.detail);
        }
        for skip in &self.skipped {
            info!(
                "skipped: {} (parent task {} was not created)",
                skip.item, skip.parent
            );
        }

        let mut entries: Vec<(String, &str)> = self
            .created
            .iter()
            .map(|(item, key)| (item.to_string(), key.as_str()))
            .collect();
        entries.sort();
        for (item, key) in entries {
            info!("created: {item} -> {key}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_key_is_never_overwritten() {
        let mut report = SyncReport::default();
        let item = IssueRef::Task(TaskId::Int(1));
        report.record_created(item.clone(), "PROJ-1".to_string());
        report.record_created(item.clone(), "PROJ-2".to_string());

        assert_eq!(report.key_for(&item), Some("PROJ-1"));
        assert_eq!(report.created_count(), 1);
    }

    #[test]
    fn counts_reflect_recorded_outcomes() {
        let mut report = SyncReport::default();
        report.record_created(IssueRef::Task(TaskId::Int(1)), "PROJ-1".to_string());
        report.record_failed(IssueRef::Task(TaskId::Int(2)), "boom".to_string());
        report.record_skipped(
            IssueRef::Subtask {
                parent: TaskId::Int(2),
                id: TaskId::Int(1),
            },
            TaskId::Int(2),
        );

        assert_eq!(report.created_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.skipped_count(), 1);
    }
}
