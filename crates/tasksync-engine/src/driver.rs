use tasksync_core::{IssueRef, Task};
use tasksync_tracker::{IssuePayload, IssueTracker};
use tracing::{error, info, warn};

use crate::formatter::{self, FormatOptions};
use crate::graph::TaskGraph;
use crate::report::SyncReport;
use crate::sequencer::Sequenced;

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub project_key: String,
    /// Epic/parent key every top-level issue nests under.
    pub epic_key: Option<String>,
    /// Default assignee account id, threaded into every payload.
    pub assignee: Option<String>,
    pub dry_run: bool,
}

/// Walks the sequenced tasks and creates one remote issue per item,
/// strictly one call at a time: a subtask is only valid once its parent
/// exists on the tracker, and the tracker serializes writes per project
/// anyway, so there is nothing to gain from concurrency.
pub struct SyncDriver<'a> {
    tracker: &'a dyn IssueTracker,
    options: SyncOptions,
}

impl<'a> SyncDriver<'a> {
    pub fn new(tracker: &'a dyn IssueTracker, options: SyncOptions) -> Self {
        Self { tracker, options }
    }

    /// Create every task and its subtasks in sequence order. A failed
    /// task skips its own subtasks and nothing else; the run always
    /// continues to the next top-level task.
    pub async fn run(&self, sequenced: &Sequenced, graph: &TaskGraph) -> SyncReport {
        let mut report = SyncReport::with_warnings(sequenced.warnings.clone());

        info!("creating {} tasks...", sequenced.order.len());

        for id in &sequenced.order {
            let Some(task) = graph.task(id) else {
                continue;
            };
            info!("processing task {} ({})", id, task.title);

            let item = IssueRef::Task(id.clone());
            let payload = formatter::task_payload(
                task,
                &FormatOptions {
                    project_key: &self.options.project_key,
                    parent_key: self.options.epic_key.as_deref(),
                    assignee: self.options.assignee.as_deref(),
                },
            );

            match self.create(item, &payload, &mut report).await {
                Some(task_key) => self.create_subtasks(task, &task_key, &mut report).await,
                None => self.skip_subtasks(task, &mut report),
            }
        }

        report
    }

    async fn create_subtasks(&self, task: &Task, task_key: &str, report: &mut SyncReport) {
        if task.subtasks.is_empty() {
            return;
        }
        info!(
            "creating {} sub-tasks for {task_key}...",
            task.subtasks.len()
        );
        for subtask in &task.subtasks {
            let item = IssueRef::Subtask {
                parent: task.id.clone(),
                id: subtask.id.clone(),
            };
            let payload = formatter::subtask_payload(
                subtask,
                &FormatOptions {
                    project_key: &self.options.project_key,
                    parent_key: Some(task_key),
                    assignee: self.options.assignee.as_deref(),
                },
            );
            // Each subtask succeeds or fails independently of its siblings
            self.create(item, &payload, report).await;
        }
    }

    fn skip_subtasks(&self, task: &Task, report: &mut SyncReport) {
        for subtask in &task.subtasks {
            let item = IssueRef::Subtask {
                parent: task.id.clone(),
                id: subtask.id.clone(),
            };
            warn!(
                "skipping subtask {item} because parent task {} was not created",
                task.id
            );
            report.record_skipped(item, task.id.clone());
        }
    }

    /// One creation attempt. Under dry-run a deterministic placeholder
    /// key is recorded and the tracker is never invoked.
    async fn create(
        &self,
        item: IssueRef,
        payload: &IssuePayload,
        report: &mut SyncReport,
    ) -> Option<String> {
        if self.options.dry_run {
            let key = placeholder_key(&item);
            info!(
                "[dry-run] would create {}: {key} - {}",
                payload.issue_type, payload.summary
            );
            report.record_created(item, key.clone());
            return Some(key);
        }

        match self.tracker.create_issue(payload).await {
            Ok(key) => {
                info!("created {}: {key} - {}", payload.issue_type, payload.summary);
                report.record_created(item, key.clone());
                Some(key)
            }
            Err(e) => {
                error!("failed to create {} for {item}: {e}", payload.issue_type);
                report.record_failed(item, e.to_string());
                None
            }
        }
    }
}

fn placeholder_key(item: &IssueRef) -> String {
    match item {
        IssueRef::Task(id) => format!("DRY-TASK-{id}"),
        IssueRef::Subtask { parent, id } => format!("DRY-SUBTASK-{parent}-{id}"),
    }
}
