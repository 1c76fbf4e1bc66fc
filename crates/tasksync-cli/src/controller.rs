use anyhow::{Context, Result};
use tasksync_core::TaskDocument;
use tasksync_engine::{formatter, sequencer, SyncDriver, SyncOptions, SyncReport, TaskGraph};
use tasksync_tracker::IssueTracker;
use tracing::info;

use crate::config::SyncConfig;

/// Orchestrate one run: load the task list, resolve the epic, build the
/// graph, sequence, drive creation, and log the summary.
pub async fn run(config: &SyncConfig, tracker: &dyn IssueTracker) -> Result<SyncReport> {
    let doc = TaskDocument::load(&config.tasks_file)
        .with_context(|| format!("failed to load {}", config.tasks_file.display()))?;
    let mut tasks = doc.into_tasks();

    if let Some(start) = config.start_from_id() {
        let before = tasks.len();
        tasks.retain(|t| t.id >= start);
        info!(
            "start-from {start}: {} of {before} tasks retained",
            tasks.len()
        );
    }

    let project_key = config
        .project_key
        .clone()
        .context("project key is required")?;

    let epic_key = resolve_epic(config, tracker, &project_key).await?;

    let graph = TaskGraph::build(tasks);
    let sequenced = sequencer::sequence(&graph);

    let driver = SyncDriver::new(
        tracker,
        SyncOptions {
            project_key,
            epic_key,
            assignee: config.assignee.clone(),
            dry_run: config.dry_run,
        },
    );
    let report = driver.run(&sequenced, &graph).await;
    report.log_summary();
    Ok(report)
}

/// A pre-existing epic key wins; `--create-epic` makes a fresh one.
/// Under dry-run no epic is created and tasks stay unnested.
async fn resolve_epic(
    config: &SyncConfig,
    tracker: &dyn IssueTracker,
    project_key: &str,
) -> Result<Option<String>> {
    if let Some(key) = &config.epic_key {
        return Ok(Some(key.clone()));
    }
    if !config.create_epic || config.dry_run {
        return Ok(None);
    }

    let payload = formatter::epic_payload(
        project_key,
        &config.epic_title,
        "Epic grouping the issues created from the task list",
    );
    let key = tracker
        .create_issue(&payload)
        .await
        .context("failed to create epic")?;
    info!("created epic: {key}");
    Ok(Some(key))
}
