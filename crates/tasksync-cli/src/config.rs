use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tasksync_core::TaskId;

#[derive(Debug, Parser)]
#[command(name = "tasksync", about = "Create tracker issues from a task list")]
pub struct SyncConfig {
    /// Path to the tasks file
    #[arg(long, default_value = ".taskmaster/tasks/tasks.json")]
    pub tasks_file: PathBuf,

    /// Preview what would be created without calling the tracker
    #[arg(long)]
    pub dry_run: bool,

    /// Target project key
    #[arg(long, env = "JIRA_PROJECT_KEY")]
    pub project_key: Option<String>,

    /// Tracker instance URL
    #[arg(long, env = "JIRA_BASE_URL")]
    pub base_url: Option<String>,

    /// Account email for API authentication
    #[arg(long, env = "JIRA_EMAIL")]
    pub email: Option<String>,

    /// API token (not a password)
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Default assignee account id applied to every created issue
    #[arg(long, env = "JIRA_ASSIGNEE_ACCOUNT_ID")]
    pub assignee: Option<String>,

    /// Create issues under this existing epic
    #[arg(long)]
    pub epic_key: Option<String>,

    /// Create a fresh epic and nest all tasks under it
    #[arg(long, conflicts_with = "epic_key")]
    pub create_epic: bool,

    /// Summary for the epic created by --create-epic
    #[arg(long, default_value = "Task backlog")]
    pub epic_title: String,

    /// Only process tasks with id >= this value
    #[arg(long)]
    pub start_from: Option<String>,
}

impl SyncConfig {
    /// Fatal configuration checks, performed before any processing.
    /// Credentials are only required when the tracker will actually be
    /// called.
    pub fn validate(&self) -> Result<()> {
        if self.project_key.as_deref().unwrap_or("").is_empty() {
            bail!("missing project key: set JIRA_PROJECT_KEY or pass --project-key");
        }
        if !self.dry_run {
            if self.base_url.as_deref().unwrap_or("").is_empty() {
                bail!("missing tracker URL: set JIRA_BASE_URL or pass --base-url");
            }
            if self.email.as_deref().unwrap_or("").is_empty() {
                bail!("missing account email: set JIRA_EMAIL or pass --email");
            }
            if self.api_token.as_deref().unwrap_or("").is_empty() {
                bail!("missing API token: set JIRA_API_TOKEN or pass --api-token");
            }
        }
        Ok(())
    }

    pub fn start_from_id(&self) -> Option<TaskId> {
        self.start_from.as_deref().map(TaskId::parse)
    }
}
