pub mod jira;
pub mod mock;

pub use jira::JiraTracker;
pub use mock::MockTracker;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// The tracker accepted the request but rejected the issue. Carries
    /// the tracker-supplied detail verbatim.
    #[error("tracker rejected issue: {0}")]
    Rejected(String),

    #[error("request failed: {0}")]
    Transport(String),
}

/// Everything needed to create one issue. Built by the formatter;
/// adapters translate this into their tracker's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuePayload {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub issue_type: String,
    /// Tracker priority label. Epics carry no priority.
    pub priority: Option<String>,
    pub parent_key: Option<String>,
    pub assignee: Option<String>,
}

/// The single capability the sync engine needs from an issue tracker.
///
/// `JiraTracker` is the real adapter; `MockTracker` substitutes for it
/// in tests.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    fn name(&self) -> &str;

    /// Create one issue, returning the remote issue key.
    async fn create_issue(&self, payload: &IssuePayload) -> Result<String, TrackerError>;
}
