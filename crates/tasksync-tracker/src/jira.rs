use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use super::{IssuePayload, IssueTracker, TrackerError};

/// Jira Cloud REST adapter. One outstanding request at a time; the
/// engine serializes calls, so no pooling concerns here.
pub struct JiraTracker {
    base_url: String,
    email: String,
    api_token: String,
    client: Client,
}

impl JiraTracker {
    pub fn new(base_url: &str, email: String, api_token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            email,
            api_token,
            client: Client::new(),
        }
    }

    /// Render the payload into Jira's `fields` object. Parent and
    /// assignee are attached only when present.
    fn fields(payload: &IssuePayload) -> Value {
        let mut fields = json!({
            "project": {"key": payload.project_key},
            "summary": payload.summary,
            "description": payload.description,
            "issuetype": {"name": payload.issue_type},
        });
        if let Some(priority) = &payload.priority {
            fields["priority"] = json!({"name": priority});
        }
        if let Some(parent) = &payload.parent_key {
            fields["parent"] = json!({"key": parent});
        }
        if let Some(assignee) = &payload.assignee {
            fields["assignee"] = json!({"accountId": assignee});
        }
        fields
    }
}

#[derive(Debug, Deserialize)]
struct CreatedIssue {
    key: String,
}

#[async_trait]
impl IssueTracker for JiraTracker {
    fn name(&self) -> &str {
        "jira"
    }

    async fn create_issue(&self, payload: &IssuePayload) -> Result<String, TrackerError> {
        let url = format!("{}/rest/api/2/issue", self.base_url);
        let body = json!({"fields": Self::fields(payload)});

        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| TrackerError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            // Surface the Jira error body verbatim
            let detail = resp.text().await.unwrap_or_default();
            error!("jira API error ({status}): {detail}");
            return Err(TrackerError::Rejected(format!("{status}: {detail}")));
        }

        let created: CreatedIssue = resp
            .json()
            .await
            .map_err(|e| TrackerError::Transport(format!("parse response: {e}")))?;
        Ok(created.key)
    }
}
