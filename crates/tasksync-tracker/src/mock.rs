use std::sync::Mutex;

use async_trait::async_trait;

use super::{IssuePayload, IssueTracker, TrackerError};

/// In-memory tracker for tests. Records every payload it receives and
/// hands out sequential `MOCK-n` keys. Summaries listed via `fail_on`
/// are rejected instead.
#[derive(Default)]
pub struct MockTracker {
    calls: Mutex<Vec<IssuePayload>>,
    fail_on: Vec<String>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any issue whose summary matches.
    pub fn fail_on(mut self, summary: &str) -> Self {
        self.fail_on.push(summary.to_string());
        self
    }

    pub fn calls(&self) -> Vec<IssuePayload> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    fn name(&self) -> &str {
        "mock"
    }

    async fn create_issue(&self, payload: &IssuePayload) -> Result<String, TrackerError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(payload.clone());
        if self.fail_on.contains(&payload.summary) {
            return Err(TrackerError::Rejected(format!(
                "simulated rejection of '{}'",
                payload.summary
            )));
        }
        Ok(format!("MOCK-{}", calls.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(summary: &str) -> IssuePayload {
        IssuePayload {
            project_key: "PROJ".to_string(),
            summary: summary.to_string(),
            description: String::new(),
            issue_type: "Task".to_string(),
            priority: Some("Medium".to_string()),
            parent_key: None,
            assignee: None,
        }
    }

    #[tokio::test]
    async fn hands_out_sequential_keys() {
        let mock = MockTracker::new();
        let a = mock.create_issue(&payload("one")).await.unwrap();
        let b = mock.create_issue(&payload("two")).await.unwrap();
        assert_eq!(a, "MOCK-1");
        assert_eq!(b, "MOCK-2");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn records_payloads() {
        let mock = MockTracker::new();
        mock.create_issue(&payload("recorded")).await.unwrap();
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].summary, "recorded");
    }

    #[tokio::test]
    async fn rejects_configured_summaries() {
        let mock = MockTracker::new().fail_on("doomed");
        let err = mock.create_issue(&payload("doomed")).await.unwrap_err();
        assert!(matches!(err, TrackerError::Rejected(_)));
        assert!(err.to_string().contains("doomed"));
        // The failed attempt is still recorded
        assert_eq!(mock.call_count(), 1);
    }
}
