use tasksync_core::{Notes, Priority, Subtask, Task, TaskId};
use tasksync_tracker::IssuePayload;

/// Caller-supplied context threaded into every payload. The formatter
/// never decides whether to assign or nest; it only attaches what it is
/// given.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions<'a> {
    pub project_key: &'a str,
    pub parent_key: Option<&'a str>,
    pub assignee: Option<&'a str>,
}

/// Fixed mapping from task priority to the tracker's label.
fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

/// Build the payload for a top-level task.
pub fn task_payload(task: &Task, opts: &FormatOptions<'_>) -> IssuePayload {
    IssuePayload {
        project_key: opts.project_key.to_string(),
        summary: task.title.clone(),
        description: render_description(
            &task.description,
            task.details.as_ref(),
            task.test_strategy.as_ref(),
            Some(&task.dependencies),
            &task.id,
            task.priority,
            &task.status,
            task.assigned_to.as_deref(),
        ),
        issue_type: "Task".to_string(),
        priority: Some(priority_label(task.priority).to_string()),
        parent_key: opts.parent_key.map(str::to_string),
        assignee: opts.assignee.map(str::to_string),
    }
}

/// Build the payload for a subtask. No dependencies section: subtasks
/// depend implicitly on their parent, which arrives via `parent_key`.
pub fn subtask_payload(subtask: &Subtask, opts: &FormatOptions<'_>) -> IssuePayload {
    IssuePayload {
        project_key: opts.project_key.to_string(),
        summary: subtask.title.clone(),
        description: render_description(
            &subtask.description,
            subtask.details.as_ref(),
            subtask.test_strategy.as_ref(),
            None,
            &subtask.id,
            subtask.priority,
            &subtask.status,
            None,
        ),
        issue_type: "Subtask".to_string(),
        priority: Some(priority_label(subtask.priority).to_string()),
        parent_key: opts.parent_key.map(str::to_string),
        assignee: opts.assignee.map(str::to_string),
    }
}

/// Build the payload for a grouping epic. Epics carry no priority and
/// never nest under a parent.
pub fn epic_payload(project_key: &str, title: &str, description: &str) -> IssuePayload {
    IssuePayload {
        project_key: project_key.to_string(),
        summary: title.to_string(),
        description: description.to_string(),
        issue_type: "Epic".to_string(),
        priority: None,
        parent_key: None,
        assignee: None,
    }
}

/// Assemble the Jira wiki-markup description: present-only sections in a
/// fixed order, with the metadata block always last. Absent fields
/// contribute no section.
#[allow(clippy::too_many_arguments)]
fn render_description(
    description: &str,
    details: Option<&Notes>,
    test_strategy: Option<&Notes>,
    dependencies: Option<&[TaskId]>,
    id: &TaskId,
    priority: Priority,
    status: &str,
    assigned_to: Option<&str>,
) -> String {
    let mut sections = Vec::new();

    if !description.trim().is_empty() {
        sections.push(format!("h2. Description\n{description}"));
    }

    if let Some(details) = details {
        if !details.is_empty() {
            sections.push(format!("h2. Implementation Details\n{}", details.joined()));
        }
    }

    if let Some(strategy) = test_strategy {
        if !strategy.is_empty() {
            sections.push(format!("h2. Test Strategy\n{}", strategy.joined()));
        }
    }

    if let Some(deps) = dependencies {
        if !deps.is_empty() {
            let rendered: Vec<String> = deps.iter().map(ToString::to_string).collect();
            sections.push(format!("h2. Dependencies\nTasks: {}", rendered.join(", ")));
        }
    }

    let mut metadata = vec![
        format!("* Task ID: {id}"),
        format!("* Priority: {priority}"),
        format!("* Status: {status}"),
    ];
    if let Some(assignee) = assigned_to {
        metadata.push(format!("* Assigned To: {assignee}"));
    }
    sections.push(format!("h2. Metadata\n{}", metadata.join("\n")));

    sections.join("\n\n")
}
