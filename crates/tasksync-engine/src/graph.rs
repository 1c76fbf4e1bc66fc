use std::collections::HashMap;

use tasksync_core::{Task, TaskId};
use tracing::warn;

/// Adjacency structure over the top-level tasks: each id maps to its
/// declared prerequisite ids, plus an id→task lookup. Input order is
/// preserved for the sequencer's stable tie-break.
///
/// Duplicate top-level ids are de-duplicated keeping the first
/// occurrence; later records with the same id are dropped and reported.
/// Unknown dependency targets are kept as-is here and handled by the
/// sequencer.
#[derive(Debug, Default)]
pub struct TaskGraph {
    order: Vec<TaskId>,
    deps: HashMap<TaskId, Vec<TaskId>>,
    tasks: HashMap<TaskId, Task>,
    duplicates: Vec<TaskId>,
}

impl TaskGraph {
    pub fn build(tasks: Vec<Task>) -> Self {
        let mut graph = TaskGraph::default();
        for task in tasks {
            if graph.tasks.contains_key(&task.id) {
                warn!("duplicate task id {}; keeping the first occurrence", task.id);
                graph.duplicates.push(task.id.clone());
                continue;
            }
            graph.order.push(task.id.clone());
            graph.deps.insert(task.id.clone(), dedup(&task.dependencies));
            graph.tasks.insert(task.id.clone(), task);
        }
        graph
    }

    /// Ids in input order, duplicates removed.
    pub fn order(&self) -> &[TaskId] {
        &self.order
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn deps_of(&self, id: &TaskId) -> &[TaskId] {
        self.deps.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn duplicates(&self) -> &[TaskId] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Drop repeated prerequisite ids while keeping declared order, so the
/// traversal visits each dependency once and stays deterministic.
fn dedup(ids: &[TaskId]) -> Vec<TaskId> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(id.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, deps: &[i64]) -> Task {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Task {id}"),
            "dependencies": deps,
        }))
        .unwrap()
    }

    #[test]
    fn build_preserves_input_order() {
        let graph = TaskGraph::build(vec![task(3, &[]), task(1, &[3]), task(2, &[])]);
        let order: Vec<_> = graph.order().iter().map(ToString::to_string).collect();
        assert_eq!(order, ["3", "1", "2"]);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn deps_of_returns_declared_prerequisites() {
        let graph = TaskGraph::build(vec![task(1, &[]), task(2, &[1])]);
        assert_eq!(graph.deps_of(&TaskId::Int(2)), &[TaskId::Int(1)]);
        assert!(graph.deps_of(&TaskId::Int(1)).is_empty());
        // Unknown id yields an empty slice, not a panic
        assert!(graph.deps_of(&TaskId::Int(99)).is_empty());
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut second = task(1, &[]);
        second.title = "Replacement".to_string();
        let graph = TaskGraph::build(vec![task(1, &[]), second]);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.duplicates(), &[TaskId::Int(1)]);
        assert_eq!(graph.task(&TaskId::Int(1)).unwrap().title, "Task 1");
    }

    #[test]
    fn repeated_dependency_ids_are_deduplicated() {
        let graph = TaskGraph::build(vec![task(1, &[]), task(2, &[1, 1, 1])]);
        assert_eq!(graph.deps_of(&TaskId::Int(2)), &[TaskId::Int(1)]);
    }

    #[test]
    fn unknown_dependency_targets_are_preserved() {
        let graph = TaskGraph::build(vec![task(5, &[99])]);
        assert_eq!(graph.deps_of(&TaskId::Int(5)), &[TaskId::Int(99)]);
        assert!(!graph.contains(&TaskId::Int(99)));
    }

    #[test]
    fn empty_input_builds_empty_graph() {
        let graph = TaskGraph::build(vec![]);
        assert!(graph.is_empty());
    }
}
