use std::collections::HashSet;
use std::fmt;

use tasksync_core::TaskId;
use tracing::warn;

use crate::graph::TaskGraph;

/// Non-fatal conditions found while ordering. Each is also logged as it
/// is discovered; none of them removes a task from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceWarning {
    DuplicateId(TaskId),
    MissingDependency { task: TaskId, dependency: TaskId },
    Cycle { task: TaskId, dependency: TaskId },
}

impl fmt::Display for SequenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceWarning::DuplicateId(id) => {
                write!(f, "duplicate task id {id}; kept the first occurrence")
            }
            SequenceWarning::MissingDependency { task, dependency } => write!(
                f,
                "dependency {dependency} for task {task} not found in task list; treating as satisfied"
            ),
            SequenceWarning::Cycle { task, dependency } => write!(
                f,
                "dependency cycle between task {task} and {dependency}; edge skipped"
            ),
        }
    }
}

#[derive(Debug)]
pub struct Sequenced {
    /// Every input task exactly once, prerequisites before dependents.
    pub order: Vec<TaskId>,
    pub warnings: Vec<SequenceWarning>,
}

/// Order tasks so every prerequisite present in the input precedes its
/// dependents.
///
/// Depth-first post-order starting from tasks in input order, so tasks
/// with no ordering constraint between them keep their original relative
/// order. Two sets track traversal state: `visited` (fully processed or
/// in progress) and `on_stack` (the current traversal path). A
/// prerequisite already on the stack is a cycle: it is reported with
/// both ids involved, the edge is skipped, and the task is still
/// emitted. A prerequisite missing from the input is reported and
/// treated as already satisfied. One bad dependency never blocks the
/// rest of the run.
pub fn sequence(graph: &TaskGraph) -> Sequenced {
    let mut warnings: Vec<SequenceWarning> = graph
        .duplicates()
        .iter()
        .cloned()
        .map(SequenceWarning::DuplicateId)
        .collect();

    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();
    let mut order = Vec::with_capacity(graph.len());

    for id in graph.order() {
        if !visited.contains(id) {
            visit(graph, id, &mut visited, &mut on_stack, &mut order, &mut warnings);
        }
    }

    Sequenced { order, warnings }
}

fn visit(
    graph: &TaskGraph,
    id: &TaskId,
    visited: &mut HashSet<TaskId>,
    on_stack: &mut HashSet<TaskId>,
    order: &mut Vec<TaskId>,
    warnings: &mut Vec<SequenceWarning>,
) {
    visited.insert(id.clone());
    on_stack.insert(id.clone());

    for dep in graph.deps_of(id) {
        if !graph.contains(dep) {
            warn!("dependency {dep} for task {id} not found in task list; treating as satisfied");
            warnings.push(SequenceWarning::MissingDependency {
                task: id.clone(),
                dependency: dep.clone(),
            });
            continue;
        }
        if on_stack.contains(dep) {
            // Covers self-dependencies as a cycle of length one
            warn!("dependency cycle between task {id} and {dep}; edge skipped");
            warnings.push(SequenceWarning::Cycle {
                task: id.clone(),
                dependency: dep.clone(),
            });
            continue;
        }
        if !visited.contains(dep) {
            visit(graph, dep, visited, on_stack, order, warnings);
        }
    }

    on_stack.remove(id);
    order.push(id.clone());
}
