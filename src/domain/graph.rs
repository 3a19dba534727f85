//! Dependency graph for tasks
//!
//! Wraps a petgraph `DiGraph` with edges pointing from a task to the tasks
//! it depends on. Used for cycle detection during validation and for the
//! dependency-first execution order.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{depth_first_search, Control, DfsEvent};
use std::collections::HashMap;
use thiserror::Error;

use super::task::{Task, TaskId};

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("circular dependency detected involving task {0}")]
    CycleDetected(TaskId),
}

/// A directed dependency graph over task ids
///
/// Edges run task -> dependency. Dependency ids that do not name a known
/// task get no edge at all; the existence check reports those separately,
/// and leaving them out keeps every walk over the graph finite.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<TaskId, ()>,
    nodes: HashMap<TaskId, NodeIndex>,
}

impl DependencyGraph {
    /// Builds a graph from the index tasks
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let tasks: Vec<_> = tasks.into_iter().collect();
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();

        for task in &tasks {
            nodes
                .entry(task.id.clone())
                .or_insert_with(|| graph.add_node(task.id.clone()));
        }

        for task in &tasks {
            let from = nodes[&task.id];
            for dep_id in &task.depends_on {
                if let Some(&to) = nodes.get(dep_id) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        Self { graph, nodes }
    }

    /// Returns true if the graph contains the task
    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.nodes.contains_key(task_id)
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if a dependency cycle is reachable from the given task
    ///
    /// A depth-first walk along `depends_on` edges; a back edge means some
    /// node on the current path was reached again.
    pub fn has_cycle_from(&self, task_id: &TaskId) -> bool {
        let Some(&start) = self.nodes.get(task_id) else {
            return false;
        };

        depth_first_search(&self.graph, Some(start), |event| match event {
            DfsEvent::BackEdge(..) => Control::Break(()),
            _ => Control::Continue,
        })
        .break_value()
        .is_some()
    }

    /// Returns all tasks in execution order (dependencies before dependents)
    pub fn execution_order(&self) -> Result<Vec<TaskId>, GraphError> {
        match toposort(&self.graph, None) {
            Ok(order) => {
                // Edges run task -> dependency, so toposort yields
                // dependents first; execution wants the reverse.
                Ok(order
                    .into_iter()
                    .rev()
                    .map(|idx| self.graph[idx].clone())
                    .collect())
            }
            Err(cycle) => Err(GraphError::CycleDetected(
                self.graph[cycle.node_id()].clone(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> Task {
        let mut t = Task::new(id, format!("{id}-x.md"));
        t.depends_on = deps.iter().map(|d| TaskId::from(*d)).collect();
        t
    }

    #[test]
    fn empty_graph() {
        let graph = DependencyGraph::from_tasks(&[] as &[Task]);
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
    }

    #[test]
    fn builds_nodes_and_edges() {
        let tasks = [task("T001", &[]), task("T002", &["T001"])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert_eq!(graph.len(), 2);
        assert!(graph.contains(&TaskId::from("T001")));
        assert!(graph.contains(&TaskId::from("T002")));
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let tasks = [
            task("T001", &[]),
            task("T002", &["T001"]),
            task("T003", &["T001", "T002"]),
        ];
        let graph = DependencyGraph::from_tasks(&tasks);

        for t in &tasks {
            assert!(!graph.has_cycle_from(&t.id), "unexpected cycle at {}", t.id);
        }
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let tasks = [task("T001", &["T001"])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert!(graph.has_cycle_from(&TaskId::from("T001")));
    }

    #[test]
    fn mutual_dependency_is_a_cycle() {
        let tasks = [task("T001", &["T002"]), task("T002", &["T001"])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert!(graph.has_cycle_from(&TaskId::from("T001")));
        assert!(graph.has_cycle_from(&TaskId::from("T002")));
    }

    #[test]
    fn three_node_chain_cycle() {
        let tasks = [
            task("T001", &["T003"]),
            task("T002", &["T001"]),
            task("T003", &["T002"]),
        ];
        let graph = DependencyGraph::from_tasks(&tasks);

        for t in &tasks {
            assert!(graph.has_cycle_from(&t.id));
        }
    }

    #[test]
    fn cycle_reachable_from_outside_is_detected() {
        // T001 is not on the cycle but reaches it
        let tasks = [
            task("T001", &["T002"]),
            task("T002", &["T003"]),
            task("T003", &["T002"]),
        ];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert!(graph.has_cycle_from(&TaskId::from("T001")));
        assert!(graph.has_cycle_from(&TaskId::from("T002")));
    }

    #[test]
    fn task_off_the_cycle_is_clean() {
        let tasks = [
            task("T001", &["T002"]),
            task("T002", &["T001"]),
            task("T003", &[]),
        ];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert!(!graph.has_cycle_from(&TaskId::from("T003")));
    }

    #[test]
    fn unresolved_dependency_terminates_walk() {
        // T099 does not exist; the walk must not loop or panic
        let tasks = [task("T001", &["T099"]), task("T002", &["T001"])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert!(!graph.has_cycle_from(&TaskId::from("T001")));
        assert!(!graph.has_cycle_from(&TaskId::from("T002")));
    }

    #[test]
    fn execution_order_puts_dependencies_first() {
        let tasks = [
            task("T003", &["T002"]),
            task("T001", &[]),
            task("T002", &["T001"]),
        ];
        let graph = DependencyGraph::from_tasks(&tasks);

        let order = graph.execution_order().unwrap();
        let pos = |id: &str| order.iter().position(|t| t.as_str() == id).unwrap();

        assert!(pos("T001") < pos("T002"));
        assert!(pos("T002") < pos("T003"));
    }

    #[test]
    fn execution_order_fails_on_cycle() {
        let tasks = [task("T001", &["T002"]), task("T002", &["T001"])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert!(matches!(
            graph.execution_order(),
            Err(GraphError::CycleDetected(_))
        ));
    }
}
