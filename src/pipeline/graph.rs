//! Task graph construction and dependency resolution

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::pipeline::Task;

/// A validated task dependency graph
///
/// Construction rejects duplicate names, dangling context references, and
/// cycles. The resolved execution order is deterministic: Kahn's algorithm
/// with an earliest-declared tie-break, so a declared order that already
/// respects dependencies is returned unchanged.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
    order: Vec<usize>,
}

impl TaskGraph {
    /// Build and validate a graph from a declared task list
    pub fn build(tasks: Vec<Task>) -> Result<Self> {
        let mut index = HashMap::new();
        for (i, task) in tasks.iter().enumerate() {
            if index.insert(task.name.clone(), i).is_some() {
                return Err(Error::DuplicateTask(task.name.clone()));
            }
        }

        // Every context reference must name a registered task
        for task in &tasks {
            for dep in &task.context {
                if !index.contains_key(dep) {
                    return Err(Error::DanglingReference {
                        task: task.name.clone(),
                        missing: dep.clone(),
                    });
                }
            }
        }

        validate_acyclic(&tasks, &index)?;

        let order = stable_topological_order(&tasks, &index);

        Ok(Self { tasks, index, order })
    }

    /// All tasks in declared order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task at the given declared index
    pub fn task(&self, idx: usize) -> &Task {
        &self.tasks[idx]
    }

    /// Declared index of a task by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Resolved execution order as indices into the declared task list
    pub fn resolved_order(&self) -> &[usize] {
        &self.order
    }

    /// The task whose output is the run result (last in resolved order)
    pub fn final_task(&self) -> Option<&Task> {
        self.order.last().map(|&i| &self.tasks[i])
    }

    /// Tasks that no other task depends on
    pub fn terminal_tasks(&self) -> Vec<&Task> {
        let mut referenced: HashSet<&str> = HashSet::new();
        for task in &self.tasks {
            for dep in &task.context {
                referenced.insert(dep.as_str());
            }
        }
        self.tasks
            .iter()
            .filter(|t| !referenced.contains(t.name.as_str()))
            .collect()
    }

    /// Check that a proposed order is a dependency-respecting permutation
    ///
    /// Used to vet manager-proposed orders before adopting them.
    pub fn validate_order(&self, proposed: &[usize]) -> bool {
        if proposed.len() != self.tasks.len() {
            return false;
        }

        let mut seen = HashSet::new();
        for &idx in proposed {
            if idx >= self.tasks.len() || !seen.insert(idx) {
                return false;
            }
            for dep in &self.tasks[idx].context {
                let dep_idx = self.index[dep.as_str()];
                if !seen.contains(&dep_idx) {
                    return false;
                }
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Validate the graph contains no cycles
///
/// Uses DFS with a recursion stack. The reported path starts and ends at the
/// repeated task.
fn validate_acyclic(tasks: &[Task], index: &HashMap<String, usize>) -> Result<()> {
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut cycle_path = Vec::new();

    for i in 0..tasks.len() {
        if !visited.contains(&i) && has_cycle_dfs(i, tasks, index, &mut visited, &mut rec_stack, &mut cycle_path) {
            return Err(Error::CyclicDependency { path: cycle_path });
        }
    }

    Ok(())
}

/// DFS helper for cycle detection
fn has_cycle_dfs(
    node: usize,
    tasks: &[Task],
    index: &HashMap<String, usize>,
    visited: &mut HashSet<usize>,
    rec_stack: &mut HashSet<usize>,
    cycle_path: &mut Vec<String>,
) -> bool {
    visited.insert(node);
    rec_stack.insert(node);
    cycle_path.push(tasks[node].name.clone());

    for dep in &tasks[node].context {
        let dep_idx = index[dep.as_str()];
        if !visited.contains(&dep_idx) {
            if has_cycle_dfs(dep_idx, tasks, index, visited, rec_stack, cycle_path) {
                return true;
            }
        } else if rec_stack.contains(&dep_idx) {
            cycle_path.push(dep.clone());
            return true;
        }
    }

    rec_stack.remove(&node);
    cycle_path.pop();
    false
}

/// Topologically sort tasks, breaking ties by declared position
///
/// Kahn's algorithm over the context edges. Among all ready tasks the
/// earliest-declared one runs first, which makes the sort the identity on a
/// declared order that already respects dependencies.
fn stable_topological_order(tasks: &[Task], index: &HashMap<String, usize>) -> Vec<usize> {
    let mut indegree = vec![0usize; tasks.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];

    for (i, task) in tasks.iter().enumerate() {
        for dep in &task.context {
            let dep_idx = index[dep.as_str()];
            indegree[i] += 1;
            dependents[dep_idx].push(i);
        }
    }

    let mut ready: Vec<usize> = (0..tasks.len()).filter(|&i| indegree[i] == 0).collect();
    let mut order = Vec::with_capacity(tasks.len());

    while let Some(pos) = ready.iter().enumerate().min_by_key(|&(_, &idx)| idx).map(|(p, _)| p) {
        let idx = ready.swap_remove(pos);
        order.push(idx);
        for &dependent in &dependents[idx] {
            indegree[dependent] -= 1;
            if indegree[dependent] == 0 {
                ready.push(dependent);
            }
        }
    }

    order
}
