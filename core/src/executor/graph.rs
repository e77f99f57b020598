use std::collections::HashMap;

use crate::error::ExecutorError;

use super::types::Task;

/// Outcome of validating a task graph. `is_valid` is true iff the combined
/// error list is empty; the checks never stop at the first failure.
#[derive(Debug, Clone)]
pub struct GraphValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Task dependency graph (DAG)
#[derive(Debug, Clone)]
pub struct TaskGraph {
    /// Task nodes: step id -> Task (first occurrence wins on duplicates)
    nodes: HashMap<u32, Task>,

    /// Original insertion order (for stable iteration)
    order: Vec<u32>,

    /// Step ids declared more than once
    duplicates: Vec<u32>,
}

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

impl TaskGraph {
    /// Construct the graph from a task list. Structural problems (duplicate
    /// steps, dangling references, cycles) are reported by [`validate`],
    /// not here.
    ///
    /// [`validate`]: TaskGraph::validate
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut nodes = HashMap::with_capacity(tasks.len());
        let mut order = Vec::with_capacity(tasks.len());
        let mut duplicates = Vec::new();

        for task in tasks {
            if nodes.contains_key(&task.step) {
                duplicates.push(task.step);
                continue;
            }
            order.push(task.step);
            nodes.insert(task.step, task.clone());
        }

        Self {
            nodes,
            order,
            duplicates,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, step: u32) -> Option<&Task> {
        self.nodes.get(&step)
    }

    /// Tasks in insertion order.
    pub fn tasks_in_order(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|step| self.nodes.get(step))
    }

    /// Validate referential integrity and acyclicity.
    ///
    /// Both checks run exhaustively: every dangling reference is reported,
    /// and every unvisited task seeds a cycle traversal, so independent
    /// cycles are collected. Planning and level assignment assume a graph
    /// that passed this check.
    pub fn validate(&self) -> GraphValidation {
        let mut errors = Vec::new();

        for &step in &self.duplicates {
            errors.push(ExecutorError::DuplicateStep(step).to_string());
        }

        // Check all dependencies exist
        for task in self.tasks_in_order() {
            for &dep in task.dependency_ids() {
                if !self.nodes.contains_key(&dep) {
                    errors.push(
                        ExecutorError::DependencyNotFound {
                            step: task.step,
                            missing: dep,
                        }
                        .to_string(),
                    );
                }
            }
        }

        // Detect circular dependencies: one error per traversal root that
        // closed a cycle.
        let mut colors: HashMap<u32, Color> = HashMap::with_capacity(self.nodes.len());
        for &step in &self.order {
            if colors.get(&step).copied().unwrap_or(Color::White) != Color::White {
                continue;
            }
            if self.dfs_closes_cycle(step, &mut colors) {
                errors.push(ExecutorError::CircularDependency(step).to_string());
            }
        }

        GraphValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Three-color DFS driven by an explicit stack. Gray marks a node on
    /// the exploration stack; reaching a gray node closes a cycle.
    fn dfs_closes_cycle(&self, root: u32, colors: &mut HashMap<u32, Color>) -> bool {
        let mut stack: Vec<(u32, usize)> = vec![(root, 0)];
        colors.insert(root, Color::Gray);

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let deps = match self.nodes.get(&node) {
                Some(task) => task.dependency_ids(),
                None => &[],
            };

            if frame.1 < deps.len() {
                let dep = deps[frame.1];
                frame.1 += 1;

                match colors.get(&dep).copied().unwrap_or(Color::White) {
                    Color::Gray => return true,
                    Color::Black => {}
                    Color::White => {
                        // Dangling references are reported by the integrity
                        // check; skip them here.
                        if self.nodes.contains_key(&dep) {
                            colors.insert(dep, Color::Gray);
                            stack.push((dep, 0));
                        }
                    }
                }
            } else {
                colors.insert(node, Color::Black);
                stack.pop();
            }
        }

        false
    }

    /// Dependency level per step: 0 for dependency-free tasks, otherwise
    /// one more than the maximum level among dependencies.
    ///
    /// Memoized across the whole computation (each step resolved once,
    /// O(V+E)) with an explicit worklist instead of call-stack recursion.
    /// Assumes a validated, acyclic graph.
    pub fn levels(&self) -> HashMap<u32, u32> {
        let mut memo: HashMap<u32, u32> = HashMap::with_capacity(self.nodes.len());

        for &step in &self.order {
            if memo.contains_key(&step) {
                continue;
            }

            let mut stack = vec![step];
            while let Some(&current) = stack.last() {
                if memo.contains_key(&current) {
                    stack.pop();
                    continue;
                }

                let deps = match self.nodes.get(&current) {
                    Some(task) => task.dependency_ids(),
                    None => &[],
                };

                let mut pending = false;
                let mut max_dep_level: Option<u32> = None;
                for &dep in deps {
                    if !self.nodes.contains_key(&dep) {
                        continue;
                    }
                    match memo.get(&dep) {
                        Some(&level) => {
                            max_dep_level = Some(max_dep_level.map_or(level, |m| m.max(level)));
                        }
                        None => {
                            stack.push(dep);
                            pending = true;
                        }
                    }
                }

                if pending {
                    continue;
                }

                memo.insert(current, max_dep_level.map_or(0, |m| m + 1));
                stack.pop();
            }
        }

        memo
    }
}
