use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::graph::TaskGraph;
use super::types::Task;

/// Tasks sharing a dependency level, executed under one concurrency policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionGroup {
    pub level: u32,

    /// Group members, ordered by step id ascending.
    pub tasks: Vec<Task>,

    /// True iff the group holds more than one task. Tasks sharing a level
    /// have no dependency edges between them, so this is always safe.
    pub can_run_in_parallel: bool,
}

/// Derived execution schedule: groups ordered by ascending level.
/// Recomputable at any time from the task set; never cached across sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub total_levels: usize,
    pub groups: Vec<ExecutionGroup>,
    pub parallel_groups: usize,
    pub sequential_groups: usize,
}

impl ExecutionPlan {
    /// Group tasks by computed level. Levels ascend; tasks within a level
    /// are sorted by step id for deterministic, reproducible ordering.
    pub fn build(graph: &TaskGraph) -> Self {
        let levels = graph.levels();

        let mut by_level: BTreeMap<u32, Vec<Task>> = BTreeMap::new();
        for task in graph.tasks_in_order() {
            let level = levels.get(&task.step).copied().unwrap_or(0);
            by_level.entry(level).or_default().push(task.clone());
        }

        let mut groups = Vec::with_capacity(by_level.len());
        let mut parallel_groups = 0;
        let mut sequential_groups = 0;

        for (level, mut tasks) in by_level {
            tasks.sort_by_key(|t| t.step);
            let can_run_in_parallel = tasks.len() > 1;

            if can_run_in_parallel {
                parallel_groups += 1;
            } else {
                sequential_groups += 1;
            }

            groups.push(ExecutionGroup {
                level,
                tasks,
                can_run_in_parallel,
            });
        }

        Self {
            total_levels: groups.len(),
            groups,
            parallel_groups,
            sequential_groups,
        }
    }

    /// Human-readable execution plan description.
    pub fn describe(&self) -> String {
        let mut description = String::from("Execution Plan Analysis:\n");
        let _ = writeln!(description, "- Total execution levels: {}", self.total_levels);
        let _ = writeln!(
            description,
            "- Groups that can run in parallel: {}",
            self.parallel_groups
        );
        let _ = writeln!(
            description,
            "- Sequential execution groups: {}",
            self.sequential_groups
        );
        description.push('\n');
        description.push_str("Detailed Execution Order:\n");

        for group in &self.groups {
            let _ = write!(description, "\nLevel {}", group.level + 1);
            if group.can_run_in_parallel {
                let _ = writeln!(
                    description,
                    " (PARALLEL EXECUTION - {} tasks):",
                    group.tasks.len()
                );
            } else {
                description.push_str(" (SEQUENTIAL):\n");
            }
            for task in &group.tasks {
                let _ = writeln!(description, "  • Step {}: {}", task.step, task.action);
            }
        }

        description
    }

    /// Mermaid flowchart of task dependencies and execution flow.
    ///
    /// Node and edge syntax is a rendering contract: one node per task
    /// labeled with the first parameter's value (truncated to 50 chars),
    /// one edge per dependency, a `parallelGroup` style on every node of a
    /// parallel-eligible group, and a trailing legend.
    pub fn to_mermaid(&self, tasks: &[Task]) -> String {
        let mut mermaid = String::from("flowchart TD\n");

        for task in tasks {
            let label = node_label(task);
            let _ = writeln!(mermaid, "    task{}[\"{}\"]", task.step, label);
        }

        mermaid.push('\n');

        for task in tasks {
            for dep in task.dependency_ids() {
                let _ = writeln!(mermaid, "    task{} --> task{}", dep, task.step);
            }
        }

        mermaid.push('\n');

        for group in &self.groups {
            if group.can_run_in_parallel && group.tasks.len() > 1 {
                let task_ids = group
                    .tasks
                    .iter()
                    .map(|t| format!("task{}", t.step))
                    .collect::<Vec<_>>()
                    .join(",");
                mermaid.push_str(
                    "    classDef parallelGroup fill:#e1f5fe,stroke:#01579b,stroke-width:2px\n",
                );
                let _ = writeln!(mermaid, "    class {} parallelGroup", task_ids);
            }
        }

        mermaid.push_str("\n    subgraph Legend\n");
        mermaid.push_str("        direction LR\n");
        mermaid.push_str("        legend1[\"Sequential Task\"]:::sequential\n");
        mermaid.push_str("        legend2[\"Parallel Tasks\"]:::parallelGroup\n");
        mermaid.push_str("    end\n");
        mermaid.push_str("    classDef sequential fill:#fff3e0,stroke:#e65100,stroke-width:2px\n");

        mermaid
    }
}

/// First parameter's value truncated to 50 chars (ellipsis-suffixed when
/// cut); tasks without parameters fall back to the action name.
fn node_label(task: &Task) -> String {
    let text = task
        .param
        .first()
        .map(|p| p.value.as_str())
        .unwrap_or(task.action.as_str());

    if text.chars().count() > 50 {
        let truncated: String = text.chars().take(47).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
