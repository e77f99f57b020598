use std::collections::BTreeMap;
use std::fmt::Write;

use super::types::{Task, TaskResult};

/// Build the textual digest of a task's dependency outputs.
///
/// Returns an empty string when the task has no dependencies. Otherwise one
/// labeled block per dependency, in the task's declared dependency order:
/// the captured output when that step succeeded, or an explicit marker when
/// it failed or never produced output. Pure; only reads `results`.
pub fn build_dependency_context(task: &Task, results: &BTreeMap<u32, TaskResult>) -> String {
    let deps = task.dependency_ids();
    if deps.is_empty() {
        return String::new();
    }

    let mut context = String::with_capacity(deps.len() * 200 + 50);
    context.push_str("Previous step outputs (for context):\n");

    for dep in deps {
        match results.get(dep) {
            Some(result) if result.success => {
                let _ = write!(
                    context,
                    "\n--- Step {} Output ---\n{}\n",
                    dep, result.output
                );
            }
            _ => {
                let _ = write!(
                    context,
                    "\n--- Step {} ---\n[No output available or step failed]\n",
                    dep
                );
            }
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn result(step: u32, success: bool, output: &str) -> TaskResult {
        let now = Local::now();
        TaskResult {
            step,
            success,
            output: output.to_string(),
            error: if success {
                None
            } else {
                Some("boom".to_string())
            },
            started_at: now,
            ended_at: now,
            duration_ms: 0,
        }
    }

    #[test]
    fn test_empty_without_dependencies() {
        let task = Task::new(1, "Agent");
        let context = build_dependency_context(&task, &BTreeMap::new());
        assert!(context.is_empty());
    }

    #[test]
    fn test_successful_dependency_output_included() {
        let task = Task::new(2, "Agent").with_dependencies(vec![1]);
        let mut results = BTreeMap::new();
        results.insert(1, result(1, true, "dough ready"));

        let context = build_dependency_context(&task, &results);
        assert!(context.starts_with("Previous step outputs (for context):\n"));
        assert!(context.contains("\n--- Step 1 Output ---\ndough ready\n"));
    }

    #[test]
    fn test_failed_or_missing_dependency_marked() {
        let task = Task::new(3, "Agent").with_dependencies(vec![1, 2]);
        let mut results = BTreeMap::new();
        results.insert(1, result(1, false, ""));
        // Step 2 produced no result at all.

        let context = build_dependency_context(&task, &results);
        assert!(context.contains("\n--- Step 1 ---\n[No output available or step failed]\n"));
        assert!(context.contains("\n--- Step 2 ---\n[No output available or step failed]\n"));
    }

    #[test]
    fn test_declared_dependency_order_preserved() {
        // Dependencies declared out of numeric order stay that way.
        let task = Task::new(4, "Agent").with_dependencies(vec![3, 1]);
        let mut results = BTreeMap::new();
        results.insert(1, result(1, true, "first"));
        results.insert(3, result(3, true, "third"));

        let context = build_dependency_context(&task, &results);
        let pos_3 = context.find("--- Step 3 Output ---").unwrap();
        let pos_1 = context.find("--- Step 1 Output ---").unwrap();
        assert!(pos_3 < pos_1);
    }
}
