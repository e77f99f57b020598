use planwise_core::executor::traits::{ExecutionEvent, ExecutionObserver};

/// Plain-text reporter that prints one line per lifecycle event.
///
/// Suitable for terminals and log capture alike; for live spinners use
/// [`crate::render::ProgressReporter`] instead.
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Render an event as its console line, or `None` for events that
    /// produce no output.
    fn format_event(event: &ExecutionEvent) -> Option<String> {
        match event {
            ExecutionEvent::RunStarted {
                total_tasks,
                total_levels,
                ..
            } => Some(format!(
                "\n🚀 Starting execution of {} tasks across {} levels",
                total_tasks, total_levels
            )),
            ExecutionEvent::PlanReady { .. } => None,
            ExecutionEvent::LevelStarted {
                level,
                steps,
                parallel,
                ..
            } => {
                let mode = if *parallel { "PARALLEL" } else { "SEQUENTIAL" };
                Some(format!(
                    "\n📊 Executing Level {} - {} task(s) ({})",
                    level + 1,
                    steps.len(),
                    mode
                ))
            }
            ExecutionEvent::TaskStarted { step, .. } => {
                Some(format!("  ⏳ Executing Step {}", step))
            }
            ExecutionEvent::TaskCompleted { result, .. } => {
                if result.success {
                    Some(format!(
                        "  ✅ Completed Step {} ({}ms)",
                        result.step, result.duration_ms
                    ))
                } else {
                    let reason = result.error.as_deref().unwrap_or("unknown error");
                    Some(format!("  ❌ Failed Step {}: {}", result.step, reason))
                }
            }
            ExecutionEvent::LevelCompleted { .. } => None,
            ExecutionEvent::RunCompleted { result, .. } => {
                let icon = if result.success { "✅" } else { "❌" };
                Some(format!(
                    "\n{} Execution finished in {}ms",
                    icon, result.total_duration_ms
                ))
            }
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionObserver for ConsoleReporter {
    fn notify(&self, event: &ExecutionEvent) {
        if let Some(line) = Self::format_event(event) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use planwise_core::executor::types::TaskResult;

    fn result(step: u32, success: bool, error: Option<&str>) -> TaskResult {
        TaskResult {
            step,
            success,
            output: String::new(),
            error: error.map(|e| e.to_string()),
            started_at: Local::now(),
            ended_at: Local::now(),
            duration_ms: 42,
        }
    }

    #[test]
    fn test_run_started_line() {
        let line = ConsoleReporter::format_event(&ExecutionEvent::RunStarted {
            run_id: "r".to_string(),
            total_tasks: 4,
            total_levels: 3,
        })
        .unwrap();
        assert_eq!(line, "\n🚀 Starting execution of 4 tasks across 3 levels");
    }

    #[test]
    fn test_level_started_reports_mode() {
        let line = ConsoleReporter::format_event(&ExecutionEvent::LevelStarted {
            run_id: "r".to_string(),
            level: 1,
            steps: vec![2, 3],
            parallel: true,
        })
        .unwrap();
        assert_eq!(line, "\n📊 Executing Level 2 - 2 task(s) (PARALLEL)");

        let line = ConsoleReporter::format_event(&ExecutionEvent::LevelStarted {
            run_id: "r".to_string(),
            level: 0,
            steps: vec![1],
            parallel: false,
        })
        .unwrap();
        assert_eq!(line, "\n📊 Executing Level 1 - 1 task(s) (SEQUENTIAL)");
    }

    #[test]
    fn test_task_completed_success_and_failure() {
        let line = ConsoleReporter::format_event(&ExecutionEvent::TaskCompleted {
            run_id: "r".to_string(),
            result: result(5, true, None),
        })
        .unwrap();
        assert_eq!(line, "  ✅ Completed Step 5 (42ms)");

        let line = ConsoleReporter::format_event(&ExecutionEvent::TaskCompleted {
            run_id: "r".to_string(),
            result: result(5, false, Some("timed out")),
        })
        .unwrap();
        assert_eq!(line, "  ❌ Failed Step 5: timed out");
    }

    #[test]
    fn test_quiet_events_render_nothing() {
        assert!(ConsoleReporter::format_event(&ExecutionEvent::LevelCompleted {
            run_id: "r".to_string(),
            level: 0,
        })
        .is_none());
    }
}
