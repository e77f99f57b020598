use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use planwise_core::executor::traits::{ExecutionEvent, ExecutionObserver};

/// Live progress reporter: one overall bar plus a spinner per in-flight task.
///
/// Interior mutability is required because observers are notified through a
/// shared reference, possibly from several task futures at once.
pub struct ProgressReporter {
    multi: MultiProgress,
    overall: Mutex<Option<ProgressBar>>,
    task_bars: Mutex<HashMap<u32, ProgressBar>>,
    enabled: bool,
}

impl ProgressReporter {
    /// `enabled: false` yields a no-op reporter (for piped or json output).
    pub fn new(enabled: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            overall: Mutex::new(None),
            task_bars: Mutex::new(HashMap::new()),
            enabled,
        }
    }

    fn start_overall(&self, total_tasks: usize) {
        let bar = self.multi.add(ProgressBar::new(total_tasks as u64));
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tasks ({percent}%) {msg}")
        {
            bar.set_style(style.progress_chars("█▓▒░  "));
        }
        bar.set_message("Starting...");

        if let Ok(mut overall) = self.overall.lock() {
            *overall = Some(bar);
        }
    }

    fn start_task(&self, step: u32) {
        let bar = self.multi.add(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.green} {msg}") {
            bar.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        bar.set_message(format!("⏳ Step {}", step));
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bars) = self.task_bars.lock() {
            bars.insert(step, bar);
        }
    }

    fn finish_task(&self, step: u32, success: bool, duration_ms: u64) {
        if let Ok(mut bars) = self.task_bars.lock() {
            if let Some(bar) = bars.remove(&step) {
                let icon = if success { "✅" } else { "❌" };
                bar.finish_with_message(format!("{} Step {} ({}ms)", icon, step, duration_ms));
            }
        }
        if let Ok(overall) = self.overall.lock() {
            if let Some(bar) = overall.as_ref() {
                bar.inc(1);
            }
        }
    }

    fn set_overall_message(&self, msg: String) {
        if let Ok(overall) = self.overall.lock() {
            if let Some(bar) = overall.as_ref() {
                bar.set_message(msg);
            }
        }
    }

    fn finish_overall(&self, success: bool) {
        if let Ok(overall) = self.overall.lock() {
            if let Some(bar) = overall.as_ref() {
                let msg = if success {
                    "✅ All tasks completed"
                } else {
                    "❌ Execution failed"
                };
                bar.finish_with_message(msg);
            }
        }
    }
}

impl ExecutionObserver for ProgressReporter {
    fn notify(&self, event: &ExecutionEvent) {
        if !self.enabled {
            return;
        }

        match event {
            ExecutionEvent::RunStarted { total_tasks, .. } => {
                self.start_overall(*total_tasks);
            }
            ExecutionEvent::PlanReady { .. } => {}
            ExecutionEvent::LevelStarted {
                level,
                steps,
                parallel,
                ..
            } => {
                let mode = if *parallel { "parallel" } else { "sequential" };
                self.set_overall_message(format!(
                    "Level {} ({} {} task(s))",
                    level + 1,
                    steps.len(),
                    mode
                ));
            }
            ExecutionEvent::TaskStarted { step, .. } => {
                self.start_task(*step);
            }
            ExecutionEvent::TaskCompleted { result, .. } => {
                self.finish_task(result.step, result.success, result.duration_ms);
            }
            ExecutionEvent::LevelCompleted { .. } => {}
            ExecutionEvent::RunCompleted { result, .. } => {
                self.finish_overall(result.success);
            }
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Ok(mut bars) = self.task_bars.lock() {
            for (_, bar) in bars.drain() {
                bar.finish_and_clear();
            }
        }
        if let Ok(mut overall) = self.overall.lock() {
            if let Some(bar) = overall.take() {
                bar.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use planwise_core::executor::types::TaskResult;

    fn completed(step: u32) -> ExecutionEvent {
        ExecutionEvent::TaskCompleted {
            run_id: "r".to_string(),
            result: TaskResult {
                step,
                success: true,
                output: String::new(),
                error: None,
                started_at: Local::now(),
                ended_at: Local::now(),
                duration_ms: 1,
            },
        }
    }

    #[test]
    fn test_disabled_reporter_is_a_no_op() {
        let reporter = ProgressReporter::new(false);
        reporter.notify(&ExecutionEvent::RunStarted {
            run_id: "r".to_string(),
            total_tasks: 2,
            total_levels: 1,
        });
        reporter.notify(&ExecutionEvent::TaskStarted {
            run_id: "r".to_string(),
            step: 1,
            level: 0,
        });
        reporter.notify(&completed(1));

        assert!(reporter.task_bars.lock().unwrap().is_empty());
        assert!(reporter.overall.lock().unwrap().is_none());
    }

    #[test]
    fn test_task_bars_track_in_flight_tasks() {
        let reporter = ProgressReporter::new(true);
        reporter.notify(&ExecutionEvent::RunStarted {
            run_id: "r".to_string(),
            total_tasks: 2,
            total_levels: 1,
        });
        reporter.notify(&ExecutionEvent::TaskStarted {
            run_id: "r".to_string(),
            step: 1,
            level: 0,
        });
        reporter.notify(&ExecutionEvent::TaskStarted {
            run_id: "r".to_string(),
            step: 2,
            level: 0,
        });
        assert_eq!(reporter.task_bars.lock().unwrap().len(), 2);

        reporter.notify(&completed(1));
        assert_eq!(reporter.task_bars.lock().unwrap().len(), 1);
    }
}
