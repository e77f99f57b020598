use std::fmt::Write;

use super::types::ExecutionResult;

/// Render the fixed-layout execution report.
///
/// Banner, status line, duration and group counters, an optional plan-level
/// error list, then one block per task. Treat the layout as a contract for
/// downstream parsers.
pub fn execution_report(result: &ExecutionResult) -> String {
    let mut report = String::new();

    report.push('\n');
    report.push_str(&"=".repeat(60));
    report.push('\n');
    report.push_str("EXECUTION REPORT\n");
    report.push_str(&"=".repeat(60));
    report.push('\n');

    let status = if result.success {
        "✅ SUCCESS"
    } else {
        "❌ FAILED"
    };
    let _ = writeln!(report, "Status: {}", status);
    let _ = writeln!(report, "Total Duration: {}ms", result.total_duration_ms);
    let _ = writeln!(report, "Tasks Executed: {}", result.results.len());
    let _ = writeln!(report, "Parallel Groups: {}", result.parallel_executions);
    let _ = writeln!(report, "Sequential Groups: {}", result.sequential_executions);

    if !result.errors.is_empty() {
        report.push_str("\n❌ ERRORS:\n");
        for error in &result.errors {
            let _ = writeln!(report, "  - {}", error);
        }
    }

    report.push('\n');
    report.push_str(&"-".repeat(40));
    report.push('\n');
    report.push_str("TASK RESULTS\n");
    report.push_str(&"-".repeat(40));
    report.push('\n');

    for task_result in &result.results {
        let icon = if task_result.success { "✅" } else { "❌" };
        let _ = write!(
            report,
            "\n{} Step {} ({}ms)\n",
            icon, task_result.step, task_result.duration_ms
        );

        if task_result.success {
            let _ = writeln!(report, "Output: {}", task_result.output);
        } else {
            let _ = writeln!(
                report,
                "Error: {}",
                task_result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::types::TaskResult;
    use chrono::Local;

    fn result(step: u32, success: bool, output: &str, error: Option<&str>) -> TaskResult {
        let now = Local::now();
        TaskResult {
            step,
            success,
            output: output.to_string(),
            error: error.map(|e| e.to_string()),
            started_at: now,
            ended_at: now,
            duration_ms: 42,
        }
    }

    #[test]
    fn test_success_report_layout() {
        let execution = ExecutionResult {
            success: true,
            results: vec![result(1, true, "done", None)],
            total_duration_ms: 120,
            parallel_executions: 1,
            sequential_executions: 2,
            errors: Vec::new(),
        };

        let report = execution_report(&execution);
        assert!(report.contains("EXECUTION REPORT"));
        assert!(report.contains("Status: ✅ SUCCESS\n"));
        assert!(report.contains("Total Duration: 120ms\n"));
        assert!(report.contains("Tasks Executed: 1\n"));
        assert!(report.contains("Parallel Groups: 1\n"));
        assert!(report.contains("Sequential Groups: 2\n"));
        assert!(report.contains("TASK RESULTS"));
        assert!(report.contains("\n✅ Step 1 (42ms)\nOutput: done\n"));
        assert!(!report.contains("ERRORS:"));
    }

    #[test]
    fn test_failure_report_lists_errors() {
        let execution = ExecutionResult {
            success: false,
            results: vec![result(2, false, "", Some("runner exploded"))],
            total_duration_ms: 5,
            parallel_executions: 0,
            sequential_executions: 1,
            errors: vec!["plan-level failure".to_string()],
        };

        let report = execution_report(&execution);
        assert!(report.contains("Status: ❌ FAILED\n"));
        assert!(report.contains("\n❌ ERRORS:\n  - plan-level failure\n"));
        assert!(report.contains("\n❌ Step 2 (42ms)\nError: runner exploded\n"));
    }
}
