use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Result of executing a single task. Created exactly once per step by the
/// engine and never mutated after insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub step: u32,

    pub success: bool,

    /// Captured output; empty on failure.
    pub output: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub started_at: DateTime<Local>,

    pub ended_at: DateTime<Local>,

    pub duration_ms: u64,
}

/// Aggregate result over a full run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// True iff no task failed and no plan-level error was recorded.
    pub success: bool,

    /// Per-task results, ordered by step id ascending.
    pub results: Vec<TaskResult>,

    /// Wall-clock time from run start to completion of the last group.
    pub total_duration_ms: u64,

    /// Groups executed with the parallel policy.
    pub parallel_executions: usize,

    /// Groups executed with the sequential policy.
    pub sequential_executions: usize,

    /// Plan-level errors (structural validation failures and future global
    /// failures outside the per-task boundary).
    pub errors: Vec<String>,
}
