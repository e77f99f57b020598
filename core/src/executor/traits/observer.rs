use crate::executor::plan::ExecutionPlan;
use crate::executor::types::{ExecutionResult, TaskResult};

/// Execution lifecycle events, delivered to observers in order. The engine
/// itself never prints; reporting is a separate collaborator.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted {
        run_id: String,
        total_tasks: usize,
        total_levels: usize,
    },
    PlanReady {
        run_id: String,
        plan: ExecutionPlan,
    },
    LevelStarted {
        run_id: String,
        level: u32,
        steps: Vec<u32>,
        parallel: bool,
    },
    TaskStarted {
        run_id: String,
        step: u32,
        level: u32,
    },
    TaskCompleted {
        run_id: String,
        result: TaskResult,
    },
    LevelCompleted {
        run_id: String,
        level: u32,
    },
    RunCompleted {
        run_id: String,
        result: ExecutionResult,
    },
}

/// Observer of execution progress. Notified from the engine's control flow;
/// implementations must be cheap and non-blocking.
pub trait ExecutionObserver: Send + Sync {
    fn notify(&self, event: &ExecutionEvent);
}
