use thiserror::Error;

/// Executor-specific errors for task graph construction and execution
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Duplicate task step: {0}")]
    DuplicateStep(u32),

    #[error("Task {step} depends on non-existent task {missing}")]
    DependencyNotFound { step: u32, missing: u32 },

    #[error("Circular dependency detected involving task {0}")]
    CircularDependency(u32),

    #[error("No {name} parameter found for {action} action")]
    MissingParameter {
        name: &'static str,
        action: &'static str,
    },

    #[error("Unsupported action type: {0}")]
    UnsupportedAction(String),

    #[error("Runner error: {0}")]
    Runner(String),
}
