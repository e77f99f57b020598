pub mod config;
pub mod error;
pub mod executor;

pub use error::{CliError, ExecutorError, PlannerError};
pub use executor::types::{
    ExecutionGroup, ExecutionOpts, ExecutionPlan, ExecutionResult, Task, TaskParam, TaskResult,
    ACTION_AGENT, PARAM_QUERY,
};
pub use executor::ExecutionEngine;
