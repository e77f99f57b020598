//! Dependency-aware task execution.
//!
//! Turns a flat task list into a leveled execution plan and runs it with
//! intra-level parallelism:
//!
//! ```text
//! Vec<Task>
//!   ↓
//! TaskGraph::from_tasks()
//!   ↓
//! TaskGraph::validate() → dangling references, cycles (three-color DFS)
//!   ↓
//! TaskGraph::levels() → longest-path level per step
//!   ↓
//! ExecutionPlan::build() → Vec<ExecutionGroup> (parallel / sequential)
//!   ↓
//! ExecutionEngine::execute() → ExecutionResult
//! ```
//!
//! Levels act as barriers: a group never starts before every task of the
//! previous level finished, which is what lets later tasks consume earlier
//! outputs as context. A failing task never cancels its siblings or later
//! levels.

pub mod context;
mod engine;
pub mod graph;
pub mod plan;
pub mod report;
mod scheduler;
pub mod traits;
pub mod types;

pub use context::build_dependency_context;
pub use engine::ExecutionEngine;
pub use graph::{GraphValidation, TaskGraph};
pub use plan::{ExecutionGroup, ExecutionPlan};
pub use report::execution_report;
pub use traits::{ExecutionEvent, ExecutionObserver, TaskPlanner, TaskRunner};
pub use types::{ExecutionOpts, ExecutionResult, Task, TaskParam, TaskResult};
