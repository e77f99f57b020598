pub mod llm;
pub mod planner;
pub mod render;
pub mod runner;

pub use planner::StructuredPlanner;
pub use render::{ConsoleReporter, ProgressReporter};
pub use runner::AgentTaskRunner;
