pub mod config;
pub mod result;
pub mod task;

pub use config::*;
pub use result::*;
pub use task::*;

pub use super::plan::{ExecutionGroup, ExecutionPlan};
