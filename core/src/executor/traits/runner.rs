use async_trait::async_trait;

use crate::executor::types::Task;

/// Planning collaborator: turns free-form task text into typed steps.
/// Opaque and fallible; the core only relies on this contract.
#[async_trait]
pub trait TaskPlanner: Send + Sync {
    async fn plan(&self, input: &str) -> anyhow::Result<Vec<Task>>;
}

/// Task-runner collaborator: performs one task's work from an enhanced
/// textual instruction (dependency context + query). Consumed once per
/// task execution; fails by returning an error with a message.
#[async_trait]
pub trait TaskRunner: Send + Sync {
    async fn run(&self, instruction: &str) -> anyhow::Result<String>;
}
