use async_trait::async_trait;

use planwise_core::executor::traits::TaskRunner;

use crate::llm::prompts::EXECUTION_PROMPT;
use crate::llm::{ChatClient, ChatMessage};

/// LLM-backed task runner: sends the execution prompt plus the enhanced
/// instruction (dependency context + query) and returns the completion.
pub struct AgentTaskRunner {
    client: ChatClient,
}

impl AgentTaskRunner {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskRunner for AgentTaskRunner {
    async fn run(&self, instruction: &str) -> anyhow::Result<String> {
        let messages = vec![
            ChatMessage::system(EXECUTION_PROMPT),
            ChatMessage::user(instruction),
        ];
        self.client.complete(messages, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_returns_completion_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"task done"}}]}"#)
            .create_async()
            .await;

        let client = ChatClient::new(server.url(), String::new(), "m".to_string(), 0.0, 5_000)
            .unwrap();
        let runner = AgentTaskRunner::new(client);

        let out = runner.run("Current task: do the thing").await.unwrap();
        assert_eq!(out, "task done");
    }

    #[tokio::test]
    async fn test_run_propagates_api_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream broke")
            .create_async()
            .await;

        let client = ChatClient::new(server.url(), String::new(), "m".to_string(), 0.0, 5_000)
            .unwrap();
        let runner = AgentTaskRunner::new(client);

        let err = runner.run("Current task: do the thing").await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}
