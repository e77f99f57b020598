use anyhow::anyhow;
use async_trait::async_trait;
use serde::Deserialize;

use planwise_core::executor::traits::TaskPlanner;
use planwise_core::Task;

use crate::llm::prompts::PLANNER_PROMPT;
use crate::llm::{ChatClient, ChatMessage};

#[derive(Debug, Deserialize)]
struct PlanDocument {
    steps: Vec<Task>,
}

/// LLM-backed planner: extracts a typed step list from free-form task text
/// via a structured-output chat completion.
pub struct StructuredPlanner {
    client: ChatClient,
}

impl StructuredPlanner {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    fn extraction_prompt(input: &str) -> String {
        format!(
            "Extract a structured plan from the following text input. Break \
             the text into sequential steps with clear actions and \
             parameters.\n\nFor each step, identify:\n\
             - The step number (sequential)\n\
             - The action to be performed\n\
             - Parameters needed for the action (with name and value)\n\
             - Dependencies on other steps (if any, otherwise null)\n\n\
             Text input:\n{}",
            input
        )
    }

    /// JSON schema pinning the plan structure, sent as `response_format`.
    fn plan_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "json_schema",
            "json_schema": {
                "name": "plan",
                "strict": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "steps": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "step": { "type": "integer" },
                                    "action": { "type": "string", "enum": ["Agent"] },
                                    "param": {
                                        "type": "array",
                                        "items": {
                                            "type": "object",
                                            "properties": {
                                                "name": { "type": "string", "enum": ["query"] },
                                                "value": { "type": "string" }
                                            },
                                            "required": ["name", "value"],
                                            "additionalProperties": false
                                        }
                                    },
                                    "dependencies": {
                                        "type": ["array", "null"],
                                        "items": { "type": "integer" }
                                    }
                                },
                                "required": ["step", "action", "param", "dependencies"],
                                "additionalProperties": false
                            }
                        }
                    },
                    "required": ["steps"],
                    "additionalProperties": false
                }
            }
        })
    }
}

#[async_trait]
impl TaskPlanner for StructuredPlanner {
    async fn plan(&self, input: &str) -> anyhow::Result<Vec<Task>> {
        let messages = vec![
            ChatMessage::system(PLANNER_PROMPT),
            ChatMessage::user(Self::extraction_prompt(input)),
        ];

        let content = self
            .client
            .complete(messages, Some(Self::plan_schema()))
            .await?;

        let document: PlanDocument = serde_json::from_str(&content)
            .map_err(|e| anyhow!("invalid plan structure: {}", e))?;

        tracing::info!(steps = document.steps.len(), "planner produced step list");
        Ok(document.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plan_parses_structured_steps() {
        let mut server = mockito::Server::new_async().await;
        let plan_json = r#"{"steps":[
            {"step":1,"action":"Agent","param":[{"name":"query","value":"research"}],"dependencies":null},
            {"step":2,"action":"Agent","param":[{"name":"query","value":"summarize"}],"dependencies":[1]}
        ]}"#;
        let content = serde_json::to_string(plan_json).unwrap();
        let body = format!(r#"{{"choices":[{{"message":{{"content":{}}}}}]}}"#, content);
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = ChatClient::new(server.url(), String::new(), "m".to_string(), 0.0, 5_000)
            .unwrap();
        let planner = StructuredPlanner::new(client);

        let tasks = planner.plan("research then summarize").await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].step, 1);
        assert_eq!(tasks[1].dependency_ids(), &[1]);
    }

    #[tokio::test]
    async fn test_plan_rejects_malformed_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"not json"}}]}"#)
            .create_async()
            .await;

        let client = ChatClient::new(server.url(), String::new(), "m".to_string(), 0.0, 5_000)
            .unwrap();
        let planner = StructuredPlanner::new(client);

        let err = planner.plan("anything").await.unwrap_err();
        assert!(err.to_string().contains("invalid plan structure"));
    }
}
