use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use planwise_core::config::LlmConfig;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Single chat message on the completions wire.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Minimal client for an OpenAI-compatible chat-completions endpoint.
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl ChatClient {
    /// Build from config; the API key is read from the configured env var
    /// and may be empty for keyless local endpoints.
    pub fn from_config(cfg: &LlmConfig) -> anyhow::Result<Self> {
        let api_key = std::env::var(&cfg.api_key_env).unwrap_or_default();
        Ok(Self::new(
            cfg.base_url.clone(),
            api_key,
            cfg.model.clone(),
            cfg.temperature,
            cfg.timeout_ms,
        )?)
    }

    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        temperature: f32,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            temperature,
        })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }

    /// Send one completion request and return the first choice's content.
    /// `response_format` optionally pins a structured-output JSON schema.
    pub async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        response_format: Option<serde_json::Value>,
    ) -> anyhow::Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut payload = serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": messages,
        });
        if let Some(format) = response_format {
            payload["response_format"] = format;
        }

        tracing::debug!(url = %url, model = %self.model, "sending chat completion request");

        let req = self.auth(self.client.post(&url).json(&payload));
        let resp = req.send().await?;

        if resp.status().is_success() {
            let body: ChatCompletionResponse = resp.json().await?;
            body.choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| anyhow!("chat completion returned no content"))
        } else {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let preview: String = body.chars().take(BODY_PREVIEW_LIMIT).collect();
            Err(anyhow!("Chat request failed: {} - {}", status, preview))
        }
    }
}
