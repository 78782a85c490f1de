use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::error;

use crate::config::AiConfig;
use crate::models::ChatMessage;

/// Client for an OpenAI-compatible chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Sampling parameters for a completion call
#[derive(Debug, Clone, Copy)]
pub struct ChatParams {
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f64>,
}

impl ChatParams {
    /// Settings used by the chat coach routes
    pub fn coach() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: Some(8192),
            top_p: Some(0.95),
        }
    }

    /// Low-temperature settings for structured analysis output
    pub fn analysis(temperature: f64) -> Self {
        Self {
            temperature,
            max_tokens: None,
            top_p: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
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

impl ChatClient {
    pub fn new(config: &AiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Run a chat completion and return the assistant's text content.
    /// Returns None when the model produced an empty message.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        params: ChatParams,
    ) -> Result<Option<String>> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send chat-completion request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Chat completion failed: {} - {}", status, error_text);
            anyhow::bail!("Chat completion request failed: {}", status);
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .context("Failed to parse chat-completion response")?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ChatClient {
        ChatClient::new(&AiConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            model: "microsoft/phi-4".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn returns_assistant_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"model": "microsoft/phi-4"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Drink more water 💧"}}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let reply = client
            .complete(&[ChatMessage::user("hydration tips?")], ChatParams::coach())
            .await
            .unwrap();

        assert_eq!(reply.as_deref(), Some("Drink more water 💧"));
    }

    #[tokio::test]
    async fn empty_choices_yield_none() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let reply = client
            .complete(&[ChatMessage::user("hi")], ChatParams::analysis(0.1))
            .await
            .unwrap();

        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn upstream_error_is_propagated() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .complete(&[ChatMessage::user("hi")], ChatParams::coach())
            .await;

        assert!(result.is_err());
    }
}
