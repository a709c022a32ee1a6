//! Remote LLM fallback over an OpenAI-compatible chat-completions API.
//!
//! The prompt restricts the model to the healthcare domain and pins an exact
//! refusal wording, which the client detects and surfaces as
//! [`LlmReply::Refusal`] so the agent can skip the feedback loop.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::timeout;
use tracing::info;

use crate::config::LlmConfig;
use crate::error::AppError;

/// Exact sentinel the model is instructed to emit for non-healthcare queries.
pub const REFUSAL_SENTINEL: &str =
    "I can't help with this. Please check with your sector agent.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Outcome of an LLM fallback call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmReply {
    /// A usable healthcare answer, worth learning from.
    Answer(String),
    /// The model declined: the query is out of domain.
    Refusal,
}

/// Seam for the remote chat model, so the agent can be exercised without
/// network access in tests.
#[async_trait]
pub trait ChatModel {
    /// Asks the model to answer a helpdesk query within the healthcare domain.
    async fn ask(&self, query: &str) -> Result<LlmReply, AppError>;
}

/// Chat-completions client for the Groq API.
pub struct GroqClient {
    client: Client,
    config: LlmConfig,
}

impl GroqClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Builds the fixed domain-restricting prompt around the user query.
    fn build_prompt(query: &str) -> String {
        format!(
            "You are an assistant specialized in healthcare. If the following query is \
             related to healthcare, provide a helpful response using maximum 50 words. \
             If not, respond with '{}'\n\nQuery: {}",
            REFUSAL_SENTINEL, query
        )
    }
}

#[async_trait]
impl ChatModel for GroqClient {
    async fn ask(&self, query: &str) -> Result<LlmReply, AppError> {
        info!("Falling back to LLM for query: {}", query);

        let payload = serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": Self::build_prompt(query) }],
        });

        let request = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send();

        let response = timeout(REQUEST_TIMEOUT, request).await??;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Llm(format!(
                "Chat completion failed with status {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = response.json().await?;
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::Llm("Malformed chat completion response".to_string()))?
            .trim()
            .to_string();

        if content == REFUSAL_SENTINEL {
            Ok(LlmReply::Refusal)
        } else {
            Ok(LlmReply::Answer(content))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(api_base: String) -> GroqClient {
        GroqClient::new(LlmConfig {
            api_key: "test-key".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_base,
        })
    }

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })
    }

    #[tokio::test]
    async fn test_ask_returns_answer() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("Drink fluids and rest.")),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let reply = client.ask("how do I treat a cold").await.unwrap();

        assert_eq!(reply, LlmReply::Answer("Drink fluids and rest.".to_string()));
    }

    #[tokio::test]
    async fn test_ask_detects_refusal_sentinel() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_body(REFUSAL_SENTINEL)),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let reply = client.ask("what is the capital of France").await.unwrap();

        assert_eq!(reply, LlmReply::Refusal);
    }

    #[tokio::test]
    async fn test_ask_surfaces_server_errors() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let result = client.ask("anything").await;

        match result {
            Err(AppError::Llm(msg)) => {
                assert!(msg.contains("status 500"));
                assert!(msg.contains("Internal Server Error"));
            }
            other => panic!("Expected AppError::Llm, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_ask_rejects_malformed_response() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let result = client.ask("anything").await;

        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
