//! Environment-driven configuration for the LLM fallback.
//!
//! Values come from the process environment (a `.env` file is loaded at
//! startup). Only the API key is mandatory; model and base URL have
//! Groq-compatible defaults.

use std::env;

use validator::Validate;

use crate::error::AppError;

/// Default chat model used for the healthcare fallback.
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default OpenAI-compatible API base.
const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Configuration for the remote LLM client.
#[derive(Debug, Clone, Validate)]
pub struct LlmConfig {
    /// API key sent as a bearer token.
    #[validate(length(min = 1))]
    pub api_key: String,
    /// Identifier of the chat model to query.
    #[validate(length(min = 1))]
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    #[validate(url)]
    pub api_base: String,
}

impl LlmConfig {
    /// Builds the configuration from environment variables and validates it.
    ///
    /// * `GROQ_API_KEY` (required)
    /// * `CARELINK_LLM_MODEL` (optional model override)
    /// * `CARELINK_API_BASE` (optional base URL override, used by tests)
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var("GROQ_API_KEY")
            .map_err(|_| AppError::Config("GROQ_API_KEY is not set".to_string()))?;
        let model = env::var("CARELINK_LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_base =
            env::var("CARELINK_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let config = Self {
            api_key,
            model,
            api_base,
        };
        config.validate()?;
        Ok(config)
    }
}
