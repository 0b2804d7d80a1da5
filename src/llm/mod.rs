pub mod anthropic;
pub mod openai;
pub mod types;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

use crate::config::{Provider, Station};
use crate::error::InitError;
use std::sync::Arc;

/// Text generation backend - one implementation per LLM provider
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a single user prompt and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Generation-related errors
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("unauthorized (401): check the API key")]
    Unauthorized,

    #[error("rate limit exceeded (429)")]
    RateLimited,

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("provider returned no text")]
    EmptyResponse,
}

impl GenerationError {
    /// Map a non-success HTTP status and body to an error
    pub(crate) fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => GenerationError::Unauthorized,
            429 => GenerationError::RateLimited,
            code => GenerationError::Api {
                status: code,
                body: crate::logging::redact_secrets(&body),
            },
        }
    }
}

/// Build the client for a station, reading its credential from the environment.
pub fn build_generator(station: &Station) -> Result<Arc<dyn TextGenerator>, InitError> {
    let api_key = crate::config::credential(&station.api_key_env)?;
    let generator: Arc<dyn TextGenerator> = match station.provider {
        Provider::OpenAI => Arc::new(OpenAiClient::new(station.clone(), api_key)?),
        Provider::Anthropic => Arc::new(AnthropicClient::new(station.clone(), api_key)?),
    };
    tracing::debug!(station = %station.id, model = %station.model, "generator initialized");
    Ok(generator)
}
