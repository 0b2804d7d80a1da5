use crate::config::station::Station;
use crate::error::InitError;
use crate::llm::types::{ChatCompletionRequest, ChatCompletionResponse, Message};
use crate::llm::{GenerationError, TextGenerator};
use reqwest::Client;
use std::time::Duration;

/// OpenAI chat completions client
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    station: Station,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(station: Station, api_key: String) -> Result<Self, InitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(station.timeout_secs()))
            .build()?;
        Ok(Self {
            client,
            station,
            api_key,
        })
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/v1/chat/completions", self.station.api_base());

        let request = ChatCompletionRequest {
            model: self.station.model.clone(),
            messages: vec![Message::user(prompt)],
            max_tokens: self.station.max_tokens(),
            temperature: self.station.temperature,
        };

        tracing::debug!(
            api_base = %self.station.api_base(),
            model = %self.station.model,
            max_tokens = request.max_tokens,
            temperature = ?request.temperature,
            "openai chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                error = %crate::logging::redact_secrets(&error_text),
                "openai api returned error"
            );
            return Err(GenerationError::from_status(status, error_text));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        match body.into_text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GenerationError::EmptyResponse),
        }
    }
}
