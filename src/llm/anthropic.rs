use crate::config::station::Station;
use crate::error::InitError;
use crate::llm::types::{CreateMessageRequest, CreateMessageResponse, Message};
use crate::llm::{GenerationError, TextGenerator};
use reqwest::Client;
use std::time::Duration;

/// Anthropic messages API client
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    station: Station,
    api_key: String,
}

impl AnthropicClient {
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

    fn request_body(&self, prompt: &str) -> CreateMessageRequest {
        CreateMessageRequest {
            model: self.station.model.clone(),
            max_tokens: self.station.max_tokens(),
            messages: vec![Message::user(prompt)],
            temperature: self.station.temperature,
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/v1/messages", self.station.api_base());

        tracing::debug!(
            api_base = %self.station.api_base(),
            model = %self.station.model,
            max_tokens = self.station.max_tokens(),
            "anthropic messages request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&self.request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                error = %crate::logging::redact_secrets(&error_text),
                "anthropic api returned error"
            );
            return Err(GenerationError::from_status(status, error_text));
        }

        let body: CreateMessageResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        let text = body.into_text();
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;

    #[test]
    fn request_omits_temperature_when_unset() {
        let station = Station {
            id: "anthropic".into(),
            label: "Claude".into(),
            provider: Provider::Anthropic,
            api_key_env: "ANTHROPIC_API_KEY".into(),
            api_base: None,
            model: "claude-3-5-sonnet-20241022".into(),
            max_tokens: None,
            temperature: None,
            prompt_template: "{topic}".into(),
            timeout_secs: None,
        };
        let client = AnthropicClient::new(station, "key".into()).unwrap();
        let value = serde_json::to_value(client.request_body("Rust")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "claude-3-5-sonnet-20241022",
                "max_tokens": 4000,
                "messages": [{ "role": "user", "content": "Rust" }]
            })
        );
    }
}
