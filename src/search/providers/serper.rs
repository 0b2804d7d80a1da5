use crate::error::InitError;
use crate::search::{SearchError, SearchOptions, SearchProvider, SearchResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://google.serper.dev";

/// Serper (Google Search) API provider
pub struct SerperSearchProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl SerperSearchProvider {
    pub fn new(api_key: String, api_base: Option<String>, timeout: Duration) -> Result<Self, InitError> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            api_key,
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }

    fn normalize(response: SerperResponse) -> Vec<SearchResult> {
        response
            .organic
            .into_iter()
            .filter_map(|r| SearchResult::from_parts(r.title, r.link))
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Debug, Deserialize)]
struct SerperResult {
    title: Option<String>,
    link: Option<String>,
}

#[async_trait::async_trait]
impl SearchProvider for SerperSearchProvider {
    fn name(&self) -> &str {
        "serper"
    }

    async fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>, SearchError> {
        tracing::debug!(query = %query, max_results = options.max_results, "performing serper search");

        let response = self
            .client
            .post(format!("{}/search", self.api_base))
            .header("X-API-KEY", &self.api_key)
            .json(&SerperRequest {
                q: query,
                num: options.max_results,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                error = %crate::logging::redact_secrets(&error_text),
                "serper search api error"
            );
            return Err(SearchError::from_status(status, &error_text));
        }

        let body: SerperResponse = response
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        let items = Self::normalize(body);
        tracing::debug!(query = %query, result_count = items.len(), "serper search completed");
        Ok(items)
    }
}
