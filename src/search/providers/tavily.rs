use crate::error::InitError;
use crate::search::{SearchError, SearchOptions, SearchProvider, SearchResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.tavily.com";

/// Tavily search API provider
///
/// Documentation: https://docs.tavily.com/
pub struct TavilySearchProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl TavilySearchProvider {
    pub fn new(api_key: String, api_base: Option<String>, timeout: Duration) -> Result<Self, InitError> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            api_key,
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }

    fn normalize(response: TavilyResponse) -> Vec<SearchResult> {
        response
            .results
            .into_iter()
            .filter_map(|r| SearchResult::from_parts(r.title, r.url))
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: Option<String>,
    url: Option<String>,
}

#[async_trait::async_trait]
impl SearchProvider for TavilySearchProvider {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>, SearchError> {
        tracing::debug!(query = %query, max_results = options.max_results, "performing tavily search");

        let response = self
            .client
            .post(format!("{}/search", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&TavilyRequest {
                query,
                max_results: options.max_results,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                error = %crate::logging::redact_secrets(&error_text),
                "tavily search api error"
            );
            return Err(SearchError::from_status(status, &error_text));
        }

        let body: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        let items = Self::normalize(body);
        tracing::debug!(query = %query, result_count = items.len(), "tavily search completed");
        Ok(items)
    }
}
