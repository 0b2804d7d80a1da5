pub mod aggregate;
pub mod providers;

pub use aggregate::{dedup_by_url, WebSearchAggregator};

use serde::Serialize;

/// Title used when a provider omits one
pub const UNTITLED: &str = "Untitled";

/// Search provider abstraction - different providers can be plugged in
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short provider name used in logs and notices
    fn name(&self) -> &str;

    /// Perform a search query with given options
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>, SearchError>;
}

/// Search options for controlling results
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of results to request
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { max_results: 5 }
    }
}

/// Individual web reference, identified by its URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Page title
    pub title: String,
    /// Page URL
    pub url: String,
}

impl SearchResult {
    /// Normalize a raw provider entry; entries without a URL are dropped.
    pub fn from_parts(title: Option<String>, url: Option<String>) -> Option<Self> {
        let url = url.filter(|u| !u.trim().is_empty())?;
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        Some(Self { title, url })
    }
}

/// Search-related errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl SearchError {
    /// Map a non-success HTTP status and body to an error
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 | 403 => SearchError::InvalidApiKey,
            429 => SearchError::RateLimitExceeded,
            _ => SearchError::ApiError(format!(
                "HTTP {}: {}",
                status,
                crate::logging::redact_secrets(body)
            )),
        }
    }
}
