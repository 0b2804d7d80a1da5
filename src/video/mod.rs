pub mod youtube;

pub use youtube::YoutubeSearchProvider;

use serde::Serialize;
use std::sync::Arc;

/// Title used when a provider omits one
pub const UNTITLED_VIDEO: &str = "Untitled Video";
/// View count shown when a provider has none
pub const NO_VIEWS: &str = "N/A";

/// Video search backend
#[async_trait::async_trait]
pub trait VideoSearchProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Return up to `max_results` raw candidates for `query`
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<VideoCandidate>, VideoSearchError>;
}

/// Raw provider entry before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoCandidate {
    pub id: Option<String>,
    pub title: Option<String>,
    pub views: Option<String>,
}

/// Normalized video reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoResult {
    pub title: String,
    pub url: String,
    /// Human-readable view count, or `N/A`
    pub views: String,
}

impl VideoResult {
    /// Canonical watch URL for a video id
    pub fn watch_url(id: &str) -> String {
        format!("https://youtube.com/watch?v={id}")
    }

    /// Candidates without an id are dropped.
    pub fn from_candidate(candidate: VideoCandidate) -> Option<Self> {
        let id = candidate.id.filter(|id| !id.trim().is_empty())?;
        Some(Self {
            title: candidate
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNTITLED_VIDEO.to_string()),
            url: Self::watch_url(&id),
            views: candidate
                .views
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| NO_VIEWS.to_string()),
        })
    }
}

/// Video search errors
#[derive(Debug, thiserror::Error)]
pub enum VideoSearchError {
    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Fetches candidates from one provider and keeps the first few valid ones
#[derive(Clone)]
pub struct VideoSearchAdapter {
    provider: Arc<dyn VideoSearchProvider>,
    candidates: usize,
    max_results: usize,
}

impl VideoSearchAdapter {
    pub fn new(provider: Arc<dyn VideoSearchProvider>) -> Self {
        Self {
            provider,
            candidates: 10,
            max_results: 5,
        }
    }

    pub fn with_limits(mut self, candidates: usize, max_results: usize) -> Self {
        self.candidates = candidates;
        self.max_results = max_results;
        self
    }

    pub async fn search(&self, topic: &str) -> Result<Vec<VideoResult>, VideoSearchError> {
        let candidates = self
            .provider
            .search(topic, self.candidates)
            .await
            .inspect_err(|e| {
                tracing::warn!(provider = self.provider.name(), error = %e, "video search failed");
            })?;

        let videos: Vec<VideoResult> = candidates
            .into_iter()
            .filter_map(VideoResult::from_candidate)
            .take(self.max_results)
            .collect();

        tracing::debug!(provider = self.provider.name(), count = videos.len(), "video search completed");
        Ok(videos)
    }
}
