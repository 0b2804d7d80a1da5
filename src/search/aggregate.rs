//! Two-provider web search with order-preserving URL deduplication.

use crate::search::{SearchError, SearchOptions, SearchProvider, SearchResult};
use std::collections::HashSet;
use std::sync::Arc;

/// Queries a primary and a secondary provider and merges their results.
///
/// Primary results always come first in the merged list, whichever call
/// finishes first.
#[derive(Clone)]
pub struct WebSearchAggregator {
    primary: Arc<dyn SearchProvider>,
    secondary: Arc<dyn SearchProvider>,
    per_provider: usize,
    max_results: usize,
}

impl WebSearchAggregator {
    pub fn new(primary: Arc<dyn SearchProvider>, secondary: Arc<dyn SearchProvider>) -> Self {
        Self {
            primary,
            secondary,
            per_provider: 5,
            max_results: 10,
        }
    }

    pub fn with_limits(mut self, per_provider: usize, max_results: usize) -> Self {
        self.per_provider = per_provider;
        self.max_results = max_results;
        self
    }

    /// Search both providers. A failure from either one fails the whole call.
    pub async fn search(&self, topic: &str) -> Result<Vec<SearchResult>, SearchError> {
        let options = SearchOptions {
            max_results: self.per_provider,
        };

        let (primary, secondary) = tokio::join!(
            self.primary.search(topic, &options),
            self.secondary.search(topic, &options),
        );

        let primary = primary.inspect_err(|e| {
            tracing::warn!(provider = self.primary.name(), error = %e, "web search failed");
        })?;
        let secondary = secondary.inspect_err(|e| {
            tracing::warn!(provider = self.secondary.name(), error = %e, "web search failed");
        })?;

        tracing::debug!(
            primary = primary.len(),
            secondary = secondary.len(),
            "web search providers returned"
        );

        let merged = primary.into_iter().chain(secondary).collect();
        Ok(dedup_by_url(merged, self.max_results))
    }
}

/// Keep the first occurrence of each URL, in input order, up to `limit` entries.
pub fn dedup_by_url(results: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.url.clone()))
        .take(limit)
        .collect()
}
