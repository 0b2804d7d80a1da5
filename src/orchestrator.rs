//! Query orchestration: generate, select, then gather references.

use crate::config::Config;
use crate::error::InitError;
use crate::generate::{select_longest, ContentGenerator, GenerationOutcome};
use crate::llm::build_generator;
use crate::search::providers::{SerperSearchProvider, TavilySearchProvider};
use crate::search::{SearchResult, WebSearchAggregator};
use crate::video::{VideoResult, VideoSearchAdapter, YoutubeSearchProvider};
use chrono::{DateTime, Local};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Supporting references for a document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct References {
    pub web: Vec<SearchResult>,
    pub videos: Vec<VideoResult>,
}

impl References {
    pub fn is_empty(&self) -> bool {
        self.web.is_empty() && self.videos.is_empty()
    }
}

/// Everything produced by one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    topic: String,
    content: Option<GenerationOutcome>,
    references: References,
    created_at: DateTime<Local>,
}

impl ResultRecord {
    pub fn new(topic: impl Into<String>, content: Option<GenerationOutcome>, references: References) -> Self {
        Self {
            topic: topic.into(),
            content,
            references,
            created_at: Local::now(),
        }
    }

    /// Record for a query where every generator failed
    pub fn empty(topic: impl Into<String>) -> Self {
        Self::new(topic, None, References::default())
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn content(&self) -> Option<&GenerationOutcome> {
        self.content.as_ref()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn references(&self) -> &References {
        &self.references
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}

/// Non-fatal provider failure shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub source: String,
    pub message: String,
}

impl Notice {
    pub fn new(source: impl Into<String>, message: impl ToString) -> Self {
        Self {
            source: source.into(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {}", self.source, self.message)
    }
}

/// Result of `process_query`: the record plus any provider notices
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub record: ResultRecord,
    pub notices: Vec<Notice>,
}

/// Runs one research query across all configured providers.
///
/// Built once at startup and shared by every query.
#[derive(Clone)]
pub struct QueryOrchestrator {
    generators: Vec<ContentGenerator>,
    web: WebSearchAggregator,
    videos: VideoSearchAdapter,
}

impl QueryOrchestrator {
    pub fn new(generators: Vec<ContentGenerator>, web: WebSearchAggregator, videos: VideoSearchAdapter) -> Self {
        Self {
            generators,
            web,
            videos,
        }
    }

    /// Build every client from configuration and environment credentials.
    ///
    /// Any missing credential aborts startup.
    pub fn from_config(config: &Config) -> Result<Self, InitError> {
        let generators = config
            .stations
            .iter()
            .map(|station| -> Result<ContentGenerator, InitError> {
                Ok(ContentGenerator::from_station(station, build_generator(station)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let search = &config.search;
        let search_timeout = Duration::from_secs(search.timeout_secs);
        let tavily = TavilySearchProvider::new(
            crate::config::credential(&search.tavily_api_key_env)?,
            search.tavily_api_base.clone(),
            search_timeout,
        )?;
        let serper = SerperSearchProvider::new(
            crate::config::credential(&search.serper_api_key_env)?,
            search.serper_api_base.clone(),
            search_timeout,
        )?;
        let web = WebSearchAggregator::new(Arc::new(tavily), Arc::new(serper))
            .with_limits(search.per_provider, search.max_results);

        let video = &config.video;
        let youtube = YoutubeSearchProvider::new(video.api_base.clone(), Duration::from_secs(video.timeout_secs))?;
        let videos = VideoSearchAdapter::new(Arc::new(youtube)).with_limits(video.candidates, video.max_results);

        tracing::info!(generators = generators.len(), "query orchestrator initialized");
        Ok(Self::new(generators, web, videos))
    }

    pub fn generator_labels(&self) -> impl Iterator<Item = &str> {
        self.generators.iter().map(ContentGenerator::label)
    }

    pub async fn process_query(&self, topic: &str) -> QueryOutcome {
        let topic = topic.trim();
        let mut notices = Vec::new();

        tracing::info!(topic = %topic, generators = self.generators.len(), "processing query");

        // Every slot keeps its generator's position, so ties resolve by configuration order.
        let attempts = join_all(self.generators.iter().map(|g| g.generate(topic))).await;

        let mut outcomes = Vec::with_capacity(attempts.len());
        for (generator, attempt) in self.generators.iter().zip(attempts) {
            match attempt {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::warn!(provider = generator.label(), error = %e, "generation failed");
                    notices.push(Notice::new(generator.label(), e));
                }
            }
        }

        let Some(best) = select_longest(outcomes) else {
            tracing::warn!(topic = %topic, "all generators failed; skipping reference search");
            return QueryOutcome {
                record: ResultRecord::empty(topic),
                notices,
            };
        };

        tracing::info!(
            provider = %best.provider,
            chars = best.char_count(),
            "selected document"
        );

        let (web, videos) = tokio::join!(self.web.search(topic), self.videos.search(topic));

        let web = web.unwrap_or_else(|e| {
            notices.push(Notice::new("Search", e));
            Vec::new()
        });
        let videos = videos.unwrap_or_else(|e| {
            notices.push(Notice::new("Video search", e));
            Vec::new()
        });

        QueryOutcome {
            record: ResultRecord::new(topic, Some(best), References { web, videos }),
            notices,
        }
    }
}
