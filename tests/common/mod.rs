//! Shared fakes for provider-facing tests

#![allow(dead_code)]

use sage_lens::generate::ContentGenerator;
use sage_lens::llm::{GenerationError, TextGenerator};
use sage_lens::orchestrator::QueryOrchestrator;
use sage_lens::search::{SearchError, SearchOptions, SearchProvider, SearchResult, WebSearchAggregator};
use sage_lens::video::{VideoCandidate, VideoSearchAdapter, VideoSearchError, VideoSearchProvider};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Text generator returning a canned reply after an optional delay
pub struct FakeGenerator {
    reply: Option<String>,
    delay: Duration,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn ok(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn ok_after(reply: impl Into<String>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.into()),
            delay,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone().ok_or(GenerationError::Unauthorized)
    }
}

/// Search provider with fixed results, or a fixed failure
pub struct FakeSearch {
    name: &'static str,
    results: Option<Vec<SearchResult>>,
    delay: Duration,
    pub calls: AtomicUsize,
    pub requested: Mutex<Vec<usize>>,
}

impl FakeSearch {
    pub fn ok(name: &'static str, urls: &[&str]) -> Arc<Self> {
        Self::ok_after(name, urls, Duration::ZERO)
    }

    pub fn ok_after(name: &'static str, urls: &[&str], delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            name,
            results: Some(urls.iter().map(|u| result(u)).collect()),
            delay,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            results: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SearchProvider for FakeSearch {
    fn name(&self) -> &str {
        self.name
    }

    async fn search(&self, _query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(options.max_results);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.results.clone().ok_or(SearchError::RateLimitExceeded)
    }
}

/// Video provider with fixed candidates, or a fixed failure
pub struct FakeVideo {
    candidates: Option<Vec<VideoCandidate>>,
    pub calls: AtomicUsize,
    pub requested: Mutex<Vec<usize>>,
}

impl FakeVideo {
    pub fn ok(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            candidates: Some(
                ids.iter()
                    .map(|id| VideoCandidate {
                        id: Some(id.to_string()),
                        title: Some(format!("Video {id}")),
                        views: Some("1,000 views".to_string()),
                    })
                    .collect(),
            ),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn with_candidates(candidates: Vec<VideoCandidate>) -> Arc<Self> {
        Arc::new(Self {
            candidates: Some(candidates),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            candidates: None,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl VideoSearchProvider for FakeVideo {
    fn name(&self) -> &str {
        "fake-video"
    }

    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<VideoCandidate>, VideoSearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(max_results);
        self.candidates
            .clone()
            .ok_or_else(|| VideoSearchError::MalformedResponse("ytInitialData not found".into()))
    }
}

pub fn result(url: &str) -> SearchResult {
    SearchResult {
        title: format!("Title for {url}"),
        url: url.to_string(),
    }
}

/// Everything an orchestrator test needs to inspect afterwards
pub struct Harness {
    pub orchestrator: QueryOrchestrator,
    pub primary: Arc<FakeSearch>,
    pub secondary: Arc<FakeSearch>,
    pub video: Arc<FakeVideo>,
}

pub fn harness(generators: Vec<(&str, Arc<FakeGenerator>)>) -> Harness {
    harness_with(
        generators,
        FakeSearch::ok("tavily", &["https://a.com", "https://b.com"]),
        FakeSearch::ok("serper", &["https://b.com", "https://c.com"]),
        FakeVideo::ok(&["v1", "v2"]),
    )
}

pub fn harness_with(
    generators: Vec<(&str, Arc<FakeGenerator>)>,
    primary: Arc<FakeSearch>,
    secondary: Arc<FakeSearch>,
    video: Arc<FakeVideo>,
) -> Harness {
    let generators = generators
        .into_iter()
        .map(|(label, backend)| {
            ContentGenerator::new(label, "Create detailed documentation about: {topic}", backend)
        })
        .collect();
    let orchestrator = QueryOrchestrator::new(
        generators,
        WebSearchAggregator::new(primary.clone(), secondary.clone()),
        VideoSearchAdapter::new(video.clone()),
    );
    Harness {
        orchestrator,
        primary,
        secondary,
        video,
    }
}
