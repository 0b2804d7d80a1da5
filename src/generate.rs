//! Content generation: one prompt, one provider call, latency measured.

use crate::config::Station;
use crate::llm::{GenerationError, TextGenerator};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Placeholder replaced by the user's topic in prompt templates
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// A successful generation attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    /// Generated documentation (markdown)
    pub content: String,
    /// Provider label, e.g. `OpenAI-GPT4`
    pub provider: String,
    /// Wall-clock time from request start to response
    pub latency: Duration,
}

impl GenerationOutcome {
    pub fn latency_secs(&self) -> f64 {
        self.latency.as_secs_f64()
    }

    /// Document length in characters
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Drafts documentation through one provider
#[derive(Clone)]
pub struct ContentGenerator {
    label: String,
    prompt_template: String,
    backend: Arc<dyn TextGenerator>,
}

impl ContentGenerator {
    pub fn new(
        label: impl Into<String>,
        prompt_template: impl Into<String>,
        backend: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            label: label.into(),
            prompt_template: prompt_template.into(),
            backend,
        }
    }

    pub fn from_station(station: &Station, backend: Arc<dyn TextGenerator>) -> Self {
        Self::new(&station.label, &station.prompt_template, backend)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn prompt_for(&self, topic: &str) -> String {
        self.prompt_template.replace(TOPIC_PLACEHOLDER, topic)
    }

    /// Generate documentation for `topic`. Called exactly once per query.
    pub async fn generate(&self, topic: &str) -> Result<GenerationOutcome, GenerationError> {
        let prompt = self.prompt_for(topic);
        let started = Instant::now();
        let content = self.backend.generate(&prompt).await?;
        let latency = started.elapsed();

        tracing::info!(
            provider = %self.label,
            chars = content.chars().count(),
            latency_ms = latency.as_millis() as u64,
            "generation completed"
        );

        Ok(GenerationOutcome {
            content,
            provider: self.label.clone(),
            latency,
        })
    }
}

/// Pick the longest document by character count; on equal length the earliest wins.
pub fn select_longest(outcomes: Vec<GenerationOutcome>) -> Option<GenerationOutcome> {
    outcomes
        .into_iter()
        .map(|outcome| (outcome.char_count(), outcome))
        .fold(None, |best: Option<(usize, GenerationOutcome)>, candidate| match best {
            Some(current) if current.0 >= candidate.0 => Some(current),
            _ => Some(candidate),
        })
        .map(|(_, outcome)| outcome)
}
