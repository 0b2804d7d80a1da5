use crate::error::InitError;
use crate::video::{VideoCandidate, VideoSearchError, VideoSearchProvider};
use regex::Regex;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// YouTube search through the public results page.
///
/// The page embeds its search results as a `ytInitialData` JSON blob; each
/// video is a `videoRenderer` object inside it. No API key is needed.
pub struct YoutubeSearchProvider {
    client: reqwest::Client,
    base_url: String,
    initial_data: Regex,
}

impl YoutubeSearchProvider {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, InitError> {
        let initial_data = Regex::new(
            r#"(?s)(?:var\s+ytInitialData|window\["ytInitialData"\])\s*=\s*(\{.*?\});\s*</script>"#,
        )
        .map_err(|e| InitError::Config(e.to_string()))?;

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .build()?,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            initial_data,
        })
    }

    /// Extract up to `max_results` candidates from a results page
    pub fn parse_results_page(&self, html: &str, max_results: usize) -> Result<Vec<VideoCandidate>, VideoSearchError> {
        let raw = self
            .initial_data
            .captures(html)
            .and_then(|c| c.get(1))
            .ok_or_else(|| VideoSearchError::MalformedResponse("ytInitialData not found".into()))?;

        let data: Value = serde_json::from_str(raw.as_str())
            .map_err(|e| VideoSearchError::MalformedResponse(e.to_string()))?;

        let mut renderers = Vec::new();
        collect_video_renderers(&data, &mut renderers);

        Ok(renderers
            .into_iter()
            .take(max_results)
            .map(|r| VideoCandidate {
                id: r["videoId"].as_str().map(str::to_string),
                title: text_of(&r["title"]),
                views: text_of(&r["viewCountText"]),
            })
            .collect())
    }
}

/// Depth-first, document order.
fn collect_video_renderers<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "videoRenderer" && child.is_object() {
                    out.push(child);
                } else {
                    collect_video_renderers(child, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_video_renderers(item, out);
            }
        }
        _ => {}
    }
}

/// YouTube text fields are either `{simpleText}` or `{runs: [{text}]}`.
fn text_of(value: &Value) -> Option<String> {
    if let Some(simple) = value["simpleText"].as_str() {
        return Some(simple.to_string());
    }
    let runs = value["runs"].as_array()?;
    let joined: String = runs.iter().filter_map(|r| r["text"].as_str()).collect();
    (!joined.is_empty()).then_some(joined)
}

#[async_trait::async_trait]
impl VideoSearchProvider for YoutubeSearchProvider {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<VideoCandidate>, VideoSearchError> {
        tracing::debug!(query = %query, max_results, "performing youtube search");

        let response = self
            .client
            .get(format!("{}/results", self.base_url))
            .query(&[("search_query", query)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VideoSearchError::Http {
                status: response.status().as_u16(),
            });
        }

        let html = response.text().await?;
        self.parse_results_page(&html, max_results)
    }
}
