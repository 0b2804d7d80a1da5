//! Web search aggregation and video adaptation against fake providers

mod common;

use common::{FakeSearch, FakeVideo};
use sage_lens::search::{SearchError, WebSearchAggregator};
use sage_lens::video::{VideoCandidate, VideoSearchAdapter};
use std::time::Duration;

#[tokio::test]
async fn merges_primary_before_secondary_and_dedups() {
    let tavily = FakeSearch::ok("tavily", &["a.com", "b.com"]);
    let serper = FakeSearch::ok("serper", &["b.com", "c.com"]);
    let aggregator = WebSearchAggregator::new(tavily.clone(), serper.clone());

    let results = aggregator.search("topic").await.unwrap();

    let urls: Vec<_> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, ["a.com", "b.com", "c.com"]);
    assert_eq!(tavily.requested.lock().unwrap().as_slice(), [5]);
    assert_eq!(serper.requested.lock().unwrap().as_slice(), [5]);
}

#[tokio::test]
async fn order_holds_when_secondary_answers_first() {
    let tavily = FakeSearch::ok_after("tavily", &["a.com", "shared.com"], Duration::from_millis(50));
    let serper = FakeSearch::ok("serper", &["shared.com", "z.com"]);
    let aggregator = WebSearchAggregator::new(tavily, serper);

    let results = aggregator.search("topic").await.unwrap();

    let urls: Vec<_> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, ["a.com", "shared.com", "z.com"]);
    assert_eq!(results[1].title, "Title for shared.com");
}

#[tokio::test]
async fn caps_merged_results() {
    let primary: Vec<String> = (0..8).map(|i| format!("p{i}.com")).collect();
    let secondary: Vec<String> = (0..8).map(|i| format!("s{i}.com")).collect();
    let primary: Vec<&str> = primary.iter().map(String::as_str).collect();
    let secondary: Vec<&str> = secondary.iter().map(String::as_str).collect();

    let aggregator = WebSearchAggregator::new(
        FakeSearch::ok("tavily", &primary),
        FakeSearch::ok("serper", &secondary),
    )
    .with_limits(8, 10);

    let results = aggregator.search("topic").await.unwrap();
    assert_eq!(results.len(), 10);
    assert_eq!(results[7].url, "p7.com");
    assert_eq!(results[9].url, "s1.com");
}

#[tokio::test]
async fn either_provider_failing_fails_the_call() {
    let aggregator = WebSearchAggregator::new(
        FakeSearch::failing("tavily"),
        FakeSearch::ok("serper", &["c.com"]),
    );
    let err = aggregator.search("topic").await.unwrap_err();
    assert!(matches!(err, SearchError::RateLimitExceeded));

    let aggregator = WebSearchAggregator::new(
        FakeSearch::ok("tavily", &["a.com"]),
        FakeSearch::failing("serper"),
    );
    assert!(aggregator.search("topic").await.is_err());
}

#[tokio::test]
async fn video_adapter_requests_ten_and_keeps_five() {
    let ids: Vec<String> = (0..10).map(|i| format!("id{i}")).collect();
    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
    let provider = FakeVideo::ok(&ids);
    let adapter = VideoSearchAdapter::new(provider.clone());

    let videos = adapter.search("topic").await.unwrap();

    assert_eq!(provider.requested.lock().unwrap().as_slice(), [10]);
    assert_eq!(videos.len(), 5);
    assert_eq!(videos[4].url, "https://youtube.com/watch?v=id4");
    assert_eq!(videos[0].views, "1,000 views");
}

#[tokio::test]
async fn video_adapter_skips_candidates_without_id_before_truncating() {
    let mut candidates: Vec<VideoCandidate> = (0..3)
        .map(|_| VideoCandidate {
            id: None,
            title: Some("channel shelf".into()),
            views: None,
        })
        .collect();
    candidates.extend((0..6).map(|i| VideoCandidate {
        id: Some(format!("v{i}")),
        title: None,
        views: None,
    }));

    let adapter = VideoSearchAdapter::new(FakeVideo::with_candidates(candidates));
    let videos = adapter.search("topic").await.unwrap();

    assert_eq!(videos.len(), 5);
    assert_eq!(videos[0].url, "https://youtube.com/watch?v=v0");
    assert_eq!(videos[0].title, "Untitled Video");
    assert_eq!(videos[0].views, "N/A");
}
