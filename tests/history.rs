use sage_lens::generate::GenerationOutcome;
use sage_lens::history::{History, HistoryError};
use sage_lens::orchestrator::{References, ResultRecord};
use std::time::Duration;

fn record(provider: &str) -> ResultRecord {
    ResultRecord::new(
        format!("topic from {provider}"),
        Some(GenerationOutcome {
            content: format!("doc by {provider}"),
            provider: provider.to_string(),
            latency: Duration::from_millis(1500),
        }),
        References::default(),
    )
}

#[test]
fn starts_empty_with_nothing_selected() {
    let history = History::new();
    assert!(history.is_empty());
    assert!(history.current().is_none());
    assert_eq!(history.current_index(), None);
}

#[test]
fn append_keeps_call_order_and_selects_newest() {
    let mut history = History::new();
    for (i, provider) in ["a", "b", "c"].into_iter().enumerate() {
        let index = history.append_and_select(record(provider));
        assert_eq!(index, i);
        assert_eq!(history.current().unwrap().content().unwrap().provider, provider);
    }

    assert_eq!(history.len(), 3);
    let providers: Vec<_> = history
        .iter()
        .map(|r| r.content().unwrap().provider.as_str())
        .collect();
    assert_eq!(providers, ["a", "b", "c"]);
}

#[test]
fn select_changes_current_only() {
    let mut history = History::new();
    history.append_and_select(record("a"));
    history.append_and_select(record("b"));

    history.select(0).unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history.current_index(), Some(0));
    assert_eq!(history.current().unwrap().topic(), "topic from a");
    assert_eq!(history.get(1).unwrap().topic(), "topic from b");

    // A new result after going back still lands at the end.
    history.append_and_select(record("c"));
    assert_eq!(history.current_index(), Some(2));
}

#[test]
fn select_out_of_range_is_rejected() {
    let mut history = History::new();
    history.append_and_select(record("a"));

    assert_eq!(history.select(3), Err(HistoryError::OutOfRange { index: 3, len: 1 }));
    assert_eq!(history.current_index(), Some(0));
}
