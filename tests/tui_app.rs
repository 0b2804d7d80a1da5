//! App state transitions and rendering with ratatui's test backend

mod common;

use common::{harness, FakeGenerator};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use sage_lens::event::Event;
use sage_lens::generate::GenerationOutcome;
use sage_lens::orchestrator::{Notice, QueryOutcome, References, ResultRecord};
use sage_lens::search::SearchResult;
use sage_lens::tui::{App, Focus, NoticeKind};
use std::time::Duration;

fn app() -> App {
    App::new(harness(vec![("A", FakeGenerator::ok("doc"))]).orchestrator)
}

fn outcome(provider: &str, content: &str) -> QueryOutcome {
    QueryOutcome {
        record: ResultRecord::new(
            "topic",
            Some(GenerationOutcome {
                content: content.to_string(),
                provider: provider.to_string(),
                latency: Duration::from_millis(2100),
            }),
            References {
                web: vec![SearchResult {
                    title: "Rust Book".into(),
                    url: "https://doc.rust-lang.org/book/".into(),
                }],
                videos: Vec::new(),
            },
        ),
        notices: Vec::new(),
    }
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn screen(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn outcome_with_content_is_appended_and_shown() {
    let mut app = app();
    app.apply_outcome(outcome("OpenAI-GPT4", "# Heading\nSome generated text"));

    assert_eq!(app.history().len(), 1);
    assert_eq!(app.history().current_index(), Some(0));
    assert_eq!(app.focus(), Focus::Document);

    let text = screen(&mut app);
    assert!(text.contains("Some generated text"));
    assert!(text.contains("OpenAI-GPT4"));
    assert!(text.contains("2.10s"));
    assert!(text.contains("Rust Book"));
    assert!(text.contains("No video guides found"));
    assert!(text.contains("No previous versions"));
}

#[test]
fn empty_outcome_is_not_appended() {
    let mut app = app();
    app.apply_outcome(QueryOutcome {
        record: ResultRecord::empty("nothing"),
        notices: vec![Notice::new("A", "unauthorized (401): check the API key")],
    });

    assert!(app.history().is_empty());
    let latest = app.notices().latest().unwrap();
    assert_eq!(latest.kind, NoticeKind::Error);
    assert!(latest.content.contains("nothing"));
    assert!(app
        .notices()
        .recent(10)
        .any(|e| e.content.starts_with("A error: unauthorized")));
}

#[test]
fn version_picker_selects_older_versions() {
    let mut app = app();
    app.apply_outcome(outcome("A", "first version"));
    app.apply_outcome(outcome("B", "second version"));
    assert_eq!(app.history().current_index(), Some(1));

    let text = screen(&mut app);
    assert!(text.contains("v1  A | 2.1s"));
    assert!(text.contains("v2  B | 2.1s"));

    // Document -> Versions, move up, activate.
    app.handle_event(key(KeyCode::Tab)).unwrap();
    assert_eq!(app.focus(), Focus::Versions);
    app.handle_event(key(KeyCode::Up)).unwrap();
    app.handle_event(key(KeyCode::Enter)).unwrap();

    assert_eq!(app.history().current_index(), Some(0));
    assert_eq!(app.history().len(), 2);
    assert!(screen(&mut app).contains("first version"));
}

#[test]
fn ctrl_c_quits() {
    let mut app = app();
    app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)))
        .unwrap();
    assert!(app.should_quit());
}

#[tokio::test]
async fn submitting_a_topic_runs_the_query() {
    let mut app = app();
    for ch in "Rust".chars() {
        app.handle_event(key(KeyCode::Char(ch))).unwrap();
    }
    app.handle_event(key(KeyCode::Enter)).unwrap();
    assert!(app.is_loading());

    // A second submit while loading is ignored.
    app.handle_event(key(KeyCode::Enter)).unwrap();

    for _ in 0..100 {
        app.poll_query();
        if !app.is_loading() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert!(!app.is_loading());
    assert_eq!(app.history().len(), 1);
    assert_eq!(app.history().current().unwrap().topic(), "Rust");
}

#[test]
fn blank_topic_is_not_submitted() {
    let mut app = app();
    app.handle_event(key(KeyCode::Char(' '))).unwrap();
    app.handle_event(key(KeyCode::Enter)).unwrap();
    assert!(!app.is_loading());
}

#[tokio::test]
async fn result_finishing_after_a_version_switch_is_appended_as_current() {
    let mut app = App::new(
        harness(vec![(
            "A",
            FakeGenerator::ok_after("late document", Duration::from_millis(50)),
        )])
        .orchestrator,
    );
    app.apply_outcome(outcome("A", "first version"));
    app.apply_outcome(outcome("B", "second version"));

    // Document -> Versions -> Input, then submit.
    app.handle_event(key(KeyCode::Tab)).unwrap();
    app.handle_event(key(KeyCode::Tab)).unwrap();
    assert_eq!(app.focus(), Focus::Input);
    for ch in "Rust".chars() {
        app.handle_event(key(KeyCode::Char(ch))).unwrap();
    }
    app.handle_event(key(KeyCode::Enter)).unwrap();
    assert!(app.is_loading());

    // Browse back to v1 while the query runs.
    app.select_version(0);
    assert_eq!(app.history().current_index(), Some(0));

    for _ in 0..100 {
        app.poll_query();
        if !app.is_loading() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(app.history().len(), 3);
    assert_eq!(app.history().current_index(), Some(2));
    assert_eq!(app.history().get(0).unwrap().topic(), "topic");
    assert_eq!(app.history().current().unwrap().topic(), "Rust");
    assert!(screen(&mut app).contains("late document"));
}
