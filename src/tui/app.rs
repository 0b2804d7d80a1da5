use crate::event::{Event, EventResult};
use crate::history::History;
use crate::orchestrator::{QueryOrchestrator, QueryOutcome};
use crate::tui::notice::{NoticeEntry, NoticeKind, NoticeLog};
use crate::tui::{references, DocumentView, InputWidget, VersionPicker};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tokio::sync::oneshot;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Document,
    Versions,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Document,
            Focus::Document => Focus::Versions,
            Focus::Versions => Focus::Input,
        }
    }
}

/// Main application state
pub struct App {
    orchestrator: QueryOrchestrator,
    history: History,
    pub input: InputWidget,
    document: DocumentView,
    versions: VersionPicker,
    notices: NoticeLog,
    focus: Focus,
    should_quit: bool,
    /// Receives the outcome of the query in flight
    pending: Option<oneshot::Receiver<QueryOutcome>>,
    spinner_frame: usize,
}

impl App {
    pub fn new(orchestrator: QueryOrchestrator) -> Self {
        let mut notices = NoticeLog::default();
        let engines: Vec<&str> = orchestrator.generator_labels().collect();
        notices.push(NoticeEntry::info(format!(
            "Ready. Engines: {} | Enter=generate Tab=switch panel ↑↓=scroll/pick Ctrl+C=quit",
            engines.join(", ")
        )));

        Self {
            orchestrator,
            history: History::new(),
            input: InputWidget::new(),
            document: DocumentView::new(),
            versions: VersionPicker::new(),
            notices,
            focus: Focus::Input,
            should_quit: false,
            pending: None,
            spinner_frame: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn notices(&self) -> &NoticeLog {
        &self.notices
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn handle_event(&mut self, event: Event) -> EventResult<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick => {
                if self.is_loading() {
                    self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
                }
                Ok(())
            }
            Event::Resize(..) => Ok(()),
            Event::Quit => {
                self.should_quit = true;
                Ok(())
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        if key.code == KeyCode::Tab {
            self.focus = self.focus.next();
            return Ok(());
        }

        match self.focus {
            Focus::Input => {
                if key.code == KeyCode::Enter && !key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.submit_topic();
                } else {
                    self.input.handle_key(key);
                }
            }
            Focus::Document => match key.code {
                KeyCode::Up => self.document.scroll_up(1),
                KeyCode::Down => self.document.scroll_down(1),
                KeyCode::PageUp => self.document.scroll_up(10),
                KeyCode::PageDown => self.document.scroll_down(10),
                KeyCode::Home => self.document.reset(),
                KeyCode::End => self.document.scroll_down(u16::MAX),
                _ => {}
            },
            Focus::Versions => match key.code {
                KeyCode::Up => self.versions.move_up(),
                KeyCode::Down => self.versions.move_down(self.history.len()),
                KeyCode::Enter => self.select_version(self.versions.cursor()),
                _ => {}
            },
        }
        Ok(())
    }

    /// Start a query for the typed topic. Ignored while one is running.
    fn submit_topic(&mut self) {
        if self.is_loading() || self.input.is_blank() {
            return;
        }
        let topic = self.input.take_text().trim().to_string();

        let (tx, rx) = oneshot::channel();
        self.pending = Some(rx);
        let orchestrator = self.orchestrator.clone();

        tracing::info!(topic = %topic, "query submitted");
        tokio::spawn(async move {
            let outcome = orchestrator.process_query(&topic).await;
            let _ = tx.send(outcome); // Receiver gone means the app is quitting.
        });
    }

    /// Check whether the query in flight has finished
    pub fn poll_query(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                self.apply_outcome(outcome);
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                self.pending = None;
                self.notices.push(NoticeEntry::error("Processing error: query task stopped"));
            }
        }
    }

    /// Show a finished query. Only records with content enter history.
    pub fn apply_outcome(&mut self, outcome: QueryOutcome) {
        for notice in outcome.notices {
            self.notices.push(notice.into());
        }

        if !outcome.record.has_content() {
            self.notices.push(NoticeEntry::error(format!(
                "No documentation generated for \"{}\"",
                outcome.record.topic()
            )));
            return;
        }

        let index = self.history.append_and_select(outcome.record);
        self.versions.focus(index);
        self.document.reset();
        self.focus = Focus::Document;
    }

    /// Show an earlier version
    pub fn select_version(&mut self, index: usize) {
        match self.history.select(index) {
            Ok(()) => {
                self.versions.focus(index);
                self.document.reset();
            }
            Err(e) => self.notices.push(NoticeEntry::error(e.to_string())),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Topic input
                Constraint::Min(8),    // Results
                Constraint::Length(3), // Status bar
            ])
            .split(frame.area());

        self.input.render(frame, rows[0], self.focus == Focus::Input);
        self.render_results(frame, rows[1]);
        self.render_status(frame, rows[2]);
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(3, 4), Constraint::Ratio(1, 4)])
            .split(area);

        let current = self.history.current();
        self.document.render(
            frame,
            columns[0],
            current.and_then(|r| r.content()),
            self.focus == Focus::Document,
        );

        let version_rows = (self.history.len() as u16).clamp(1, 8) + 2;
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(version_rows)])
            .split(columns[1]);

        references::render(frame, side[0], current.map(|r| r.references()));
        self.versions
            .render(frame, side[1], &self.history, self.focus == Focus::Versions);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("Status: ", Style::default().fg(Color::Yellow)),
            Span::raw(if self.is_loading() {
                format!("{} Researching...", SPINNER[self.spinner_frame])
            } else {
                "Ready".to_string()
            }),
            Span::raw(" | "),
            Span::styled("Versions: ", Style::default().fg(Color::Cyan)),
            Span::raw(self.history.len().to_string()),
        ];

        if let Some(latest) = self.notices.latest() {
            let color = match latest.kind {
                NoticeKind::Info => Color::Gray,
                NoticeKind::Error => Color::LightRed,
            };
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("[{}] {}", latest.formatted_timestamp(), latest.content),
                Style::default().fg(color),
            ));
        }

        let status = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" 🔍 Sage-Lens "),
        );
        frame.render_widget(status, area);
    }
}
