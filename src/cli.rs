use crate::event::Event;
use crate::orchestrator::QueryOrchestrator;
use crate::tui::App;
use anyhow::{Context, Result};
use crossterm::event::{Event as TermEvent, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(120);

/// Load configuration, build every provider client, then run the TUI.
///
/// Initialization failures (bad config, missing credentials) end the
/// process before the terminal is touched.
pub async fn run() -> Result<()> {
    // A missing .env file is fine; credentials may come from the shell.
    dotenvy::dotenv().ok();

    let config = crate::config::load_or_create_config()?;
    let _log_guard = crate::logging::init(&config)?;

    let orchestrator = QueryOrchestrator::from_config(&config).context("Initialization failed")?;
    let app = App::new(orchestrator);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, app).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

async fn event_loop(terminal: &mut Tui, mut app: App) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;

        let event = tokio::select! {
            maybe = events.next() => match maybe {
                Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
                Some(Ok(TermEvent::Resize(w, h))) => Some(Event::Resize(w, h)),
                Some(Ok(_)) => None,
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => Some(Event::Quit),
            },
            _ = ticker.tick() => Some(Event::Tick),
        };

        if let Some(event) = event {
            app.handle_event(event)?;
        }
        app.poll_query();
    }

    tracing::info!(versions = app.history().len(), "session ended");
    Ok(())
}
