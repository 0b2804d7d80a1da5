use super::markdown::render_markdown;
use crate::generate::GenerationOutcome;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Scrollable view of the selected document plus its generation details
pub struct DocumentView {
    scroll_offset: u16,
    viewport_height: u16,
    content_height: u16,
}

impl DocumentView {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            viewport_height: 0,
            content_height: 0,
        }
    }

    /// Jump back to the top (new document shown)
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max_scroll = self.content_height.saturating_sub(self.viewport_height);
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max_scroll);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Markdown rendered into lines that fit `width` columns
    pub fn markdown_lines(content: &str, width: usize) -> Vec<Line<'static>> {
        render_markdown(content, width.max(10))
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, outcome: Option<&GenerationOutcome>, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(4)])
            .split(area);

        let border = if focused { Color::LightGreen } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(" 📄 Generated Documentation ");
        let inner = block.inner(chunks[0]);
        self.viewport_height = inner.height;

        let text = match outcome {
            Some(outcome) => {
                let lines = Self::markdown_lines(&outcome.content, inner.width.saturating_sub(1) as usize);
                self.content_height = lines.len().min(u16::MAX as usize) as u16;
                Text::from(lines)
            }
            None => {
                self.content_height = 0;
                Text::from(Span::styled(
                    "Enter a research topic and press Enter to generate documentation.",
                    Style::default().fg(Color::DarkGray),
                ))
            }
        };

        let max_scroll = self.content_height.saturating_sub(self.viewport_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(text).block(block).scroll((self.scroll_offset, 0));
        frame.render_widget(paragraph, chunks[0]);

        self.render_details(frame, chunks[1], outcome);
    }

    fn render_details(&self, frame: &mut Frame, area: Rect, outcome: Option<&GenerationOutcome>) {
        let label = Style::default().fg(Color::Yellow);
        let lines = match outcome {
            Some(outcome) => vec![
                Line::from(vec![
                    Span::styled("Processing Time: ", label),
                    Span::raw(format!("{:.2}s", outcome.latency_secs())),
                    Span::raw("   "),
                    Span::styled("AI Engine: ", label),
                    Span::raw(outcome.provider.clone()),
                ]),
                Line::from(Span::styled(
                    format!("{} characters", outcome.char_count()),
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            None => vec![Line::from(Span::styled("No document yet", Style::default().fg(Color::DarkGray)))],
        };

        let details = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" ⚙️  Generation Details "),
        );
        frame.render_widget(details, area);
    }
}

impl Default for DocumentView {
    fn default() -> Self {
        Self::new()
    }
}
