use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
    Frame,
};
use tui_textarea::TextArea;

const PLACEHOLDER: &str = "e.g., Transformer Architecture Optimization";

/// Topic input built on tui-textarea
pub struct InputWidget {
    textarea: TextArea<'static>,
}

impl InputWidget {
    pub fn new() -> Self {
        Self {
            textarea: Self::fresh_textarea(),
        }
    }

    fn fresh_textarea() -> TextArea<'static> {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea.set_cursor_line_style(Style::default());
        textarea.set_block(Self::block(false));
        textarea
    }

    fn block(focused: bool) -> Block<'static> {
        let border = if focused { Color::LightBlue } else { Color::DarkGray };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(
                " 📝 Research topic (Enter=generate │ Shift+Enter=newline) ",
                Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(border))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.textarea.input(key);
    }

    /// Current topic text (lines joined with spaces)
    pub fn text(&self) -> String {
        self.textarea.lines().join(" ")
    }

    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }

    /// Get the current topic and clear the input
    pub fn take_text(&mut self) -> String {
        let text = self.text();
        self.textarea = Self::fresh_textarea();
        text
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        self.textarea.set_block(Self::block(focused));
        let cursor = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor);
        frame.render_widget(&self.textarea, area);
    }
}

impl Default for InputWidget {
    fn default() -> Self {
        Self::new()
    }
}
