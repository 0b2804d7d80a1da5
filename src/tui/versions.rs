use crate::history::History;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Version list with a movable cursor; activating a row selects that version
#[derive(Debug, Default)]
pub struct VersionPicker {
    cursor: usize,
}

impl VersionPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Put the cursor on `index` (e.g. the version just appended)
    pub fn focus(&mut self, index: usize) {
        self.cursor = index;
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// Row caption: `v{n}  {provider} | {latency:.1}s`
    pub fn caption(history: &History, index: usize) -> Option<String> {
        let record = history.get(index)?;
        let outcome = record.content()?;
        Some(format!(
            "v{}  {} | {:.1}s",
            index + 1,
            outcome.provider,
            outcome.latency_secs()
        ))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, history: &History, focused: bool) {
        let border = if focused { Color::LightYellow } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(" 🕰 Document Versions ");

        if history.len() <= 1 {
            let hint = Paragraph::new(Span::styled(
                "No previous versions",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let current = history.current_index();
        let items: Vec<ListItem> = (0..history.len())
            .filter_map(|i| {
                let caption = Self::caption(history, i)?;
                let marker = if current == Some(i) { "● " } else { "  " };
                Some(ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::LightGreen)),
                    Span::raw(caption),
                ])))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        if focused {
            state.select(Some(self.cursor.min(history.len() - 1)));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }
}
