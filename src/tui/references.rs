use crate::orchestrator::References;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Web links shown in the panel
pub const WEB_SHOWN: usize = 5;
/// Videos shown in the panel
pub const VIDEOS_SHOWN: usize = 3;

/// Shorten `text` to at most `max` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

pub fn web_items(refs: &References, width: usize) -> Vec<ListItem<'static>> {
    if refs.web.is_empty() {
        return vec![ListItem::new(Span::styled(
            "No web resources found",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    refs.web
        .iter()
        .take(WEB_SHOWN)
        .enumerate()
        .map(|(i, item)| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    truncate_to_width(&format!("{}. {}", i + 1, item.title), width),
                    Style::default().fg(Color::LightCyan),
                )),
                Line::from(Span::styled(
                    truncate_to_width(&format!("   {}", item.url), width),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::UNDERLINED),
                )),
            ])
        })
        .collect()
}

pub fn video_items(refs: &References, width: usize) -> Vec<ListItem<'static>> {
    if refs.videos.is_empty() {
        return vec![ListItem::new(Span::styled(
            "No video guides found",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    refs.videos
        .iter()
        .take(VIDEOS_SHOWN)
        .map(|vid| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    truncate_to_width(&format!("▶ {}", vid.title), width),
                    Style::default().fg(Color::LightMagenta),
                )),
                Line::from(Span::styled(
                    truncate_to_width(&format!("   {}", vid.url), width),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    format!("   Views: {}", vid.views),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect()
}

/// Render the curated resources panel
pub fn render(frame: &mut Frame, area: Rect, refs: Option<&References>) {
    let empty = References::default();
    let refs = refs.unwrap_or(&empty);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let width = chunks[0].width.saturating_sub(2) as usize;

    let web = List::new(web_items(refs, width)).block(panel(" 🌐 Web References "));
    frame.render_widget(web, chunks[0]);

    let videos = List::new(video_items(refs, width)).block(panel(" 🎥 Video Guides "));
    frame.render_widget(videos, chunks[1]);
}

fn panel(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
}
