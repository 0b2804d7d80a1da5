//! Markdown to styled, width-wrapped terminal lines.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One unbreakable run of styled text
#[derive(Debug)]
struct Word {
    text: String,
    style: Style,
    width: usize,
    space_after: bool,
}

impl Fragment for Word {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn whitespace_width(&self) -> f64 {
        if self.space_after {
            1.0
        } else {
            0.0
        }
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

struct LineBuilder {
    width: usize,
    lines: Vec<Line<'static>>,
    words: Vec<Word>,
    styles: Vec<Style>,
    lists: Vec<Option<u64>>,
    marker: Option<String>,
    marker_width: usize,
    quote_depth: usize,
    code_block: bool,
}

impl LineBuilder {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            words: Vec::new(),
            styles: vec![Style::default()],
            lists: Vec::new(),
            marker: None,
            marker_width: 0,
            quote_depth: 0,
            code_block: false,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, patch: Style) {
        let style = self.style().patch(patch);
        self.styles.push(style);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn prefix(&self, first: bool) -> String {
        let mut prefix = "│ ".repeat(self.quote_depth);
        if !self.lists.is_empty() {
            prefix.push_str(&"  ".repeat(self.lists.len() - 1));
            match (&self.marker, first) {
                (Some(marker), true) => prefix.push_str(marker),
                _ => prefix.push_str(&" ".repeat(self.marker_width)),
            }
        }
        prefix
    }

    fn text_width(&self) -> usize {
        self.width.saturating_sub(self.prefix(false).width()).max(1)
    }

    fn push_text(&mut self, text: &str, style: Style) {
        if text.starts_with(char::is_whitespace) {
            self.soft_break();
        }
        let mut words = text.split_whitespace().peekable();
        while let Some(word) = words.next() {
            let space_after = words.peek().is_some() || text.ends_with(char::is_whitespace);
            self.push_word(word, style, space_after);
        }
    }

    /// Words wider than the line are split at the column limit.
    fn push_word(&mut self, word: &str, style: Style, space_after: bool) {
        let limit = self.text_width();
        let mut chunk = String::new();
        let mut used = 0;
        for ch in word.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > limit && !chunk.is_empty() {
                self.words.push(Word {
                    text: std::mem::take(&mut chunk),
                    style,
                    width: used,
                    space_after: false,
                });
                used = 0;
            }
            chunk.push(ch);
            used += w;
        }
        if !chunk.is_empty() {
            self.words.push(Word {
                text: chunk,
                style,
                width: used,
                space_after,
            });
        }
    }

    fn soft_break(&mut self) {
        if let Some(last) = self.words.last_mut() {
            last.space_after = true;
        }
    }

    /// Wrap the pending words into lines
    fn flush(&mut self) {
        if self.words.is_empty() {
            return;
        }
        let words = std::mem::take(&mut self.words);
        let rows = wrap_first_fit(&words, &[self.text_width() as f64]);
        let dim = Style::default().fg(Color::DarkGray);

        for (i, row) in rows.iter().enumerate() {
            let mut spans = Vec::with_capacity(row.len() * 2 + 1);
            let prefix = self.prefix(i == 0);
            if !prefix.is_empty() {
                spans.push(Span::styled(prefix, dim));
            }
            for (j, word) in row.iter().enumerate() {
                spans.push(Span::styled(word.text.clone(), word.style));
                if word.space_after && j + 1 < row.len() {
                    spans.push(Span::styled(" ", word.style));
                }
            }
            self.lines.push(Line::from(spans));
        }
        self.marker = None;
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn code_line(&mut self, raw: &str) {
        let mut spans = Vec::new();
        let prefix = self.prefix(false);
        if !prefix.is_empty() {
            spans.push(Span::styled(prefix, Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(raw.to_string(), Style::default().fg(Color::Gray)));
        self.lines.push(Line::from(spans));
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.blank();
                let mut style = Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD);
                if level == HeadingLevel::H1 {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                self.push_style(style);
            }
            Tag::Paragraph => self.flush(),
            Tag::CodeBlock(kind) => {
                self.flush();
                self.code_block = true;
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let fence = Line::from(Span::styled(
                    format!("{}```{lang}", self.prefix(false)),
                    Style::default().fg(Color::DarkGray),
                ));
                self.lines.push(fence);
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::List(start) => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.marker_width = marker.width();
                self.marker = Some(marker);
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { .. } => {
                self.push_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED))
            }
            Tag::TableHead => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading { .. } => {
                self.flush();
                self.pop_style();
                self.lines.push(Line::default());
            }
            TagEnd::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.lines.push(Line::default());
                }
            }
            TagEnd::CodeBlock => {
                self.code_block = false;
                self.lines.push(Line::from(Span::styled(
                    format!("{}```", self.prefix(false)),
                    Style::default().fg(Color::DarkGray),
                )));
                if self.lists.is_empty() {
                    self.lines.push(Line::default());
                }
            }
            TagEnd::BlockQuote { .. } => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.pop_style();
            }
            TagEnd::List { .. } => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => self.pop_style(),
            TagEnd::TableHead => {
                self.flush();
                self.pop_style();
            }
            TagEnd::TableRow => self.flush(),
            TagEnd::TableCell => {
                self.push_word("│", Style::default().fg(Color::DarkGray), true);
            }
            TagEnd::Table => self.blank(),
            _ => {}
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.code_block => {
                for raw in text.lines() {
                    self.code_line(raw);
                }
            }
            Event::Text(text) => {
                let style = self.style();
                self.push_text(&text, style);
            }
            Event::Code(code) => {
                let style = self.style().fg(Color::Yellow);
                self.push_word(&code, style, false);
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_text(&html, Style::default().fg(Color::DarkGray));
            }
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(self.width),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Event::TaskListMarker(done) => {
                let style = self.style();
                self.push_word(if done { "[x]" } else { "[ ]" }, style, true);
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Render `content` as lines no wider than `width`. Code blocks keep their
/// original line breaks and are not wrapped.
pub fn render_markdown(content: &str, width: usize) -> Vec<Line<'static>> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut builder = LineBuilder::new(width);
    for event in Parser::new_ext(content, options) {
        builder.event(event);
    }
    builder.finish()
}
