use crate::orchestrator::Notice;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Severity of a status-bar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One line shown in the status area
#[derive(Debug, Clone)]
pub struct NoticeEntry {
    pub kind: NoticeKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl NoticeEntry {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

impl From<Notice> for NoticeEntry {
    fn from(notice: Notice) -> Self {
        Self::error(notice.to_string())
    }
}

/// Bounded log of recent notices, newest last
#[derive(Debug)]
pub struct NoticeLog {
    entries: VecDeque<NoticeEntry>,
    capacity: usize,
}

impl NoticeLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, entry: NoticeEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn latest(&self) -> Option<&NoticeEntry> {
        self.entries.back()
    }

    /// Most recent first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &NoticeEntry> {
        self.entries.iter().rev().take(n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::new(20)
    }
}
