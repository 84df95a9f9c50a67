//! Transient error/success banners shown by each screen

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub raised_at: Instant,
}

/// Holds at most one notice; a new one replaces the old, and a notice
/// stops being visible once `ttl` has elapsed.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    ttl: Duration,
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.raise(NoticeKind::Error, text.into());
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.raise(NoticeKind::Success, text.into());
    }

    fn raise(&mut self, kind: NoticeKind, text: String) {
        match kind {
            NoticeKind::Error => tracing::warn!("{}", text),
            NoticeKind::Success => tracing::info!("{}", text),
        }
        self.current = Some(Notice {
            kind,
            text,
            raised_at: Instant::now(),
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Visible notice right now
    pub fn current(&self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }

    /// Visible notice at `now`
    pub fn current_at(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.raised_at) < self.ttl)
    }

    pub fn error_text(&self) -> Option<&str> {
        self.current()
            .filter(|n| n.kind == NoticeKind::Error)
            .map(|n| n.text.as_str())
    }

    pub fn success_text(&self) -> Option<&str> {
        self.current()
            .filter(|n| n.kind == NoticeKind::Success)
            .map(|n| n.text.as_str())
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
