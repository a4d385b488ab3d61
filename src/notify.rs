use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn lifetime(self) -> Duration {
        match self {
            Self::Error => Duration::from_secs(5),
            Self::Info | Self::Success => Duration::from_secs(3),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✔",
            Self::Error => "✖",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub raised_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= self.severity.lifetime()
    }
}

/// Transient messages, oldest first. Each one disappears on its own once its
/// severity's lifetime has elapsed.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        self.push_at(message, severity, Instant::now());
    }

    pub fn push_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.queue.push_back(Notification {
            message: message.into(),
            severity,
            raised_at: now,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error);
    }

    /// Drops expired notifications and returns the rest.
    pub fn active(&mut self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.queue.retain(|n| !n.is_expired(now));
        self.queue.iter()
    }

    /// Every notification raised and not yet pruned, including expired ones.
    pub fn all(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
