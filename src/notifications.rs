use ratatui::style::Color;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity of a transient notification. Only affects presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "Info",
            NotificationLevel::Success => "Success",
            NotificationLevel::Warning => "Warning",
            NotificationLevel::Error => "Error",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            NotificationLevel::Info => Color::Blue,
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Warning => Color::Yellow,
            NotificationLevel::Error => Color::Red,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Warning => "⚠",
            NotificationLevel::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

const MAX_VISIBLE: usize = 4;

pub struct Notifications {
    items: VecDeque<Notification>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, level: NotificationLevel) {
        let message = message.into();
        tracing::debug!("notify [{}] {}", level.as_str(), message);
        self.items.push_back(Notification {
            message,
            level,
            created_at: Instant::now(),
        });
        while self.items.len() > MAX_VISIBLE {
            self.items.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Error);
    }

    pub fn prune_expired(&mut self) {
        self.prune_at(Instant::now());
    }

    pub fn prune_at(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items.retain(|n| !n.is_expired(now, ttl));
    }

    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }
}

#[cfg(test)]
impl Notifications {
    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_expire_after_ttl() {
        let mut notes = Notifications::new(Duration::from_secs(3));
        notes.success("Image uploaded successfully!");
        let created = notes.latest().unwrap().created_at;

        notes.prune_at(created + Duration::from_millis(2999));
        assert_eq!(notes.len(), 1);

        notes.prune_at(created + Duration::from_secs(3));
        assert!(notes.is_empty());
    }

    #[test]
    fn latest_is_most_recent() {
        let mut notes = Notifications::default();
        notes.info("first");
        notes.error("second");
        let latest = notes.latest().unwrap();
        assert_eq!(latest.message, "second");
        assert_eq!(latest.level, NotificationLevel::Error);
    }

    #[test]
    fn oldest_dropped_beyond_visible_limit() {
        let mut notes = Notifications::default();
        for i in 0..6 {
            notes.info(format!("note {}", i));
        }
        assert_eq!(notes.len(), MAX_VISIBLE);
        assert_eq!(notes.active().next().unwrap().message, "note 2");
    }
}
