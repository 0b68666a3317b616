//! Notification payloads.

use std::fmt;

use crate::monitor::{PortChange, PortChangeKind};

/// What a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// The watcher has started.
    Started,
    /// A port was attached.
    Connected,
    /// A port was removed.
    Disconnected,
}

/// A title + message pair handed to a [`NotificationSink`](super::NotificationSink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// What this notification announces.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Notification {
    /// Notification sent once when watching begins.
    #[must_use]
    pub fn started() -> Self {
        Self {
            kind: NotificationKind::Started,
            title: "Serial port monitor".to_string(),
            message: "Serial port monitor started, watching for port changes...".to_string(),
        }
    }

    /// Notification for a newly attached port.
    #[must_use]
    pub fn connected(identifier: &str) -> Self {
        Self {
            kind: NotificationKind::Connected,
            title: "Serial port connected".to_string(),
            message: format!("New serial port {identifier} inserted"),
        }
    }

    /// Notification for a removed port.
    #[must_use]
    pub fn disconnected(identifier: &str) -> Self {
        Self {
            kind: NotificationKind::Disconnected,
            title: "Serial port disconnected".to_string(),
            message: format!("Serial port {identifier} removed"),
        }
    }
}

impl From<&PortChange> for Notification {
    fn from(change: &PortChange) -> Self {
        match change.kind {
            PortChangeKind::Connected => Self::connected(&change.port.identifier),
            PortChangeKind::Disconnected => Self::disconnected(&change.port.identifier),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
