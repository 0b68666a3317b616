//! Converts diffs into notifications.

use super::{Notification, NotificationSink};
use crate::monitor::Diff;

/// Sends one notification per detected change.
///
/// Connections are dispatched before disconnections, each group in
/// snapshot order. Nothing is coalesced or dropped: a failing sink is
/// logged and the remaining changes are still dispatched.
#[derive(Debug)]
pub struct NotificationDispatcher<S> {
    sink: S,
}

impl<S: NotificationSink> NotificationDispatcher<S> {
    /// Creates a dispatcher forwarding to `sink`.
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Returns the sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Dispatches every change in `diff`, returning how many were dispatched.
    pub fn dispatch(&self, diff: &Diff) -> usize {
        let mut dispatched = 0;
        for change in diff.changes() {
            let action = if change.is_connected() { "+" } else { "-" };
            tracing::info!("{action} {}", change.port);
            self.deliver(&Notification::from(&change));
            dispatched += 1;
        }
        dispatched
    }

    /// Sends the startup notification.
    pub fn announce_started(&self) {
        self.deliver(&Notification::started());
    }

    fn deliver(&self, notification: &Notification) {
        if let Err(e) = self.sink.show(notification) {
            tracing::warn!("Notification not delivered ({notification}): {e}");
        }
    }
}
