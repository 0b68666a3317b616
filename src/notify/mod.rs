//! Notification layer for announcing port changes.
//!
//! This module provides types and traits for:
//! - Notification payloads ([`Notification`], [`NotificationKind`])
//! - Delivering notifications ([`NotificationSink`], [`LogSink`],
//!   [`CommandSink`], [`FanOut`])
//! - Turning diffs into notifications ([`NotificationDispatcher`])

mod dispatcher;
mod error;
mod message;
mod sink;

pub use dispatcher::NotificationDispatcher;
pub use error::SinkError;
pub use message::{Notification, NotificationKind};
pub use sink::{CommandSink, FanOut, LogSink, NotificationSink};
