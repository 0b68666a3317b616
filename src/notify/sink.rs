//! Notification sinks.

use super::{Notification, SinkError};

/// Trait for delivering notifications to the user.
///
/// Delivery is fire-and-forget: implementations must return promptly and
/// never wait for the user to acknowledge anything.
pub trait NotificationSink: Send + Sync {
    /// Shows one notification.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the notification could not be handed off.
    fn show(&self, notification: &Notification) -> Result<(), SinkError>;
}

impl<S: NotificationSink + ?Sized> NotificationSink for Box<S> {
    fn show(&self, notification: &Notification) -> Result<(), SinkError> {
        self.as_ref().show(notification)
    }
}

/// Writes notifications to the log at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn show(&self, notification: &Notification) -> Result<(), SinkError> {
        tracing::info!("{}: {}", notification.title, notification.message);
        Ok(())
    }
}

/// Runs an external program for every notification.
///
/// The program receives the title and the message as its two arguments,
/// e.g. `notify-send "Serial port connected" "New serial port COM4 inserted"`.
/// The child is not waited on.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug, Clone)]
pub struct CommandSink {
    program: String,
}

impl CommandSink {
    /// Creates a sink that runs `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the configured program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl NotificationSink for CommandSink {
    fn show(&self, notification: &Notification) -> Result<(), SinkError> {
        tokio::process::Command::new(&self.program)
            .arg(&notification.title)
            .arg(&notification.message)
            .stdin(std::process::Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|source| SinkError::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

/// Delivers every notification to several sinks.
///
/// All sinks are tried even if one fails; the last error is returned.
#[derive(Default)]
pub struct FanOut {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl FanOut {
    /// Creates an empty fan-out.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink (builder pattern).
    #[must_use]
    pub fn with<S: NotificationSink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Returns the number of sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Returns true if there are no sinks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl NotificationSink for FanOut {
    fn show(&self, notification: &Notification) -> Result<(), SinkError> {
        self.sinks
            .iter()
            .map(|sink| sink.show(notification))
            .fold(Ok(()), |acc, result| result.and(acc))
    }
}

impl std::fmt::Debug for FanOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanOut")
            .field("sink_count", &self.sinks.len())
            .finish()
    }
}
