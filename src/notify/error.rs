//! Error types for notification delivery.

use thiserror::Error;

/// Error type for notification sinks.
///
/// Sinks are best-effort: the dispatcher logs these and moves on.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The notifier program could not be started.
    #[error("Failed to spawn notifier '{program}': {source}")]
    Spawn {
        /// Program that was being started.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
