//! Port enumeration trait and error types.

use super::PortSnapshot;
use thiserror::Error;

/// Error type for port enumeration.
///
/// Describes why the device layer could not be queried. The watcher never
/// surfaces these to the end user: a failed query degrades to
/// "no ports observed" and the next poll retries.
#[derive(Debug, Error)]
pub enum EnumerateError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// The device query returned no usable handle.
    #[error("Device layer unavailable: {reason}")]
    Unavailable {
        /// Why the query could not be started.
        reason: String,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for listing the serial ports currently attached to the system.
///
/// Both the poll cycle and the menu call the same implementation, so it
/// must tolerate being called every few hundred milliseconds and have no
/// side effects beyond read-only OS queries.
///
/// # Example
///
/// ```ignore
/// use serial_watch::port::{EnumerateError, PortEnumerator, PortRecord, PortSnapshot};
///
/// struct FixedPorts;
///
/// impl PortEnumerator for FixedPorts {
///     fn try_enumerate(&self) -> Result<PortSnapshot, EnumerateError> {
///         Ok([PortRecord::new("COM3", "USB Serial")].into_iter().collect())
///     }
/// }
/// ```
pub trait PortEnumerator {
    /// Queries the OS for the ports present right now.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerateError`] when the device layer as a whole cannot be
    /// queried. Individual devices that cannot be read are skipped, not
    /// reported as errors.
    fn try_enumerate(&self) -> Result<PortSnapshot, EnumerateError>;

    /// Queries the OS, returning an empty snapshot if the query fails.
    fn enumerate(&self) -> PortSnapshot {
        self.try_enumerate().unwrap_or_else(|e| {
            tracing::debug!("Port enumeration unavailable: {e}");
            PortSnapshot::empty()
        })
    }
}

impl<E: PortEnumerator + ?Sized> PortEnumerator for &E {
    fn try_enumerate(&self) -> Result<PortSnapshot, EnumerateError> {
        (**self).try_enumerate()
    }
}
