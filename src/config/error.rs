//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid regex pattern for port filtering.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The invalid pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Invalid duration value.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Empty notification command.
    #[error("Notification command must not be empty")]
    EmptyCommand,
}

/// Well-known field names for `InvalidDuration` errors.
pub mod field {
    /// The Idle interval field.
    pub const IDLE_INTERVAL: &str = "idle_interval";
    /// The Active interval field.
    pub const ACTIVE_INTERVAL: &str = "active_interval";
    /// The tick field.
    pub const TICK: &str = "tick";
}

impl ConfigError {
    /// Creates an `InvalidDuration` error.
    #[must_use]
    pub fn duration(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            field,
            reason: reason.into(),
        }
    }
}
