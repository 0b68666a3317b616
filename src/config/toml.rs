//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Polling schedule configuration
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Port selection configuration
    #[serde(default)]
    pub ports: PortsSection,

    /// Notification configuration
    #[serde(default)]
    pub notify: NotifySection,
}

/// Polling schedule section. All values are milliseconds.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Polling interval while nothing changes
    pub idle_interval: Option<u64>,

    /// Polling interval right after a change
    pub active_interval: Option<u64>,

    /// Wait-tick granularity
    pub tick: Option<u64>,
}

/// Port selection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortsSection {
    /// Port name prefix
    pub prefix: Option<String>,

    /// Regex patterns for ports to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns for ports to exclude
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Notification section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifySection {
    /// Program run for every notification
    pub command: Option<String>,

    /// Send the startup notification
    pub announce: Option<bool>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# serial-watch configuration file

[monitor]
# Polling interval in milliseconds while nothing changes (default: 2000)
idle_interval = 2000

# Polling interval in milliseconds right after a change (default: 1000)
# Must not exceed idle_interval.
active_interval = 1000

# Wait-tick in milliseconds; bounds how long shutdown takes (default: 100)
# Must not exceed active_interval.
# tick = 100

[ports]
# Only ports whose name starts with this prefix are watched
# (default: "COM" on Windows, "/dev/" elsewhere)
# prefix = "COM"

# Regex patterns for ports to include (empty = all)
# Note: CLI patterns REPLACE these entirely (not merged)
# include = ["^COM[0-9]+$"]

# Regex patterns for ports to exclude
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude = ["^COM1$"]

[notify]
# Program run for every notification, called as: <command> <title> <message>
# Without it, notifications are written to the log only.
# command = "notify-send"

# Send a notification when watching starts (default: true)
# announce = true
"#
    .to_string()
}
