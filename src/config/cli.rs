//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// serial-watch: serial port presence watcher
///
/// Polls the serial ports attached to the system and raises a notification
/// whenever one is plugged in or removed.
#[derive(Debug, Parser)]
#[command(name = "serial-watch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Polling interval in milliseconds while nothing changes
    #[arg(long = "idle-interval", value_name = "MS")]
    pub idle_interval: Option<u64>,

    /// Polling interval in milliseconds right after a change
    #[arg(long = "active-interval", value_name = "MS")]
    pub active_interval: Option<u64>,

    /// Wait-tick granularity in milliseconds (bounds shutdown latency)
    #[arg(long, value_name = "MS")]
    pub tick: Option<u64>,

    /// Only ports whose name starts with this prefix are watched
    #[arg(long = "port-prefix", global = true)]
    pub port_prefix: Option<String>,

    /// Regex pattern for ports to include (can be specified multiple times)
    #[arg(long = "include-port", value_name = "PATTERN", global = true)]
    pub include_ports: Vec<String>,

    /// Regex pattern for ports to exclude (can be specified multiple times)
    #[arg(long = "exclude-port", value_name = "PATTERN", global = true)]
    pub exclude_ports: Vec<String>,

    /// Program run for every notification, called as `PROGRAM <title> <message>`
    #[arg(long = "notify-command", value_name = "PROGRAM")]
    pub notify_command: Option<String>,

    /// Do not send the startup notification
    #[arg(long = "no-announce")]
    pub no_announce: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for serial-watch
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Print the currently attached ports and exit
    List {
        /// Print the ports as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }

    /// Returns true if this is the list command.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self.command, Some(Command::List { .. }))
    }
}
