//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::monitor::PollSchedule;
use crate::port::filter::{FilterChain, NameRegexFilter};
use crate::port::platform::DEFAULT_PORT_PREFIX;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Idle/Active/tick timing
    pub schedule: PollSchedule,

    /// Port name prefix handed to the platform enumerator
    pub port_prefix: String,

    /// Include/exclude port patterns
    pub filter: FilterChain,

    /// Program run for every notification, if any
    pub notify_command: Option<String>,

    /// Whether to send the startup notification
    pub announce: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ idle: {}ms, active: {}ms, tick: {}ms, prefix: {:?}, filters: +{}/-{}, \
             command: {}, announce: {} }}",
            self.schedule.idle().as_millis(),
            self.schedule.active().as_millis(),
            self.schedule.tick().as_millis(),
            self.port_prefix,
            self.filter.include_count(),
            self.filter.exclude_count(),
            self.notify_command.as_deref().unwrap_or("none"),
            self.announce,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A duration is zero
    /// - The Active interval exceeds the Idle interval
    /// - The tick exceeds the Active interval
    /// - Regex patterns are invalid
    /// - The notification command is empty
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let schedule = Self::resolve_schedule(cli, toml)?;
        let filter = Self::build_filter(cli, toml)?;
        let notify_command = Self::resolve_notify_command(cli, toml)?;

        let port_prefix = cli
            .port_prefix
            .clone()
            .or_else(|| toml.and_then(|t| t.ports.prefix.clone()))
            .unwrap_or_else(|| DEFAULT_PORT_PREFIX.to_string());

        let announce = !cli.no_announce && toml.and_then(|t| t.notify.announce).unwrap_or(true);

        Ok(Self {
            schedule,
            port_prefix,
            filter,
            notify_command,
            announce,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_schedule(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PollSchedule, ConfigError> {
        let monitor = toml.map(|t| &t.monitor);

        // Priority: CLI explicit > TOML > default
        let idle = resolve_millis(
            field::IDLE_INTERVAL,
            cli.idle_interval,
            monitor.and_then(|m| m.idle_interval),
            defaults::IDLE_INTERVAL_MS,
        )?;
        let active = resolve_millis(
            field::ACTIVE_INTERVAL,
            cli.active_interval,
            monitor.and_then(|m| m.active_interval),
            defaults::ACTIVE_INTERVAL_MS,
        )?;
        let tick = resolve_millis(
            field::TICK,
            cli.tick,
            monitor.and_then(|m| m.tick),
            defaults::TICK_MS,
        )?;

        if active > idle {
            return Err(ConfigError::duration(
                field::ACTIVE_INTERVAL,
                format!(
                    "must not exceed idle_interval ({}ms > {}ms)",
                    active.as_millis(),
                    idle.as_millis()
                ),
            ));
        }

        if tick > active {
            return Err(ConfigError::duration(
                field::TICK,
                format!(
                    "must not exceed active_interval ({}ms > {}ms)",
                    tick.as_millis(),
                    active.as_millis()
                ),
            ));
        }

        Ok(PollSchedule::new(idle, active, tick))
    }

    fn build_filter(cli: &Cli, toml: Option<&TomlConfig>) -> Result<FilterChain, ConfigError> {
        let ports = toml.map(|t| &t.ports);

        // CLI patterns replace TOML patterns, per list
        let includes = if cli.include_ports.is_empty() {
            ports.map_or(&[][..], |p| p.include.as_slice())
        } else {
            cli.include_ports.as_slice()
        };
        let excludes = if cli.exclude_ports.is_empty() {
            ports.map_or(&[][..], |p| p.exclude.as_slice())
        } else {
            cli.exclude_ports.as_slice()
        };

        let mut filter = FilterChain::new();
        for pattern in includes {
            filter = filter.include(compile(pattern)?);
        }
        for pattern in excludes {
            filter = filter.exclude(compile(pattern)?);
        }

        Ok(filter)
    }

    fn resolve_notify_command(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<String>, ConfigError> {
        let command = cli
            .notify_command
            .clone()
            .or_else(|| toml.and_then(|t| t.notify.command.clone()));

        match command {
            Some(program) if program.trim().is_empty() => Err(ConfigError::EmptyCommand),
            other => Ok(other),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn resolve_millis(
    field: &'static str,
    cli: Option<u64>,
    toml: Option<u64>,
    default: u64,
) -> Result<Duration, ConfigError> {
    let millis = cli.or(toml).unwrap_or(default);

    if millis == 0 {
        return Err(ConfigError::duration(field, "must be greater than 0"));
    }

    Ok(Duration::from_millis(millis))
}

fn compile(pattern: &str) -> Result<NameRegexFilter, ConfigError> {
    NameRegexFilter::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}
