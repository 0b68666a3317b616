//! Process-level helpers for the `serial-watch` binary.
//!
//! Maps watcher failures onto exit codes, prints remediation hints for
//! configuration mistakes, and installs the stderr log subscriber.

use serial_watch::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Exit codes reported by `serial-watch`.
pub mod exit_code {
    use std::process::ExitCode;

    /// The watcher stopped on request, or `init`/`list` completed.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Exit code 1: a flag or config file value was rejected, the config
    /// file could not be read or parsed, or `init` could not write the
    /// template.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Exit code 2: the Tokio runtime or a quit signal handler could not
    /// be set up, or `list --json` failed to serialize the port snapshot.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            eprintln!("\nRun 'serial-watch init' to generate a configuration template.");
        }
        ConfigError::InvalidDuration { .. } => {
            eprintln!("\nIntervals are milliseconds and must satisfy tick <= active <= idle.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so that `list --json` output stays machine-readable.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
