//! Application execution logic.
//!
//! Wires the configured enumerator, notification sinks and menu into the
//! event loop, and feeds OS signals into its control channel.

use thiserror::Error;
use tokio::signal;
use tokio::sync::mpsc::UnboundedSender;

use serial_watch::config::ValidatedConfig;
use serial_watch::event_loop::{ControlEvent, EventLoop, LoopSummary, control_channel};
use serial_watch::menu::{LogMenu, MenuDisplay, MenuEntry, MenuSync};
use serial_watch::monitor::{AdaptivePoller, PollSchedule};
use serial_watch::notify::{CommandSink, FanOut, LogSink, NotificationDispatcher};
use serial_watch::port::PortEnumerator;
use serial_watch::port::filter::{FilterChain, FilteredEnumerator};
use serial_watch::port::platform::PlatformEnumerator;

/// Type alias for the application's filtered enumerator.
type AppEnumerator = FilteredEnumerator<PlatformEnumerator, FilterChain>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to install an OS signal handler.
    #[error("Failed to install {signal} handler: {source}")]
    SignalHandler {
        /// Name of the signal
        signal: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the port list.
    #[error("Failed to serialize port list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Runtime options extracted from validated config.
///
/// This struct holds only the fields needed for the loop, allowing the
/// config's `filter` field to be moved separately.
struct RuntimeOptions {
    schedule: PollSchedule,
    notify_command: Option<String>,
    announce: bool,
}

impl From<&ValidatedConfig> for RuntimeOptions {
    fn from(config: &ValidatedConfig) -> Self {
        Self {
            schedule: config.schedule,
            notify_command: config.notify_command.clone(),
            announce: config.announce,
        }
    }
}

/// Runs the watcher until a shutdown signal arrives.
///
/// This function:
/// 1. Creates the port enumerator with configured filters
/// 2. Creates the notification sinks
/// 3. Installs the signal sources feeding the control channel
/// 4. Sends the startup notification (unless disabled)
/// 5. Runs the event loop until Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if a signal handler cannot be installed.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Platform-specific device APIs
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<LoopSummary, RunError> {
    let options = RuntimeOptions::from(&config);
    let enumerator = create_enumerator(config);
    let dispatcher = NotificationDispatcher::new(create_sink(&options));

    let (control, events) = control_channel();
    spawn_signal_sources(control)?;

    if options.announce {
        dispatcher.announce_started();
    }
    tracing::info!(
        "Watching serial ports (idle {}ms, active {}ms)",
        options.schedule.idle().as_millis(),
        options.schedule.active().as_millis()
    );

    let event_loop = EventLoop::new(
        enumerator,
        AdaptivePoller::new(options.schedule),
        dispatcher,
        MenuSync::new(LogMenu),
        events,
    );
    Ok(event_loop.run().await)
}

/// Prints the ports attached right now.
///
/// # Errors
///
/// Returns an error if the JSON output cannot be produced.
#[cfg(not(tarpaulin_include))]
pub fn list_ports(config: ValidatedConfig, json: bool) -> Result<(), RunError> {
    let enumerator = create_enumerator(config);

    if json {
        println!("{}", serde_json::to_string_pretty(&enumerator.enumerate())?);
    } else {
        MenuSync::new(PrintMenu).refresh(&enumerator);
    }

    Ok(())
}

/// Creates the platform enumerator wrapped in the configured filters.
fn create_enumerator(config: ValidatedConfig) -> AppEnumerator {
    FilteredEnumerator::new(PlatformEnumerator::new(config.port_prefix), config.filter)
}

/// Creates the sink fan-out: the log always, plus the command if configured.
fn create_sink(options: &RuntimeOptions) -> FanOut {
    let sink = FanOut::new().with(LogSink);
    match options.notify_command {
        Some(ref program) => sink.with(CommandSink::new(program.clone())),
        None => sink,
    }
}

/// Menu display that prints one label per line to stdout.
struct PrintMenu;

impl MenuDisplay for PrintMenu {
    fn populate(&mut self, entries: &[MenuEntry]) {
        for line in menu_lines(entries) {
            println!("{line}");
        }
    }
}

/// Lines printed by the `list` subcommand.
fn menu_lines(entries: &[MenuEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No serial ports attached".to_string()];
    }
    entries.iter().map(|entry| entry.label.clone()).collect()
}

/// Forwards OS signals into the control channel.
///
/// Ctrl+C and SIGTERM request a quit; on Unix, SIGUSR1 stands in for the
/// menu being opened and logs the live port list.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
fn spawn_signal_sources(control: UnboundedSender<ControlEvent>) -> Result<(), RunError> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal as unix_signal};

        let mut terminate =
            unix_signal(SignalKind::terminate()).map_err(|source| RunError::SignalHandler {
                signal: "SIGTERM",
                source,
            })?;
        let mut menu_request =
            unix_signal(SignalKind::user_defined1()).map_err(|source| RunError::SignalHandler {
                signal: "SIGUSR1",
                source,
            })?;

        let quit = control.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = ctrl_c() => {}
                _ = terminate.recv() => {}
            }
            request_quit(&quit);
        });

        tokio::spawn(async move {
            while menu_request.recv().await.is_some() {
                if control.send(ControlEvent::MenuOpening).is_err() {
                    break;
                }
            }
        });
    }

    #[cfg(not(unix))]
    tokio::spawn(async move {
        ctrl_c().await;
        request_quit(&control);
    });

    Ok(())
}

/// Completes on Ctrl+C; never completes if the handler cannot be installed.
#[cfg(not(tarpaulin_include))]
async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::warn!("Ctrl+C handler unavailable: {e}");
        std::future::pending::<()>().await;
    }
}

fn request_quit(control: &UnboundedSender<ControlEvent>) {
    tracing::info!("Shutdown signal received, stopping...");
    if control.send(ControlEvent::Quit).is_err() {
        tracing::debug!("Event loop already stopped");
    }
}
