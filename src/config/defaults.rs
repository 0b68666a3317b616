//! Default values for configuration options.
//!
//! The Active interval is half the Idle interval: react quickly during a
//! burst of plugging, poll slower when nothing happens.

use std::time::Duration;

/// Default Idle polling interval in milliseconds.
pub const IDLE_INTERVAL_MS: u64 = 2000;

/// Default Active polling interval in milliseconds.
pub const ACTIVE_INTERVAL_MS: u64 = 1000;

/// Default wait-tick granularity in milliseconds.
pub const TICK_MS: u64 = 100;

/// Default config file name written by `init`.
pub const CONFIG_FILE: &str = "serial-watch.toml";

/// Default Idle polling interval as Duration.
#[must_use]
pub const fn idle_interval() -> Duration {
    Duration::from_millis(IDLE_INTERVAL_MS)
}

/// Default Active polling interval as Duration.
#[must_use]
pub const fn active_interval() -> Duration {
    Duration::from_millis(ACTIVE_INTERVAL_MS)
}

/// Default wait-tick as Duration.
#[must_use]
pub const fn tick() -> Duration {
    Duration::from_millis(TICK_MS)
}
