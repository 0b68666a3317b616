//! Adaptive polling schedule.

use std::time::Duration;

/// Which interval the poller is currently using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Short interval, used right after a change and for the first cycle.
    Active,
    /// Long interval, used while nothing changes.
    Idle,
}

/// Poll intervals and the wait-tick granularity.
///
/// A poll interval is never slept through in one piece: it is split into
/// ticks, and the quit check runs on every tick. Shutdown latency is
/// therefore bounded by `tick`, not by `idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    idle: Duration,
    active: Duration,
    tick: Duration,
}

impl PollSchedule {
    /// Creates a schedule.
    ///
    /// Callers are expected to pass non-zero durations with
    /// `tick <= active <= idle`; the configuration layer validates this.
    #[must_use]
    pub const fn new(idle: Duration, active: Duration, tick: Duration) -> Self {
        Self { idle, active, tick }
    }

    /// Returns the idle interval.
    #[must_use]
    pub const fn idle(&self) -> Duration {
        self.idle
    }

    /// Returns the active interval.
    #[must_use]
    pub const fn active(&self) -> Duration {
        self.active
    }

    /// Returns the tick granularity.
    #[must_use]
    pub const fn tick(&self) -> Duration {
        self.tick
    }

    /// Returns the interval used by the given regime.
    #[must_use]
    pub const fn interval(&self, regime: Regime) -> Duration {
        match regime {
            Regime::Active => self.active,
            Regime::Idle => self.idle,
        }
    }

    /// Returns the regime that follows a cycle with `change_count` changes.
    #[must_use]
    pub const fn next_regime(change_count: usize) -> Regime {
        if change_count == 0 {
            Regime::Idle
        } else {
            Regime::Active
        }
    }

    /// Returns how many ticks make up `interval`, rounding up, at least one.
    #[must_use]
    pub fn ticks_for(&self, interval: Duration) -> u32 {
        let tick = self.tick.as_nanos().max(1);
        let ticks = interval.as_nanos().div_ceil(tick).max(1);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self::new(
            crate::config::defaults::idle_interval(),
            crate::config::defaults::active_interval(),
            crate::config::defaults::tick(),
        )
    }
}
