//! Adaptive poller driving the enumerate → diff cycle.

use std::time::Duration;

use super::change::{Diff, diff};
use super::schedule::{PollSchedule, Regime};
use crate::port::{PortEnumerator, PortSnapshot};

/// Mutable state owned by the poller and written only inside its cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Last observed snapshot; `None` until the baseline has been taken.
    previous: Option<PortSnapshot>,
    /// Regime the current countdown was started with.
    regime: Regime,
    /// Ticks left before the next cycle.
    ticks_remaining: u32,
}

/// Result of one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Changes detected in this cycle; always empty for the baseline cycle.
    pub diff: Diff,
    /// True if this cycle adopted the first snapshot as the baseline.
    pub baseline: bool,
    /// Interval until the next cycle.
    pub next_interval: Duration,
}

/// Polls an enumerator on an Idle/Active schedule.
///
/// The first cycle is scheduled at the Active interval. After every cycle
/// the next one is scheduled at the Active interval if anything changed and
/// at the Idle interval otherwise.
///
/// The poller does not own the enumerator: it is passed in on every call so
/// that the menu can share the same instance.
///
/// # Example
///
/// ```ignore
/// use serial_watch::monitor::{AdaptivePoller, PollSchedule};
///
/// let mut poller = AdaptivePoller::new(PollSchedule::default());
/// loop {
///     if let Some(outcome) = poller.tick(&enumerator) {
///         dispatcher.dispatch(&outcome.diff);
///     }
///     sleep(poller.schedule().tick()).await;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdaptivePoller {
    schedule: PollSchedule,
    state: PollState,
}

impl AdaptivePoller {
    /// Creates a poller with no baseline, counting down the Active interval.
    #[must_use]
    pub fn new(schedule: PollSchedule) -> Self {
        let ticks_remaining = schedule.ticks_for(schedule.active());
        Self {
            schedule,
            state: PollState {
                previous: None,
                regime: Regime::Active,
                ticks_remaining,
            },
        }
    }

    /// Returns the schedule.
    #[must_use]
    pub const fn schedule(&self) -> &PollSchedule {
        &self.schedule
    }

    /// Returns the regime of the pending countdown.
    #[must_use]
    pub const fn regime(&self) -> Regime {
        self.state.regime
    }

    /// Returns the interval of the pending countdown.
    #[must_use]
    pub const fn current_interval(&self) -> Duration {
        self.schedule.interval(self.state.regime)
    }

    /// Returns the ticks left before the next cycle.
    #[must_use]
    pub const fn ticks_remaining(&self) -> u32 {
        self.state.ticks_remaining
    }

    /// Returns the last observed snapshot, if the baseline has been taken.
    #[must_use]
    pub const fn previous(&self) -> Option<&PortSnapshot> {
        self.state.previous.as_ref()
    }

    /// Advances the countdown by one tick, running a cycle when it expires.
    pub fn tick<E: PortEnumerator + ?Sized>(&mut self, enumerator: &E) -> Option<CycleOutcome> {
        self.state.ticks_remaining = self.state.ticks_remaining.saturating_sub(1);
        if self.state.ticks_remaining > 0 {
            return None;
        }
        Some(self.cycle(enumerator))
    }

    /// Runs one enumerate → diff cycle immediately and restarts the countdown.
    ///
    /// A failed enumeration keeps the previous snapshot and reports no
    /// changes, so a transient outage does not look like every port being
    /// unplugged.
    pub fn cycle<E: PortEnumerator + ?Sized>(&mut self, enumerator: &E) -> CycleOutcome {
        let (changes, baseline) = match enumerator.try_enumerate() {
            Ok(current) => self.absorb(current),
            Err(e) => {
                tracing::debug!("Port enumeration unavailable, keeping previous snapshot: {e}");
                (Diff::default(), false)
            }
        };

        let regime = PollSchedule::next_regime(changes.len());
        let next_interval = self.schedule.interval(regime);
        self.state.regime = regime;
        self.state.ticks_remaining = self.schedule.ticks_for(next_interval);

        tracing::debug!(
            "Poll cycle: {} change(s), next in {}ms ({regime:?})",
            changes.len(),
            next_interval.as_millis()
        );

        CycleOutcome {
            diff: changes,
            baseline,
            next_interval,
        }
    }

    /// Replaces the stored snapshot, diffing against it if one exists.
    fn absorb(&mut self, current: PortSnapshot) -> (Diff, bool) {
        let Some(previous) = self.state.previous.as_ref() else {
            tracing::info!("Baseline taken: {} port(s) attached", current.len());
            self.state.previous = Some(current);
            return (Diff::default(), true);
        };

        let changes = diff(previous, &current);
        self.state.previous = Some(current);
        (changes, false)
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
