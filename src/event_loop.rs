//! The cooperative loop that drives polling and menu refreshes.
//!
//! One loop owns everything: it sleeps for one tick, drains control events
//! without blocking, then advances the poller by one tick and dispatches any
//! changes. Quit is therefore observed within one tick regardless of how
//! long the poll interval is, and a countdown of N ticks spans exactly N
//! tick durations.

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::menu::{MenuDisplay, MenuSync};
use crate::monitor::AdaptivePoller;
use crate::notify::{NotificationDispatcher, NotificationSink};
use crate::port::PortEnumerator;

/// Signals delivered to the loop from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// Stop the loop.
    Quit,
    /// The port menu is about to open; refresh it.
    MenuOpening,
}

/// Creates the control channel feeding an [`EventLoop`].
#[must_use]
pub fn control_channel() -> (UnboundedSender<ControlEvent>, UnboundedReceiver<ControlEvent>) {
    mpsc::unbounded_channel()
}

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    /// Poll cycles run, including the baseline cycle.
    pub cycles: usize,
    /// Change events dispatched.
    pub events: usize,
}

/// Outcome of draining the control channel.
#[derive(Debug, PartialEq, Eq)]
enum Drain {
    Continue,
    Quit,
}

/// Owns the engine and runs it until a quit request arrives.
///
/// # Example
///
/// ```ignore
/// let (control, events) = control_channel();
/// let event_loop = EventLoop::new(enumerator, poller, dispatcher, MenuSync::new(LogMenu), events);
/// control.send(ControlEvent::Quit)?;
/// let summary = event_loop.run().await;
/// ```
#[derive(Debug)]
pub struct EventLoop<E, S, M> {
    enumerator: E,
    poller: AdaptivePoller,
    dispatcher: NotificationDispatcher<S>,
    menu: MenuSync<M>,
    control: UnboundedReceiver<ControlEvent>,
    summary: LoopSummary,
}

impl<E, S, M> EventLoop<E, S, M>
where
    E: PortEnumerator,
    S: NotificationSink,
    M: MenuDisplay,
{
    /// Assembles a loop from its parts.
    #[must_use]
    pub const fn new(
        enumerator: E,
        poller: AdaptivePoller,
        dispatcher: NotificationDispatcher<S>,
        menu: MenuSync<M>,
        control: UnboundedReceiver<ControlEvent>,
    ) -> Self {
        Self {
            enumerator,
            poller,
            dispatcher,
            menu,
            control,
            summary: LoopSummary {
                cycles: 0,
                events: 0,
            },
        }
    }

    /// Runs until [`ControlEvent::Quit`] arrives or every sender is dropped.
    pub async fn run(mut self) -> LoopSummary {
        let tick = self.poller.schedule().tick();
        tracing::debug!(
            "Event loop started (tick {}ms, first poll in {}ms)",
            tick.as_millis(),
            self.poller.current_interval().as_millis()
        );

        loop {
            tokio::time::sleep(tick).await;
            if self.drain_control() == Drain::Quit {
                break;
            }
            self.step();
        }

        tracing::debug!(
            "Event loop stopped after {} cycle(s), {} event(s)",
            self.summary.cycles,
            self.summary.events
        );
        self.summary
    }

    /// Handles every pending control event without waiting.
    fn drain_control(&mut self) -> Drain {
        loop {
            match self.control.try_recv() {
                Ok(ControlEvent::Quit) => {
                    tracing::debug!("Quit requested");
                    return Drain::Quit;
                }
                Ok(ControlEvent::MenuOpening) => {
                    let labels = self.menu.refresh(&self.enumerator);
                    tracing::debug!("Menu refreshed with {} port(s)", labels.len());
                }
                Err(TryRecvError::Empty) => return Drain::Continue,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("Control channel closed, stopping");
                    return Drain::Quit;
                }
            }
        }
    }

    /// Advances the poller one tick and dispatches what it found.
    fn step(&mut self) {
        let Some(outcome) = self.poller.tick(&self.enumerator) else {
            return;
        };
        self.summary.cycles += 1;
        self.summary.events += self.dispatcher.dispatch(&outcome.diff);
    }
}

#[cfg(test)]
#[path = "event_loop_tests.rs"]
mod tests;
