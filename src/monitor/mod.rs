//! Monitor layer for detecting serial port presence changes.
//!
//! This module provides types and functions for:
//! - Representing change events ([`PortChange`], [`PortChangeKind`], [`Diff`])
//! - Detecting changes between snapshots ([`diff`])
//! - The Idle/Active poll schedule ([`PollSchedule`], [`Regime`])
//! - Polling with adaptive intervals ([`AdaptivePoller`])

mod change;
mod poller;
mod schedule;

pub use change::{Diff, PortChange, PortChangeKind, diff};
pub use poller::{AdaptivePoller, CycleOutcome, PollState};
pub use schedule::{PollSchedule, Regime};
