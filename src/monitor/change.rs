//! Port change detection types and functions.

use crate::port::{PortRecord, PortSnapshot};

/// The kind of port presence change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortChangeKind {
    /// A port appeared since the previous snapshot.
    Connected,
    /// A port disappeared since the previous snapshot.
    Disconnected,
}

/// A single port presence change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortChange {
    /// The port that appeared or disappeared.
    pub port: PortRecord,
    /// Whether the port was connected or disconnected.
    pub kind: PortChangeKind,
}

impl PortChange {
    /// Creates a "connected" change.
    #[must_use]
    pub const fn connected(port: PortRecord) -> Self {
        Self {
            port,
            kind: PortChangeKind::Connected,
        }
    }

    /// Creates a "disconnected" change.
    #[must_use]
    pub const fn disconnected(port: PortRecord) -> Self {
        Self {
            port,
            kind: PortChangeKind::Disconnected,
        }
    }

    /// Returns true if this is a "connected" change.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self.kind, PortChangeKind::Connected)
    }
}

/// The delta between two snapshots.
///
/// `added` and `removed` are disjoint and each is in snapshot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    /// Records present in the new snapshot but not in the old one.
    pub added: Vec<PortRecord>,
    /// Records present in the old snapshot but not in the new one.
    pub removed: Vec<PortRecord>,
}

impl Diff {
    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Returns the total number of changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    /// Returns the changes in dispatch order: every connection, then every
    /// disconnection.
    pub fn changes(&self) -> impl Iterator<Item = PortChange> + '_ {
        self.added
            .iter()
            .cloned()
            .map(PortChange::connected)
            .chain(self.removed.iter().cloned().map(PortChange::disconnected))
    }
}

/// Compares two snapshots and returns the added and removed records.
///
/// This is a pure function. Records are compared by their full
/// `(identifier, description)` key, so a port whose description changed
/// shows up once in `removed` and once in `added`.
///
/// Callers must not diff against an uninitialized baseline: the first
/// snapshot should be adopted as-is instead (see
/// [`AdaptivePoller`](super::AdaptivePoller)).
#[must_use]
pub fn diff(old: &PortSnapshot, new: &PortSnapshot) -> Diff {
    Diff {
        added: new.iter().filter(|r| !old.contains(r)).cloned().collect(),
        removed: old.iter().filter(|r| !new.contains(r)).cloned().collect(),
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
