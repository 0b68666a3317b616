//! Core port types for snapshot representation.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// A single serial port observed at one instant.
///
/// # Equality
///
/// Two records are equal only if both the identifier and the description
/// match. A device whose friendly name changes while it keeps the same
/// port name is therefore a different record.
///
/// Ordering is lexicographic over `(identifier, description)`, which is the
/// iteration order of a [`PortSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PortRecord {
    /// The platform device name (e.g., "COM3", "/dev/ttyUSB0").
    pub identifier: String,
    /// The device friendly name (e.g., "USB Serial Device"). May be empty.
    pub description: String,
}

impl PortRecord {
    /// Creates a new port record.
    #[must_use]
    pub fn new(identifier: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            description: description.into(),
        }
    }

    /// Returns the label shown for this port in a menu.
    ///
    /// The description is appended only when present.
    #[must_use]
    pub fn display_label(&self) -> String {
        if self.description.is_empty() {
            self.identifier.clone()
        } else {
            format!("{} - {}", self.identifier, self.description)
        }
    }
}

impl fmt::Display for PortRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.identifier, self.description)
    }
}

/// The complete set of ports observed at one instant.
///
/// Snapshots are immutable once built: enumerators produce a fresh one on
/// every call and consumers replace stored snapshots wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PortSnapshot {
    records: BTreeSet<PortRecord>,
}

impl PortSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            records: BTreeSet::new(),
        }
    }

    /// Returns true if the record is part of this snapshot.
    #[must_use]
    pub fn contains(&self, record: &PortRecord) -> bool {
        self.records.contains(record)
    }

    /// Iterates records in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &PortRecord> {
        self.records.iter()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no ports were observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns a new snapshot holding only the records accepted by `keep`.
    #[must_use]
    pub fn retain(self, mut keep: impl FnMut(&PortRecord) -> bool) -> Self {
        self.records.into_iter().filter(|r| keep(r)).collect()
    }
}

impl FromIterator<PortRecord> for PortSnapshot {
    fn from_iter<I: IntoIterator<Item = PortRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PortSnapshot {
    type Item = PortRecord;
    type IntoIter = std::collections::btree_set::IntoIter<PortRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a PortSnapshot {
    type Item = &'a PortRecord;
    type IntoIter = std::collections::btree_set::Iter<'a, PortRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
