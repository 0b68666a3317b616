//! Port filtering for selective monitoring.
//!
//! # Design
//!
//! - **Pure Matchers**: [`PrefixFilter`] and [`NameRegexFilter`] only answer
//!   "does this port match?" without include/exclude semantics.
//! - **Filter Chain**: [`FilterChain`] combines matchers:
//!   - Exclude filters: AND logic (must pass ALL excludes)
//!   - Include filters: OR logic (pass ANY include, empty = match all)
//! - **Decorator**: [`FilteredEnumerator`] applies filtering transparently
//!   to any [`PortEnumerator`] implementation.

use regex::Regex;

use super::{EnumerateError, PortEnumerator, PortRecord, PortSnapshot};

/// Trait for filtering serial ports.
pub trait PortFilter: Send + Sync {
    /// Returns `true` if the port matches this filter.
    fn matches(&self, port: &PortRecord) -> bool;
}

// ============================================================================
// PrefixFilter - platform naming convention
// ============================================================================

/// Matches ports whose identifier starts with a fixed prefix.
///
/// This is how the platform's serial naming convention ("COM" on Windows)
/// is enforced. An empty prefix matches every port.
///
/// # Examples
///
/// ```
/// use serial_watch::port::filter::{PortFilter, PrefixFilter};
/// use serial_watch::port::PortRecord;
///
/// let filter = PrefixFilter::new("COM");
///
/// assert!(filter.matches(&PortRecord::new("COM3", "USB Serial")));
/// assert!(!filter.matches(&PortRecord::new("LPT1", "Printer Port")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixFilter {
    prefix: String,
}

impl PrefixFilter {
    /// Creates a prefix filter.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl PortFilter for PrefixFilter {
    fn matches(&self, port: &PortRecord) -> bool {
        port.identifier.starts_with(&self.prefix)
    }
}

// ============================================================================
// NameRegexFilter - Pure matcher by identifier pattern
// ============================================================================

/// Matches ports whose identifier matches a regex.
///
/// # Examples
///
/// ```
/// use serial_watch::port::filter::{NameRegexFilter, PortFilter};
/// use serial_watch::port::PortRecord;
///
/// let filter = NameRegexFilter::new(r"^COM[0-9]$").unwrap();
///
/// assert!(filter.matches(&PortRecord::new("COM3", "")));
/// assert!(!filter.matches(&PortRecord::new("COM12", "")));
/// ```
#[derive(Debug)]
pub struct NameRegexFilter {
    pattern: Regex,
}

impl NameRegexFilter {
    /// Creates a name filter with the given regex pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Returns a reference to the regex pattern.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Regex is not a const type
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl PortFilter for NameRegexFilter {
    fn matches(&self, port: &PortRecord) -> bool {
        self.pattern.is_match(&port.identifier)
    }
}

// ============================================================================
// FilterChain - Include OR / Exclude AND semantics
// ============================================================================

/// Filter chain with include/exclude semantics.
///
/// Evaluation order:
/// 1. **Exclude filters (AND)**: Any match → reject.
/// 2. **Include filters (OR)**: Any match → accept. Empty includes = match all.
///
/// # Examples
///
/// ```
/// use serial_watch::port::filter::{FilterChain, NameRegexFilter, PortFilter};
/// use serial_watch::port::PortRecord;
///
/// let chain = FilterChain::new()
///     .exclude(NameRegexFilter::new("^COM1$").unwrap())
///     .include(NameRegexFilter::new("^COM").unwrap());
///
/// assert!(chain.matches(&PortRecord::new("COM3", "")));
/// assert!(!chain.matches(&PortRecord::new("COM1", "")));
/// ```
#[derive(Default)]
pub struct FilterChain {
    includes: Vec<Box<dyn PortFilter>>,
    excludes: Vec<Box<dyn PortFilter>>,
}

impl FilterChain {
    /// Creates an empty filter chain (matches all ports).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include filter (OR semantics).
    #[must_use]
    pub fn include<F: PortFilter + 'static>(mut self, filter: F) -> Self {
        self.includes.push(Box::new(filter));
        self
    }

    /// Adds an exclude filter (AND semantics - must not match ANY).
    #[must_use]
    pub fn exclude<F: PortFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    /// Returns the number of include filters.
    #[must_use]
    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    /// Returns the number of exclude filters.
    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    /// Returns true if no filters are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

impl PortFilter for FilterChain {
    fn matches(&self, port: &PortRecord) -> bool {
        if self.excludes.iter().any(|f| f.matches(port)) {
            return false;
        }

        self.includes.is_empty() || self.includes.iter().any(|f| f.matches(port))
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("include_count", &self.includes.len())
            .field("exclude_count", &self.excludes.len())
            .finish()
    }
}

// ============================================================================
// FilteredEnumerator - decorator
// ============================================================================

/// An enumerator decorator that applies a filter to results.
///
/// # Examples
///
/// ```ignore
/// use serial_watch::port::filter::{FilteredEnumerator, NameRegexFilter};
/// use serial_watch::port::platform::PlatformEnumerator;
///
/// let enumerator = FilteredEnumerator::new(
///     PlatformEnumerator::default(),
///     NameRegexFilter::new("^COM[3-9]$")?,
/// );
/// ```
#[derive(Debug)]
pub struct FilteredEnumerator<E, F> {
    inner: E,
    filter: F,
}

impl<E, F> FilteredEnumerator<E, F> {
    /// Creates a new filtered enumerator.
    #[must_use]
    pub const fn new(inner: E, filter: F) -> Self {
        Self { inner, filter }
    }

    /// Returns a reference to the inner enumerator.
    pub const fn inner(&self) -> &E {
        &self.inner
    }

    /// Returns a reference to the filter.
    pub const fn filter(&self) -> &F {
        &self.filter
    }
}

impl<E: PortEnumerator, F: PortFilter> PortEnumerator for FilteredEnumerator<E, F> {
    fn try_enumerate(&self) -> Result<PortSnapshot, EnumerateError> {
        let snapshot = self.inner.try_enumerate()?;
        Ok(snapshot.retain(|port| self.filter.matches(port)))
    }
}

impl<T: PortFilter + ?Sized> PortFilter for &T {
    fn matches(&self, port: &PortRecord) -> bool {
        (*self).matches(port)
    }
}

impl PortFilter for Box<dyn PortFilter> {
    fn matches(&self, port: &PortRecord) -> bool {
        self.as_ref().matches(port)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
