//! Port layer for enumerating and representing serial ports.
//!
//! This module provides types and traits for:
//! - Representing attached ports ([`PortRecord`], [`PortSnapshot`])
//! - Enumerating ports ([`PortEnumerator`])
//! - Filtering ports by name ([`filter`])
//! - Platform-specific implementations ([`platform`])

mod enumerator;
pub mod filter;
pub mod platform;
mod record;

pub use enumerator::{EnumerateError, PortEnumerator};
pub use record::{PortRecord, PortSnapshot};
