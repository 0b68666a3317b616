//! On-demand port list for the tray menu.
//!
//! [`MenuSync`] queries the enumerator fresh every time the menu is about to
//! open. It never reads the poller's cached snapshot, so the list reflects
//! live state even when the last poll is stale.

use crate::port::{PortEnumerator, PortSnapshot};

/// Id given to the first port entry; later entries count up from here.
pub const FIRST_PORT_ENTRY_ID: u32 = 1000;

/// One row of the port submenu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Command id of the row.
    pub id: u32,
    /// Text shown for the row.
    pub label: String,
}

/// Collaborator that renders the port submenu.
pub trait MenuDisplay {
    /// Replaces the submenu contents with `entries`, in order.
    fn populate(&mut self, entries: &[MenuEntry]);
}

impl<M: MenuDisplay + ?Sized> MenuDisplay for &mut M {
    fn populate(&mut self, entries: &[MenuEntry]) {
        (**self).populate(entries);
    }
}

/// Menu display that writes the entries to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMenu;

impl MenuDisplay for LogMenu {
    fn populate(&mut self, entries: &[MenuEntry]) {
        if entries.is_empty() {
            tracing::info!("No serial ports attached");
            return;
        }
        tracing::info!("{} serial port(s) attached:", entries.len());
        for entry in entries {
            tracing::info!("  {}", entry.label);
        }
    }
}

/// Builds menu entries for `snapshot`, in snapshot order.
#[must_use]
pub fn menu_entries(snapshot: &PortSnapshot) -> Vec<MenuEntry> {
    (FIRST_PORT_ENTRY_ID..)
        .zip(snapshot.iter())
        .map(|(id, port)| MenuEntry {
            id,
            label: port.display_label(),
        })
        .collect()
}

/// Regenerates the port submenu on demand.
#[derive(Debug)]
pub struct MenuSync<M> {
    display: M,
}

impl<M: MenuDisplay> MenuSync<M> {
    /// Creates a menu sync that populates `display`.
    #[must_use]
    pub const fn new(display: M) -> Self {
        Self { display }
    }

    /// Returns the display.
    pub const fn display(&self) -> &M {
        &self.display
    }

    /// Enumerates the ports, populates the display, and returns the labels.
    ///
    /// An enumeration failure yields an empty list.
    pub fn refresh<E: PortEnumerator + ?Sized>(&mut self, enumerator: &E) -> Vec<String> {
        let entries = menu_entries(&enumerator.enumerate());
        self.display.populate(&entries);
        entries.into_iter().map(|entry| entry.label).collect()
    }
}
