//! Device-layer seam for registry-backed enumeration.
//!
//! A [`DeviceQuery`] lists the devices present right now and reads string
//! properties from each of them. Folding the results into a snapshot
//! follows two rules: a device with any unreadable property is dropped
//! whole, and a property that reads but does not decode becomes "".

#![cfg_attr(not(windows), allow(dead_code))]

use crate::port::filter::{PortFilter, PrefixFilter};
use crate::port::{PortRecord, PortSnapshot};

use super::decode_wide;

/// String properties read for every device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeviceProperty {
    /// Port name from the device's registry key (e.g. "COM3").
    PortName,
    /// Friendly name from the device registry property.
    FriendlyName,
}

/// Query over the devices present at one instant.
pub(crate) trait DeviceQuery {
    /// Handle identifying one device within the query.
    type Device;

    /// Lists the devices present.
    fn devices(&self) -> Vec<Self::Device>;

    /// Reads a property as raw UTF-16, or `None` if it cannot be read.
    fn read_property(&self, device: &Self::Device, property: DeviceProperty) -> Option<Vec<u16>>;
}

/// Raw `(port name, friendly name)` of one device; `None` marks a failed read.
pub(crate) type RawDevice = (Option<Vec<u16>>, Option<Vec<u16>>);

/// Reads every present device and folds them into a snapshot.
pub(crate) fn collect_ports<Q: DeviceQuery + ?Sized>(
    query: &Q,
    naming: &PrefixFilter,
) -> PortSnapshot {
    let raw = query.devices().into_iter().map(|device| {
        (
            query.read_property(&device, DeviceProperty::PortName),
            query.read_property(&device, DeviceProperty::FriendlyName),
        )
    });
    fold_devices(raw, naming)
}

/// Builds a snapshot from raw device properties.
///
/// Devices missing either property are omitted, never partially recorded.
/// Names not matching `naming` are excluded.
pub(crate) fn fold_devices(
    devices: impl IntoIterator<Item = RawDevice>,
    naming: &PrefixFilter,
) -> PortSnapshot {
    devices
        .into_iter()
        .filter_map(|(port_name, friendly_name)| {
            let identifier = decode_wide(&port_name?);
            let description = decode_wide(&friendly_name?);
            Some(PortRecord::new(identifier, description))
        })
        .filter(|record| naming.matches(record))
        .collect()
}
