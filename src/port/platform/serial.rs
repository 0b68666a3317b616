//! Portable serial port enumeration using the `serialport` crate.

use serialport::{SerialPortInfo, SerialPortType};

use crate::port::filter::{PortFilter, PrefixFilter};
use crate::port::{EnumerateError, PortEnumerator, PortRecord, PortSnapshot};

use super::DEFAULT_PORT_PREFIX;

/// [`PortEnumerator`] backed by `serialport::available_ports`.
///
/// Only ports whose device path starts with the configured prefix are
/// reported.
#[derive(Debug, Clone)]
pub struct SerialportEnumerator {
    naming: PrefixFilter,
}

impl SerialportEnumerator {
    /// Creates an enumerator that keeps ports starting with `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            naming: PrefixFilter::new(prefix),
        }
    }
}

impl Default for SerialportEnumerator {
    fn default() -> Self {
        Self::new(DEFAULT_PORT_PREFIX)
    }
}

impl PortEnumerator for SerialportEnumerator {
    fn try_enumerate(&self) -> Result<PortSnapshot, EnumerateError> {
        let ports = serialport::available_ports().map_err(|e| EnumerateError::Platform {
            message: e.to_string(),
        })?;

        Ok(build_snapshot(ports, &self.naming))
    }
}

/// Folds raw port descriptions into a snapshot, keeping only conforming names.
fn build_snapshot(ports: Vec<SerialPortInfo>, naming: &PrefixFilter) -> PortSnapshot {
    ports
        .into_iter()
        .map(|info| PortRecord::new(info.port_name, describe(&info.port_type)))
        .filter(|record| naming.matches(record))
        .collect()
}

/// Friendly description for a port, "" when the type carries nothing useful.
fn describe(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => usb
            .product
            .clone()
            .or_else(|| usb.manufacturer.clone())
            .unwrap_or_else(|| format!("USB {:04x}:{:04x}", usb.vid, usb.pid)),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::Unknown => String::new(),
    }
}
