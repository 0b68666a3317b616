//! Platform-specific serial port enumerators.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`PortEnumerator`](super::PortEnumerator) trait.
//!
//! # Platform Support
//!
//! - **Windows**: SetupAPI device query over the COM-port interface class,
//!   via the `windows` crate.
//! - **Other**: `serialport::available_ports` (sysfs / IOKit).

mod device;

#[cfg(windows)]
mod windows;

#[cfg(not(windows))]
mod serial;

#[cfg(windows)]
pub use windows::WindowsEnumerator;

#[cfg(windows)]
pub use windows::WindowsEnumerator as PlatformEnumerator;

#[cfg(not(windows))]
pub use serial::SerialportEnumerator;

#[cfg(not(windows))]
pub use serial::SerialportEnumerator as PlatformEnumerator;

/// Prefix every serial port name carries on this platform.
#[cfg(windows)]
pub const DEFAULT_PORT_PREFIX: &str = "COM";

/// Prefix every serial port name carries on this platform.
#[cfg(not(windows))]
pub const DEFAULT_PORT_PREFIX: &str = "/dev/";

/// Decodes a NUL-terminated UTF-16 buffer, yielding "" when it is not valid UTF-16.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn decode_wide(buffer: &[u16]) -> String {
    let end = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16(&buffer[..end]).unwrap_or_default()
}

/// Reinterprets a registry byte buffer as little-endian UTF-16 code units.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn wide_from_bytes(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}
