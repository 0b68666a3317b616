//! Windows-specific serial port enumeration using SetupAPI.

use crate::port::filter::PrefixFilter;
use crate::port::{EnumerateError, PortEnumerator, PortSnapshot};

use super::device::{DeviceProperty, DeviceQuery, collect_ports};
use super::{DEFAULT_PORT_PREFIX, wide_from_bytes};

use windows::Win32::Devices::DeviceAndDriverInstallation::{
    DICS_FLAG_GLOBAL, DIGCF_DEVICEINTERFACE, DIGCF_PRESENT, DIREG_DEV, HDEVINFO, SP_DEVINFO_DATA,
    SPDRP_FRIENDLYNAME, SetupDiDestroyDeviceInfoList, SetupDiEnumDeviceInfo, SetupDiGetClassDevsW,
    SetupDiGetDeviceRegistryPropertyW, SetupDiOpenDevRegKey,
};
use windows::Win32::Foundation::NO_ERROR;
use windows::Win32::System::Registry::{HKEY, KEY_READ, RegCloseKey, RegQueryValueExW};
use windows::core::{GUID, PCWSTR, w};

/// Device interface class for COM ports (`GUID_DEVINTERFACE_COMPORT` in `ntddser.h`).
const GUID_DEVINTERFACE_COMPORT: GUID = GUID::from_u128(0x86e0_d1e0_8089_11d0_9ce4_0800_3e30_1f73);

/// Registry values are read into a fixed buffer; port names and friendly
/// names are far shorter than this.
const VALUE_BUFFER_BYTES: usize = 512;

/// Windows implementation of [`PortEnumerator`] using SetupAPI.
///
/// Lists the devices present in the COM-port interface class, reads each
/// device's `PortName` from its registry key and its friendly name from the
/// device registry property. Devices whose key or property cannot be read
/// are skipped.
///
/// # Example
///
/// ```no_run
/// use serial_watch::port::PortEnumerator;
/// use serial_watch::port::platform::WindowsEnumerator;
///
/// let enumerator = WindowsEnumerator::default();
/// for port in enumerator.enumerate() {
///     println!("{}", port.display_label());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WindowsEnumerator {
    naming: PrefixFilter,
}

impl WindowsEnumerator {
    /// Creates an enumerator that keeps ports starting with `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            naming: PrefixFilter::new(prefix),
        }
    }
}

impl Default for WindowsEnumerator {
    fn default() -> Self {
        Self::new(DEFAULT_PORT_PREFIX)
    }
}

impl PortEnumerator for WindowsEnumerator {
    fn try_enumerate(&self) -> Result<PortSnapshot, EnumerateError> {
        let devices = DeviceInfoSet::present_com_ports()?;
        Ok(collect_ports(&devices, &self.naming))
    }
}

/// Owned `HDEVINFO`, destroyed on drop.
struct DeviceInfoSet(HDEVINFO);

impl DeviceInfoSet {
    fn present_com_ports() -> Result<Self, EnumerateError> {
        // SAFETY: the GUID pointer outlives the call; no enumerator string
        // or parent window is passed.
        let handle = unsafe {
            SetupDiGetClassDevsW(
                Some(&raw const GUID_DEVINTERFACE_COMPORT),
                PCWSTR::null(),
                None,
                DIGCF_PRESENT | DIGCF_DEVICEINTERFACE,
            )
        }
        .map_err(|e| EnumerateError::Unavailable {
            reason: e.message(),
        })?;

        if handle.is_invalid() {
            return Err(EnumerateError::Unavailable {
                reason: "SetupDiGetClassDevsW returned an invalid handle".to_string(),
            });
        }

        Ok(Self(handle))
    }

    /// Iterates device entries until `SetupDiEnumDeviceInfo` reports no more items.
    fn iter(&self) -> impl Iterator<Item = SP_DEVINFO_DATA> + '_ {
        (0u32..).map_while(move |index| {
            let mut data = SP_DEVINFO_DATA {
                cbSize: u32::try_from(std::mem::size_of::<SP_DEVINFO_DATA>()).unwrap_or(0),
                ..Default::default()
            };
            // SAFETY: `data` is a properly sized, writable SP_DEVINFO_DATA.
            unsafe { SetupDiEnumDeviceInfo(self.0, index, &raw mut data) }
                .ok()
                .map(|()| data)
        })
    }
}

impl Drop for DeviceInfoSet {
    fn drop(&mut self) {
        // SAFETY: the handle came from SetupDiGetClassDevsW and is destroyed once.
        if let Err(e) = unsafe { SetupDiDestroyDeviceInfoList(self.0) } {
            tracing::debug!("SetupDiDestroyDeviceInfoList failed: {e}");
        }
    }
}

/// Owned registry key, closed on drop.
struct RegKey(HKEY);

impl Drop for RegKey {
    fn drop(&mut self) {
        // SAFETY: the key came from SetupDiOpenDevRegKey and is closed once.
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

impl DeviceQuery for DeviceInfoSet {
    type Device = SP_DEVINFO_DATA;

    fn devices(&self) -> Vec<SP_DEVINFO_DATA> {
        self.iter().collect()
    }

    fn read_property(
        &self,
        device: &SP_DEVINFO_DATA,
        property: DeviceProperty,
    ) -> Option<Vec<u16>> {
        match property {
            DeviceProperty::PortName => read_port_name(self, device),
            DeviceProperty::FriendlyName => read_friendly_name(self, device),
        }
    }
}

fn read_port_name(devices: &DeviceInfoSet, device: &SP_DEVINFO_DATA) -> Option<Vec<u16>> {
    // SAFETY: both handles are valid for the duration of the call.
    let key = unsafe {
        SetupDiOpenDevRegKey(
            devices.0,
            device,
            DICS_FLAG_GLOBAL.0,
            0,
            DIREG_DEV,
            KEY_READ.0,
        )
    }
    .ok()
    .filter(|key| !key.is_invalid())
    .map(RegKey)?;

    let mut buffer = [0u8; VALUE_BUFFER_BYTES];
    let mut size = u32::try_from(buffer.len()).unwrap_or(0);

    // SAFETY: `buffer` is writable for `size` bytes.
    let status = unsafe {
        RegQueryValueExW(
            key.0,
            w!("PortName"),
            None,
            None,
            Some(buffer.as_mut_ptr()),
            Some(&raw mut size),
        )
    };
    if status != NO_ERROR {
        return None;
    }

    let len = (size as usize).min(buffer.len());
    Some(wide_from_bytes(&buffer[..len]))
}

fn read_friendly_name(devices: &DeviceInfoSet, device: &SP_DEVINFO_DATA) -> Option<Vec<u16>> {
    let mut buffer = [0u8; VALUE_BUFFER_BYTES];
    let mut required = 0u32;

    // SAFETY: `buffer` is a writable slice; the API never writes past its length.
    unsafe {
        SetupDiGetDeviceRegistryPropertyW(
            devices.0,
            device,
            SPDRP_FRIENDLYNAME,
            None,
            Some(&mut buffer),
            Some(&raw mut required),
        )
    }
    .ok()?;

    let len = (required as usize).min(buffer.len());
    Some(wide_from_bytes(&buffer[..len]))
}
