//! Generic device object and the device registry.
//!
//! Every managed interface, whatever its class, carries the same generic
//! state: a name, a kind, a presence flag (does the backing construct
//! exist right now), an operational flag, and the settings parsed from the
//! generic attribute family. Device classes own a [`Device`] by
//! composition and layer their private state around it.
//!
//! The [`DeviceRegistry`] tracks which devices exist and how many users
//! hold a claim on each. A sub-interface claims its parent while it is
//! administratively up and releases it on the way down; claiming a device
//! that is missing or not present fails, which is how bring-up learns the
//! parent is gone.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::attrs::{device_fields, RawConfig};
use crate::error::{DevError, DevResult};

/// Settings parsed from the generic device attribute family.
///
/// Re-populated from scratch on every reload; absent attributes stay
/// `None` and the kernel defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSettings {
    /// MTU.
    pub mtu: Option<u32>,
    /// IPv6 MTU.
    pub mtu6: Option<u32>,
    /// MAC address override.
    pub macaddr: Option<String>,
    /// Transmit queue length.
    pub txqueuelen: Option<u32>,
    /// Administrative enable.
    pub enabled: Option<bool>,
}

impl DeviceSettings {
    /// Parses the generic family out of a raw snapshot.
    pub fn from_raw(raw: &RawConfig) -> Self {
        Self {
            mtu: raw.get_u32(device_fields::MTU),
            mtu6: raw.get_u32(device_fields::MTU6),
            macaddr: raw.get_str(device_fields::MACADDR).map(str::to_string),
            txqueuelen: raw.get_u32(device_fields::TXQUEUELEN),
            enabled: raw.get_bool(device_fields::ENABLED),
        }
    }
}

/// Generic per-interface state shared by all device classes.
#[derive(Debug, Clone)]
pub struct Device {
    /// Interface name (e.g. "eth0.100").
    pub name: String,
    /// Device kind name (e.g. "8021q").
    pub kind: &'static str,
    /// Whether the backing construct currently exists.
    pub present: bool,
    /// Whether the interface is operationally up.
    pub operational: bool,
    /// Settings from the generic attribute family.
    pub settings: DeviceSettings,
}

impl Device {
    /// Creates a new device in the down, not-present state.
    pub fn new(name: impl Into<String>, kind: &'static str) -> Self {
        Self {
            name: name.into(),
            kind,
            present: false,
            operational: false,
            settings: DeviceSettings::default(),
        }
    }

    /// Re-applies the generic attribute family from a raw snapshot.
    pub fn init_settings(&mut self, raw: &RawConfig) {
        self.settings = DeviceSettings::from_raw(raw);
    }
}

/// Presence change event for a device another device depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// The device appeared.
    Add,
    /// The device disappeared.
    Remove,
}

#[derive(Debug, Default)]
struct RegisteredDevice {
    present: bool,
    refs: usize,
}

/// Tracks which devices exist and who holds claims on them.
///
/// Entries are created either explicitly by the host ([`set_present`])
/// or as non-present placeholders when a config names a device that does
/// not exist yet ([`ensure`]). A placeholder becomes claimable once the
/// host marks it present.
///
/// [`set_present`]: DeviceRegistry::set_present
/// [`ensure`]: DeviceRegistry::ensure
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: HashMap<String, RegisteredDevice>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a non-present placeholder entry if `name` is unknown.
    pub fn ensure(&mut self, name: &str) {
        if !self.devices.contains_key(name) {
            debug!(device = name, "registering placeholder device");
            self.devices.insert(name.to_string(), RegisteredDevice::default());
        }
    }

    /// Sets the presence flag, creating the entry if needed.
    pub fn set_present(&mut self, name: &str, present: bool) {
        let entry = self.devices.entry(name.to_string()).or_default();
        entry.present = present;
    }

    /// Returns true if the device exists and is present.
    pub fn is_present(&self, name: &str) -> bool {
        self.devices.get(name).is_some_and(|d| d.present)
    }

    /// Returns true if the registry knows this device at all.
    pub fn contains(&self, name: &str) -> bool {
        self.devices.contains_key(name)
    }

    /// Number of claims currently held on a device.
    pub fn refcount(&self, name: &str) -> usize {
        self.devices.get(name).map_or(0, |d| d.refs)
    }

    /// Takes a claim on a device.
    ///
    /// Fails with [`DevError::ParentUnavailable`] if the device is unknown
    /// or not present.
    pub fn claim(&mut self, name: &str) -> DevResult<()> {
        match self.devices.get_mut(name) {
            Some(entry) if entry.present => {
                entry.refs += 1;
                debug!(device = name, refs = entry.refs, "device claimed");
                Ok(())
            }
            _ => Err(DevError::parent_unavailable(name)),
        }
    }

    /// Drops a claim taken with [`claim`](DeviceRegistry::claim).
    pub fn release(&mut self, name: &str) {
        match self.devices.get_mut(name) {
            Some(entry) if entry.refs > 0 => {
                entry.refs -= 1;
                debug!(device = name, refs = entry.refs, "device released");
            }
            _ => warn!(device = name, "release without matching claim"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_new() {
        let dev = Device::new("eth0.100", "8021q");
        assert_eq!(dev.name, "eth0.100");
        assert_eq!(dev.kind, "8021q");
        assert!(!dev.present);
        assert!(!dev.operational);
        assert_eq!(dev.settings, DeviceSettings::default());
    }

    #[test]
    fn test_settings_from_raw() {
        let raw = RawConfig::from_value(json!({
            "mtu": 1500,
            "macaddr": "00:11:22:33:44:55",
            "enabled": true,
        }))
        .unwrap();

        let settings = DeviceSettings::from_raw(&raw);
        assert_eq!(settings.mtu, Some(1500));
        assert_eq!(settings.macaddr.as_deref(), Some("00:11:22:33:44:55"));
        assert_eq!(settings.enabled, Some(true));
        assert_eq!(settings.mtu6, None);
        assert_eq!(settings.txqueuelen, None);
    }

    #[test]
    fn test_settings_wrong_type_defaults() {
        let raw = RawConfig::from_value(json!({ "mtu": "1500" })).unwrap();
        assert_eq!(DeviceSettings::from_raw(&raw).mtu, None);
    }

    #[test]
    fn test_claim_unknown_device() {
        let mut reg = DeviceRegistry::new();
        assert!(matches!(
            reg.claim("eth0"),
            Err(DevError::ParentUnavailable { .. })
        ));
    }

    #[test]
    fn test_claim_placeholder_not_present() {
        let mut reg = DeviceRegistry::new();
        reg.ensure("eth0");
        assert!(reg.contains("eth0"));
        assert!(!reg.is_present("eth0"));
        assert!(reg.claim("eth0").is_err());
    }

    #[test]
    fn test_claim_release_refcount() {
        let mut reg = DeviceRegistry::new();
        reg.set_present("eth0", true);

        reg.claim("eth0").unwrap();
        reg.claim("eth0").unwrap();
        assert_eq!(reg.refcount("eth0"), 2);

        reg.release("eth0");
        assert_eq!(reg.refcount("eth0"), 1);
        reg.release("eth0");
        assert_eq!(reg.refcount("eth0"), 0);

        // Unbalanced release is logged, not counted
        reg.release("eth0");
        assert_eq!(reg.refcount("eth0"), 0);
    }

    #[test]
    fn test_presence_toggle() {
        let mut reg = DeviceRegistry::new();
        reg.set_present("eth0", true);
        reg.claim("eth0").unwrap();

        reg.set_present("eth0", false);
        assert!(reg.claim("eth0").is_err());
        // The existing claim survives until released
        assert_eq!(reg.refcount("eth0"), 1);
    }

    #[test]
    fn test_ensure_does_not_clobber() {
        let mut reg = DeviceRegistry::new();
        reg.set_present("eth0", true);
        reg.ensure("eth0");
        assert!(reg.is_present("eth0"));
    }
}
