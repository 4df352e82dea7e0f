//! Type definitions for vlandevd

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of qos remap entries per direction table.
pub const QOS_MAPPING_MAX: usize = 8;

/// Which tagging standard a sub-interface uses.
///
/// Fixed by the device kind chosen at creation, never reconfigurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagProtocol {
    /// IEEE 802.1Q (customer tag).
    Dot1Q,
    /// IEEE 802.1ad (service tag, "QinQ").
    Dot1AD,
}

impl TagProtocol {
    /// Device kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TagProtocol::Dot1Q => "8021q",
            TagProtocol::Dot1AD => "8021ad",
        }
    }

    /// Protocol argument as iproute2 spells it.
    pub fn iproute_kind(&self) -> &'static str {
        match self {
            TagProtocol::Dot1Q => "802.1Q",
            TagProtocol::Dot1AD => "802.1ad",
        }
    }
}

/// One traffic-class remapping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapEntry {
    /// Priority value to match.
    pub from: u32,
    /// Priority value to rewrite to.
    pub to: u32,
}

/// Direction a remap table applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemapDirection {
    /// Applied to received frames.
    Ingress,
    /// Applied to transmitted frames.
    Egress,
}

impl fmt::Display for RemapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemapDirection::Ingress => write!(f, "ingress"),
            RemapDirection::Egress => write!(f, "egress"),
        }
    }
}

/// Normalized sub-interface configuration.
///
/// Fully repopulated on every reload: no field carries over from the
/// previous config, absent attributes get their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanConfig {
    /// Tagging standard, from the device kind.
    pub protocol: TagProtocol,
    /// Tag identifier. Defaults to 1; only the lower 16 bits of the
    /// configured integer are kept.
    pub vid: u16,
    /// Ingress remap table, at most [`QOS_MAPPING_MAX`] entries.
    pub ingress: Vec<RemapEntry>,
    /// Egress remap table, at most [`QOS_MAPPING_MAX`] entries.
    pub egress: Vec<RemapEntry>,
    /// Parent interface name, if configured.
    pub parent_name: Option<String>,
}

impl VlanConfig {
    /// Default configuration for a protocol: vid 1, empty tables.
    pub fn new(protocol: TagProtocol) -> Self {
        Self {
            protocol,
            vid: 1,
            ingress: Vec::new(),
            egress: Vec::new(),
            parent_name: None,
        }
    }
}
