//! vlandevd - tagged sub-interface manager for netdevd
//!
//! Manages VLAN devices layered on a parent interface: normalizes the
//! declarative configuration (tag id, qos remap tables), classifies every
//! reload as no-change / applied / restart-required by structural snapshot
//! comparison, and drives the up/down lifecycle with rollback on partial
//! bring-up failure.

mod commands;
mod config;
mod diff;
mod fields;
mod system;
mod types;
mod vlan_dev;

pub use commands::*;
pub use config::{normalize, ConfigWarning};
pub use diff::{classify, ChangeClass, VLANDEV_ATTRS};
pub use fields::*;
pub use system::{ShellVlanOps, VlanSystemOps};
pub use types::*;
pub use vlan_dev::{device_kinds, AdminState, VlanDev, VlanDevKind, VLAN_8021AD, VLAN_8021Q};
