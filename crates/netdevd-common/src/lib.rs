//! Common infrastructure for netdevd device-class daemons.
//!
//! This crate provides the framework layer shared by every managed device
//! class (tagged sub-interfaces, and whatever comes next):
//!
//! - [`attrs`]: raw attribute maps, typed decoding, and family-wise
//!   structural diffing of configuration snapshots
//! - [`device`]: the generic device object and the registry that tracks
//!   presence and claim/release references between devices
//! - [`error`]: error types for device operations
//! - [`shell`]: safe shell command execution with proper quoting
//!
//! # Architecture
//!
//! A device-class daemon follows this pattern:
//!
//! 1. Parse raw configuration attributes into a class-specific config
//! 2. Diff the new raw snapshot against the stored one, family by family,
//!    to decide whether a change can be absorbed or needs a restart cycle
//! 3. Drive the up/down lifecycle against the kernel through a
//!    class-specific system boundary

pub mod attrs;
pub mod device;
pub mod error;
pub mod shell;

// Re-export commonly used items at crate root
pub use attrs::{AttrFamily, AttrSpec, AttrType, RawConfig, DEVICE_ATTRS};
pub use device::{Device, DeviceEvent, DeviceRegistry, DeviceSettings};
pub use error::{DevError, DevResult};
