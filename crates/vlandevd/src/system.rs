//! System operations boundary for VLAN devices.
//!
//! The lifecycle controller talks to the kernel through [`VlanSystemOps`]
//! only. [`ShellVlanOps`] is the real implementation, driving iproute2;
//! tests substitute a capturing mock with per-step failure injection.

use async_trait::async_trait;
use serde_json::Value;

use netdevd_common::{shell, DevError, DevResult};

use crate::commands::{
    build_link_show_cmd, build_set_link_cmd, build_vlandev_add_cmd, build_vlandev_del_cmd,
};
use crate::types::VlanConfig;

/// Privileged operations on the kernel-level VLAN construct.
#[async_trait]
pub trait VlanSystemOps: Send {
    /// Creates the VLAN device on top of `parent` with the given config.
    async fn vlandev_add(&mut self, dev: &str, parent: &str, config: &VlanConfig)
        -> DevResult<()>;

    /// Deletes the VLAN device.
    async fn vlandev_del(&mut self, dev: &str) -> DevResult<()>;

    /// Sets the link administratively up or down (the operational flag).
    async fn set_link_state(&mut self, dev: &str, up: bool) -> DevResult<()>;

    /// Reads live link state as a JSON object.
    async fn link_info(&mut self, dev: &str) -> DevResult<Value>;
}

/// The iproute2-backed implementation.
#[derive(Debug, Default)]
pub struct ShellVlanOps;

impl ShellVlanOps {
    /// Creates a new instance.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VlanSystemOps for ShellVlanOps {
    async fn vlandev_add(
        &mut self,
        dev: &str,
        parent: &str,
        config: &VlanConfig,
    ) -> DevResult<()> {
        shell::exec_or_throw(&build_vlandev_add_cmd(dev, parent, config)).await?;
        Ok(())
    }

    async fn vlandev_del(&mut self, dev: &str) -> DevResult<()> {
        shell::exec_or_throw(&build_vlandev_del_cmd(dev)).await?;
        Ok(())
    }

    async fn set_link_state(&mut self, dev: &str, up: bool) -> DevResult<()> {
        shell::exec_or_throw(&build_set_link_cmd(dev, up)).await?;
        Ok(())
    }

    async fn link_info(&mut self, dev: &str) -> DevResult<Value> {
        let output = shell::exec_or_throw(&build_link_show_cmd(dev)).await?;
        let parsed: Value = serde_json::from_str(&output)
            .map_err(|e| DevError::link_info(dev, e.to_string()))?;

        // `ip -j link show dev X` prints a one-element array
        match parsed {
            Value::Array(mut links) if !links.is_empty() => Ok(links.remove(0)),
            _ => Err(DevError::link_info(dev, "no link entry in output")),
        }
    }
}
