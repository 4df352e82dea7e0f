//! VlanDev - tagged sub-interface instance and lifecycle.
//!
//! Bring-up is a strict three-step sequence: claim the parent, create the
//! kernel construct, set the link operational. Each step is a precondition
//! for the next, and a failure unwinds the steps already taken in reverse
//! order, so a failed bring-up never leaves the parent claimed or the
//! construct half-created. Bring-down runs every step regardless of
//! individual errors and always ends in the down state.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use netdevd_common::{DevError, DevResult, Device, DeviceEvent, DeviceRegistry, RawConfig};

use crate::config;
use crate::diff::{classify, ChangeClass};
use crate::system::VlanSystemOps;
use crate::types::{TagProtocol, VlanConfig};

/// Administrative state of a sub-interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminState {
    /// Not running; nothing held.
    Down,
    /// Running: parent claimed, construct created, link operational.
    Up,
}

/// Reference to the parent interface.
///
/// `configured` follows the config on every reload; `claimed` is set only
/// between a successful bring-up and the matching bring-down, and names
/// the device the claim was actually taken on (the config may have moved
/// on in between).
#[derive(Debug, Clone, Default)]
struct ParentBinding {
    configured: Option<String>,
    claimed: Option<String>,
}

/// A registrable device kind: one tagging standard.
///
/// Both kinds share the whole implementation; the protocol value baked in
/// at creation is the only difference.
#[derive(Debug)]
pub struct VlanDevKind {
    /// Kind name as registered with the host framework.
    pub name: &'static str,
    /// The tagging standard instances of this kind use.
    pub protocol: TagProtocol,
}

/// The 802.1Q device kind.
pub const VLAN_8021Q: VlanDevKind = VlanDevKind {
    name: "8021q",
    protocol: TagProtocol::Dot1Q,
};

/// The 802.1ad device kind.
pub const VLAN_8021AD: VlanDevKind = VlanDevKind {
    name: "8021ad",
    protocol: TagProtocol::Dot1AD,
};

/// The device kinds this crate registers.
pub fn device_kinds() -> [&'static VlanDevKind; 2] {
    [&VLAN_8021Q, &VLAN_8021AD]
}

impl VlanDevKind {
    /// Instantiates a sub-interface of this kind with its initial config
    /// applied and the parent reference bound.
    pub fn create(
        &'static self,
        name: &str,
        raw: RawConfig,
        registry: &mut DeviceRegistry,
    ) -> VlanDev {
        VlanDev::create(name, self, raw, registry)
    }
}

/// A tagged sub-interface: generic device state plus the private vlandev
/// state around it.
pub struct VlanDev {
    dev: Device,
    parent: ParentBinding,
    config: VlanConfig,
    snapshot: Option<RawConfig>,
    state: AdminState,
}

impl VlanDev {
    fn create(
        name: &str,
        kind: &'static VlanDevKind,
        raw: RawConfig,
        registry: &mut DeviceRegistry,
    ) -> Self {
        let mut vlan = Self {
            dev: Device::new(name, kind.name),
            parent: ParentBinding::default(),
            config: VlanConfig::new(kind.protocol),
            snapshot: None,
            state: AdminState::Down,
        };

        vlan.reload(raw, registry);
        vlan.rebind_parent(registry);
        info!(device = name, kind = kind.name, "created tagged sub-interface");
        vlan
    }

    /// Interface name.
    pub fn name(&self) -> &str {
        &self.dev.name
    }

    /// Device kind name.
    pub fn kind(&self) -> &'static str {
        self.dev.kind
    }

    /// Current administrative state.
    pub fn state(&self) -> AdminState {
        self.state
    }

    /// Current normalized configuration.
    pub fn config(&self) -> &VlanConfig {
        &self.config
    }

    /// Whether the parent's presence makes this device available.
    pub fn is_present(&self) -> bool {
        self.dev.present
    }

    /// Whether the link is operationally up.
    pub fn is_operational(&self) -> bool {
        self.dev.operational
    }

    fn rebind_parent(&mut self, registry: &mut DeviceRegistry) {
        if let Some(parent) = &self.parent.configured {
            registry.ensure(parent);
        }
    }

    /// Re-parses configuration and classifies the change.
    ///
    /// Never fails: defective fields degrade to defaults with a warning
    /// logged. The raw snapshot replaces the stored one in a single
    /// assignment. This path never touches the running interface; acting
    /// on a [`ChangeClass::Restart`] verdict is the caller's decision, so
    /// reloading is safe at any time, including before first bring-up.
    pub fn reload(&mut self, raw: RawConfig, registry: &mut DeviceRegistry) -> ChangeClass {
        let (config, warnings) = config::normalize(self.config.protocol, &raw);
        for warning in &warnings {
            warn!(device = %self.dev.name, %warning, "config field rejected");
        }

        self.dev.init_settings(&raw);
        self.config = config;
        self.parent.configured = self.config.parent_name.clone();

        let class = classify(&raw, self.snapshot.as_ref());
        if self.snapshot.is_some() {
            // The parent reference is re-validated on every reload, even
            // when the structural diff reports no change.
            self.rebind_parent(registry);
        }

        self.snapshot = Some(raw);
        debug!(device = %self.dev.name, change = class.as_str(), "config reloaded");
        class
    }

    /// Drives the up/down transition.
    ///
    /// Bring-up failures roll back fully and surface the error; bring-down
    /// is infallible and always reaches [`AdminState::Down`].
    pub async fn set_state(
        &mut self,
        up: bool,
        registry: &mut DeviceRegistry,
        sys: &mut dyn VlanSystemOps,
    ) -> DevResult<()> {
        debug!(device = %self.dev.name, up, "set_state");
        if up {
            self.bring_up(registry, sys).await
        } else {
            self.bring_down(registry, sys).await;
            Ok(())
        }
    }

    async fn bring_up(
        &mut self,
        registry: &mut DeviceRegistry,
        sys: &mut dyn VlanSystemOps,
    ) -> DevResult<()> {
        if self.state == AdminState::Up {
            return Ok(());
        }

        let parent = self
            .parent
            .configured
            .clone()
            .ok_or_else(|| DevError::parent_unavailable(&self.dev.name))?;

        registry.claim(&parent)?;

        if let Err(e) = sys
            .vlandev_add(&self.dev.name, &parent, &self.config)
            .await
        {
            registry.release(&parent);
            return Err(e);
        }

        if let Err(e) = sys.set_link_state(&self.dev.name, true).await {
            if let Err(del_err) = sys.vlandev_del(&self.dev.name).await {
                warn!(device = %self.dev.name, error = %del_err, "rollback delete failed");
            }
            registry.release(&parent);
            return Err(e);
        }

        self.parent.claimed = Some(parent);
        self.dev.operational = true;
        self.state = AdminState::Up;
        info!(device = %self.dev.name, "interface up");
        Ok(())
    }

    async fn bring_down(&mut self, registry: &mut DeviceRegistry, sys: &mut dyn VlanSystemOps) {
        if let Err(e) = sys.set_link_state(&self.dev.name, false).await {
            warn!(device = %self.dev.name, error = %e, "failed to clear operational state");
        }
        if let Err(e) = sys.vlandev_del(&self.dev.name).await {
            warn!(device = %self.dev.name, error = %e, "failed to delete vlan construct");
        }
        if let Some(parent) = self.parent.claimed.take() {
            registry.release(&parent);
        }

        self.dev.operational = false;
        self.state = AdminState::Down;
        info!(device = %self.dev.name, "interface down");
    }

    /// Presence change of the parent interface.
    pub fn on_parent_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::Add => self.dev.present = true,
            DeviceEvent::Remove => self.dev.present = false,
        }
    }

    /// Diagnostic snapshot: parent name plus live link state.
    pub async fn dump_info(&self, sys: &mut dyn VlanSystemOps) -> DevResult<Value> {
        let mut dump = Map::new();
        if let Some(parent) = &self.parent.configured {
            dump.insert("parent".to_string(), Value::String(parent.clone()));
        }
        if let Value::Object(live) = sys.link_info(&self.dev.name).await? {
            dump.extend(live);
        }
        Ok(Value::Object(dump))
    }

    /// Destroys the instance, releasing the parent claim if one is still
    /// held. The buffered snapshot is dropped with the instance.
    pub fn free(mut self, registry: &mut DeviceRegistry) {
        if let Some(parent) = self.parent.claimed.take() {
            registry.release(&parent);
        }
        debug!(device = %self.dev.name, "device freed");
    }
}
