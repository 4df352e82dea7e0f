//! Diff classifier: decide what a config change means for a running device.
//!
//! Two attribute families are compared independently over the raw
//! snapshots: the generic device family (owned by the framework layer) and
//! the vlandev family below. Any structural difference in either forces a
//! restart cycle; there is no field-level hot-patching of a created
//! construct.

use netdevd_common::{AttrFamily, AttrSpec, AttrType, RawConfig, DEVICE_ATTRS};

use crate::fields;

/// The vlandev config attribute family.
pub const VLANDEV_ATTRS: AttrFamily = AttrFamily {
    name: "vlandev",
    params: &[
        AttrSpec {
            name: fields::IFNAME,
            ty: AttrType::String,
        },
        AttrSpec {
            name: fields::VID,
            ty: AttrType::Integer,
        },
        AttrSpec {
            name: fields::INGRESS_QOS_MAPPING,
            ty: AttrType::Array,
        },
        AttrSpec {
            name: fields::EGRESS_QOS_MAPPING,
            ty: AttrType::Array,
        },
    ],
};

/// What a reload means for the running interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeClass {
    /// Nothing comparable changed.
    NoChange,
    /// Config absorbed without touching the interface (first apply).
    Applied,
    /// The interface must be cycled down and up to reflect the change.
    Restart,
}

impl ChangeClass {
    /// State name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeClass::NoChange => "no_change",
            ChangeClass::Applied => "applied",
            ChangeClass::Restart => "restart",
        }
    }
}

/// Classifies a new raw snapshot against the previously stored one.
///
/// With no prior snapshot the config is simply applied: the interface has
/// never been created, so there is nothing to restart. Otherwise either
/// family differing structurally means restart, and an equal pair means
/// no change (the caller still replaces the snapshot).
pub fn classify(new: &RawConfig, old: Option<&RawConfig>) -> ChangeClass {
    let Some(old) = old else {
        return ChangeClass::Applied;
    };

    if DEVICE_ATTRS.differs(new, old) || VLANDEV_ATTRS.differs(new, old) {
        ChangeClass::Restart
    } else {
        ChangeClass::NoChange
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawConfig {
        RawConfig::from_value(value).unwrap()
    }

    #[test]
    fn test_first_apply() {
        let new = raw(json!({ "vid": 100 }));
        assert_eq!(classify(&new, None), ChangeClass::Applied);
    }

    #[test]
    fn test_identical_snapshots() {
        let a = raw(json!({ "ifname": "eth0", "vid": 100 }));
        let b = raw(json!({ "ifname": "eth0", "vid": 100 }));
        assert_eq!(classify(&a, Some(&b)), ChangeClass::NoChange);
    }

    #[test]
    fn test_vid_change_restarts() {
        let old = raw(json!({ "ifname": "eth0", "vid": 100 }));
        let new = raw(json!({ "ifname": "eth0", "vid": 200 }));
        assert_eq!(classify(&new, Some(&old)), ChangeClass::Restart);
    }

    #[test]
    fn test_parent_change_restarts() {
        let old = raw(json!({ "ifname": "eth0", "vid": 100 }));
        let new = raw(json!({ "ifname": "eth1", "vid": 100 }));
        assert_eq!(classify(&new, Some(&old)), ChangeClass::Restart);
    }

    #[test]
    fn test_qos_list_change_restarts() {
        let old = raw(json!({ "vid": 100, "ingress_qos_mapping": ["0:1", "1:2"] }));
        let new = raw(json!({ "vid": 100, "ingress_qos_mapping": ["0:1"] }));
        assert_eq!(classify(&new, Some(&old)), ChangeClass::Restart);
    }

    #[test]
    fn test_generic_family_change_restarts() {
        let old = raw(json!({ "vid": 100, "mtu": 1500 }));
        let new = raw(json!({ "vid": 100, "mtu": 9100 }));
        assert_eq!(classify(&new, Some(&old)), ChangeClass::Restart);
    }

    #[test]
    fn test_defaulted_vs_explicit_differ_structurally() {
        // vid 1 is the default, but an explicit "vid": 1 is still a
        // structural difference against an absent attribute
        let old = raw(json!({ "ifname": "eth0" }));
        let new = raw(json!({ "ifname": "eth0", "vid": 1 }));
        assert_eq!(classify(&new, Some(&old)), ChangeClass::Restart);
    }

    #[test]
    fn test_uncomparable_attr_ignored() {
        let old = raw(json!({ "vid": 100, "comment": "a" }));
        let new = raw(json!({ "vid": 100, "comment": "b" }));
        assert_eq!(classify(&new, Some(&old)), ChangeClass::NoChange);
    }
}
