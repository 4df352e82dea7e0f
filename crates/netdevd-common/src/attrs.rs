//! Raw configuration attributes and family-wise structural diffing.
//!
//! Configuration reaches a device-class daemon as a flat attribute map.
//! Each device class declares the attributes it cares about as an
//! [`AttrFamily`] (name plus expected type per attribute); the generic
//! device layer owns its own family ([`DEVICE_ATTRS`]). Reload decisions
//! are made by structurally comparing the projections of two raw snapshots
//! onto a family: an attribute whose value has the wrong type is treated
//! as absent, exactly as the typed getters do.

use serde_json::{Map, Value};

/// A raw, unvalidated configuration snapshot.
///
/// Thin wrapper over a JSON object. Typed getters return `None` both for
/// missing attributes and for attributes of the wrong type, so callers can
/// apply defaults uniformly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawConfig(Map<String, Value>);

impl RawConfig {
    /// Creates an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Raw attribute lookup.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// String attribute, or `None` if absent or not a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// 32-bit unsigned integer attribute, or `None` if absent, not an
    /// integer, or out of range.
    pub fn get_u32(&self, name: &str) -> Option<u32> {
        self.0
            .get(name)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
    }

    /// Boolean attribute, or `None` if absent or not a boolean.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.0.get(name).and_then(Value::as_bool)
    }

    /// Array attribute, or `None` if absent or not an array.
    pub fn get_array(&self, name: &str) -> Option<&Vec<Value>> {
        self.0.get(name).and_then(Value::as_array)
    }
}

impl TryFrom<Value> for RawConfig {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// Expected type of a declared attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    /// UTF-8 string.
    String,
    /// Unsigned integer.
    Integer,
    /// Boolean.
    Bool,
    /// Ordered list.
    Array,
}

impl AttrType {
    /// Returns true if `value` has this type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            AttrType::String => value.is_string(),
            AttrType::Integer => value.is_u64(),
            AttrType::Bool => value.is_boolean(),
            AttrType::Array => value.is_array(),
        }
    }
}

/// One declared attribute: name and expected type.
#[derive(Debug, Clone, Copy)]
pub struct AttrSpec {
    /// Attribute name in the raw config.
    pub name: &'static str,
    /// Expected type.
    pub ty: AttrType,
}

/// A named set of attributes diffed as one unit.
///
/// Two snapshots differ for a family when any declared attribute is
/// present in one projection and absent in the other, or present in both
/// with different values.
#[derive(Debug, Clone, Copy)]
pub struct AttrFamily {
    /// Family name, for logging.
    pub name: &'static str,
    /// The declared attributes.
    pub params: &'static [AttrSpec],
}

impl AttrFamily {
    fn lookup<'a>(&self, cfg: &'a RawConfig, spec: &AttrSpec) -> Option<&'a Value> {
        cfg.get(spec.name).filter(|v| spec.ty.matches(v))
    }

    /// Structural diff of two snapshots projected onto this family.
    pub fn differs(&self, a: &RawConfig, b: &RawConfig) -> bool {
        self.params
            .iter()
            .any(|spec| self.lookup(a, spec) != self.lookup(b, spec))
    }
}

/// Generic device attribute names.
pub mod device_fields {
    /// MTU field.
    pub const MTU: &str = "mtu";

    /// IPv6 MTU field.
    pub const MTU6: &str = "mtu6";

    /// MAC address field.
    pub const MACADDR: &str = "macaddr";

    /// Transmit queue length field.
    pub const TXQUEUELEN: &str = "txqueuelen";

    /// Administrative enable field.
    pub const ENABLED: &str = "enabled";
}

/// The attribute family owned by the generic device layer.
///
/// Device classes inherit these on top of their own family; a change in
/// either forces a restart cycle.
pub const DEVICE_ATTRS: AttrFamily = AttrFamily {
    name: "device",
    params: &[
        AttrSpec {
            name: device_fields::MTU,
            ty: AttrType::Integer,
        },
        AttrSpec {
            name: device_fields::MTU6,
            ty: AttrType::Integer,
        },
        AttrSpec {
            name: device_fields::MACADDR,
            ty: AttrType::String,
        },
        AttrSpec {
            name: device_fields::TXQUEUELEN,
            ty: AttrType::Integer,
        },
        AttrSpec {
            name: device_fields::ENABLED,
            ty: AttrType::Bool,
        },
    ],
};
