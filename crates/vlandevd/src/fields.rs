//! Attribute name constants for the vlandev config family

/// Parent interface name attribute.
pub const IFNAME: &str = "ifname";

/// Tag identifier attribute.
pub const VID: &str = "vid";

/// Ingress qos remap list attribute.
pub const INGRESS_QOS_MAPPING: &str = "ingress_qos_mapping";

/// Egress qos remap list attribute.
pub const EGRESS_QOS_MAPPING: &str = "egress_qos_mapping";
