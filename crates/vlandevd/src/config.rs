//! Config normalizer: raw attributes to a validated [`VlanConfig`].
//!
//! Normalization never fails as a whole. A defective qos remap list (too
//! long, a non-string element, a malformed entry) degrades that one
//! direction table to empty and produces a warning; everything else in the
//! config is unaffected. The normalizer is pure: warnings are returned,
//! not logged, so the reload path decides how to report them.

use serde_json::Value;
use thiserror::Error;

use netdevd_common::RawConfig;

use crate::fields;
use crate::types::{RemapDirection, RemapEntry, TagProtocol, VlanConfig, QOS_MAPPING_MAX};

/// A config field that was rejected and reset to its default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    /// More entries than a direction table can hold.
    #[error("{direction} qos mapping list rejected: more than {max} entries")]
    TooManyQosMappings {
        /// Which table was reset.
        direction: RemapDirection,
        /// The table capacity.
        max: usize,
    },

    /// A list element that is not a string.
    #[error("{direction} qos mapping list rejected: entry is not a string")]
    QosMappingNotAString {
        /// Which table was reset.
        direction: RemapDirection,
    },

    /// A string element not matching `<from>:<to>`.
    #[error("{direction} qos mapping list rejected: '{entry}' is not in <from>:<to> form")]
    MalformedQosMapping {
        /// Which table was reset.
        direction: RemapDirection,
        /// The offending entry.
        entry: String,
    },
}

/// Parses one `<from>:<to>` remap rule. Both sides must be non-negative
/// decimal integers with nothing else around them.
fn parse_qos_entry(raw: &str) -> Option<RemapEntry> {
    let (from, to) = raw.split_once(':')?;
    Some(RemapEntry {
        from: from.parse().ok()?,
        to: to.parse().ok()?,
    })
}

/// Parses a qos remap list for one direction.
///
/// All-or-nothing: the first defect rejects the whole table, never a
/// prefix of it.
fn parse_qos_list(
    direction: RemapDirection,
    list: &[Value],
) -> Result<Vec<RemapEntry>, ConfigWarning> {
    let mut entries = Vec::new();

    for item in list {
        if entries.len() == QOS_MAPPING_MAX {
            return Err(ConfigWarning::TooManyQosMappings {
                direction,
                max: QOS_MAPPING_MAX,
            });
        }

        let raw = item
            .as_str()
            .ok_or(ConfigWarning::QosMappingNotAString { direction })?;

        let entry = parse_qos_entry(raw).ok_or_else(|| ConfigWarning::MalformedQosMapping {
            direction,
            entry: raw.to_string(),
        })?;

        entries.push(entry);
    }

    Ok(entries)
}

/// Normalizes a raw snapshot into a [`VlanConfig`].
///
/// Always succeeds; defective fields degrade to their defaults and are
/// reported in the returned warnings. The tag id keeps only the lower 16
/// bits of the configured integer.
pub fn normalize(protocol: TagProtocol, raw: &RawConfig) -> (VlanConfig, Vec<ConfigWarning>) {
    let mut warnings = Vec::new();
    let mut config = VlanConfig::new(protocol);

    if let Some(vid) = raw.get_u32(fields::VID) {
        config.vid = vid as u16;
    }

    config.parent_name = raw.get_str(fields::IFNAME).map(str::to_string);

    if let Some(list) = raw.get_array(fields::INGRESS_QOS_MAPPING) {
        match parse_qos_list(RemapDirection::Ingress, list) {
            Ok(entries) => config.ingress = entries,
            Err(warning) => warnings.push(warning),
        }
    }

    if let Some(list) = raw.get_array(fields::EGRESS_QOS_MAPPING) {
        match parse_qos_list(RemapDirection::Egress, list) {
            Ok(entries) => config.egress = entries,
            Err(warning) => warnings.push(warning),
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawConfig {
        RawConfig::from_value(value).unwrap()
    }

    fn normalize_q(value: serde_json::Value) -> (VlanConfig, Vec<ConfigWarning>) {
        normalize(TagProtocol::Dot1Q, &raw(value))
    }

    #[test]
    fn test_defaults_on_empty_config() {
        let (cfg, warnings) = normalize_q(json!({}));
        assert_eq!(cfg.vid, 1);
        assert!(cfg.ingress.is_empty());
        assert!(cfg.egress.is_empty());
        assert!(cfg.parent_name.is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_vid_taken_from_config() {
        let (cfg, _) = normalize_q(json!({ "vid": 100 }));
        assert_eq!(cfg.vid, 100);
    }

    #[test]
    fn test_vid_truncated_to_u16() {
        // 65636 = 65536 + 100: only the lower 16 bits survive
        let (cfg, warnings) = normalize_q(json!({ "vid": 65636 }));
        assert_eq!(cfg.vid, 100);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_vid_wrong_type_defaults() {
        let (cfg, _) = normalize_q(json!({ "vid": "100" }));
        assert_eq!(cfg.vid, 1);
    }

    #[test]
    fn test_parent_name() {
        let (cfg, _) = normalize_q(json!({ "ifname": "eth0" }));
        assert_eq!(cfg.parent_name.as_deref(), Some("eth0"));
    }

    #[test]
    fn test_well_formed_list_preserves_order() {
        let (cfg, warnings) = normalize_q(json!({
            "ingress_qos_mapping": ["0:1", "1:2", "7:0"],
        }));
        assert!(warnings.is_empty());
        assert_eq!(
            cfg.ingress,
            vec![
                RemapEntry { from: 0, to: 1 },
                RemapEntry { from: 1, to: 2 },
                RemapEntry { from: 7, to: 0 },
            ]
        );
    }

    #[test]
    fn test_full_table_accepted() {
        let entries: Vec<String> = (0..QOS_MAPPING_MAX).map(|i| format!("{}:{}", i, i)).collect();
        let (cfg, warnings) = normalize_q(json!({ "egress_qos_mapping": entries }));
        assert!(warnings.is_empty());
        assert_eq!(cfg.egress.len(), QOS_MAPPING_MAX);
    }

    #[test]
    fn test_oversized_list_resets_to_empty() {
        let entries: Vec<String> = (0..QOS_MAPPING_MAX + 1)
            .map(|i| format!("{}:{}", i, i))
            .collect();
        let (cfg, warnings) = normalize_q(json!({ "ingress_qos_mapping": entries }));
        assert!(cfg.ingress.is_empty());
        assert_eq!(
            warnings,
            vec![ConfigWarning::TooManyQosMappings {
                direction: RemapDirection::Ingress,
                max: QOS_MAPPING_MAX,
            }]
        );
    }

    #[test]
    fn test_malformed_entry_resets_whole_table() {
        // A bad entry anywhere rejects everything, never a prefix
        let (cfg, warnings) = normalize_q(json!({
            "ingress_qos_mapping": ["0:1", "1:2", "bad"],
        }));
        assert!(cfg.ingress.is_empty());
        assert_eq!(
            warnings,
            vec![ConfigWarning::MalformedQosMapping {
                direction: RemapDirection::Ingress,
                entry: "bad".to_string(),
            }]
        );
    }

    #[test]
    fn test_non_string_entry_resets_whole_table() {
        let (cfg, warnings) = normalize_q(json!({
            "egress_qos_mapping": ["0:1", 7],
        }));
        assert!(cfg.egress.is_empty());
        assert_eq!(
            warnings,
            vec![ConfigWarning::QosMappingNotAString {
                direction: RemapDirection::Egress,
            }]
        );
    }

    #[test]
    fn test_one_bad_table_leaves_the_other_alone() {
        let (cfg, warnings) = normalize_q(json!({
            "ingress_qos_mapping": ["nope"],
            "egress_qos_mapping": ["2:3"],
        }));
        assert!(cfg.ingress.is_empty());
        assert_eq!(cfg.egress, vec![RemapEntry { from: 2, to: 3 }]);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_qos_entry_syntax() {
        assert_eq!(
            parse_qos_entry("0:7"),
            Some(RemapEntry { from: 0, to: 7 })
        );
        assert_eq!(parse_qos_entry(""), None);
        assert_eq!(parse_qos_entry("5"), None);
        assert_eq!(parse_qos_entry("5:"), None);
        assert_eq!(parse_qos_entry(":5"), None);
        assert_eq!(parse_qos_entry("1:2:3"), None);
        assert_eq!(parse_qos_entry("1:2x"), None);
        assert_eq!(parse_qos_entry("-1:2"), None);
        assert_eq!(parse_qos_entry("a:b"), None);
    }

    #[test]
    fn test_create_scenario() {
        let (cfg, warnings) = normalize_q(json!({
            "vid": 100,
            "ingress_qos_mapping": ["0:1", "1:2"],
        }));
        assert!(warnings.is_empty());
        assert_eq!(cfg.vid, 100);
        assert_eq!(
            cfg.ingress,
            vec![
                RemapEntry { from: 0, to: 1 },
                RemapEntry { from: 1, to: 2 },
            ]
        );
        assert!(cfg.egress.is_empty());
    }
}
