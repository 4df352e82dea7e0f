//! iproute2 command builders for VLAN device operations

use netdevd_common::shell::{self, shellquote};

use crate::types::{RemapEntry, VlanConfig};

fn append_qos_map(cmd: &mut String, keyword: &str, entries: &[RemapEntry]) {
    if entries.is_empty() {
        return;
    }
    cmd.push(' ');
    cmd.push_str(keyword);
    for entry in entries {
        cmd.push_str(&format!(" {}:{}", entry.from, entry.to));
    }
}

/// Build the command creating a VLAN device on top of its parent.
pub fn build_vlandev_add_cmd(dev: &str, parent: &str, config: &VlanConfig) -> String {
    let mut cmd = format!(
        "{} link add link {} name {} type vlan proto {} id {}",
        shell::IP_CMD,
        shellquote(parent),
        shellquote(dev),
        config.protocol.iproute_kind(),
        config.vid
    );
    append_qos_map(&mut cmd, "ingress-qos-map", &config.ingress);
    append_qos_map(&mut cmd, "egress-qos-map", &config.egress);
    cmd
}

/// Build the command deleting a VLAN device.
pub fn build_vlandev_del_cmd(dev: &str) -> String {
    format!("{} link del {}", shell::IP_CMD, shellquote(dev))
}

/// Build the command setting a link administratively up or down.
pub fn build_set_link_cmd(dev: &str, up: bool) -> String {
    format!(
        "{} link set dev {} {}",
        shell::IP_CMD,
        shellquote(dev),
        if up { "up" } else { "down" }
    )
}

/// Build the command dumping live link state as JSON.
pub fn build_link_show_cmd(dev: &str) -> String {
    format!("{} -j link show dev {}", shell::IP_CMD, shellquote(dev))
}
