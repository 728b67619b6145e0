//! Aggregate host inventory

use serde::{Deserialize, Serialize};

use crate::cpu::{self, Cpu};
use crate::dmi::{self, Bios, Board, Chassis, Product};
use crate::memory::{self, Memory};
use crate::network::{self, NetworkDevice};
use crate::node::{self, Node};
use crate::os::{self, Kernel, Os};
use crate::storage::{self, LogicalVolume, StorageDevice};

/// Complete host inventory, one section per subsystem.
///
/// Collection is best-effort throughout: a subsystem that cannot be read
/// leaves its section at defaults, it never fails the whole inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostInfo {
    #[serde(default)]
    pub node: Node,
    #[serde(default)]
    pub os: Os,
    #[serde(default)]
    pub kernel: Kernel,
    #[serde(default)]
    pub product: Product,
    #[serde(default)]
    pub board: Board,
    #[serde(default)]
    pub chassis: Chassis,
    #[serde(default)]
    pub bios: Bios,
    #[serde(default)]
    pub cpu: Cpu,
    #[serde(default)]
    pub memory: Memory,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storage: Vec<StorageDevice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lvm: Vec<LogicalVolume>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network: Vec<NetworkDevice>,
}

impl HostInfo {
    /// Gather every inventory section in one synchronous pass.
    pub fn collect() -> Self {
        Self {
            node: node::node(),
            os: os::os(),
            kernel: os::kernel(),
            product: dmi::product(),
            board: dmi::board(),
            chassis: dmi::chassis(),
            bios: dmi::bios(),
            cpu: cpu::cpu(),
            memory: memory::memory(),
            storage: storage::storage(),
            lvm: storage::lvm(),
            network: network::scan(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_never_fails() {
        // Every section is best-effort; collect must succeed on any host
        let info = HostInfo::collect();
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.starts_with('{'));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let info = HostInfo::default();
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("storage").is_none());
        assert!(json.get("network").is_none());
    }
}
