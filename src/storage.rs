//! Block device and logical volume inventory from `/sys/block`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::util::{read_attr_u64, slurp_attr};

const SYS_BLOCK: &str = "/sys/block";

/// One physical block device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageDevice {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub driver: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub serial: String,
    /// Capacity in GB
    #[serde(default, skip_serializing_if = "crate::util::is_zero_u64")]
    pub size: u64,
}

/// One device-mapper logical volume
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogicalVolume {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub devname: String,
    /// Capacity in GB
    #[serde(default, skip_serializing_if = "crate::util::is_zero_u64")]
    pub size: u64,
}

pub fn storage() -> Vec<StorageDevice> {
    storage_from(Path::new(SYS_BLOCK))
}

pub fn lvm() -> Vec<LogicalVolume> {
    lvm_from(Path::new(SYS_BLOCK))
}

fn storage_from(block_dir: &Path) -> Vec<StorageDevice> {
    let mut devices = Vec::new();

    let entries = match fs::read_dir(block_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("cannot enumerate {}: {e}", block_dir.display());
            return devices;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        // loop, ram, and device-mapper entries are not physical devices
        if name.starts_with("loop") || name.starts_with("ram") || name.starts_with("dm-") {
            continue;
        }

        let dir = block_dir.join(&name);
        let driver = fs::read_link(dir.join("device/driver"))
            .ok()
            .and_then(|p| p.file_name().map(|f| f.to_string_lossy().to_string()))
            .unwrap_or_default();

        devices.push(StorageDevice {
            name,
            driver,
            vendor: slurp_attr(dir.join("device/vendor")),
            model: slurp_attr(dir.join("device/model")),
            serial: slurp_attr(dir.join("device/serial")),
            size: sectors_to_gb(read_attr_u64(dir.join("size")).unwrap_or(0)),
        });
    }

    devices
}

fn lvm_from(block_dir: &Path) -> Vec<LogicalVolume> {
    let mut volumes = Vec::new();

    let entries = match fs::read_dir(block_dir) {
        Ok(entries) => entries,
        Err(_) => return volumes,
    };

    for entry in entries.flatten() {
        let devname = entry.file_name().to_string_lossy().to_string();
        if !devname.starts_with("dm-") {
            continue;
        }

        let dir = block_dir.join(&devname);
        volumes.push(LogicalVolume {
            name: slurp_attr(dir.join("dm/name")),
            devname,
            size: sectors_to_gb(read_attr_u64(dir.join("size")).unwrap_or(0)),
        });
    }

    volumes
}

/// sysfs sizes are 512-byte sectors
fn sectors_to_gb(sectors: u64) -> u64 {
    sectors * 512 / (1000 * 1000 * 1000)
}
