//! Network device discovery.
//!
//! Walks `/sys/class/net`, filters out virtual loopback/dummy devices, and
//! cross-references three independent sources into one record per physical
//! interface: sysfs attributes (MAC, speed, driver symlink), the ethtool
//! capability bitmask (port media, fallback speed), and OS interface queries
//! (MTU, bound addresses).
//!
//! The scan is strictly best-effort: a missing attribute or failed probe
//! leaves that field at its empty/zero default and the record is still
//! emitted; only an unreadable class directory yields an empty list, and
//! even that is not surfaced as an error.

pub mod addrs;
pub mod ethtool;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::util::{read_attr_u64, slurp_attr};

const SYS_CLASS_NET: &str = "/sys/class/net";

/// Symlink-target stems identifying non-physical devices. Other virtual
/// device types (veth, bridges, bonds) are not filtered; this set mirrors
/// the known loopback/dummy stems only.
const VIRTUAL_DEVICE_PREFIXES: [&str; 2] = [
    "../../devices/virtual/net/lo",
    "../../devices/virtual/net/dummy",
];

/// One physical network interface.
///
/// Empty strings, empty lists, and zero numbers all mean "unknown" and are
/// omitted from serialized output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkDevice {
    /// Interface name, unique within a scan
    pub name: String,
    /// Backing kernel module; empty if undeterminable
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub driver: String,
    /// Hardware address as reported by sysfs
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub macaddress: String,
    /// Bound addresses in CIDR form, in OS-reported order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ipaddress: Vec<String>,
    /// Slash-joined supported port media, e.g. "tp/mii"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub port: String,
    /// Maximum supported link speed in Mb/s, 0 = unknown
    #[serde(default, skip_serializing_if = "crate::util::is_zero_u64")]
    pub speed: u64,
    /// Interface MTU, 0 if the interface could not be resolved by name
    #[serde(default, skip_serializing_if = "crate::util::is_zero_u32")]
    pub mtu: u32,
}

/// Scan the host for physical network devices.
///
/// Loopback and dummy devices never appear. Output order matches sysfs
/// directory enumeration order. Never fails; an unreadable class directory
/// yields an empty list.
pub fn scan() -> Vec<NetworkDevice> {
    scan_class_dir(Path::new(SYS_CLASS_NET))
}

fn scan_class_dir(class_dir: &Path) -> Vec<NetworkDevice> {
    let mut devices = Vec::new();

    let entries = match fs::read_dir(class_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("cannot enumerate {}: {e}", class_dir.display());
            return devices;
        }
    };

    for entry in entries.flatten() {
        let device_dir = class_dir.join(entry.file_name());

        // Entries are symlinks into the device tree; anything else is skipped
        let target = match fs::read_link(&device_dir) {
            Ok(target) => target,
            Err(_) => continue,
        };
        if is_virtual(&target) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        devices.push(assemble(&name, &device_dir));
    }

    devices
}

fn is_virtual(target: &Path) -> bool {
    let target = target.to_string_lossy();
    VIRTUAL_DEVICE_PREFIXES
        .iter()
        .any(|prefix| target.starts_with(prefix))
}

/// Merge sysfs attributes, the capability probe, and OS interface queries
/// into one record. Every partial failure defaults the affected field.
fn assemble(name: &str, device_dir: &Path) -> NetworkDevice {
    let supported = ethtool::supported(name);

    let (mtu, ipaddress) = match addrs::resolve(name) {
        Some(_) => (
            read_attr_u64(device_dir.join("mtu")).unwrap_or(0) as u32,
            addrs::addresses(name),
        ),
        None => {
            log::debug!("{name}: not resolvable by the network stack");
            (0, Vec::new())
        }
    };

    let driver = fs::read_link(device_dir.join("device").join("driver"))
        .ok()
        .and_then(|p| p.file_name().map(|f| f.to_string_lossy().to_string()))
        .unwrap_or_default();

    NetworkDevice {
        name: name.to_string(),
        driver,
        macaddress: slurp_attr(device_dir.join("address")),
        ipaddress,
        port: ethtool::port_types(supported),
        speed: resolve_speed(&device_dir.join("speed"), supported),
        mtu,
    }
}

/// Maximum link speed: a valid direct sysfs reading always wins, bitmask
/// classification is the fallback.
fn resolve_speed(speed_attr: &Path, supported: u32) -> u64 {
    let direct = read_speed_attr(speed_attr);
    if direct > 0 {
        direct
    } else {
        ethtool::max_speed(supported)
    }
}

/// Read the sysfs `speed` attribute. Interfaces with the link down report -1
/// (or fail the read outright); any non-positive or unparsable value is
/// treated as "no direct reading".
fn read_speed_attr(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&speed| speed > 0)
        .map(|speed| speed as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::os::unix::fs::symlink;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Build a fake sysfs tree: a class dir of symlinks two levels below the
    /// root so that `../../devices/...` targets resolve.
    fn fake_sysfs() -> (TempDir, PathBuf) {
        let root = TempDir::new().unwrap();
        let class_dir = root.path().join("class/net");
        fs::create_dir_all(&class_dir).unwrap();
        (root, class_dir)
    }

    fn add_physical(root: &Path, class_dir: &Path, name: &str) -> PathBuf {
        let rel = format!("../../devices/pci0000:00/0000:00:1f.6/net/{name}");
        let device_dir = root.join(rel.trim_start_matches("../../"));
        fs::create_dir_all(&device_dir).unwrap();
        symlink(&rel, class_dir.join(name)).unwrap();
        device_dir
    }

    fn write_attr(dir: &Path, attr: &str, content: &str) {
        let mut f = File::create(dir.join(attr)).unwrap();
        writeln!(f, "{content}").unwrap();
    }

    #[test]
    fn test_virtual_devices_excluded() {
        let (_root, class_dir) = fake_sysfs();
        symlink("../../devices/virtual/net/lo", class_dir.join("lo")).unwrap();
        symlink("../../devices/virtual/net/dummy0", class_dir.join("dummy0")).unwrap();

        assert!(scan_class_dir(&class_dir).is_empty());
    }

    #[test]
    fn test_non_symlink_entries_skipped() {
        let (_root, class_dir) = fake_sysfs();
        // real sysfs has e.g. bonding_masters as a plain file
        File::create(class_dir.join("bonding_masters")).unwrap();

        assert!(scan_class_dir(&class_dir).is_empty());
    }

    #[test]
    fn test_unreadable_class_dir_yields_empty_list() {
        let (root, _class_dir) = fake_sysfs();
        let devices = scan_class_dir(&root.path().join("does/not/exist"));
        assert!(devices.is_empty());
    }

    #[test]
    fn test_physical_device_assembled() {
        let (root, class_dir) = fake_sysfs();
        symlink("../../devices/virtual/net/lo", class_dir.join("lo")).unwrap();
        let device_dir = add_physical(root.path(), &class_dir, "fake0");
        write_attr(&device_dir, "address", "aa:bb:cc:dd:ee:ff");
        write_attr(&device_dir, "speed", "1000");
        fs::create_dir_all(device_dir.join("device")).unwrap();
        symlink(
            "../../../../../bus/pci/drivers/e1000e",
            device_dir.join("device/driver"),
        )
        .unwrap();

        let devices = scan_class_dir(&class_dir);
        assert_eq!(devices.len(), 1);

        let dev = &devices[0];
        assert_eq!(dev.name, "fake0");
        assert_eq!(dev.macaddress, "aa:bb:cc:dd:ee:ff");
        assert_eq!(dev.speed, 1000);
        assert_eq!(dev.driver, "e1000e");
        // not a real interface: no OS handle, no addresses, no capabilities
        assert_eq!(dev.mtu, 0);
        assert!(dev.ipaddress.is_empty());
        assert_eq!(dev.port, "");
    }

    #[test]
    fn test_absent_driver_link_leaves_driver_empty() {
        let (root, class_dir) = fake_sysfs();
        let device_dir = add_physical(root.path(), &class_dir, "fake1");
        write_attr(&device_dir, "address", "00:11:22:33:44:55");

        let devices = scan_class_dir(&class_dir);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].driver, "");
        assert_eq!(devices[0].macaddress, "00:11:22:33:44:55");
    }

    #[test]
    fn test_direct_speed_reading_wins() {
        let (_root, class_dir) = fake_sysfs();
        let speed_attr = class_dir.join("speed");
        fs::write(&speed_attr, "100\n").unwrap();

        // bitmask alone would classify as gigabit
        assert_eq!(resolve_speed(&speed_attr, 0x0002_0030), 100);
    }

    #[test]
    fn test_speed_falls_back_to_bitmask() {
        let (_root, class_dir) = fake_sysfs();
        let missing = class_dir.join("speed");
        assert_eq!(resolve_speed(&missing, 0x0002_0030), 1000);
        assert_eq!(resolve_speed(&missing, 0), 0);

        // link down: sysfs reports -1, bitmask still classifies
        fs::write(&missing, "-1\n").unwrap();
        assert_eq!(resolve_speed(&missing, 0x001c_1000), 10000);
    }

    #[test]
    fn test_empty_fields_omitted_from_json() {
        let dev = NetworkDevice {
            name: "fake0".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&dev).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "fake0" }));
    }
}
