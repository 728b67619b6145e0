//! DMI/SMBIOS identity from `/sys/class/dmi/id`

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::util::slurp_attr;

const SYS_DMI_ID: &str = "/sys/class/dmi/id";

/// Product (system) identity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub serial: String,
}

/// Mainboard identity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub serial: String,
}

/// Chassis identity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chassis {
    #[serde(default, rename = "type", skip_serializing_if = "crate::util::is_zero_u32")]
    pub chassis_type: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub serial: String,
}

/// BIOS identity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bios {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
}

pub fn product() -> Product {
    product_from(Path::new(SYS_DMI_ID))
}

pub fn board() -> Board {
    board_from(Path::new(SYS_DMI_ID))
}

pub fn chassis() -> Chassis {
    chassis_from(Path::new(SYS_DMI_ID))
}

pub fn bios() -> Bios {
    bios_from(Path::new(SYS_DMI_ID))
}

fn product_from(dmi: &Path) -> Product {
    Product {
        name: slurp_attr(dmi.join("product_name")),
        vendor: slurp_attr(dmi.join("sys_vendor")),
        version: slurp_attr(dmi.join("product_version")),
        serial: slurp_attr(dmi.join("product_serial")),
    }
}

fn board_from(dmi: &Path) -> Board {
    Board {
        name: slurp_attr(dmi.join("board_name")),
        vendor: slurp_attr(dmi.join("board_vendor")),
        version: slurp_attr(dmi.join("board_version")),
        serial: slurp_attr(dmi.join("board_serial")),
    }
}

fn chassis_from(dmi: &Path) -> Chassis {
    Chassis {
        chassis_type: crate::util::read_attr_u64(dmi.join("chassis_type")).unwrap_or(0) as u32,
        vendor: slurp_attr(dmi.join("chassis_vendor")),
        version: slurp_attr(dmi.join("chassis_version")),
        serial: slurp_attr(dmi.join("chassis_serial")),
    }
}

fn bios_from(dmi: &Path) -> Bios {
    Bios {
        vendor: slurp_attr(dmi.join("bios_vendor")),
        version: slurp_attr(dmi.join("bios_version")),
        date: slurp_attr(dmi.join("bios_date")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_attributes_read_from_dmi_dir() {
        let dmi = TempDir::new().unwrap();
        fs::write(dmi.path().join("product_name"), "PowerEdge R640\n").unwrap();
        fs::write(dmi.path().join("sys_vendor"), "Dell Inc.\n").unwrap();
        fs::write(dmi.path().join("chassis_type"), "23\n").unwrap();

        let product = product_from(dmi.path());
        assert_eq!(product.name, "PowerEdge R640");
        assert_eq!(product.vendor, "Dell Inc.");
        // unreadable attributes stay empty
        assert_eq!(product.serial, "");

        assert_eq!(chassis_from(dmi.path()).chassis_type, 23);
    }

    #[test]
    fn test_missing_dmi_dir_yields_defaults() {
        let bios = bios_from(Path::new("/nonexistent/dmi"));
        assert_eq!(bios.vendor, "");
        assert_eq!(bios.version, "");
    }
}
