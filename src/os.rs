//! OS release and kernel version detection

use serde::{Deserialize, Serialize};
use std::fs;

use crate::util::slurp_attr;

/// OS release information from `/etc/os-release`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Os {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub release: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub architecture: String,
}

/// Kernel identification
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kernel {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub release: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub architecture: String,
}

pub fn os() -> Os {
    let content = fs::read_to_string("/etc/os-release").unwrap_or_default();
    let mut os = parse_os_release(&content);
    os.architecture = std::env::consts::ARCH.to_string();
    os
}

pub fn kernel() -> Kernel {
    Kernel {
        release: slurp_attr("/proc/sys/kernel/osrelease"),
        version: slurp_attr("/proc/sys/kernel/version"),
        architecture: std::env::consts::ARCH.to_string(),
    }
}

/// Parse os-release key=value lines; values may be double-quoted.
fn parse_os_release(content: &str) -> Os {
    let mut os = Os::default();

    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_string();
        match key.trim() {
            "NAME" => os.name = value,
            "ID" => os.vendor = value,
            "VERSION_ID" => os.version = value,
            "PRETTY_NAME" => os.release = value,
            _ => {}
        }
    }

    os
}
