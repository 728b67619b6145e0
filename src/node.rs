//! Node identity (hostname, machine ID)

use serde::{Deserialize, Serialize};

use crate::util::slurp_attr;

/// Node identity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub machineid: String,
}

pub fn node() -> Node {
    Node {
        hostname: slurp_attr("/proc/sys/kernel/hostname"),
        machineid: slurp_attr("/etc/machine-id"),
    }
}
