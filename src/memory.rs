//! Memory inventory from `/proc/meminfo`

use serde::{Deserialize, Serialize};
use std::fs;

/// Memory inventory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Memory {
    /// Total usable memory in MB
    #[serde(default, skip_serializing_if = "crate::util::is_zero_u64")]
    pub size: u64,
}

pub fn memory() -> Memory {
    let content = fs::read_to_string("/proc/meminfo").unwrap_or_default();
    Memory {
        size: parse_meminfo_total(&content) / 1024,
    }
}

/// Total memory in KB from the MemTotal line, 0 if absent.
fn parse_meminfo_total(content: &str) -> u64 {
    for line in content.lines() {
        let Some(rest) = line.strip_prefix("MemTotal:") else {
            continue;
        };
        return rest
            .split_whitespace()
            .next()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
    }
    0
}
