//! CPU inventory from `/proc/cpuinfo`

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;

/// CPU inventory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cpu {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
    /// Clock in MHz
    #[serde(default, skip_serializing_if = "crate::util::is_zero_u32")]
    pub speed: u32,
    /// Cache size in KB
    #[serde(default, skip_serializing_if = "crate::util::is_zero_u32")]
    pub cache: u32,
    /// Physical packages
    #[serde(default, skip_serializing_if = "crate::util::is_zero_u32")]
    pub cpus: u32,
    /// Cores per package
    #[serde(default, skip_serializing_if = "crate::util::is_zero_u32")]
    pub cores: u32,
    /// Logical processors
    #[serde(default, skip_serializing_if = "crate::util::is_zero_u32")]
    pub threads: u32,
}

pub fn cpu() -> Cpu {
    let content = fs::read_to_string("/proc/cpuinfo").unwrap_or_default();
    parse_cpuinfo(&content)
}

fn parse_cpuinfo(content: &str) -> Cpu {
    let mut cpu = Cpu::default();
    let mut packages = HashSet::new();

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "processor" => cpu.threads += 1,
            "vendor_id" if cpu.vendor.is_empty() => cpu.vendor = value.to_string(),
            "model name" if cpu.model.is_empty() => cpu.model = value.to_string(),
            "cpu MHz" if cpu.speed == 0 => {
                cpu.speed = value.parse::<f64>().unwrap_or(0.0) as u32;
            }
            "cache size" if cpu.cache == 0 => {
                // "8192 KB"
                cpu.cache = value
                    .split_whitespace()
                    .next()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
            }
            "physical id" => {
                packages.insert(value.to_string());
            }
            "cpu cores" if cpu.cores == 0 => {
                cpu.cores = value.parse().unwrap_or(0);
            }
            _ => {}
        }
    }

    cpu.cpus = packages.len() as u32;
    cpu
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
processor\t: 0
vendor_id\t: GenuineIntel
model name\t: Intel(R) Xeon(R) CPU E5-2670 0 @ 2.60GHz
cpu MHz\t\t: 2600.038
cache size\t: 20480 KB
physical id\t: 0
cpu cores\t: 8

processor\t: 1
vendor_id\t: GenuineIntel
model name\t: Intel(R) Xeon(R) CPU E5-2670 0 @ 2.60GHz
cpu MHz\t\t: 2600.038
cache size\t: 20480 KB
physical id\t: 1
cpu cores\t: 8
";

    #[test]
    fn test_parse_cpuinfo() {
        let cpu = parse_cpuinfo(SAMPLE);
        assert_eq!(cpu.vendor, "GenuineIntel");
        assert_eq!(cpu.model, "Intel(R) Xeon(R) CPU E5-2670 0 @ 2.60GHz");
        assert_eq!(cpu.speed, 2600);
        assert_eq!(cpu.cache, 20480);
        assert_eq!(cpu.cpus, 2);
        assert_eq!(cpu.cores, 8);
        assert_eq!(cpu.threads, 2);
    }

    #[test]
    fn test_parse_empty_cpuinfo() {
        let cpu = parse_cpuinfo("");
        assert_eq!(cpu.threads, 0);
        assert_eq!(cpu.cpus, 0);
    }
}
