//! Common file-reading utilities for sysfs/procfs attributes

use crate::error::{HostInfoError, Result};
use std::fs;
use std::path::Path;

/// Read file contents as string, trimming whitespace
pub fn read_file_string<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(fs::read_to_string(path)?.trim().to_string())
}

/// Read file and parse as u64
pub fn read_file_u64<P: AsRef<Path>>(path: P) -> Result<u64> {
    let content = read_file_string(path)?;
    content
        .parse()
        .map_err(|e| HostInfoError::Parse(format!("Failed to parse u64: {}", e)))
}

/// Read a sysfs attribute, returning an empty string on any failure.
///
/// Inventory collection is best-effort: an unreadable attribute means
/// "unknown", never an error.
pub fn slurp_attr<P: AsRef<Path>>(path: P) -> String {
    read_file_string(path).unwrap_or_default()
}

/// Read a sysfs attribute and parse it, `None` on any failure
pub fn read_attr_u64<P: AsRef<Path>>(path: P) -> Option<u64> {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

// skip_serializing_if helpers: zero means "unknown" and is omitted
pub(crate) fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

pub(crate) fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}
