//! Error types for hostinfo

use std::io;
use thiserror::Error;

/// Result type alias for hostinfo operations
pub type Result<T> = std::result::Result<T, HostInfoError>;

/// Error type for inventory collection.
///
/// Collectors use these internally; the public inventory surface is
/// best-effort and maps failures to empty/zero defaults instead of
/// propagating them.
#[derive(Error, Debug)]
pub enum HostInfoError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Device not found
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Unsupported platform
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// System error
    #[error("System error: {0}")]
    System(String),

    /// Nix error (Unix)
    #[cfg(unix)]
    #[error("Nix error: {0}")]
    Nix(#[from] nix::Error),
}
