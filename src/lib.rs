//! # hostinfo
//!
//! A Linux host hardware and software inventory library. hostinfo reads the
//! kernel's virtual filesystems (sysfs, procfs) and a handful of OS queries
//! to produce one serializable record of what a machine is: DMI identity,
//! CPU, memory, storage, and — the interesting part — physical network
//! devices with their driver, addresses, port media, and maximum link speed
//! probed over the ethtool ioctl interface.
//!
//! Collection is read-only and best-effort: a field that cannot be
//! determined is left empty/zero rather than failing the scan, so partial
//! inventory from a locked-down host is still inventory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hostinfo::HostInfo;
//!
//! let info = HostInfo::collect();
//! println!("{}", serde_json::to_string_pretty(&info).unwrap());
//! ```
//!
//! ## Network device discovery only
//!
//! ```no_run
//! for dev in hostinfo::network::scan() {
//!     println!(
//!         "{}: driver={} port={} speed={} Mb/s",
//!         dev.name, dev.driver, dev.port, dev.speed
//!     );
//! }
//! ```

pub mod cpu;
pub mod dmi;
pub mod error;
pub mod host;
pub mod memory;
pub mod network;
pub mod node;
pub mod os;
pub mod storage;
mod util;

pub use error::{HostInfoError, Result};
pub use host::HostInfo;
pub use network::NetworkDevice;
