//! Link capability probing via the ethtool ioctl interface.
//!
//! A short-lived `AF_INET` datagram socket is opened purely as a handle for
//! issuing `SIOCETHTOOL`; no data is ever transmitted. The kernel fills in a
//! fixed-layout `ethtool_cmd` structure whose `supported` bitmask describes
//! the link modes and port media the device can use. Decoding that bitmask
//! into port-medium tokens and a maximum speed is done by the pure functions
//! below so it stays testable without a live interface.

/// `ETHTOOL_GSET` from `linux/ethtool.h`
const ETHTOOL_GSET: u32 = 0x1;

/// `SIOCETHTOOL` from `linux/sockios.h`
#[cfg(target_os = "linux")]
const SIOCETHTOOL: libc::c_ulong = 0x8946;

/// `IFNAMSIZ` from `linux/if.h`
const IFNAMSIZ: usize = 16;

/// Full size of `struct ethtool_cmd` from `linux/ethtool.h`. The kernel
/// copies the whole structure on `ETHTOOL_GSET`, so the request buffer must
/// be at least this large even though only `supported` is read back.
const ETHTOOL_CMD_LEN: usize = 44;

/// `struct ethtool_cmd`: command code, the kernel-populated capability
/// bitmask, and the remainder of the fixed layout (written by the kernel,
/// never read here).
#[repr(C)]
struct EthtoolCmd {
    cmd: u32,
    supported: u32,
    rest: [u8; ETHTOOL_CMD_LEN - 8],
}

const _: () = assert!(std::mem::size_of::<EthtoolCmd>() == ETHTOOL_CMD_LEN);

impl EthtoolCmd {
    fn new() -> Self {
        Self {
            cmd: ETHTOOL_GSET,
            supported: 0,
            rest: [0; ETHTOOL_CMD_LEN - 8],
        }
    }
}

/// `struct ifreq`: null-padded interface name plus a data pointer. The
/// pointer field is `usize` so its width always matches the host word size.
#[repr(C)]
struct IfReq {
    name: [u8; IFNAMSIZ],
    data: usize,
}

const _: () = assert!(std::mem::size_of::<IfReq>() == IFNAMSIZ + std::mem::size_of::<usize>());

impl IfReq {
    fn new(ifname: &str) -> Self {
        let mut ifr = IfReq {
            name: [0; IFNAMSIZ],
            data: 0,
        };
        let bytes = ifname.as_bytes();
        let len = bytes.len().min(IFNAMSIZ - 1);
        ifr.name[..len].copy_from_slice(&bytes[..len]);
        ifr
    }
}

/// Datagram socket used only as an ioctl handle; closed on drop so every
/// exit path releases the fd.
#[cfg(target_os = "linux")]
struct IoctlSocket(std::os::fd::RawFd);

#[cfg(target_os = "linux")]
impl IoctlSocket {
    fn open() -> Option<Self> {
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) };
        if fd < 0 {
            return None;
        }
        Some(Self(fd))
    }
}

#[cfg(target_os = "linux")]
impl Drop for IoctlSocket {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.0);
        }
    }
}

/// Query the supported-link-modes bitmask for a named interface.
///
/// Returns `0` ("unknown") on any failure: socket open, ioctl error, or an
/// interface that does not implement ethtool.
#[cfg(target_os = "linux")]
pub fn supported(ifname: &str) -> u32 {
    let Some(sock) = IoctlSocket::open() else {
        log::debug!("{ifname}: failed to open ethtool ioctl socket");
        return 0;
    };

    let mut ecmd = EthtoolCmd::new();
    let mut ifr = IfReq::new(ifname);
    ifr.data = &mut ecmd as *mut EthtoolCmd as usize;

    // SAFETY: ifr points to a valid IfReq whose data field holds the address
    // of a live EthtoolCmd of the kernel's expected size for the lifetime of
    // the call.
    let ret = unsafe { libc::ioctl(sock.0, SIOCETHTOOL, &mut ifr as *mut IfReq) };
    if ret < 0 {
        log::debug!("{ifname}: SIOCETHTOOL failed, treating capabilities as unknown");
        return 0;
    }

    ecmd.supported
}

#[cfg(not(target_os = "linux"))]
pub fn supported(_ifname: &str) -> u32 {
    0
}

/// Port-medium bits of the capability bitmask, in kernel bit order.
/// The bit assignments are not lexically sorted; this order is contractual.
const PORT_MEDIA: [(u32, &str); 5] = [
    (1 << 7, "tp"),
    (1 << 8, "aui"),
    (1 << 9, "mii"),
    (1 << 10, "fibre"),
    (1 << 11, "bnc"),
];

/// Decode the supported port media into a slash-joined token list.
///
/// Empty string when none of the medium bits are set.
pub fn port_types(supported: u32) -> String {
    let mut tokens = Vec::new();
    for (bit, name) in PORT_MEDIA {
        if supported & bit != 0 {
            tokens.push(name);
        }
    }
    tokens.join("/")
}

/// Bit-range classes of the capability bitmask, highest capability first.
/// Evaluated top-down, first intersection wins; the kernel's mask ranges are
/// not monotonic in bit position, so the order must not be rearranged.
const SPEED_CLASSES: [(u32, u64); 8] = [
    (0x7800_0000, 56000),
    (0x0780_0000, 40000),
    (0x0060_0000, 20000),
    (0x001c_1000, 10000),
    (0x0000_8000, 2500),
    (0x0002_0030, 1000),
    (0x0000_000c, 100),
    (0x0000_0003, 10),
];

/// Classify the capability bitmask into a maximum speed in Mb/s.
///
/// `0` when no class matches. Used only as a fallback when the sysfs `speed`
/// attribute has no usable reading.
pub fn max_speed(supported: u32) -> u64 {
    for (mask, speed) in SPEED_CLASSES {
        if supported & mask != 0 {
            return speed;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_types_single_media() {
        assert_eq!(port_types(1 << 7), "tp");
        assert_eq!(port_types(1 << 8), "aui");
        assert_eq!(port_types(1 << 9), "mii");
        assert_eq!(port_types(1 << 10), "fibre");
        assert_eq!(port_types(1 << 11), "bnc");
    }

    #[test]
    fn test_port_types_ordering() {
        // Tokens always come out in kernel bit order, never duplicated
        assert_eq!(port_types((1 << 11) | (1 << 7)), "tp/bnc");
        assert_eq!(port_types((1 << 10) | (1 << 9) | (1 << 7)), "tp/mii/fibre");
        assert_eq!(port_types(0xffff_ffff), "tp/aui/mii/fibre/bnc");
    }

    #[test]
    fn test_port_types_outside_media_range() {
        assert_eq!(port_types(0), "");
        // bit 5 is a link-mode bit, not a medium bit
        assert_eq!(port_types(0x0000_0020), "");
        assert_eq!(port_types(1 << 12), "");
    }

    #[test]
    fn test_max_speed_classes() {
        assert_eq!(max_speed(0x0002_0030), 1000);
        assert_eq!(max_speed(0x001c_1000), 10000);
        assert_eq!(max_speed(0x7800_0000), 56000);
        assert_eq!(max_speed(0x0000_8000), 2500);
        assert_eq!(max_speed(0x0000_0003), 10);
        assert_eq!(max_speed(0), 0);
    }

    #[test]
    fn test_max_speed_first_match_wins() {
        // A mask intersecting both the 10G and 1G classes classifies as 10G
        assert_eq!(max_speed(0x001c_1000 | 0x0002_0030), 10000);
    }

    #[test]
    fn test_probe_unknown_interface_is_zero() {
        assert_eq!(supported("hostinfo-does-not-exist0"), 0);
    }
}
