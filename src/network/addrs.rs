//! OS-level interface resolution and address collection.
//!
//! Separate data source from sysfs: the interface handle comes from
//! `if_nametoindex` and the bound addresses from `getifaddrs`, so a device
//! visible in `/sys/class/net` but unknown to the stack still produces a
//! record with MTU 0 and no addresses.

#[cfg(unix)]
use nix::ifaddrs::getifaddrs;
#[cfg(unix)]
use nix::net::if_::if_nametoindex;

/// Resolve an interface name to its OS index, `None` if the stack does not
/// know the interface.
#[cfg(unix)]
pub fn resolve(ifname: &str) -> Option<u32> {
    if_nametoindex(ifname).ok()
}

#[cfg(not(unix))]
pub fn resolve(_ifname: &str) -> Option<u32> {
    None
}

/// Collect the bound IPv4/IPv6 addresses of an interface in CIDR form, in
/// the order the OS reports them. A query failure yields an empty list for
/// this interface only.
#[cfg(unix)]
pub fn addresses(ifname: &str) -> Vec<String> {
    let mut out = Vec::new();

    let addrs = match getifaddrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            log::debug!("{ifname}: getifaddrs failed: {e}");
            return out;
        }
    };

    for ifaddr in addrs {
        if ifaddr.interface_name != ifname {
            continue;
        }
        let Some(addr) = ifaddr.address else {
            continue;
        };

        if let Some(sin) = addr.as_sockaddr_in() {
            let prefix = ifaddr
                .netmask
                .as_ref()
                .and_then(|m| m.as_sockaddr_in())
                .map(|m| u32::from(m.ip()).count_ones())
                .unwrap_or(32);
            out.push(format!("{}/{}", sin.ip(), prefix));
        } else if let Some(sin6) = addr.as_sockaddr_in6() {
            let prefix = ifaddr
                .netmask
                .as_ref()
                .and_then(|m| m.as_sockaddr_in6())
                .map(|m| m.ip().octets().iter().map(|b| b.count_ones()).sum::<u32>())
                .unwrap_or(128);
            out.push(format!("{}/{}", sin6.ip(), prefix));
        }
    }

    out
}

#[cfg(not(unix))]
pub fn addresses(_ifname: &str) -> Vec<String> {
    Vec::new()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_interface() {
        assert!(resolve("hostinfo-does-not-exist0").is_none());
        assert!(addresses("hostinfo-does-not-exist0").is_empty());
    }

    #[test]
    fn test_addresses_are_cidr_form() {
        // Every reported binding carries a prefix length
        for addr in addresses("lo") {
            let (_, prefix) = addr.split_once('/').expect("address missing prefix");
            assert!(prefix.parse::<u8>().is_ok());
        }
    }
}
