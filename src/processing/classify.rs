//! Special-purpose address classification.
//!
//! Ranges follow the IANA IPv4 special-purpose registry. A network carries a
//! flag only when its network and broadcast address both do.

use crate::models::{AddressClass, Ipv4};
use std::net::Ipv4Addr;

const fn net(a: u8, b: u8, c: u8, d: u8, mask: u8) -> Ipv4 {
    Ipv4 {
        addr: Ipv4Addr::new(a, b, c, d),
        mask,
    }
}

const PRIVATE_NETWORKS: [Ipv4; 14] = [
    net(0, 0, 0, 0, 8),
    net(10, 0, 0, 0, 8),
    net(127, 0, 0, 0, 8),
    net(169, 254, 0, 0, 16),
    net(172, 16, 0, 0, 12),
    net(192, 0, 0, 0, 29),
    net(192, 0, 0, 170, 31),
    net(192, 0, 2, 0, 24),
    net(192, 168, 0, 0, 16),
    net(198, 18, 0, 0, 15),
    net(198, 51, 100, 0, 24),
    net(203, 0, 113, 0, 24),
    net(240, 0, 0, 0, 4),
    net(255, 255, 255, 255, 32),
];

// Globally reachable despite sitting inside 192.0.0.0/29.
const PRIVATE_EXCEPTIONS: [Ipv4; 2] = [net(192, 0, 0, 9, 32), net(192, 0, 0, 10, 32)];

const SHARED_ADDRESS_SPACE: Ipv4 = net(100, 64, 0, 0, 10);
const LINK_LOCAL: Ipv4 = net(169, 254, 0, 0, 16);
const MULTICAST: Ipv4 = net(224, 0, 0, 0, 4);
const LOOPBACK: Ipv4 = net(127, 0, 0, 0, 8);
const RESERVED: Ipv4 = net(240, 0, 0, 0, 4);

/// Both ends inside one private block, neither end an exception.
fn is_private_range(lo: Ipv4Addr, hi: Ipv4Addr) -> bool {
    PRIVATE_NETWORKS
        .iter()
        .any(|n| n.contains(lo) && n.contains(hi))
        && !PRIVATE_EXCEPTIONS
            .iter()
            .any(|n| n.contains(lo) || n.contains(hi))
}

/// Classify a network by its lowest and highest address.
pub fn classify(network: Ipv4) -> AddressClass {
    let (lo, hi) = (network.lo(), network.hi());
    let both = |test: &dyn Fn(Ipv4Addr) -> bool| test(lo) && test(hi);

    let is_private = is_private_range(lo, hi);
    let is_shared = both(&|a| SHARED_ADDRESS_SPACE.contains(a));

    AddressClass {
        is_private,
        is_global: !is_shared && !is_private,
        is_link_local: both(&|a| LINK_LOCAL.contains(a)),
        is_multicast: both(&|a| MULTICAST.contains(a)),
        is_loopback: both(&|a| LOOPBACK.contains(a)),
        is_reserved: both(&|a| RESERVED.contains(a)),
        is_unspecified: both(&|a| a == Ipv4Addr::UNSPECIFIED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_of(cidr: &str) -> AddressClass {
        classify(Ipv4::new(cidr).unwrap())
    }

    #[test]
    fn test_classify_private() {
        let class = class_of("10.0.0.0/8");
        assert!(class.is_private);
        assert!(!class.is_global);
        assert!(!class.is_loopback);

        assert!(class_of("192.168.1.0/24").is_private);
        assert!(class_of("172.16.0.0/12").is_private);
        // Straddles 172.16.0.0/12 so the broadcast is outside.
        assert!(!class_of("172.0.0.0/8").is_private);
    }

    #[test]
    fn test_classify_spanning_private_blocks() {
        // Ends sit in 0.0.0.0/8 and 255.255.255.255/32.
        let class = class_of("0.0.0.0/0");
        assert!(!class.is_private);
        assert!(class.is_global);

        // Ends sit in 0.0.0.0/8 and 127.0.0.0/8.
        let class = class_of("0.0.0.0/1");
        assert!(!class.is_private);
        assert!(class.is_global);
    }

    #[test]
    fn test_classify_global() {
        let class = class_of("8.8.8.8/32");
        assert!(class.is_global);
        assert!(!class.is_private);
        assert!(class_of("192.0.0.9/32").is_global);
    }

    #[test]
    fn test_classify_shared_address_space() {
        let class = class_of("100.64.0.0/10");
        assert!(!class.is_private);
        assert!(!class.is_global);
    }

    #[test]
    fn test_classify_special() {
        let class = class_of("224.0.0.0/4");
        assert!(class.is_multicast);
        assert!(!class.is_private);

        let class = class_of("127.0.0.0/8");
        assert!(class.is_loopback);
        assert!(class.is_private);

        let class = class_of("169.254.10.0/24");
        assert!(class.is_link_local);

        let class = class_of("240.0.0.0/4");
        assert!(class.is_reserved);

        assert!(class_of("0.0.0.0/32").is_unspecified);
        assert!(!class_of("0.0.0.0/8").is_unspecified);
    }
}
