//! IPv4 address and CIDR notation utilities.
//!
//! Provides the [`Ipv4`] struct for an address with a prefix length, plus the
//! bit arithmetic behind the subnet calculator (masks, network, broadcast and
//! neighbouring subnets).

use crate::error::InvalidInputError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

lazy_static! {
    static ref RE_ADDR: Regex =
        Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").expect("Invalid Regex?");
    static ref RE_PREFIX: Regex = Regex::new(r"^\d{1,3}$").expect("Invalid Regex?");
}

/// Parse a dotted-decimal address into its 32-bit value.
///
/// Octet 1 lands in the highest 8 bits.
///
/// # Examples
/// ```
/// use subnet_calc::models::parse_ipv4_addr;
/// assert_eq!(parse_ipv4_addr("192.168.1.0").unwrap(), 0xC0A80100);
/// ```
pub fn parse_ipv4_addr(addr: &str) -> Result<u32, InvalidInputError> {
    let caps = RE_ADDR
        .captures(addr)
        .ok_or_else(|| InvalidInputError::Malformed(addr.to_string()))?;

    let mut bits: u32 = 0;
    for octet in caps.iter().skip(1).flatten() {
        let value: u16 = octet
            .as_str()
            .parse()
            .map_err(|_| InvalidInputError::Malformed(addr.to_string()))?;
        if value > 255 {
            return Err(InvalidInputError::OctetOutOfRange(value));
        }
        bits = (bits << 8) | u32::from(value);
    }
    Ok(bits)
}

/// Render a 32-bit value as a dotted-decimal address.
pub fn format_ipv4_addr(bits: u32) -> String {
    Ipv4Addr::from(bits).to_string()
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_calc::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, InvalidInputError> {
    if len > MAX_LENGTH {
        Err(InvalidInputError::PrefixOutOfRange(len.into()))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Prefix length of a dotted netmask such as `255.255.240.0`.
///
/// Only contiguous masks (leading ones, trailing zeros) are accepted.
pub fn mask_from_netmask(netmask: Ipv4Addr) -> Result<u8, InvalidInputError> {
    let bits = u32::from(netmask);
    let len = bits.leading_ones() as u8;
    if get_cidr_mask(len)? != bits {
        return Err(InvalidInputError::InvalidNetmask(netmask.to_string()));
    }
    Ok(len)
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, InvalidInputError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, InvalidInputError> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    let broadcast_bits = network_bits | (!mask);
    Ok(Ipv4Addr::from(broadcast_bits))
}

/// Number of addresses in a subnet, `2^(32-len)`.
pub fn num_hosts(len: u8) -> Result<u64, InvalidInputError> {
    if len > MAX_LENGTH {
        return Err(InvalidInputError::PrefixOutOfRange(len.into()));
    }
    Ok(1u64 << (MAX_LENGTH - len))
}

/// Number of usable host addresses.
///
/// Network and broadcast are excluded up to /30. A /31 is a point-to-point
/// link with both addresses usable (RFC 3021), a /32 is a single host.
pub fn num_usable_hosts(len: u8) -> Result<u64, InvalidInputError> {
    match len {
        31 => Ok(2),
        32 => Ok(1),
        _ => Ok(num_hosts(len)? - 2),
    }
}

/// Returns the IP address following the given subnet.
pub fn ip_after_subnet(addr: Ipv4Addr, cidr: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let subnet_size = num_hosts(cidr)?;
    let network_bits = u32::from(addr) & get_cidr_mask(cidr)?;
    let next_subnet_bits = u64::from(network_bits) + subnet_size;
    let next_subnet_bits = u32::try_from(next_subnet_bits)
        .map_err(|_| format!("Next subnet after {addr}/{cidr} overflowed"))?;
    Ok(Ipv4Addr::from(next_subnet_bits))
}

/// Returns the network address of the same-size subnet before the given one.
pub fn ip_before_subnet(addr: Ipv4Addr, cidr: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let subnet_size = num_hosts(cidr)?;
    let network_bits = u32::from(addr) & get_cidr_mask(cidr)?;
    let prev_subnet_bits = u64::from(network_bits)
        .checked_sub(subnet_size)
        .ok_or_else(|| format!("Previous subnet before {addr}/{cidr} underflowed"))?;
    // Fits, it is below network_bits.
    Ok(Ipv4Addr::from(prev_subnet_bits as u32))
}

/// Calculate the next subnet after the given [`Ipv4`] subnet.
///
/// If `mask` is provided, the next subnet will use that mask size.
pub fn next_subnet_ipv4(ipv4: Ipv4, mask: Option<u8>) -> Result<Ipv4, Box<dyn Error>> {
    let current_mask = ipv4.mask;
    let new_mask = mask.unwrap_or(current_mask);
    if new_mask <= current_mask {
        // eq or larger subnet (smaller mask)
        let next_subnet = ip_after_subnet(ipv4.addr, new_mask)?;
        Ok(Ipv4 {
            addr: next_subnet,
            mask: new_mask,
        })
    } else {
        // smaller subnet
        let current_broadcast = broadcast_addr(ipv4.addr, current_mask)?;
        let next_subnet = ip_after_subnet(current_broadcast, new_mask)?;
        Ok(Ipv4 {
            addr: next_subnet,
            mask: new_mask,
        })
    }
}

/// Calculate the same-size subnet right before the given [`Ipv4`] subnet.
pub fn previous_subnet_ipv4(ipv4: Ipv4) -> Result<Ipv4, Box<dyn Error>> {
    let prev_subnet = ip_before_subnet(ipv4.addr, ipv4.mask)?;
    Ok(Ipv4 {
        addr: prev_subnet,
        mask: ipv4.mask,
    })
}

/// IPv4 address with CIDR notation support.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address, host bits may be set.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.mask);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g. "10.0.0.0/24").
    ///
    /// The part after `/` may also be a dotted netmask ("10.0.0.0/255.0.0.0").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, InvalidInputError> {
        let addr_cidr = addr_cidr.trim();
        let (addr_part, prefix_part) = addr_cidr
            .split_once('/')
            .ok_or_else(|| InvalidInputError::Malformed(addr_cidr.to_string()))?;

        let addr = Ipv4Addr::from(parse_ipv4_addr(addr_part)?);

        let mask = if prefix_part.contains('.') {
            mask_from_netmask(Ipv4Addr::from(parse_ipv4_addr(prefix_part)?))?
        } else if RE_PREFIX.is_match(prefix_part) {
            let len: u16 = prefix_part
                .parse()
                .map_err(|_| InvalidInputError::Malformed(addr_cidr.to_string()))?;
            if len > MAX_LENGTH.into() {
                return Err(InvalidInputError::PrefixOutOfRange(len));
            }
            len as u8
        } else {
            return Err(InvalidInputError::Malformed(addr_cidr.to_string()));
        };

        Ok(Ipv4 { addr, mask })
    }

    /// Same prefix with the host bits cleared.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// Get the broadcast address for this subnet.
    pub fn broadcast(&self) -> Result<Ipv4, InvalidInputError> {
        let broadcast = broadcast_addr(self.addr, self.mask)?;
        Ok(Ipv4 {
            addr: broadcast,
            mask: self.mask,
        })
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        cut_addr(self.addr, self.mask.min(MAX_LENGTH)).unwrap_or(self.addr)
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.mask.min(MAX_LENGTH)).unwrap_or(self.addr)
    }

    /// True when `addr` falls inside this subnet.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.lo() <= addr && addr <= self.hi()
    }
}

impl FromStr for Ipv4 {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(31).unwrap(), 0xFFFFFFFE);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert_eq!(
            get_cidr_mask(33).unwrap_err(),
            InvalidInputError::PrefixOutOfRange(33)
        );
    }

    #[test]
    fn test_parse_ipv4_addr() {
        assert_eq!(parse_ipv4_addr("0.0.0.0").unwrap(), 0);
        assert_eq!(parse_ipv4_addr("255.255.255.255").unwrap(), u32::MAX);
        assert_eq!(parse_ipv4_addr("10.0.0.5").unwrap(), 0x0A000005);
        assert_eq!(
            parse_ipv4_addr("256.1.1.1").unwrap_err(),
            InvalidInputError::OctetOutOfRange(256)
        );
        assert!(matches!(
            parse_ipv4_addr("10.0.0"),
            Err(InvalidInputError::Malformed(_))
        ));
        assert!(matches!(
            parse_ipv4_addr("1000.0.0.1"),
            Err(InvalidInputError::Malformed(_))
        ));
        assert!(matches!(
            parse_ipv4_addr("a.b.c.d"),
            Err(InvalidInputError::Malformed(_))
        ));
    }

    #[test]
    fn test_format_parse_round_trip() {
        for bits in [0u32, 1, 0x0A000000, 0xC0A801FF, 0xFFFFFFFE, u32::MAX] {
            assert_eq!(parse_ipv4_addr(&format_ipv4_addr(bits)).unwrap(), bits);
        }
    }

    #[test]
    fn test_mask_from_netmask() {
        assert_eq!(mask_from_netmask(Ipv4Addr::new(255, 255, 255, 0)).unwrap(), 24);
        assert_eq!(mask_from_netmask(Ipv4Addr::new(255, 255, 240, 0)).unwrap(), 20);
        assert_eq!(mask_from_netmask(Ipv4Addr::new(0, 0, 0, 0)).unwrap(), 0);
        assert_eq!(
            mask_from_netmask(Ipv4Addr::new(255, 255, 255, 255)).unwrap(),
            32
        );
        assert!(mask_from_netmask(Ipv4Addr::new(255, 0, 255, 0)).is_err());
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 8).unwrap(), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(cut_addr(ip, 0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(cut_addr(ip, 32).unwrap(), Ipv4Addr::new(192, 168, 1, 42));
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_lo_hi_follow_cut_and_broadcast() {
        let addr = Ipv4Addr::new(172, 31, 4, 9);
        for mask in 0..=MAX_LENGTH {
            let ip = Ipv4 { addr, mask };
            assert_eq!(ip.lo(), cut_addr(addr, mask).unwrap());
            assert_eq!(ip.hi(), broadcast_addr(addr, mask).unwrap());
            assert_eq!(ip.network().addr, ip.lo());
        }
        // Out-of-range masks behave as /32.
        let ip = Ipv4 { addr, mask: 40 };
        assert_eq!(ip.lo(), addr);
        assert_eq!(ip.hi(), addr);
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 16).unwrap(),
            Ipv4Addr::new(192, 168, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 0)
        );
        assert_eq!(
            broadcast_addr(ip, 0).unwrap(),
            Ipv4Addr::new(255, 255, 255, 255)
        );
    }

    #[test]
    fn test_num_hosts() {
        assert_eq!(num_hosts(0).unwrap(), 4294967296);
        assert_eq!(num_hosts(8).unwrap(), 16777216);
        assert_eq!(num_hosts(24).unwrap(), 256);
        assert_eq!(num_hosts(32).unwrap(), 1);
        assert!(num_hosts(33).is_err());

        assert_eq!(num_usable_hosts(0).unwrap(), 4294967294);
        assert_eq!(num_usable_hosts(24).unwrap(), 254);
        assert_eq!(num_usable_hosts(30).unwrap(), 2);
        assert_eq!(num_usable_hosts(31).unwrap(), 2);
        assert_eq!(num_usable_hosts(32).unwrap(), 1);
        assert!(num_usable_hosts(40).is_err());
    }

    #[test]
    fn test_ip_after_subnet() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            ip_after_subnet(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 2, 0)
        );
        assert_eq!(
            ip_after_subnet(ip, 16).unwrap(),
            Ipv4Addr::new(192, 169, 0, 0)
        );
        assert_eq!(
            ip_after_subnet(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 1)
        );
        assert!(ip_after_subnet(Ipv4Addr::new(255, 255, 255, 255), 24).is_err());
        assert!(ip_after_subnet(Ipv4Addr::new(10, 0, 0, 0), 0).is_err());
    }

    #[test]
    fn test_ip_before_subnet() {
        let ip = Ipv4Addr::new(192, 168, 1, 77);
        assert_eq!(
            ip_before_subnet(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 0, 0)
        );
        assert_eq!(
            ip_before_subnet(ip, 8).unwrap(),
            Ipv4Addr::new(191, 0, 0, 0)
        );
        assert!(ip_before_subnet(Ipv4Addr::new(0, 0, 0, 0), 8).is_err());
        assert!(ip_before_subnet(Ipv4Addr::new(1, 2, 3, 4), 0).is_err());
    }

    #[test]
    fn test_next_subnet_ipv4() {
        let ip1 = Ipv4::new("10.1.1.0/28").unwrap();
        assert_eq!(
            next_subnet_ipv4(ip1, None).unwrap(),
            Ipv4::new("10.1.1.16/28").unwrap()
        );

        let ipv4 = Ipv4::new("192.168.1.0/8").unwrap();
        assert_eq!(
            ipv4.broadcast().unwrap(),
            Ipv4::new("192.255.255.255/8").unwrap()
        );
        assert_eq!(
            next_subnet_ipv4(ipv4, None).unwrap(),
            Ipv4::new("193.0.0.0/8").unwrap()
        );

        let ip3 = Ipv4::new("10.2.3.4/16").unwrap();
        assert_eq!(
            next_subnet_ipv4(ip3, Some(24)).unwrap(),
            Ipv4::new("10.3.0.0/24").unwrap()
        );

        let ip5 = Ipv4::new("10.18.126.0/24").unwrap();
        let next_ip5 = next_subnet_ipv4(ip5, Some(28)).unwrap();
        assert_eq!(next_ip5, Ipv4::new("10.18.127.0/28").unwrap());
    }

    #[test]
    fn test_previous_subnet_ipv4() {
        let ip = Ipv4::new("192.168.1.0/24").unwrap();
        assert_eq!(
            previous_subnet_ipv4(ip).unwrap(),
            Ipv4::new("192.168.0.0/24").unwrap()
        );
        let ip = Ipv4::new("0.0.0.0/8").unwrap();
        assert!(previous_subnet_ipv4(ip).is_err());
    }

    #[test]
    fn test_ipv4_new() {
        let ip = Ipv4::new(" 10.0.0.5/8 ").unwrap();
        assert_eq!(ip.addr, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(ip.mask, 8);
        assert_eq!(ip.network(), Ipv4::new("10.0.0.0/8").unwrap());

        let ip = Ipv4::new("10.1.0.0/255.255.0.0").unwrap();
        assert_eq!(ip.mask, 16);
        assert_eq!(ip.to_string(), "10.1.0.0/16");

        assert_eq!(
            Ipv4::new("256.1.1.1/24").unwrap_err(),
            InvalidInputError::OctetOutOfRange(256)
        );
        assert_eq!(
            Ipv4::new("192.168.1.0/33").unwrap_err(),
            InvalidInputError::PrefixOutOfRange(33)
        );
        assert!(matches!(
            Ipv4::new("192.168.1.0"),
            Err(InvalidInputError::Malformed(_))
        ));
        assert!(matches!(
            Ipv4::new("192.168.1.0/"),
            Err(InvalidInputError::Malformed(_))
        ));
        assert!(matches!(
            Ipv4::new("192.168.1.0/-1"),
            Err(InvalidInputError::Malformed(_))
        ));
        assert!(matches!(
            Ipv4::new("10.0.0.0/255.0.255.0"),
            Err(InvalidInputError::InvalidNetmask(_))
        ));
        assert!("172.16.0.0/12".parse::<Ipv4>().is_ok());
    }

    #[test]
    fn test_ipv4_serde() {
        let ip = Ipv4::new("10.0.0.0/24").unwrap();
        let json = serde_json::to_string(&ip).unwrap();
        assert_eq!(json, "\"10.0.0.0/24\"");
        let back: Ipv4 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ip);
        assert!(serde_json::from_str::<Ipv4>("\"10.0.0.0/40\"").is_err());
    }

    #[test]
    fn test_ip4_cmp_overlap() {
        let ip1 = Ipv4::new("10.0.10.0/24").unwrap();
        let ip2 = Ipv4::new("10.0.0.0/8").unwrap();
        let ip3 = Ipv4::new("10.0.10.64/26").unwrap();

        assert!(ip1 > ip2);
        assert!(ip1 < ip3);
        assert!(ip2.lo() < ip1.lo());
        assert!(ip2.hi() > ip3.hi());
        assert_eq!(ip2.hi(), Ipv4Addr::new(10, 255, 255, 255));
        assert!(ip2.contains(ip3.addr));
        assert!(!ip3.contains(ip1.addr));
    }
}
