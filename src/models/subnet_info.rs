//! Computed subnet result record.

use super::Ipv4;
use serde::{Deserialize, Serialize};

/// Special-purpose flags of a network.
///
/// A flag is set only when both the network and broadcast address carry it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressClass {
    pub is_private: bool,
    pub is_global: bool,
    pub is_link_local: bool,
    pub is_multicast: bool,
    pub is_loopback: bool,
    pub is_reserved: bool,
    pub is_unspecified: bool,
}

impl AddressClass {
    /// Names of the flags that are set, in declaration order.
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.is_private, "private"),
            (self.is_global, "global"),
            (self.is_link_local, "link-local"),
            (self.is_multicast, "multicast"),
            (self.is_loopback, "loopback"),
            (self.is_reserved, "reserved"),
            (self.is_unspecified, "unspecified"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

/// Everything the calculator derives from one CIDR input.
///
/// Addresses are dotted-decimal strings, the two host counts are integers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetInfo {
    /// Normalized network, host bits cleared.
    pub cidr: Ipv4,
    pub network: String,
    pub broadcast: String,
    pub mask: String,
    pub wildcard: String,
    pub first_host: String,
    pub last_host: String,
    /// `2^(32-prefix)`, u64 so a /0 fits.
    pub total_hosts: u64,
    pub usable_hosts: u64,
    pub prefix_length: u8,
    pub host_bits: u8,
    /// e.g. `192.168.1.0/255.255.255.0`
    pub with_netmask: String,
    /// e.g. `192.168.1.0/0.0.0.255`
    pub with_hostmask: String,
    /// `"<first_host> - <last_host>"`
    pub address_range: String,
    /// First usable hosts in order, capped at the preview limit.
    pub usable_hosts_preview: Vec<String>,
    /// Same-size neighbour, None below 0.0.0.0.
    pub previous_subnet: Option<Ipv4>,
    /// Same-size neighbour, None past 255.255.255.255.
    pub next_subnet: Option<Ipv4>,
    pub classification: AddressClass,
    pub summary: String,
}
