//! Domain models for the subnet calculator.
//!
//! - [`Ipv4`] - IPv4 address with CIDR notation support
//! - [`SubnetInfo`] - computed result for one CIDR
//! - [`AddressClass`] - special-purpose flags of a network

mod ipv4;
mod subnet_info;

// Re-export public types
pub use ipv4::{
    broadcast_addr, cut_addr, format_ipv4_addr, get_cidr_mask, ip_after_subnet,
    ip_before_subnet, mask_from_netmask, next_subnet_ipv4, num_hosts, num_usable_hosts,
    parse_ipv4_addr, previous_subnet_ipv4, Ipv4, MAX_LENGTH,
};
pub use subnet_info::{AddressClass, SubnetInfo};
