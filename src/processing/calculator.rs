//! Subnet calculator.
//!
//! Turns a CIDR expression into a [`SubnetInfo`]. Pure bit arithmetic on the
//! 32-bit address, no state is kept between calls.

use super::classify::classify;
use crate::config::DEFAULT_PREVIEW_LIMIT;
use crate::error::InvalidInputError;
use crate::models::{
    cut_addr, format_ipv4_addr, get_cidr_mask, next_subnet_ipv4, num_hosts, num_usable_hosts,
    previous_subnet_ipv4, Ipv4, SubnetInfo, MAX_LENGTH,
};
use std::net::Ipv4Addr;

/// One input paired with its calculated result or rejection.
pub type SubnetOutcome = (String, Result<SubnetInfo, InvalidInputError>);

/// Calculate subnet details for a CIDR string such as `192.168.1.0/24`.
///
/// # Examples
/// ```
/// use subnet_calc::compute_subnet;
/// let info = compute_subnet("192.168.1.0/24").unwrap();
/// assert_eq!(info.broadcast, "192.168.1.255");
/// assert_eq!(info.usable_hosts, 254);
/// ```
pub fn compute_subnet(cidr: &str) -> Result<SubnetInfo, InvalidInputError> {
    compute_subnet_with_preview(cidr, DEFAULT_PREVIEW_LIMIT)
}

/// Same as [`compute_subnet`], listing at most `preview_limit` usable hosts.
pub fn compute_subnet_with_preview(
    cidr: &str,
    preview_limit: usize,
) -> Result<SubnetInfo, InvalidInputError> {
    log::info!("compute_subnet({cidr})");

    let ipv4 = Ipv4::new(cidr).map_err(|e| {
        log::warn!("rejected '{cidr}' ({}): {e}", e.reason());
        e
    })?;
    let info = subnet_info_for(ipv4, preview_limit)?;

    log::debug!(
        "{cidr} => network={} broadcast={} usable={}",
        info.network,
        info.broadcast,
        info.usable_hosts
    );
    Ok(info)
}

/// Calculate every input independently, a bad entry does not stop the rest.
pub fn compute_subnets<S: AsRef<str>>(inputs: &[S], preview_limit: usize) -> Vec<SubnetOutcome> {
    inputs
        .iter()
        .map(|cidr| {
            let cidr = cidr.as_ref().trim();
            (
                cidr.to_string(),
                compute_subnet_with_preview(cidr, preview_limit),
            )
        })
        .collect()
}

/// First and last usable host.
///
/// /31 is point-to-point (both usable), /32 is a single host.
fn host_range(network: u32, broadcast: u32, len: u8) -> (u32, u32) {
    match len {
        32 => (network, network),
        31 => (network, broadcast),
        _ => (network + 1, broadcast - 1),
    }
}

/// Calculate subnet details from an already parsed [`Ipv4`].
pub fn subnet_info_for(
    ipv4: Ipv4,
    preview_limit: usize,
) -> Result<SubnetInfo, InvalidInputError> {
    let len = ipv4.mask;
    let mask = get_cidr_mask(len)?;
    let network = u32::from(cut_addr(ipv4.addr, len)?);
    let wildcard = !mask;
    let broadcast = network | wildcard;

    let total_hosts = num_hosts(len)?;
    let usable_hosts = num_usable_hosts(len)?;
    let (first_host, last_host) = host_range(network, broadcast, len);

    let cidr = Ipv4 {
        addr: Ipv4Addr::from(network),
        mask: len,
    };
    let network_str = format_ipv4_addr(network);
    let mask_str = format_ipv4_addr(mask);
    let wildcard_str = format_ipv4_addr(wildcard);
    let first_str = format_ipv4_addr(first_host);
    let last_str = format_ipv4_addr(last_host);

    let usable_hosts_preview = (first_host..=last_host)
        .take(preview_limit)
        .map(format_ipv4_addr)
        .collect();

    // Neighbours do not exist at the edges of the address space.
    let previous_subnet = previous_subnet_ipv4(cidr).ok();
    let next_subnet = next_subnet_ipv4(cidr, None).ok();

    let host_bits = MAX_LENGTH - len;
    let summary = format!(
        "CIDR {ipv4} has {total_hosts} total addresses with {usable_hosts} usable hosts \
         ({len} prefix, {host_bits} host bits)."
    );

    Ok(SubnetInfo {
        cidr,
        with_netmask: format!("{network_str}/{mask_str}"),
        with_hostmask: format!("{network_str}/{wildcard_str}"),
        address_range: format!("{first_str} - {last_str}"),
        network: network_str,
        broadcast: format_ipv4_addr(broadcast),
        mask: mask_str,
        wildcard: wildcard_str,
        first_host: first_str,
        last_host: last_str,
        total_hosts,
        usable_hosts,
        prefix_length: len,
        host_bits,
        usable_hosts_preview,
        previous_subnet,
        next_subnet,
        classification: classify(cidr),
        summary,
    })
}
