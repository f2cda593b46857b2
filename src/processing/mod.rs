//! Subnet calculation logic.
//!
//! - [`calculator`] - CIDR to [`SubnetInfo`](crate::models::SubnetInfo)
//! - [`classify`] - special-purpose address flags

mod calculator;
mod classify;

// Re-export public functions
pub use calculator::{
    compute_subnet, compute_subnet_with_preview, compute_subnets, subnet_info_for,
    SubnetOutcome,
};
pub use classify::classify;
