//! Domain models for the subnet planner.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Ipv4`] - IPv4 address block with CIDR notation support
//! - [`SubnetPlan`] and [`SubnetPlanEntry`] - tagged output of the planner

mod ipv4;
mod plan;

// Re-export public types
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, int_to_ip, ip_after_subnet, ip_to_int, lo_mask,
    num_aws_hosts, Ipv4, MAX_LENGTH,
};
pub use plan::{SubnetPlan, SubnetPlanEntry, SubnetRole};
