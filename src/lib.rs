//! Deterministic subnet address planning for a VPC stack.
//!
//! Splits the VPC block into equally sized public and private subnets per
//! availability zone and describes the surrounding network resources.

pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod output;
pub mod planner;

use std::collections::HashSet;
use std::error::Error;

pub use config::StackConfig;
pub use error::PlanError;
pub use layout::{declare_network, declare_network_from, subnet_entries, NetworkLayout};
pub use planner::{generate, generate_strings, plan_subnets, PlanRequest};

/// Environment variable overriding the layout output path.
pub const LAYOUT_FILE_ENV: &str = "LAYOUT_FILE";

/// Read the stack configuration, see [`StackConfig::load`].
pub fn load_config() -> Result<StackConfig, Box<dyn Error>> {
    let config = StackConfig::load()?;
    log::info!(
        "Stack '{}' {} zones={:?} max_zones={}",
        config.vpc_name,
        config.vpc_cidr,
        config.availability_zones,
        config.max_zones
    );
    Ok(config)
}

// return error if two resources of the layout share a logical name
pub fn check_for_duplicate_names(layout: &NetworkLayout) -> Result<(), Box<dyn Error>> {
    let mut seen = HashSet::new();

    let names = std::iter::once(&layout.vpc.name)
        .chain(std::iter::once(&layout.internet_gateway.name))
        .chain(layout.route_tables.iter().map(|rt| &rt.name))
        .chain(layout.routes.iter().map(|r| &r.name))
        .chain(layout.subnets.iter().map(|s| &s.name))
        .chain(layout.associations.iter().map(|a| &a.name));

    for name in names {
        if !seen.insert(name) {
            return Err(format!("Duplicate resource name found: {name}").into());
        }
    }
    Ok(())
}
