//! Error type shared by the address, planner and layout modules.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    #[error("Invalid prefix length '{0}', expected 0-32")]
    InvalidPrefix(String),

    #[error("Invalid address/mask '{0}'")]
    InvalidCidr(String),

    #[error("Invalid subnet count: {0}")]
    InvalidCount(String),

    #[error("{base} cannot hold {count} subnets: prefix /{prefix} exceeds /32")]
    CapacityExceeded {
        base: String,
        count: usize,
        prefix: u32,
    },

    #[error("Next subnet after {0} overflows the address space")]
    AddressOverflow(String),

    #[error("Subnet {block} is outside of {parent}")]
    OutsideParent { block: String, parent: String },

    #[error("Subnet {first} overlaps {second}")]
    Overlap { first: String, second: String },

    #[error("Subnet {second} is not after {first}")]
    OutOfOrder { first: String, second: String },

    #[error("Duplicate subnet {0}")]
    Duplicate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
