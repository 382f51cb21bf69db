//! Subnet address planning.
//!
//! This module contains the planning logic:
//! - [`split`] - Splitting a block into equally sized subnets
//! - [`validate`] - Containment, duplicate and overlap checks
//! - [`reserve`] - Reporting address space left unallocated

mod reserve;
mod split;
mod validate;

// Re-export public functions
pub use reserve::unallocated_blocks;
pub use split::{
    bits_needed, generate, generate_strings, plan_subnets, split_block, PlanRequest,
};
pub use validate::{
    check_contained, check_disjoint, check_for_duplicate_blocks, validate_blocks, validate_plan,
};
