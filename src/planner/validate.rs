//! Validation of subnet lists against their parent block.
//!
//! Used for planner output and for subnet lists supplied directly in the
//! stack configuration.

use crate::error::PlanError;
use crate::models::{Ipv4, SubnetPlan};
use itertools::Itertools;
use std::collections::HashSet;

/// Return an error for the first block not inside `parent`.
pub fn check_contained(parent: &Ipv4, blocks: &[Ipv4]) -> Result<(), PlanError> {
    match blocks.iter().find(|b| !parent.contains_block(b)) {
        Some(outside) => Err(PlanError::OutsideParent {
            block: outside.to_string(),
            parent: parent.to_string(),
        }),
        None => Ok(()),
    }
}

/// Return an error if the same block appears twice.
pub fn check_for_duplicate_blocks(blocks: &[Ipv4]) -> Result<(), PlanError> {
    let mut seen = HashSet::new();
    for block in blocks {
        if !seen.insert(block.network()) {
            return Err(PlanError::Duplicate(block.to_string()));
        }
    }
    Ok(())
}

/// Return an error for the first pair of overlapping blocks.
///
/// With blocks sorted by start address, any overlap shows up between
/// neighbours.
pub fn check_disjoint(blocks: &[Ipv4]) -> Result<(), PlanError> {
    let overlap = blocks
        .iter()
        .sorted_by_key(|b| (b.lo(), b.mask))
        .tuple_windows()
        .find(|(a, b)| a.overlaps(b));

    match overlap {
        Some((first, second)) => Err(PlanError::Overlap {
            first: first.to_string(),
            second: second.to_string(),
        }),
        None => Ok(()),
    }
}

/// Validate a block list: containment, duplicates then overlap.
pub fn validate_blocks(parent: &Ipv4, blocks: &[Ipv4]) -> Result<(), PlanError> {
    check_contained(parent, blocks)?;
    check_for_duplicate_blocks(blocks)?;
    check_disjoint(blocks)?;
    log::debug!(
        "Validated {} block(s) in {parent}: {}",
        blocks.len(),
        blocks.iter().join(", ")
    );
    Ok(())
}

/// Validate a plan: every block valid, same prefix, increasing order.
pub fn validate_plan(plan: &SubnetPlan) -> Result<(), PlanError> {
    let blocks = plan.blocks();
    validate_blocks(&plan.parent, &blocks)?;

    if let Some(odd) = blocks.iter().find(|b| b.mask != plan.prefix) {
        return Err(PlanError::InvalidPrefix(format!(
            "{odd} differs from plan prefix /{}",
            plan.prefix
        )));
    }
    if let Some((a, b)) = blocks.iter().tuple_windows().find(|(a, b)| a >= b) {
        return Err(PlanError::OutOfOrder {
            first: a.to_string(),
            second: b.to_string(),
        });
    }
    Ok(())
}
