//! Deterministic split of an address block into equally sized subnets.
//!
//! The subnet count is rounded up to the next power of two to pick the new
//! prefix length; slots past the requested count are left unallocated.

use crate::error::PlanError;
use crate::models::{Ipv4, SubnetPlan, SubnetPlanEntry, SubnetRole, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Smallest number of extra mask bits `b` such that `2^b >= n`.
///
/// `bits_needed(0)` and `bits_needed(1)` are both 0.
pub fn bits_needed(n: usize) -> u8 {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as u8
    }
}

/// Split `base` into `n` equally sized, consecutive blocks.
///
/// A base with host bits set is cut down to its network address first.
pub fn split_block(base: Ipv4, n: usize) -> Result<Vec<Ipv4>, PlanError> {
    if n == 0 {
        return Err(PlanError::InvalidCount(n.to_string()));
    }
    if base.mask > MAX_LENGTH {
        return Err(PlanError::InvalidPrefix(base.mask.to_string()));
    }

    let bits = bits_needed(n);
    let new_prefix = base.mask as u32 + bits as u32;
    if new_prefix > MAX_LENGTH as u32 {
        return Err(PlanError::CapacityExceeded {
            base: base.to_string(),
            count: n,
            prefix: new_prefix,
        });
    }

    let parent = if base.has_host_bits() {
        let network = base.network();
        log::warn!("Base {base} has host bits set, planning from {network}");
        network
    } else {
        base
    };

    let block_size = 1u64 << (MAX_LENGTH as u32 - new_prefix);
    let start = u32::from(parent.addr) as u64;
    log::debug!(
        "split_block({parent}, {n}) bits_needed={bits} prefix=/{new_prefix} size={block_size}"
    );

    let blocks = (0..n as u64)
        .map(|i| {
            // n <= 2^bits keeps every block inside the parent, so this fits in u32
            let addr = Ipv4Addr::from((start + i * block_size) as u32);
            let block = Ipv4 {
                addr,
                mask: new_prefix as u8,
            };
            log::trace!("  block[{i}] = {block}");
            block
        })
        .collect();

    Ok(blocks)
}

/// Parse `base_cidr` ("a.b.c.d/n") and split it into `n` blocks.
pub fn generate(base_cidr: &str, n: usize) -> Result<Vec<Ipv4>, PlanError> {
    let base = Ipv4::new(base_cidr)?;
    split_block(base, n)
}

/// Same as [`generate`], returning the blocks as CIDR strings.
pub fn generate_strings(base_cidr: &str, n: usize) -> Result<Vec<String>, PlanError> {
    Ok(generate(base_cidr, n)?
        .iter()
        .map(|b| b.to_string())
        .collect())
}

/// How many public and private subnets to plan, spread over how many zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanRequest {
    pub public_count: usize,
    pub private_count: usize,
    pub zone_count: usize,
}

impl PlanRequest {
    /// One public and one private subnet in each zone.
    pub fn per_zone(zone_count: usize) -> PlanRequest {
        PlanRequest {
            public_count: zone_count,
            private_count: zone_count,
            zone_count,
        }
    }

    /// Total number of subnets, `None` when the counts overflow.
    pub fn total(&self) -> Option<usize> {
        self.public_count.checked_add(self.private_count)
    }
}

/// Split `base` and tag each block with its role and zone.
///
/// The lowest `public_count` blocks are public, the rest private. Within each
/// group blocks are spread round-robin over the zones.
pub fn plan_subnets(base: Ipv4, request: &PlanRequest) -> Result<SubnetPlan, PlanError> {
    if request.zone_count == 0 {
        return Err(PlanError::InvalidCount("zone count is 0".to_string()));
    }
    let total = request.total().ok_or_else(|| {
        PlanError::InvalidCount(format!(
            "{} public + {} private",
            request.public_count, request.private_count
        ))
    })?;
    let blocks = split_block(base, total)?;
    let prefix = blocks.first().map(|b| b.mask).unwrap_or(base.mask);

    let entries = blocks
        .into_iter()
        .enumerate()
        .map(|(i, block)| {
            let (role, position) = if i < request.public_count {
                (SubnetRole::Public, i)
            } else {
                (SubnetRole::Private, i - request.public_count)
            };
            SubnetPlanEntry {
                role,
                zone_index: position % request.zone_count,
                block,
            }
        })
        .collect::<Vec<_>>();

    log::info!(
        "Planned {} public + {} private subnets of /{} in {} over {} zone(s)",
        request.public_count,
        request.private_count,
        prefix,
        base.network(),
        request.zone_count
    );

    Ok(SubnetPlan {
        parent: base.network(),
        prefix,
        entries,
    })
}
