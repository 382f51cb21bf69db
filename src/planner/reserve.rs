//! Address space left unallocated inside a parent block.
//!
//! When the subnet count is not a power of two the trailing slots are never
//! handed out. This walks the parent and reports every gap as the largest
//! aligned blocks that fit.

use crate::models::{lo_mask, Ipv4, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Blocks of `parent` not covered by any of `allocated`, in address order.
///
/// Allocated blocks outside the parent are ignored.
pub fn unallocated_blocks(parent: &Ipv4, allocated: &[Ipv4]) -> Vec<Ipv4> {
    let mut inside: Vec<&Ipv4> = allocated
        .iter()
        .filter(|b| parent.contains_block(b))
        .collect();
    inside.sort_by_key(|b| b.lo());

    let mut gaps = Vec::new();
    let mut next_ip = u32::from(parent.lo()) as u64;
    let end = next_ip + parent.size();

    for block in inside {
        let block_lo = u32::from(block.lo()) as u64;
        fill_gap(next_ip, block_lo, &mut gaps);
        next_ip = next_ip.max(u32::from(block.hi()) as u64 + 1);
    }
    fill_gap(next_ip, end, &mut gaps);

    let reserved: u64 = gaps.iter().map(|g| g.size()).sum();
    if reserved > 0 {
        log::info!(
            "{reserved} of {} addresses in {parent} left unallocated in {} block(s)",
            parent.size(),
            gaps.len()
        );
    }
    gaps
}

/// Push aligned blocks covering `[start, limit)`.
fn fill_gap(mut start: u64, limit: u64, gaps: &mut Vec<Ipv4>) {
    while start < limit {
        let start_ip = Ipv4Addr::from(start as u32);
        let mask = find_biggest_subnet(start_ip, limit);
        let gap = Ipv4 {
            addr: start_ip,
            mask,
        };
        log::debug!("gap {gap}");
        start += gap.size();
        gaps.push(gap);
    }
}

/// Find the shortest prefix for a block at `start_ip` that ends before `limit`.
///
/// The returned mask is constrained by:
/// 1. The IP alignment - `start_ip` must be a valid network address for the mask
/// 2. The block must not reach `limit`
fn find_biggest_subnet(start_ip: Ipv4Addr, limit: u64) -> u8 {
    let start = u32::from(start_ip) as u64;
    let mut next_mask = lo_mask(start_ip);

    while next_mask < MAX_LENGTH && start + (1u64 << (MAX_LENGTH - next_mask)) > limit {
        next_mask += 1;
    }
    next_mask
}
