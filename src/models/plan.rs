//! Tagged subnet plan produced by the planner.

use super::Ipv4;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a subnet is routed to the internet gateway.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SubnetRole {
    Public,
    Private,
}

impl fmt::Display for SubnetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubnetRole::Public => write!(f, "public"),
            SubnetRole::Private => write!(f, "private"),
        }
    }
}

/// One block of the plan, with its role and availability zone index.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetPlanEntry {
    pub role: SubnetRole,
    pub zone_index: usize,
    pub block: Ipv4,
}

/// Ordered, non-overlapping split of a parent block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetPlan {
    /// The block that was split (host bits cleared).
    pub parent: Ipv4,
    /// Prefix length shared by every entry.
    pub prefix: u8,
    /// Entries in increasing address order.
    pub entries: Vec<SubnetPlanEntry>,
}

impl SubnetPlan {
    pub fn public(&self) -> impl Iterator<Item = &SubnetPlanEntry> {
        self.entries.iter().filter(|e| e.role == SubnetRole::Public)
    }

    pub fn private(&self) -> impl Iterator<Item = &SubnetPlanEntry> {
        self.entries.iter().filter(|e| e.role == SubnetRole::Private)
    }

    /// Every block of the plan, in address order.
    pub fn blocks(&self) -> Vec<Ipv4> {
        self.entries.iter().map(|e| e.block).collect()
    }

    /// Entries placed in the given availability zone.
    pub fn for_zone(&self, zone_index: usize) -> Vec<&SubnetPlanEntry> {
        self.entries
            .iter()
            .filter(|e| e.zone_index == zone_index)
            .collect()
    }

    /// The entry for a role and zone, if planned.
    pub fn find(&self, role: SubnetRole, zone_index: usize) -> Option<&SubnetPlanEntry> {
        self.entries
            .iter()
            .find(|e| e.role == role && e.zone_index == zone_index)
    }
}

impl fmt::Display for SubnetPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SubnetPlan {} -> {} x /{}:",
            self.parent,
            self.entries.len(),
            self.prefix
        )?;
        for entry in &self.entries {
            writeln!(
                f,
                "  - {} {} zone {}",
                entry.block, entry.role, entry.zone_index
            )?;
        }
        Ok(())
    }
}
