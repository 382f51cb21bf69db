//! CSV-style table output for a subnet plan.

use crate::models::{num_aws_hosts, Ipv4, SubnetPlanEntry};
use crate::planner::unallocated_blocks;
use colored::Colorize;
use std::error::Error;

use super::terminal::format_field;

/// One printed row: a planned subnet or an unallocated gap.
#[derive(Debug)]
pub struct PlanPrintRow {
    /// Row index (0 for gap rows).
    pub j: usize,
    /// Subnet role, or `-gap-`.
    pub role: String,
    /// Availability zone name or index.
    pub zone: String,
    pub subnet_cidr: String,
    pub broadcast: String,
    /// Usable host addresses.
    pub aws_hosts: u64,
}

/// Build the rows for `entries` followed by the unallocated space of `parent`.
///
/// # Arguments
/// * `parent` - The block the entries were taken from
/// * `entries` - Planned or configured subnets
/// * `zone_names` - Availability zone names indexed by zone index
pub fn plan_rows(
    parent: &Ipv4,
    entries: &[SubnetPlanEntry],
    zone_names: &[String],
) -> Vec<PlanPrintRow> {
    let mut rows: Vec<PlanPrintRow> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| PlanPrintRow {
            j: i + 1,
            role: e.role.to_string(),
            zone: zone_names
                .get(e.zone_index)
                .cloned()
                .unwrap_or_else(|| format!("zone{}", e.zone_index)),
            subnet_cidr: e.block.to_string(),
            broadcast: e.block.hi().to_string(),
            aws_hosts: num_aws_hosts(e.block.mask).unwrap_or(0),
        })
        .collect();

    let allocated: Vec<Ipv4> = entries.iter().map(|e| e.block).collect();
    rows.extend(
        unallocated_blocks(parent, &allocated)
            .into_iter()
            .map(|gap| PlanPrintRow {
                j: 0,
                role: "-gap-".to_string(),
                zone: "None".to_string(),
                subnet_cidr: gap.to_string(),
                broadcast: gap.hi().to_string(),
                aws_hosts: num_aws_hosts(gap.mask).unwrap_or(0),
            }),
    );
    rows
}

/// Print the plan as CSV to stdout.
pub fn plan_print(
    parent: &Ipv4,
    entries: &[SubnetPlanEntry],
    zone_names: &[String],
) -> Result<(), Box<dyn Error>> {
    log::info!("#Start plan_print() {} subnet(s) in {parent}", entries.len());

    println!(r#" "cnt",    "role",            "zone",     "subnet_cidr",       "broadcast",      "hosts""#);

    let rows = plan_rows(parent, entries, zone_names);
    let gaps = rows.iter().filter(|r| r.j == 0).count();
    for row in rows {
        print_csv_row(&row);
    }

    if gaps > 0 {
        println!(
            "#{}# {gaps} block(s) of {parent} left unallocated",
            "NOTE".on_red()
        );
    }
    Ok(())
}

fn print_csv_row(row: &PlanPrintRow) {
    println!(
        r#"{j},{role},{zone},{subnet_cidr},{broadcast},{hosts}"#,
        j = format_field(row.j, 6),
        role = format_field(&row.role, 10),
        zone = format_field(&row.zone, 16),
        subnet_cidr = format_field(&row.subnet_cidr, 18),
        broadcast = format_field(format!("{}_br", row.broadcast), 19),
        hosts = format_field(format!("{}_hosts", row.aws_hosts), 12),
    );
}
