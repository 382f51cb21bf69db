//! Build the network layout of a stack from its configuration.

use super::resources::{
    name_tag, AssociationSpec, InternetGatewaySpec, NetworkLayout, RouteSpec, RouteTableSpec,
    SubnetSpec, VpcSpec,
};
use crate::config::StackConfig;
use crate::error::PlanError;
use crate::models::{Ipv4, SubnetPlanEntry, SubnetRole};
use crate::planner::{plan_subnets, validate_blocks, validate_plan, PlanRequest};

/// Name of the route sending public traffic to the internet gateway.
pub const PUBLIC_ROUTE_NAME: &str = "publicRoute";

/// Subnet blocks for each zone, from the explicit lists or from the planner.
pub fn subnet_entries(config: &StackConfig) -> Result<Vec<SubnetPlanEntry>, PlanError> {
    let zones = config.zone_count();
    if zones == 0 {
        return Err(PlanError::InvalidCount(
            "no availability zones configured".to_string(),
        ));
    }
    let vpc = config.vpc_cidr.network();

    match (&config.public_cidr_blocks, &config.private_cidr_blocks) {
        (Some(public), Some(private)) => {
            let public = take_zones("publicCidrBlocks", public, zones)?;
            let private = take_zones("privateCidrBlocks", private, zones)?;
            let all: Vec<Ipv4> = public.iter().chain(private.iter()).copied().collect();
            validate_blocks(&vpc, &all)?;

            let tag = |role, blocks: &[Ipv4]| {
                blocks
                    .iter()
                    .enumerate()
                    .map(|(zone_index, block)| SubnetPlanEntry {
                        role,
                        zone_index,
                        block: *block,
                    })
                    .collect::<Vec<_>>()
            };
            let mut entries = tag(SubnetRole::Public, public);
            entries.extend(tag(SubnetRole::Private, private));
            log::info!("Using {} configured subnet(s) in {vpc}", entries.len());
            Ok(entries)
        }
        (None, None) => {
            let plan = plan_subnets(vpc, &PlanRequest::per_zone(zones))?;
            validate_plan(&plan)?;
            Ok(plan.entries)
        }
        _ => Err(PlanError::Config(
            "publicCidrBlocks and privateCidrBlocks must be set together".to_string(),
        )),
    }
}

fn take_zones<'a>(key: &str, blocks: &'a [Ipv4], zones: usize) -> Result<&'a [Ipv4], PlanError> {
    if blocks.len() < zones {
        return Err(PlanError::Config(format!(
            "{key} has {} block(s), {zones} zone(s) need one each",
            blocks.len()
        )));
    }
    if blocks.len() > zones {
        log::warn!(
            "{key}: only the first {zones} of {} block(s) are used",
            blocks.len()
        );
    }
    Ok(&blocks[..zones])
}

/// Declare the VPC, gateway, route tables, subnets and associations.
pub fn declare_network(config: &StackConfig) -> Result<NetworkLayout, PlanError> {
    let entries = subnet_entries(config)?;
    Ok(declare_network_from(config, &entries))
}

/// Same as [`declare_network`] for subnet entries that are already planned.
pub fn declare_network_from(config: &StackConfig, entries: &[SubnetPlanEntry]) -> NetworkLayout {
    let vpc = VpcSpec {
        name: config.vpc_name.clone(),
        cidr_block: config.vpc_cidr.network(),
        tags: name_tag(&config.vpc_name),
    };
    let internet_gateway = InternetGatewaySpec {
        name: config.igw_name.clone(),
        vpc: vpc.name.clone(),
        tags: name_tag(&config.igw_name),
    };
    let route_tables = vec![
        RouteTableSpec {
            name: config.public_route_table_name.clone(),
            role: SubnetRole::Public,
            vpc: vpc.name.clone(),
            tags: name_tag(&config.public_route_table_name),
        },
        RouteTableSpec {
            name: config.private_route_table_name.clone(),
            role: SubnetRole::Private,
            vpc: vpc.name.clone(),
            tags: name_tag(&config.private_route_table_name),
        },
    ];
    let routes = vec![RouteSpec {
        name: PUBLIC_ROUTE_NAME.to_string(),
        route_table: config.public_route_table_name.clone(),
        destination_cidr_block: config.destination_cidr_block,
        gateway: internet_gateway.name.clone(),
    }];

    let mut subnets = Vec::with_capacity(entries.len());
    let mut associations = Vec::with_capacity(entries.len());

    // public then private subnet for each zone
    for zone_index in 0..config.zone_count() {
        for role in [SubnetRole::Public, SubnetRole::Private] {
            let Some(entry) = entries
                .iter()
                .find(|e| e.role == role && e.zone_index == zone_index)
            else {
                continue;
            };
            let (prefix, association, route_table) = match role {
                SubnetRole::Public => (
                    &config.public_subnet_prefix,
                    &config.public_subnet_association,
                    &config.public_route_table_name,
                ),
                SubnetRole::Private => (
                    &config.private_subnet_prefix,
                    &config.private_subnet_association,
                    &config.private_route_table_name,
                ),
            };
            let name = format!("{prefix}{zone_index}");
            log::debug!(
                "subnet {name} {} in {}",
                entry.block,
                config.availability_zones[zone_index]
            );

            associations.push(AssociationSpec {
                name: format!("{association}{zone_index}"),
                subnet: name.clone(),
                route_table: route_table.clone(),
            });
            subnets.push(SubnetSpec {
                tags: name_tag(&name),
                name,
                vpc: vpc.name.clone(),
                cidr_block: entry.block,
                availability_zone: config.availability_zones[zone_index].clone(),
                zone_index,
                role,
                map_public_ip_on_launch: role == SubnetRole::Public,
            });
        }
    }

    log::info!(
        "Declared VPC '{}' {} with {} subnet(s) over {} zone(s)",
        vpc.name,
        vpc.cidr_block,
        subnets.len(),
        config.zone_count()
    );

    NetworkLayout {
        vpc,
        internet_gateway,
        route_tables,
        routes,
        subnets,
        associations,
    }
}
