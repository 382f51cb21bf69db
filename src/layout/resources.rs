//! Typed descriptions of the network resources in a stack.
//!
//! These are plain data: references between resources are by logical name.

use crate::models::{Ipv4, SubnetRole};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Tags = BTreeMap<String, String>;

/// `Name` tag map used on every taggable resource.
pub fn name_tag(name: &str) -> Tags {
    Tags::from([("Name".to_string(), name.to_string())])
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VpcSpec {
    pub name: String,
    pub cidr_block: Ipv4,
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InternetGatewaySpec {
    pub name: String,
    pub vpc: String,
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteTableSpec {
    pub name: String,
    pub role: SubnetRole,
    pub vpc: String,
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    pub name: String,
    pub route_table: String,
    pub destination_cidr_block: Ipv4,
    pub gateway: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetSpec {
    pub name: String,
    pub vpc: String,
    pub cidr_block: Ipv4,
    pub availability_zone: String,
    pub zone_index: usize,
    pub role: SubnetRole,
    pub map_public_ip_on_launch: bool,
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssociationSpec {
    pub name: String,
    pub subnet: String,
    pub route_table: String,
}

/// Every network resource of the stack.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkLayout {
    pub vpc: VpcSpec,
    pub internet_gateway: InternetGatewaySpec,
    pub route_tables: Vec<RouteTableSpec>,
    pub routes: Vec<RouteSpec>,
    pub subnets: Vec<SubnetSpec>,
    pub associations: Vec<AssociationSpec>,
}

/// Identifiers a stack hands to its consumers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutExports {
    pub vpc_id: String,
    pub public_subnet_ids: Vec<String>,
    pub private_subnet_ids: Vec<String>,
}

impl NetworkLayout {
    pub fn subnets_with_role(&self, role: SubnetRole) -> impl Iterator<Item = &SubnetSpec> {
        self.subnets.iter().filter(move |s| s.role == role)
    }

    pub fn route_table(&self, role: SubnetRole) -> Option<&RouteTableSpec> {
        self.route_tables.iter().find(|rt| rt.role == role)
    }

    pub fn exports(&self) -> LayoutExports {
        let names = |role| {
            self.subnets_with_role(role)
                .map(|s| s.name.clone())
                .collect::<Vec<_>>()
        };
        LayoutExports {
            vpc_id: self.vpc.name.clone(),
            public_subnet_ids: names(SubnetRole::Public),
            private_subnet_ids: names(SubnetRole::Private),
        }
    }
}
