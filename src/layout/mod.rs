//! Network resource layout.
//!
//! - [`resources`] - Typed resource descriptions
//! - [`network`] - Building the layout from a [`crate::config::StackConfig`]

mod network;
mod resources;

pub use network::{declare_network, declare_network_from, subnet_entries, PUBLIC_ROUTE_NAME};
pub use resources::{
    name_tag, AssociationSpec, InternetGatewaySpec, LayoutExports, NetworkLayout, RouteSpec,
    RouteTableSpec, SubnetSpec, Tags, VpcSpec,
};
