//! Response types for the Azure Resource Manager resources queried by this crate.
//!
//! Only the fields the queries read are modelled; everything is optional so
//! partially populated resources still deserialize.
//! - [`compute`] - Virtual machines and VM extensions
//! - [`network`] - Virtual networks, subnets and network security groups
//! - [`container`] - AKS managed clusters
//! - [`subscription`] - Subscription locations

pub mod compute;
pub mod container;
pub mod network;
pub mod subscription;

use serde::{Deserialize, Serialize};

pub use compute::{VirtualMachine, VirtualMachineExtension};
pub use container::ManagedCluster;
pub use network::{SecurityGroup, Subnet, VirtualNetwork};
pub use subscription::{Location, LocationListResult};

/// Reference to another resource by ID.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SubResource {
    pub id: Option<String>,
}
