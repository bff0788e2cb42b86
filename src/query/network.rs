//! Virtual network, subnet and network security group queries.

use crate::azure::ArmClient;
use crate::config::NETWORK_API_VERSION;
use crate::error::{fatal, Result};
use crate::models::{SecurityGroup, Subnet, VirtualNetwork};
use crate::session::Session;

pub struct SecurityGroupsClient {
    arm: ArmClient,
}

impl SecurityGroupsClient {
    pub async fn get(&self, resource_group: &str, nsg_name: &str) -> Result<SecurityGroup> {
        let path = self.arm.resource_group_path(
            resource_group,
            &format!("Microsoft.Network/networkSecurityGroups/{nsg_name}"),
        );
        self.arm.get(&path, NETWORK_API_VERSION, &[]).await
    }
}

pub struct SubnetsClient {
    arm: ArmClient,
}

impl SubnetsClient {
    pub async fn get(
        &self,
        resource_group: &str,
        vnet_name: &str,
        subnet_name: &str,
    ) -> Result<Subnet> {
        let path = self.arm.resource_group_path(
            resource_group,
            &format!("Microsoft.Network/virtualNetworks/{vnet_name}/subnets/{subnet_name}"),
        );
        self.arm.get(&path, NETWORK_API_VERSION, &[]).await
    }
}

pub struct VirtualNetworksClient {
    arm: ArmClient,
}

impl VirtualNetworksClient {
    pub async fn get(&self, resource_group: &str, vnet_name: &str) -> Result<VirtualNetwork> {
        let path = self.arm.resource_group_path(
            resource_group,
            &format!("Microsoft.Network/virtualNetworks/{vnet_name}"),
        );
        self.arm.get(&path, NETWORK_API_VERSION, &[]).await
    }
}

pub fn security_groups_client(
    session: &Session,
    subscription_id: &str,
) -> Result<SecurityGroupsClient> {
    Ok(SecurityGroupsClient {
        arm: session.arm_client(subscription_id)?,
    })
}

pub fn subnets_client(session: &Session, subscription_id: &str) -> Result<SubnetsClient> {
    Ok(SubnetsClient {
        arm: session.arm_client(subscription_id)?,
    })
}

pub fn virtual_networks_client(
    session: &Session,
    subscription_id: &str,
) -> Result<VirtualNetworksClient> {
    Ok(VirtualNetworksClient {
        arm: session.arm_client(subscription_id)?,
    })
}

/// IDs of the subnets in a VNet, in the order Azure lists them.
pub async fn try_get_subnets_for_vnet(
    session: &Session,
    resource_group: &str,
    vnet_name: &str,
    subscription_id: &str,
) -> Result<Vec<String>> {
    let vnet = try_get_vnet_by_name(session, resource_group, vnet_name, subscription_id).await?;
    Ok(vnet
        .subnets()
        .iter()
        .filter_map(|s| s.id.clone())
        .collect())
}

pub async fn get_subnets_for_vnet(
    session: &Session,
    resource_group: &str,
    vnet_name: &str,
    subscription_id: &str,
) -> Vec<String> {
    fatal(
        "get_subnets_for_vnet",
        try_get_subnets_for_vnet(session, resource_group, vnet_name, subscription_id).await,
    )
}

/// NIC IDs then subnet IDs associated with a network security group.
pub async fn try_get_associations_for_nsg(
    session: &Session,
    resource_group: &str,
    nsg_name: &str,
    subscription_id: &str,
) -> Result<Vec<String>> {
    let resource_group = session.resource_group_name(resource_group)?;
    let client = security_groups_client(session, subscription_id)?;
    let nsg = client.get(&resource_group, nsg_name).await?;
    Ok(nsg.association_ids())
}

pub async fn get_associations_for_nsg(
    session: &Session,
    resource_group: &str,
    nsg_name: &str,
    subscription_id: &str,
) -> Vec<String> {
    fatal(
        "get_associations_for_nsg",
        try_get_associations_for_nsg(session, resource_group, nsg_name, subscription_id).await,
    )
}

pub async fn try_get_vnet_by_name(
    session: &Session,
    resource_group: &str,
    vnet_name: &str,
    subscription_id: &str,
) -> Result<VirtualNetwork> {
    let resource_group = session.resource_group_name(resource_group)?;
    let client = virtual_networks_client(session, subscription_id)?;
    client.get(&resource_group, vnet_name).await
}

pub async fn get_vnet_by_name(
    session: &Session,
    resource_group: &str,
    vnet_name: &str,
    subscription_id: &str,
) -> VirtualNetwork {
    fatal(
        "get_vnet_by_name",
        try_get_vnet_by_name(session, resource_group, vnet_name, subscription_id).await,
    )
}

pub async fn try_get_subnet_by_name(
    session: &Session,
    resource_group: &str,
    vnet_name: &str,
    subnet_name: &str,
    subscription_id: &str,
) -> Result<Subnet> {
    let resource_group = session.resource_group_name(resource_group)?;
    let client = subnets_client(session, subscription_id)?;
    client.get(&resource_group, vnet_name, subnet_name).await
}

pub async fn get_subnet_by_name(
    session: &Session,
    resource_group: &str,
    vnet_name: &str,
    subnet_name: &str,
    subscription_id: &str,
) -> Subnet {
    fatal(
        "get_subnet_by_name",
        try_get_subnet_by_name(
            session,
            resource_group,
            vnet_name,
            subnet_name,
            subscription_id,
        )
        .await,
    )
}
