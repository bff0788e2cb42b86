//! Azure network data model: VNets, subnets and network security groups.

use super::SubResource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents an Azure Virtual Network with its subnets.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct VirtualNetwork {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub tags: Option<HashMap<String, String>>,
    pub properties: Option<VirtualNetworkProperties>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualNetworkProperties {
    pub address_space: Option<AddressSpace>,
    pub subnets: Option<Vec<Subnet>>,
    pub provisioning_state: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressSpace {
    /// CIDR blocks, e.g. `10.0.0.0/16`.
    pub address_prefixes: Vec<String>,
}

/// Represents an Azure subnet.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Subnet {
    pub id: Option<String>,
    pub name: Option<String>,
    pub properties: Option<SubnetProperties>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SubnetProperties {
    pub address_prefix: Option<String>,
    pub network_security_group: Option<SubResource>,
    pub provisioning_state: Option<String>,
}

/// Network security group with its associations.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SecurityGroup {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub tags: Option<HashMap<String, String>>,
    pub properties: Option<SecurityGroupProperties>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityGroupProperties {
    /// NICs attached to this NSG.
    pub network_interfaces: Option<Vec<SubResource>>,
    /// Subnets attached to this NSG.
    pub subnets: Option<Vec<SubResource>>,
    pub security_rules: Option<Vec<SecurityRule>>,
    pub provisioning_state: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SecurityRule {
    pub id: Option<String>,
    pub name: Option<String>,
    pub properties: Option<serde_json::Value>,
}

impl VirtualNetwork {
    pub fn subnets(&self) -> &[Subnet] {
        self.properties
            .as_ref()
            .and_then(|p| p.subnets.as_deref())
            .unwrap_or_default()
    }
}

impl SecurityGroup {
    /// IDs of attached NICs followed by IDs of attached subnets.
    pub fn association_ids(&self) -> Vec<String> {
        let Some(props) = &self.properties else {
            return vec![];
        };
        let nics = props.network_interfaces.iter().flatten();
        let subnets = props.subnets.iter().flatten();
        nics.chain(subnets).filter_map(|r| r.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_association_ids_nics_first() {
        let nsg: SecurityGroup = serde_json::from_value(json!({
            "name": "nsg1",
            "properties": {
                "subnets": [{ "id": "/subnet/a" }],
                "networkInterfaces": [{ "id": "/nic/1" }, { "id": "/nic/2" }]
            }
        }))
        .unwrap();
        assert_eq!(nsg.association_ids(), vec!["/nic/1", "/nic/2", "/subnet/a"]);
    }

    #[test]
    fn test_association_ids_empty() {
        assert!(SecurityGroup::default().association_ids().is_empty());
        let nsg: SecurityGroup =
            serde_json::from_value(json!({ "properties": { "securityRules": [] } })).unwrap();
        assert!(nsg.association_ids().is_empty());
    }

    #[test]
    fn test_vnet_without_subnets() {
        let vnet: VirtualNetwork = serde_json::from_value(json!({
            "name": "vnet1",
            "properties": { "addressSpace": { "addressPrefixes": ["10.0.0.0/16"] } }
        }))
        .unwrap();
        assert!(vnet.subnets().is_empty());
    }
}
