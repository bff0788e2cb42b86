//! AKS managed cluster data model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ManagedCluster {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub tags: Option<HashMap<String, String>>,
    pub properties: Option<ManagedClusterProperties>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagedClusterProperties {
    pub kubernetes_version: Option<String>,
    pub dns_prefix: Option<String>,
    pub fqdn: Option<String>,
    pub provisioning_state: Option<String>,
    /// Resource group holding the cluster's node resources.
    pub node_resource_group: Option<String>,
    pub enable_rbac: Option<bool>,
    pub agent_pool_profiles: Option<Vec<AgentPoolProfile>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentPoolProfile {
    pub name: Option<String>,
    pub count: Option<i32>,
    pub vm_size: Option<String>,
    pub os_type: Option<String>,
}
