//! Managed Kubernetes (AKS) queries.

use crate::azure::ArmClient;
use crate::config::CONTAINER_SERVICE_API_VERSION;
use crate::error::{fatal, Result};
use crate::models::ManagedCluster;
use crate::session::Session;

pub struct ManagedClustersClient {
    arm: ArmClient,
}

impl ManagedClustersClient {
    pub async fn get(&self, resource_group: &str, cluster_name: &str) -> Result<ManagedCluster> {
        let path = self.arm.resource_group_path(
            resource_group,
            &format!("Microsoft.ContainerService/managedClusters/{cluster_name}"),
        );
        self.arm
            .get(&path, CONTAINER_SERVICE_API_VERSION, &[])
            .await
    }
}

pub fn managed_clusters_client(
    session: &Session,
    subscription_id: &str,
) -> Result<ManagedClustersClient> {
    Ok(ManagedClustersClient {
        arm: session.arm_client(subscription_id)?,
    })
}

pub async fn try_get_managed_cluster(
    session: &Session,
    resource_group: &str,
    cluster_name: &str,
    subscription_id: &str,
) -> Result<ManagedCluster> {
    let resource_group = session.resource_group_name(resource_group)?;
    let client = managed_clusters_client(session, subscription_id)?;
    client.get(&resource_group, cluster_name).await
}

pub async fn get_managed_cluster(
    session: &Session,
    resource_group: &str,
    cluster_name: &str,
    subscription_id: &str,
) -> ManagedCluster {
    fatal(
        "get_managed_cluster",
        try_get_managed_cluster(session, resource_group, cluster_name, subscription_id).await,
    )
}
