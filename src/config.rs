//! Environment variable names, endpoints, API versions and target resolution.
//!
//! Resolution functions are pure: they take the explicit argument and an [`Env`]
//! snapshot, so tests never have to touch process-wide state.

use crate::error::{AzureError, Result};
use std::collections::HashMap;

/// Subscription ID, also read by the `azurerm` Terraform provider.
pub const ARM_SUBSCRIPTION_ID: &str = "ARM_SUBSCRIPTION_ID";
/// Target resource group name.
pub const AZURE_RES_GROUP_NAME: &str = "AZURE_RES_GROUP_NAME";

pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const AZURE_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const AZURE_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
/// Path to an SDK auth file (`az ad sp create-for-rbac --sdk-auth`).
pub const AZURE_AUTH_LOCATION: &str = "AZURE_AUTH_LOCATION";

pub const RESOURCE_MANAGER_ENDPOINT: &str = "https://management.azure.com";
pub const ACTIVE_DIRECTORY_ENDPOINT: &str = "https://login.microsoftonline.com";
pub const IMDS_ENDPOINT: &str = "http://169.254.169.254";
/// Audience requested for management-plane tokens.
pub const TOKEN_RESOURCE: &str = "https://management.azure.com/";

pub const COMPUTE_API_VERSION: &str = "2018-06-01";
pub const NETWORK_API_VERSION: &str = "2019-09-01";
pub const CONTAINER_SERVICE_API_VERSION: &str = "2019-11-01";
pub const SUBSCRIPTIONS_API_VERSION: &str = "2019-06-01";
pub const IMDS_API_VERSION: &str = "2018-02-01";

/// Base URLs for everything the crate talks to. Overridden in tests.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub resource_manager: String,
    pub active_directory: String,
    pub imds: String,
    pub token_resource: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            resource_manager: RESOURCE_MANAGER_ENDPOINT.to_string(),
            active_directory: ACTIVE_DIRECTORY_ENDPOINT.to_string(),
            imds: IMDS_ENDPOINT.to_string(),
            token_resource: TOKEN_RESOURCE.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at a single base URL (mock servers).
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Endpoints {
            resource_manager: base.clone(),
            active_directory: base.clone(),
            imds: base,
            token_resource: TOKEN_RESOURCE.to_string(),
        }
    }
}

/// Snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Load `.env` (if any) and capture the process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        dotenv::dotenv().ok();
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (k, _) => {
                    log::debug!("Skipping non UTF-8 environment variable {k:?}");
                    None
                }
            })
            .collect();
        Env { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Env {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `key`; an empty value counts as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Pick the target subscription: a non-empty argument wins over [`ARM_SUBSCRIPTION_ID`].
pub fn resolve_subscription_id(subscription_id: &str, env: &Env) -> Result<String> {
    log::debug!("Initial subscription ID is '{subscription_id}'");
    let resolved = resolve(subscription_id, env, ARM_SUBSCRIPTION_ID)
        .ok_or(AzureError::SubscriptionIdNotFound)?;
    log::debug!("Final subscription ID is '{resolved}'");
    Ok(resolved)
}

/// Pick the target resource group: a non-empty argument wins over [`AZURE_RES_GROUP_NAME`].
pub fn resolve_resource_group_name(resource_group_name: &str, env: &Env) -> Result<String> {
    resolve(resource_group_name, env, AZURE_RES_GROUP_NAME)
        .ok_or(AzureError::ResourceGroupNameNotFound)
}

fn resolve(explicit: &str, env: &Env, var: &str) -> Option<String> {
    if !explicit.is_empty() {
        return Some(explicit.to_string());
    }
    env.get(var).map(str::to_string)
}
