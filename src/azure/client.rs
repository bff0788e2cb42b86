//! Authenticated GET requests against Azure Resource Manager.

use super::auth::Authorizer;
use crate::error::{AzureError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// One management-plane client, scoped to a subscription (or none, for the
/// subscriptions provider itself).
pub struct ArmClient {
    http: reqwest::Client,
    endpoint: String,
    authorizer: Arc<dyn Authorizer>,
    subscription_id: String,
}

impl ArmClient {
    pub fn new(endpoint: &str, authorizer: Arc<dyn Authorizer>, subscription_id: &str) -> Self {
        ArmClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            authorizer,
            subscription_id: subscription_id.to_string(),
        }
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// `/subscriptions/{sub}/resourceGroups/{rg}/providers/{provider_path}`
    pub fn resource_group_path(&self, resource_group: &str, provider_path: &str) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/{}",
            self.subscription_id, resource_group, provider_path
        )
    }

    /// GET `path` and deserialize the body into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        api_version: &str,
        extra_query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.endpoint, path);
        let token = self.authorizer.token().await?;
        log::debug!("Azure ARM GET {url} api-version={api_version}");

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&[("api-version", api_version)])
            .query(extra_query)
            .send()
            .await
            .map_err(|source| AzureError::Http {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|source| AzureError::Http {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            let (code, message) = parse_arm_error(&body);
            log::warn!("Azure ARM GET {url} returned {status}: {code}");
            return Err(AzureError::Api {
                status: status.as_u16(),
                url,
                code,
                message,
            });
        }

        let de = &mut serde_json::Deserializer::from_slice(&body);
        serde_path_to_error::deserialize(de).map_err(|e| {
            log::error!(
                "OUTPUT START:\n\n{}\n\nOUTPUT END\n",
                String::from_utf8_lossy(&body)
            );
            AzureError::Parse {
                url,
                path: e.path().to_string(),
                source: e.into_inner(),
            }
        })
    }
}

/// Pull `code` and `message` out of an ARM error body.
fn parse_arm_error(body: &[u8]) -> (String, String) {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(_) => {
            return (
                "Unknown".to_string(),
                String::from_utf8_lossy(body).trim().to_string(),
            )
        }
    };
    let err = value
        .get("error")
        .or_else(|| value.get("Error"))
        .unwrap_or(&value);
    let code = err["code"].as_str().unwrap_or("Unknown").to_string();
    let message = err["message"].as_str().unwrap_or("unknown error").to_string();
    (code, message)
}
