//! Error type shared by every query.

use crate::config::{ARM_SUBSCRIPTION_ID, AZURE_RES_GROUP_NAME};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AzureError>;

#[derive(Debug, Error)]
pub enum AzureError {
    /// No subscription ID was passed and none is set in the environment.
    #[error(
        "could not find an Azure subscription ID in expected environment variable {var} and one was not provided for this test",
        var = ARM_SUBSCRIPTION_ID
    )]
    SubscriptionIdNotFound,

    /// No resource group name was passed and none is set in the environment.
    #[error(
        "could not find an Azure resource group name in expected environment variable {var} and one was not provided for this test",
        var = AZURE_RES_GROUP_NAME
    )]
    ResourceGroupNameNotFound,

    #[error("authorization failed: {0}")]
    Auth(String),

    #[error("command failed: {0}")]
    Command(String),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success response from Azure Resource Manager.
    #[error("Azure returned {status} for {url}: {code}: {message}")]
    Api {
        status: u16,
        url: String,
        code: String,
        message: String,
    },

    #[error("error parsing response from {url}: path={path} error={source}")]
    Parse {
        url: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("resource is missing property {0}")]
    MissingProperty(String),

    #[error("no regions left to pick from")]
    NoRegionsToPickFrom,

    #[error("error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AzureError {
    /// True when Azure answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AzureError::Api { status: 404, .. })
    }
}

/// Unwrap a query result or fail the running test.
pub(crate) fn fatal<T>(operation: &str, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::error!("{operation} failed: {e}");
            panic!("{operation} failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages_name_env_vars() {
        let msg = AzureError::SubscriptionIdNotFound.to_string();
        assert!(msg.contains("ARM_SUBSCRIPTION_ID"), "got: {msg}");
        let msg = AzureError::ResourceGroupNameNotFound.to_string();
        assert!(msg.contains("AZURE_RES_GROUP_NAME"), "got: {msg}");
    }

    #[test]
    fn test_is_not_found() {
        let err = AzureError::Api {
            status: 404,
            url: "https://management.azure.com/x".to_string(),
            code: "ResourceNotFound".to_string(),
            message: "gone".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!AzureError::NoRegionsToPickFrom.is_not_found());
    }

    #[test]
    #[should_panic(expected = "get_widget failed")]
    fn test_fatal_panics_with_operation_name() {
        let r: Result<()> = Err(AzureError::SubscriptionIdNotFound);
        fatal("get_widget", r);
    }

    #[test]
    fn test_fatal_returns_value() {
        assert_eq!(fatal("get_widget", Ok(7)), 7);
    }
}
