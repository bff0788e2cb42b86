//! Per-test configuration handed to every query.

use crate::azure::{new_authorizer, ArmClient, Authorizer, StaticAuthorizer};
use crate::config::{self, Endpoints, Env};
use crate::error::Result;
use std::sync::Arc;

/// Environment snapshot plus endpoints. Holds no connections: every query
/// builds a fresh client from it.
#[derive(Clone, Default)]
pub struct Session {
    env: Env,
    endpoints: Endpoints,
    authorizer: Option<Arc<dyn Authorizer>>,
}

impl Session {
    pub fn new(env: Env) -> Self {
        Session {
            env,
            ..Default::default()
        }
    }

    /// Session over the process environment (and `.env`, if present).
    pub fn from_process_env() -> Self {
        Session::new(Env::from_process())
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Use this authorizer instead of selecting one from the environment.
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    pub fn with_static_token(self, token: &str) -> Self {
        self.with_authorizer(Arc::new(StaticAuthorizer(token.to_string())))
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn subscription_id(&self, subscription_id: &str) -> Result<String> {
        config::resolve_subscription_id(subscription_id, &self.env)
    }

    pub fn resource_group_name(&self, resource_group_name: &str) -> Result<String> {
        config::resolve_resource_group_name(resource_group_name, &self.env)
    }

    pub fn authorizer(&self) -> Result<Arc<dyn Authorizer>> {
        match &self.authorizer {
            Some(authorizer) => Ok(Arc::clone(authorizer)),
            None => new_authorizer(&self.env, &self.endpoints),
        }
    }

    /// Client scoped to the resolved subscription.
    pub fn arm_client(&self, subscription_id: &str) -> Result<ArmClient> {
        let subscription_id = self.subscription_id(subscription_id)?;
        Ok(ArmClient::new(
            &self.endpoints.resource_manager,
            self.authorizer()?,
            &subscription_id,
        ))
    }

    /// Client with no subscription scope.
    pub fn arm_client_unscoped(&self) -> Result<ArmClient> {
        Ok(ArmClient::new(
            &self.endpoints.resource_manager,
            self.authorizer()?,
            "",
        ))
    }
}
