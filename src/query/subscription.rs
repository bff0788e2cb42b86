//! Subscriptions provider client.

use crate::azure::ArmClient;
use crate::config::SUBSCRIPTIONS_API_VERSION;
use crate::error::Result;
use crate::models::LocationListResult;
use crate::session::Session;

/// Not scoped to a subscription; each call names the one it asks about.
pub struct SubscriptionsClient {
    arm: ArmClient,
}

impl SubscriptionsClient {
    /// Locations available to `subscription_id`.
    pub async fn list_locations(&self, subscription_id: &str) -> Result<LocationListResult> {
        let path = format!("/subscriptions/{subscription_id}/locations");
        self.arm.get(&path, SUBSCRIPTIONS_API_VERSION, &[]).await
    }
}

pub fn subscriptions_client(session: &Session) -> Result<SubscriptionsClient> {
    Ok(SubscriptionsClient {
        arm: session.arm_client_unscoped()?,
    })
}
