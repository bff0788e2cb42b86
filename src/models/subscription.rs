//! Subscription location listing.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub id: Option<String>,
    pub subscription_id: Option<String>,
    /// Programmatic region name, e.g. `eastus2`.
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct LocationListResult {
    pub value: Vec<Location>,
}
