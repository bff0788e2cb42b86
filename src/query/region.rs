//! Region listing and random region selection.

use super::subscription::subscriptions_client;
use crate::error::{fatal, AzureError, Result};
use crate::session::Session;
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

/// Regions that have been generally available for at least a year.
///
/// Reference: https://azure.microsoft.com/en-us/global-infrastructure/locations/
pub const STABLE_REGIONS: &[&str] = &[
    // Americas
    "centralus",
    "eastus",
    "eastus2",
    "northcentralus",
    "southcentralus",
    "westcentralus",
    "westus",
    "westus2",
    "canadacentral",
    "canadaeast",
    "brazilsouth",
    // Europe
    "northeurope",
    "westeurope",
    "francecentral",
    "francesouth",
    "uksouth",
    "ukwest",
    // germanycentral and germanynortheast are listed on the website but not returned by the API
    // Asia Pacific
    "eastasia",
    "southeastasia",
    "australiacentral",
    "australiacentral2",
    "australiaeast",
    "australiasoutheast",
    "chinaeast",
    "chinaeast2",
    "chinanorth",
    "chinanorth2",
    "centralindia",
    "southindia",
    "westindia",
    "japaneast",
    "japanwest",
    "koreacentral",
    "koreasouth",
    // Middle East and Africa
    "southafricanorth",
    "southafricawest",
    "uaecentral",
    "uaenorth",
];

static REGION_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_region_name_regex() -> &'static Regex {
    REGION_NAME_REGEX.get_or_init(|| Regex::new(r"^[a-z][a-z0-9]*$").expect("Invalid Regex"))
}

/// Programmatic region names are lowercase letters, optionally followed by digits.
pub fn looks_like_region_name(name: &str) -> bool {
    get_region_name_regex().is_match(name)
}

/// Items of `list` also in `other`, in `list` order.
pub fn list_intersection<S: AsRef<str>, T: AsRef<str>>(list: &[S], other: &[T]) -> Vec<String> {
    list.iter()
        .map(AsRef::as_ref)
        .filter(|item| other.iter().any(|o| o.as_ref() == *item))
        .map(str::to_string)
        .collect()
}

/// Items of `list` not in `other`, in `list` order.
pub fn list_subtract<S: AsRef<str>, T: AsRef<str>>(list: &[S], other: &[T]) -> Vec<String> {
    list.iter()
        .map(AsRef::as_ref)
        .filter(|item| !other.iter().any(|o| o.as_ref() == *item))
        .map(str::to_string)
        .collect()
}

/// Uniform draw from `candidates` minus `forbidden`.
pub fn pick_random_region<S, T, R>(candidates: &[S], forbidden: &[T], rng: &mut R) -> Result<String>
where
    S: AsRef<str>,
    T: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut allowed = list_subtract(candidates, forbidden);
    if allowed.is_empty() {
        return Err(AzureError::NoRegionsToPickFrom);
    }
    let i = rng.random_range(0..allowed.len());
    Ok(allowed.swap_remove(i))
}

/// Random region from `approved_regions`, or from every region the subscription can
/// see when `approved_regions` is empty, never one of `forbidden_regions`.
pub async fn try_get_random_region(
    session: &Session,
    approved_regions: &[&str],
    forbidden_regions: &[&str],
    subscription_id: &str,
) -> Result<String> {
    let region = if approved_regions.is_empty() {
        let all_regions = try_get_all_azure_regions(session, subscription_id).await?;
        pick_random_region(&all_regions, forbidden_regions, &mut rand::rng())?
    } else {
        pick_random_region(approved_regions, forbidden_regions, &mut rand::rng())?
    };
    log::info!("Using region {region}");
    Ok(region)
}

pub async fn get_random_region(
    session: &Session,
    approved_regions: &[&str],
    forbidden_regions: &[&str],
    subscription_id: &str,
) -> String {
    fatal(
        "get_random_region",
        try_get_random_region(session, approved_regions, forbidden_regions, subscription_id).await,
    )
}

/// Like [`try_get_random_region`] but restricted to [`STABLE_REGIONS`]. Approved regions
/// that are not stable are ignored.
pub fn try_get_random_stable_region(
    approved_regions: &[&str],
    forbidden_regions: &[&str],
) -> Result<String> {
    let mut regions: Vec<String> = STABLE_REGIONS.iter().map(|r| r.to_string()).collect();
    if !approved_regions.is_empty() {
        regions = list_intersection(&regions, approved_regions);
    }
    let region = pick_random_region(&regions, forbidden_regions, &mut rand::rng())?;
    log::info!("Using region {region}");
    Ok(region)
}

pub fn get_random_stable_region(approved_regions: &[&str], forbidden_regions: &[&str]) -> String {
    fatal(
        "get_random_stable_region",
        try_get_random_stable_region(approved_regions, forbidden_regions),
    )
}

/// Names of every region available to the subscription.
pub async fn try_get_all_azure_regions(
    session: &Session,
    subscription_id: &str,
) -> Result<Vec<String>> {
    log::info!("Looking up all Azure regions available in this account");
    let subscription_id = session.subscription_id(subscription_id)?;
    let client = subscriptions_client(session)?;
    let locations = client.list_locations(&subscription_id).await?;
    Ok(locations
        .value
        .into_iter()
        .filter_map(|location| location.name)
        .collect())
}

pub async fn get_all_azure_regions(session: &Session, subscription_id: &str) -> Vec<String> {
    fatal(
        "get_all_azure_regions",
        try_get_all_azure_regions(session, subscription_id).await,
    )
}
