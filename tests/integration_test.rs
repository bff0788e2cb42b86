//! Live checks against a real subscription.
//!
//! Ignored by default. Run with `cargo test -- --ignored` after `az login` (or with
//! service principal variables exported) and `ARM_SUBSCRIPTION_ID` set. Resource
//! names come from the Terraform outputs of the deployment under test, exported as
//! `AZTEST_*` variables.

use aztest::query::{compute, network, region};
use aztest::{logging, Session};

const APPROVED_REGIONS: &[&str] = &[
    "centralus",
    "eastus",
    "eastus2",
    "northcentralus",
    "southcentralus",
    "westcentralus",
    "westus",
    "westus2",
];

fn output(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set to a Terraform output"))
}

#[tokio::test]
#[ignore]
async fn test_get_random_region() {
    logging::init();
    let session = Session::from_process_env();
    let region = region::get_random_region(&session, &[], &[], "").await;
    assert!(region::looks_like_region_name(&region), "got {region}");
}

#[tokio::test]
#[ignore]
async fn test_get_all_azure_regions() {
    logging::init();
    let session = Session::from_process_env();
    let regions = region::get_all_azure_regions(&session, "").await;
    assert!(regions.len() >= 30, "Number of regions: {}", regions.len());
    for r in &regions {
        assert!(region::looks_like_region_name(r), "got {r}");
    }
}

#[tokio::test]
#[ignore]
async fn test_network_deployment() {
    logging::init();
    let session = Session::from_process_env();
    let azure_region = region::get_random_region(&session, APPROVED_REGIONS, &[], "").await;
    log::info!("Deployment region {azure_region}");

    let vnet_rg = output("AZTEST_VNET_RG");
    let vnet_name = output("AZTEST_VNET_NAME");
    let subnet_id = output("AZTEST_SUBNET_ID");
    let nsg_name = output("AZTEST_NSG_NAME");

    let subnets = network::get_subnets_for_vnet(&session, &vnet_rg, &vnet_name, "").await;
    assert!(subnets.contains(&subnet_id), "{subnet_id} not in {subnets:?}");

    let associations = network::get_associations_for_nsg(&session, &vnet_rg, &nsg_name, "").await;
    assert!(
        associations.contains(&subnet_id),
        "{subnet_id} not associated with {nsg_name}"
    );
}

#[tokio::test]
#[ignore]
async fn test_compute_deployment() {
    logging::init();
    let session = Session::from_process_env();
    let resource_group = output("AZTEST_VM_RG");
    let vm_name = output("AZTEST_VM_NAME");

    let size = compute::get_size_of_virtual_machine(&session, &resource_group, &vm_name, "").await;
    assert_eq!(size, "Standard_B1s");

    let disks =
        compute::get_type_of_virtual_machine_disks(&session, &resource_group, &vm_name, "").await;
    assert_eq!(disks.first().map(String::as_str), Some("Standard_LRS"));
}

#[tokio::test]
async fn test_missing_subscription_is_named_error() {
    let session = Session::new(aztest::Env::default());
    let err = region::try_get_all_azure_regions(&session, "")
        .await
        .unwrap_err();
    assert!(matches!(err, aztest::AzureError::SubscriptionIdNotFound));
}
