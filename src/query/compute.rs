//! Virtual machine and VM extension queries.

use crate::azure::ArmClient;
use crate::config::COMPUTE_API_VERSION;
use crate::error::{fatal, AzureError, Result};
use crate::models::compute::ManagedDiskParameters;
use crate::models::{VirtualMachine, VirtualMachineExtension};
use crate::session::Session;
use std::collections::HashMap;

/// `$expand` value that adds the instance view to a VM.
pub const INSTANCE_VIEW: &str = "instanceView";

pub struct VirtualMachinesClient {
    arm: ArmClient,
}

impl VirtualMachinesClient {
    pub async fn get(
        &self,
        resource_group: &str,
        vm_name: &str,
        expand: Option<&str>,
    ) -> Result<VirtualMachine> {
        let path = self.arm.resource_group_path(
            resource_group,
            &format!("Microsoft.Compute/virtualMachines/{vm_name}"),
        );
        match expand {
            Some(expand) => {
                self.arm
                    .get(&path, COMPUTE_API_VERSION, &[("$expand", expand)])
                    .await
            }
            None => self.arm.get(&path, COMPUTE_API_VERSION, &[]).await,
        }
    }
}

pub struct VirtualMachineExtensionsClient {
    arm: ArmClient,
}

impl VirtualMachineExtensionsClient {
    pub async fn get(
        &self,
        resource_group: &str,
        vm_name: &str,
        extension_name: &str,
    ) -> Result<VirtualMachineExtension> {
        let path = self.arm.resource_group_path(
            resource_group,
            &format!("Microsoft.Compute/virtualMachines/{vm_name}/extensions/{extension_name}"),
        );
        self.arm.get(&path, COMPUTE_API_VERSION, &[]).await
    }
}

pub fn virtual_machines_client(
    session: &Session,
    subscription_id: &str,
) -> Result<VirtualMachinesClient> {
    Ok(VirtualMachinesClient {
        arm: session.arm_client(subscription_id)?,
    })
}

pub fn virtual_machine_extensions_client(
    session: &Session,
    subscription_id: &str,
) -> Result<VirtualMachineExtensionsClient> {
    Ok(VirtualMachineExtensionsClient {
        arm: session.arm_client(subscription_id)?,
    })
}

async fn fetch_vm(
    session: &Session,
    resource_group: &str,
    vm_name: &str,
    subscription_id: &str,
    expand: Option<&str>,
) -> Result<VirtualMachine> {
    let resource_group = session.resource_group_name(resource_group)?;
    let client = virtual_machines_client(session, subscription_id)?;
    client.get(&resource_group, vm_name, expand).await
}

/// Size type of the VM, e.g. `Standard_B1s`.
pub async fn try_get_size_of_virtual_machine(
    session: &Session,
    resource_group: &str,
    vm_name: &str,
    subscription_id: &str,
) -> Result<String> {
    let vm = fetch_vm(
        session,
        resource_group,
        vm_name,
        subscription_id,
        Some(INSTANCE_VIEW),
    )
    .await?;
    vm.vm_size()
        .map(str::to_string)
        .ok_or_else(|| AzureError::MissingProperty("properties.hardwareProfile.vmSize".into()))
}

pub async fn get_size_of_virtual_machine(
    session: &Session,
    resource_group: &str,
    vm_name: &str,
    subscription_id: &str,
) -> String {
    fatal(
        "get_size_of_virtual_machine",
        try_get_size_of_virtual_machine(session, resource_group, vm_name, subscription_id).await,
    )
}

/// Tags of the VM; an untagged VM gives an empty map.
pub async fn try_get_tags_for_virtual_machine(
    session: &Session,
    resource_group: &str,
    vm_name: &str,
    subscription_id: &str,
) -> Result<HashMap<String, String>> {
    let vm = fetch_vm(
        session,
        resource_group,
        vm_name,
        subscription_id,
        Some(INSTANCE_VIEW),
    )
    .await?;
    Ok(vm.tags.unwrap_or_default())
}

pub async fn get_tags_for_virtual_machine(
    session: &Session,
    resource_group: &str,
    vm_name: &str,
    subscription_id: &str,
) -> HashMap<String, String> {
    fatal(
        "get_tags_for_virtual_machine",
        try_get_tags_for_virtual_machine(session, resource_group, vm_name, subscription_id).await,
    )
}

pub async fn try_get_vm_by_name(
    session: &Session,
    resource_group: &str,
    vm_name: &str,
    subscription_id: &str,
) -> Result<VirtualMachine> {
    fetch_vm(session, resource_group, vm_name, subscription_id, None).await
}

pub async fn get_vm_by_name(
    session: &Session,
    resource_group: &str,
    vm_name: &str,
    subscription_id: &str,
) -> VirtualMachine {
    fatal(
        "get_vm_by_name",
        try_get_vm_by_name(session, resource_group, vm_name, subscription_id).await,
    )
}

/// Storage account types of the OS disk followed by each data disk.
pub async fn try_get_type_of_virtual_machine_disks(
    session: &Session,
    resource_group: &str,
    vm_name: &str,
    subscription_id: &str,
) -> Result<Vec<String>> {
    let vm = fetch_vm(
        session,
        resource_group,
        vm_name,
        subscription_id,
        Some(INSTANCE_VIEW),
    )
    .await?;
    disk_types(&vm)
}

pub async fn get_type_of_virtual_machine_disks(
    session: &Session,
    resource_group: &str,
    vm_name: &str,
    subscription_id: &str,
) -> Vec<String> {
    fatal(
        "get_type_of_virtual_machine_disks",
        try_get_type_of_virtual_machine_disks(session, resource_group, vm_name, subscription_id)
            .await,
    )
}

fn disk_types(vm: &VirtualMachine) -> Result<Vec<String>> {
    let storage = vm
        .storage_profile()
        .ok_or_else(|| AzureError::MissingProperty("properties.storageProfile".into()))?;
    let os_disk = storage
        .os_disk
        .as_ref()
        .ok_or_else(|| AzureError::MissingProperty("storageProfile.osDisk".into()))?;

    let mut types = vec![storage_account_type(
        os_disk.managed_disk.as_ref(),
        "storageProfile.osDisk.managedDisk.storageAccountType",
    )?];
    for (i, disk) in storage.data_disks.iter().flatten().enumerate() {
        types.push(storage_account_type(
            disk.managed_disk.as_ref(),
            &format!("storageProfile.dataDisks[{i}].managedDisk.storageAccountType"),
        )?);
    }
    Ok(types)
}

fn storage_account_type(disk: Option<&ManagedDiskParameters>, property: &str) -> Result<String> {
    disk.and_then(|d| d.storage_account_type.clone())
        .ok_or_else(|| AzureError::MissingProperty(property.to_string()))
}

pub async fn try_get_virtual_machine_extension(
    session: &Session,
    resource_group: &str,
    vm_name: &str,
    extension_name: &str,
    subscription_id: &str,
) -> Result<VirtualMachineExtension> {
    let resource_group = session.resource_group_name(resource_group)?;
    let client = virtual_machine_extensions_client(session, subscription_id)?;
    client.get(&resource_group, vm_name, extension_name).await
}

pub async fn get_virtual_machine_extension(
    session: &Session,
    resource_group: &str,
    vm_name: &str,
    extension_name: &str,
    subscription_id: &str,
) -> VirtualMachineExtension {
    fatal(
        "get_virtual_machine_extension",
        try_get_virtual_machine_extension(
            session,
            resource_group,
            vm_name,
            extension_name,
            subscription_id,
        )
        .await,
    )
}
