//! Virtual machine data model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An Azure virtual machine.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct VirtualMachine {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub tags: Option<HashMap<String, String>>,
    pub properties: Option<VirtualMachineProperties>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachineProperties {
    pub vm_id: Option<String>,
    pub provisioning_state: Option<String>,
    pub hardware_profile: Option<HardwareProfile>,
    pub storage_profile: Option<StorageProfile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct HardwareProfile {
    /// Size type, e.g. `Standard_B1s`.
    pub vm_size: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageProfile {
    pub os_disk: Option<OsDisk>,
    pub data_disks: Option<Vec<DataDisk>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct OsDisk {
    pub name: Option<String>,
    pub os_type: Option<String>,
    pub disk_size_gb: Option<u32>,
    /// Absent for unmanaged (VHD blob) disks.
    pub managed_disk: Option<ManagedDiskParameters>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DataDisk {
    pub lun: Option<i32>,
    pub name: Option<String>,
    pub disk_size_gb: Option<u32>,
    pub managed_disk: Option<ManagedDiskParameters>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagedDiskParameters {
    pub id: Option<String>,
    /// e.g. `Standard_LRS`, `Premium_LRS`.
    pub storage_account_type: Option<String>,
}

impl VirtualMachine {
    pub fn vm_size(&self) -> Option<&str> {
        self.properties
            .as_ref()?
            .hardware_profile
            .as_ref()?
            .vm_size
            .as_deref()
    }

    pub fn storage_profile(&self) -> Option<&StorageProfile> {
        self.properties.as_ref()?.storage_profile.as_ref()
    }
}

/// An extension installed on a virtual machine.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct VirtualMachineExtension {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub tags: Option<HashMap<String, String>>,
    pub properties: Option<VirtualMachineExtensionProperties>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachineExtensionProperties {
    pub publisher: Option<String>,
    /// Extension type, e.g. `CustomScript`.
    #[serde(rename = "type")]
    pub extension_type: Option<String>,
    pub type_handler_version: Option<String>,
    pub auto_upgrade_minor_version: Option<bool>,
    pub provisioning_state: Option<String>,
    pub settings: Option<serde_json::Value>,
}
