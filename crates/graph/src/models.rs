//! Microsoft Graph response structs for managed devices and recovery keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of a Graph collection response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphPage<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink", default)]
    pub next_link: Option<String>,
}

/// An Intune managed device (`microsoft.graph.managedDevice`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphManagedDevice {
    pub id: String,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(rename = "azureADDeviceId", default)]
    pub azure_ad_device_id: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub operating_system: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub is_encrypted: Option<bool>,
    #[serde(default)]
    pub compliance_state: Option<String>,
    #[serde(default)]
    pub last_sync_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub enrolled_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_principal_name: Option<String>,
}

/// Fields requested for managed devices via `$select`.
pub const MANAGED_DEVICE_SELECT: &str = "id,deviceName,azureADDeviceId,serialNumber,model,\
manufacturer,operatingSystem,osVersion,isEncrypted,complianceState,lastSyncDateTime,\
enrolledDateTime,userPrincipalName";

/// A BitLocker recovery key (`microsoft.graph.bitlockerRecoveryKey`), metadata only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRecoveryKey {
    pub id: String,
    #[serde(default)]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub volume_type: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
}
