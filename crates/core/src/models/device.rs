use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A managed device as reported by the inventory source.
///
/// Only `managed_device_id` is guaranteed; every other attribute may be
/// missing from the upstream record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub managed_device_id: String,
    pub device_name: Option<String>,
    /// Directory (Entra ID) device id, used as the join key for escrowed keys.
    pub azure_ad_device_id: Option<String>,
    pub serial_number: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub operating_system: Option<String>,
    pub os_version: Option<String>,
    pub is_encrypted: Option<bool>,
    pub compliance_state: Option<String>,
    pub last_sync_date_time: Option<DateTime<Utc>>,
    pub enrolled_date_time: Option<DateTime<Utc>>,
    pub user_principal_name: Option<String>,
}

impl DeviceRecord {
    /// Returns true if the device runs on `platform` (ASCII case-insensitive).
    pub fn is_platform(&self, platform: &str) -> bool {
        self.operating_system
            .as_deref()
            .is_some_and(|os| os.eq_ignore_ascii_case(platform))
    }
}
