//! Conversion from Graph response structs into Lockwatch domain records.

use lockwatch_core::models::device::DeviceRecord;
use lockwatch_core::models::recovery_key::RecoveryKeyRecord;

use crate::models::{GraphManagedDevice, GraphRecoveryKey};

/// Graph reports this id for devices that never registered with Entra ID.
const UNREGISTERED_DEVICE_ID: &str = "00000000-0000-0000-0000-000000000000";

pub struct GraphMapper;

impl GraphMapper {
    pub fn normalize_devices(raw: Vec<GraphManagedDevice>) -> Vec<DeviceRecord> {
        raw.into_iter().map(Self::normalize_device).collect()
    }

    pub fn normalize_device(raw: GraphManagedDevice) -> DeviceRecord {
        DeviceRecord {
            managed_device_id: raw.id,
            device_name: raw.device_name,
            azure_ad_device_id: raw
                .azure_ad_device_id
                .filter(|id| id != UNREGISTERED_DEVICE_ID),
            serial_number: raw.serial_number,
            model: raw.model,
            manufacturer: raw.manufacturer,
            operating_system: raw.operating_system,
            os_version: raw.os_version,
            is_encrypted: raw.is_encrypted,
            compliance_state: raw.compliance_state,
            last_sync_date_time: raw.last_sync_date_time,
            enrolled_date_time: raw.enrolled_date_time,
            user_principal_name: raw.user_principal_name,
        }
    }

    pub fn normalize_recovery_keys(raw: Vec<GraphRecoveryKey>) -> Vec<RecoveryKeyRecord> {
        raw.into_iter()
            .map(|key| RecoveryKeyRecord {
                id: key.id,
                device_id: key.device_id,
                volume_type: key.volume_type,
                created_date_time: key.created_date_time,
            })
            .collect()
    }
}
