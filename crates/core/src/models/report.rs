use serde::Serialize;

use super::classification::{EncryptionStatus, WindowsVersion};
use super::device::DeviceRecord;

/// A Windows device joined with its escrowed recovery-key metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedDeviceRecord {
    #[serde(flatten)]
    pub device: DeviceRecord,
    pub windows_version: WindowsVersion,
    pub encryption_status: EncryptionStatus,
    pub has_recovery_key_in_escrow: bool,
    pub recovery_key_count: usize,
    /// Distinct volume types, in the order first seen.
    pub recovery_volume_types: Vec<String>,
    pub recovery_key_ids: Vec<String>,
}

/// Device count for one (Windows version, encryption status) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub windows_version: WindowsVersion,
    pub encryption_status: EncryptionStatus,
    pub count: usize,
}
