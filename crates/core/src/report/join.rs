//! Left join of the device inventory against the recovery key index.

use tracing::debug;

use crate::models::classification::{EncryptionStatus, OsVersion, WindowsVersion};
use crate::models::device::DeviceRecord;
use crate::models::recovery_key::RecoveryKeyRecord;
use crate::models::report::EnrichedDeviceRecord;

use super::index::DeviceKeyIndex;

/// Rules applied while classifying devices.
#[derive(Debug, Clone)]
pub struct ClassificationPolicy {
    /// Only devices on this platform are reported.
    pub target_platform: String,
    /// Lowest OS version classified as Windows 11.
    pub windows11_min_version: OsVersion,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            target_platform: "Windows".into(),
            windows11_min_version: OsVersion::default(),
        }
    }
}

/// Produce one enriched record per device on the target platform, in input order.
///
/// Devices on other platforms are dropped. Devices without a matching index
/// bucket are reported with zero keys.
pub fn join_and_classify(
    devices: Vec<DeviceRecord>,
    index: &DeviceKeyIndex,
    policy: &ClassificationPolicy,
) -> Vec<EnrichedDeviceRecord> {
    let total = devices.len();
    let enriched: Vec<EnrichedDeviceRecord> = devices
        .into_iter()
        .filter(|d| d.is_platform(&policy.target_platform))
        .map(|d| enrich(d, index, &policy.windows11_min_version))
        .collect();

    debug!(
        total,
        kept = enriched.len(),
        platform = %policy.target_platform,
        "Joined devices with recovery keys"
    );
    enriched
}

fn enrich(
    device: DeviceRecord,
    index: &DeviceKeyIndex,
    windows11_min: &OsVersion,
) -> EnrichedDeviceRecord {
    let keys: &[RecoveryKeyRecord] = match device.azure_ad_device_id.as_deref() {
        Some(id) if !id.is_empty() => index.get(id),
        _ => &[],
    };

    let mut recovery_volume_types: Vec<String> = Vec::new();
    for volume_type in keys.iter().filter_map(|k| k.volume_type.as_deref()) {
        if !recovery_volume_types.iter().any(|seen| seen == volume_type) {
            recovery_volume_types.push(volume_type.to_string());
        }
    }
    let recovery_key_ids: Vec<String> = keys.iter().map(|k| k.id.clone()).collect();

    EnrichedDeviceRecord {
        windows_version: WindowsVersion::classify(device.os_version.as_deref(), windows11_min),
        encryption_status: EncryptionStatus::from_flag(device.is_encrypted),
        has_recovery_key_in_escrow: !recovery_key_ids.is_empty(),
        recovery_key_count: recovery_key_ids.len(),
        recovery_volume_types,
        recovery_key_ids,
        device,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::index::build_index;

    fn windows_device(name: &str, aad_id: Option<&str>, os_version: &str) -> DeviceRecord {
        DeviceRecord {
            managed_device_id: format!("md-{name}"),
            device_name: Some(name.into()),
            azure_ad_device_id: aad_id.map(Into::into),
            operating_system: Some("Windows".into()),
            os_version: Some(os_version.into()),
            is_encrypted: Some(true),
            ..Default::default()
        }
    }

    fn key(id: &str, device_id: &str, volume_type: &str) -> RecoveryKeyRecord {
        RecoveryKeyRecord {
            id: id.into(),
            device_id: Some(device_id.into()),
            volume_type: Some(volume_type.into()),
            created_date_time: None,
        }
    }

    #[test]
    fn joins_matching_keys_only() {
        let index = build_index(vec![
            key("k1", "AAD-1", "OperatingSystemVolume"),
            key("k2", "AAD-1", "FixedDataVolume"),
            key("k3", "AAD-2", "OperatingSystemVolume"),
        ]);
        let devices = vec![windows_device("PC-1", Some("AAD-1"), "10.0.22631")];

        let records = join_and_classify(devices, &index, &ClassificationPolicy::default());

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.recovery_key_count, 2);
        assert!(record.has_recovery_key_in_escrow);
        assert_eq!(
            record.recovery_volume_types,
            ["OperatingSystemVolume", "FixedDataVolume"]
        );
        assert_eq!(record.recovery_key_ids, ["k1", "k2"]);
        assert!(!record.recovery_key_ids.contains(&"k3".to_string()));
    }

    #[test]
    fn volume_types_are_distinct_in_first_seen_order() {
        let index = build_index(vec![
            key("k1", "AAD-1", "FixedDataVolume"),
            key("k2", "AAD-1", "OperatingSystemVolume"),
            key("k3", "AAD-1", "FixedDataVolume"),
        ]);
        let devices = vec![windows_device("PC-1", Some("AAD-1"), "10.0.19045")];

        let records = join_and_classify(devices, &index, &ClassificationPolicy::default());

        assert_eq!(
            records[0].recovery_volume_types,
            ["FixedDataVolume", "OperatingSystemVolume"]
        );
        assert_eq!(records[0].recovery_key_count, 3);
    }

    #[test]
    fn unmatched_or_missing_ids_have_zero_keys() {
        let index = build_index(vec![key("k1", "AAD-1", "OperatingSystemVolume")]);
        let devices = vec![
            windows_device("PC-1", Some("AAD-9"), "10.0.19045"),
            windows_device("PC-2", None, "10.0.19045"),
            windows_device("PC-3", Some(""), "10.0.19045"),
            windows_device("PC-4", Some("aad-1"), "10.0.19045"),
        ];

        let records = join_and_classify(devices, &index, &ClassificationPolicy::default());

        assert_eq!(records.len(), 4);
        for record in &records {
            assert_eq!(record.recovery_key_count, 0);
            assert!(!record.has_recovery_key_in_escrow);
            assert!(record.recovery_key_ids.is_empty());
            assert!(record.recovery_volume_types.is_empty());
        }
    }

    #[test]
    fn drops_other_platforms_and_keeps_order() {
        let mut iphone = windows_device("iPhone", Some("AAD-3"), "17.4");
        iphone.operating_system = Some("iOS".into());
        let mut unknown_os = windows_device("Mystery", None, "1.0");
        unknown_os.operating_system = None;

        let devices = vec![
            windows_device("PC-B", None, "10.0.19045"),
            iphone,
            unknown_os,
            windows_device("PC-A", None, "10.0.22000"),
        ];

        let records = join_and_classify(
            devices,
            &DeviceKeyIndex::default(),
            &ClassificationPolicy::default(),
        );

        let names: Vec<&str> = records
            .iter()
            .map(|r| r.device.device_name.as_deref().unwrap())
            .collect();
        assert_eq!(names, ["PC-B", "PC-A"]);
    }

    #[test]
    fn classifies_version_and_encryption() {
        let mut unencrypted = windows_device("PC-2", None, "10.0.22000");
        unencrypted.is_encrypted = Some(false);
        let mut unreported = windows_device("PC-3", None, "not-a-version");
        unreported.is_encrypted = None;

        let devices = vec![
            windows_device("PC-1", None, "10.0.21999"),
            unencrypted,
            unreported,
        ];
        let records = join_and_classify(
            devices,
            &DeviceKeyIndex::default(),
            &ClassificationPolicy::default(),
        );

        assert_eq!(records[0].windows_version, WindowsVersion::Windows10);
        assert_eq!(records[0].encryption_status, EncryptionStatus::Yes);
        assert_eq!(records[1].windows_version, WindowsVersion::Windows11);
        assert_eq!(records[1].encryption_status, EncryptionStatus::No);
        assert_eq!(records[2].windows_version, WindowsVersion::Unknown);
        assert_eq!(records[2].encryption_status, EncryptionStatus::Unknown);
    }

    #[test]
    fn key_count_invariants_hold() {
        let index = build_index(vec![
            key("k1", "AAD-1", "OperatingSystemVolume"),
            key("k2", "AAD-2", "OperatingSystemVolume"),
            key("k3", "AAD-2", "RemovableDataVolume"),
        ]);
        let devices = vec![
            windows_device("PC-1", Some("AAD-1"), "10.0.19045"),
            windows_device("PC-2", Some("AAD-2"), "10.0.22631"),
            windows_device("PC-3", Some("AAD-3"), "10.0.22631"),
        ];

        for record in join_and_classify(devices, &index, &ClassificationPolicy::default()) {
            assert_eq!(record.recovery_key_count, record.recovery_key_ids.len());
            assert_eq!(
                record.has_recovery_key_in_escrow,
                record.recovery_key_count > 0
            );
        }
    }
}
