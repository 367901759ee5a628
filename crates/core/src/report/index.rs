//! Lookup from device id to the recovery keys escrowed for it.

use std::collections::HashMap;

use tracing::debug;

use crate::models::recovery_key::RecoveryKeyRecord;

/// Recovery keys grouped by owning device id.
///
/// Every key in a bucket has a device id equal to the bucket key, and keys
/// with a blank owner are never indexed.
#[derive(Debug, Default)]
pub struct DeviceKeyIndex {
    buckets: HashMap<String, Vec<RecoveryKeyRecord>>,
}

impl DeviceKeyIndex {
    /// Keys escrowed for `device_id`, in input order. Matching is exact.
    pub fn get(&self, device_id: &str) -> &[RecoveryKeyRecord] {
        self.buckets.get(device_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct device ids with at least one key.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Group recovery keys by owning device id, skipping keys with no owner.
pub fn build_index(keys: impl IntoIterator<Item = RecoveryKeyRecord>) -> DeviceKeyIndex {
    let mut buckets: HashMap<String, Vec<RecoveryKeyRecord>> = HashMap::new();
    let mut skipped = 0usize;

    for key in keys {
        let Some(owner) = key.owner().map(str::to_owned) else {
            skipped += 1;
            continue;
        };
        buckets.entry(owner).or_default().push(key);
    }

    debug!(devices = buckets.len(), skipped, "Built recovery key index");
    DeviceKeyIndex { buckets }
}

#[cfg(test)]
impl DeviceKeyIndex {
    fn device_ids(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str, device_id: Option<&str>) -> RecoveryKeyRecord {
        RecoveryKeyRecord {
            id: id.into(),
            device_id: device_id.map(Into::into),
            volume_type: Some("operatingSystemVolume".into()),
            created_date_time: None,
        }
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let index = build_index(Vec::new());
        assert!(index.is_empty());
        assert!(index.get("AAD-1").is_empty());
    }

    #[test]
    fn groups_keys_preserving_input_order() {
        let index = build_index(vec![
            key("k1", Some("AAD-1")),
            key("k2", Some("AAD-2")),
            key("k3", Some("AAD-1")),
        ]);
        assert_eq!(index.len(), 2);
        let ids: Vec<&str> = index.get("AAD-1").iter().map(|k| k.id.as_str()).collect();
        assert_eq!(ids, ["k1", "k3"]);
        assert_eq!(index.get("AAD-2").len(), 1);
    }

    #[test]
    fn skips_keys_without_owner() {
        let index = build_index(vec![
            key("k1", None),
            key("k2", Some("")),
            key("k3", Some(" \t")),
            key("k4", Some("AAD-1")),
        ]);
        assert_eq!(index.len(), 1);
        assert!(index.device_ids().all(|id| !id.trim().is_empty()));
    }

    #[test]
    fn every_bucket_matches_its_key() {
        let index = build_index(vec![
            key("k1", Some("AAD-1")),
            key("k2", Some("aad-1")),
            key("k3", Some("AAD-2")),
        ]);
        for device_id in index.device_ids() {
            assert!(index
                .get(device_id)
                .iter()
                .all(|k| k.device_id.as_deref() == Some(device_id)));
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let index = build_index(vec![key("k1", Some("AAD-1"))]);
        assert!(index.get("aad-1").is_empty());
        assert_eq!(index.get("AAD-1").len(), 1);
    }
}
