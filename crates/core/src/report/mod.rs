//! The report pipeline: fetch, index, join, summarize.

pub mod index;
pub mod join;
pub mod summary;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::connectors::InventorySource;
use crate::error::Result;
use crate::models::device::DeviceRecord;
use crate::models::recovery_key::RecoveryKeyRecord;
use crate::models::report::{EnrichedDeviceRecord, SummaryRow};

pub use index::{build_index, DeviceKeyIndex};
pub use join::{join_and_classify, ClassificationPolicy};
pub use summary::summarize;

/// The two tables of a finished report.
#[derive(Debug, Clone)]
pub struct DeviceReport {
    pub devices: Vec<EnrichedDeviceRecord>,
    pub summary: Vec<SummaryRow>,
    pub generated_at: DateTime<Utc>,
}

impl DeviceReport {
    /// Build a report from already-fetched devices and keys.
    pub fn build(
        devices: Vec<DeviceRecord>,
        keys: Vec<RecoveryKeyRecord>,
        policy: &ClassificationPolicy,
    ) -> Self {
        let index = build_index(keys);
        let devices = join_and_classify(devices, &index, policy);
        let summary = summarize(&devices);
        Self {
            devices,
            summary,
            generated_at: Utc::now(),
        }
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Devices with at least one recovery key in escrow.
    pub fn escrowed_count(&self) -> usize {
        self.devices
            .iter()
            .filter(|d| d.has_recovery_key_in_escrow)
            .count()
    }

    /// Devices with no recovery key in escrow.
    pub fn missing_escrow_count(&self) -> usize {
        self.device_count() - self.escrowed_count()
    }
}

/// Fetch both collections from `source` and build the report.
///
/// Any fetch failure aborts the run before processing starts.
pub async fn generate(
    source: &dyn InventorySource,
    policy: &ClassificationPolicy,
) -> Result<DeviceReport> {
    info!(source = source.source_name(), "Generating recovery key report");

    info!("Fetching managed devices");
    let devices = source.fetch_devices().await?;
    info!(count = devices.len(), "Fetched managed devices");

    info!("Fetching recovery keys");
    let keys = source.fetch_recovery_keys().await?;
    info!(count = keys.len(), "Fetched recovery keys");

    let report = DeviceReport::build(devices, keys, policy);
    info!(
        devices = report.device_count(),
        escrowed = report.escrowed_count(),
        missing = report.missing_escrow_count(),
        "Report generated"
    );

    Ok(report)
}
