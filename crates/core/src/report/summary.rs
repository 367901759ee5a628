//! Aggregate device counts by Windows version and encryption status.

use std::collections::HashMap;

use crate::models::classification::{EncryptionStatus, WindowsVersion};
use crate::models::report::{EnrichedDeviceRecord, SummaryRow};

/// Count devices per (Windows version, encryption status) pair.
///
/// Rows are sorted by the display labels, so `Unknown` sorts before
/// `Windows 10` and `No` before `Unknown` before `Yes`.
pub fn summarize(records: &[EnrichedDeviceRecord]) -> Vec<SummaryRow> {
    let mut counts: HashMap<(WindowsVersion, EncryptionStatus), usize> = HashMap::new();
    for record in records {
        *counts
            .entry((record.windows_version, record.encryption_status))
            .or_default() += 1;
    }

    let mut rows: Vec<SummaryRow> = counts
        .into_iter()
        .map(|((windows_version, encryption_status), count)| SummaryRow {
            windows_version,
            encryption_status,
            count,
        })
        .collect();
    rows.sort_by(|a, b| {
        (a.windows_version.as_str(), a.encryption_status.as_str())
            .cmp(&(b.windows_version.as_str(), b.encryption_status.as_str()))
    });
    rows
}
