//! Flattened table rows for the "Devices" and "Summary" sheets.
//!
//! Column names are fixed; classification enums become display strings
//! here and nowhere earlier.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::models::report::{EnrichedDeviceRecord, SummaryRow};

/// Separator for multi-valued cells.
const LIST_SEPARATOR: &str = ", ";

/// A typed cell, for formats that keep cell types.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) if !s.is_empty() => Self::Text(s),
            _ => Self::Empty,
        }
    }
}

/// A row of one output table.
pub trait TableRow: Serialize {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<CellValue>;
}

fn datetime_to_cell(dt: &Option<DateTime<Utc>>) -> Option<String> {
    dt.map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// One row of the "Devices" sheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceRow {
    pub device_name: Option<String>,
    pub managed_device_id: String,
    pub azure_ad_device_id: Option<String>,
    pub serial_number: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub operating_system: Option<String>,
    pub os_version: Option<String>,
    pub windows_version: &'static str,
    pub is_encrypted: Option<bool>,
    pub encryption_status: &'static str,
    pub compliance_state: Option<String>,
    pub last_sync_date_time: Option<String>,
    pub enrolled_date_time: Option<String>,
    pub user_principal_name: Option<String>,
    pub has_recovery_key_in_escrow: bool,
    pub recovery_key_count: usize,
    pub recovery_volume_types: String,
    pub recovery_key_ids: String,
}

impl DeviceRow {
    pub fn from_model(record: &EnrichedDeviceRecord) -> Self {
        let device = &record.device;
        Self {
            device_name: device.device_name.clone(),
            managed_device_id: device.managed_device_id.clone(),
            azure_ad_device_id: device.azure_ad_device_id.clone(),
            serial_number: device.serial_number.clone(),
            model: device.model.clone(),
            manufacturer: device.manufacturer.clone(),
            operating_system: device.operating_system.clone(),
            os_version: device.os_version.clone(),
            windows_version: record.windows_version.as_str(),
            is_encrypted: device.is_encrypted,
            encryption_status: record.encryption_status.as_str(),
            compliance_state: device.compliance_state.clone(),
            last_sync_date_time: datetime_to_cell(&device.last_sync_date_time),
            enrolled_date_time: datetime_to_cell(&device.enrolled_date_time),
            user_principal_name: device.user_principal_name.clone(),
            has_recovery_key_in_escrow: record.has_recovery_key_in_escrow,
            recovery_key_count: record.recovery_key_count,
            recovery_volume_types: record.recovery_volume_types.join(LIST_SEPARATOR),
            recovery_key_ids: record.recovery_key_ids.join(LIST_SEPARATOR),
        }
    }
}

impl TableRow for DeviceRow {
    const HEADERS: &'static [&'static str] = &[
        "DeviceName",
        "ManagedDeviceId",
        "AzureAdDeviceId",
        "SerialNumber",
        "Model",
        "Manufacturer",
        "OperatingSystem",
        "OsVersion",
        "WindowsVersion",
        "IsEncrypted",
        "EncryptionStatus",
        "ComplianceState",
        "LastSyncDateTime",
        "EnrolledDateTime",
        "UserPrincipalName",
        "HasRecoveryKeyInEscrow",
        "RecoveryKeyCount",
        "RecoveryVolumeTypes",
        "RecoveryKeyIds",
    ];

    fn cells(&self) -> Vec<CellValue> {
        vec![
            self.device_name.clone().into(),
            CellValue::Text(self.managed_device_id.clone()),
            self.azure_ad_device_id.clone().into(),
            self.serial_number.clone().into(),
            self.model.clone().into(),
            self.manufacturer.clone().into(),
            self.operating_system.clone().into(),
            self.os_version.clone().into(),
            CellValue::Text(self.windows_version.to_string()),
            self.is_encrypted.map_or(CellValue::Empty, CellValue::Bool),
            CellValue::Text(self.encryption_status.to_string()),
            self.compliance_state.clone().into(),
            self.last_sync_date_time.clone().into(),
            self.enrolled_date_time.clone().into(),
            self.user_principal_name.clone().into(),
            CellValue::Bool(self.has_recovery_key_in_escrow),
            CellValue::Number(self.recovery_key_count as f64),
            Some(self.recovery_volume_types.clone()).into(),
            Some(self.recovery_key_ids.clone()).into(),
        ]
    }
}

/// One row of the "Summary" sheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SummaryTableRow {
    pub windows_version: &'static str,
    pub encryption_status: &'static str,
    pub device_count: usize,
}

impl SummaryTableRow {
    pub fn from_model(row: &SummaryRow) -> Self {
        Self {
            windows_version: row.windows_version.as_str(),
            encryption_status: row.encryption_status.as_str(),
            device_count: row.count,
        }
    }
}

impl TableRow for SummaryTableRow {
    const HEADERS: &'static [&'static str] = &["WindowsVersion", "EncryptionStatus", "DeviceCount"];

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.windows_version.to_string()),
            CellValue::Text(self.encryption_status.to_string()),
            CellValue::Number(self.device_count as f64),
        ]
    }
}
