use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A BitLocker recovery key record held in escrow.
///
/// Only metadata is carried; the key material itself is never fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryKeyRecord {
    pub id: String,
    pub device_id: Option<String>,
    pub volume_type: Option<String>,
    pub created_date_time: Option<DateTime<Utc>>,
}

impl RecoveryKeyRecord {
    /// The owning device id, or `None` if it is missing or blank.
    pub fn owner(&self) -> Option<&str> {
        self.device_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}
