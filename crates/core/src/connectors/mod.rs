//! Inventory sources that supply devices and escrowed recovery keys.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{device::DeviceRecord, recovery_key::RecoveryKeyRecord};

/// A device-management backend the report is built from.
///
/// Each fetch returns the complete collection or fails the whole run;
/// pagination and authentication are the implementor's concern.
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn fetch_devices(&self) -> Result<Vec<DeviceRecord>>;
    async fn fetch_recovery_keys(&self) -> Result<Vec<RecoveryKeyRecord>>;
    async fn test_connection(&self) -> Result<()>;
    fn source_name(&self) -> &str;
}
