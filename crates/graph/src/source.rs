//! [`InventorySource`] backed by Microsoft Graph.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::info;

use lockwatch_core::config::GraphConfig;
use lockwatch_core::connectors::InventorySource;
use lockwatch_core::error::Result;
use lockwatch_core::models::device::DeviceRecord;
use lockwatch_core::models::recovery_key::RecoveryKeyRecord;

use crate::client::GraphClient;
use crate::mapper::GraphMapper;
use crate::models::{GraphManagedDevice, GraphRecoveryKey, MANAGED_DEVICE_SELECT};

const MANAGED_DEVICES_PATH: &str = "/v1.0/deviceManagement/managedDevices";
const RECOVERY_KEYS_PATH: &str = "/v1.0/informationProtection/bitlocker/recoveryKeys";

/// Client name sent in the recovery key audit headers.
const OCP_CLIENT_NAME: &str = "Lockwatch";

/// Intune managed devices joined against Entra ID BitLocker key escrow.
pub struct GraphInventorySource {
    client: GraphClient,
    platform: String,
    page_size: u32,
    server_side_filter: bool,
}

impl GraphInventorySource {
    pub fn new(client: GraphClient, platform: &str, page_size: u32, server_side_filter: bool) -> Self {
        Self {
            client,
            platform: platform.to_string(),
            page_size,
            server_side_filter,
        }
    }

    pub fn from_config(config: &GraphConfig, platform: &str) -> Self {
        Self::new(
            GraphClient::from_config(config),
            platform,
            config.page_size,
            config.server_side_filter,
        )
    }

    /// OData filter restricting devices to the configured platform.
    fn platform_filter(&self) -> String {
        format!("operatingSystem eq '{}'", self.platform.replace('\'', "''"))
    }

    fn audit_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("ocp-client-name", HeaderValue::from_static(OCP_CLIENT_NAME));
        headers.insert(
            "ocp-client-version",
            HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
        );
        headers
    }
}

#[async_trait]
impl InventorySource for GraphInventorySource {
    async fn fetch_devices(&self) -> Result<Vec<DeviceRecord>> {
        let top = self.page_size.to_string();
        let filter = self.platform_filter();

        let mut query: Vec<(&str, &str)> = vec![("$select", MANAGED_DEVICE_SELECT), ("$top", &top)];
        if self.server_side_filter {
            query.push(("$filter", &filter));
        }

        info!(
            platform = %self.platform,
            server_side_filter = self.server_side_filter,
            "Fetching managed devices from Graph"
        );
        let raw: Vec<GraphManagedDevice> = self
            .client
            .get_all(MANAGED_DEVICES_PATH, &query, HeaderMap::new())
            .await?;
        Ok(GraphMapper::normalize_devices(raw))
    }

    async fn fetch_recovery_keys(&self) -> Result<Vec<RecoveryKeyRecord>> {
        info!("Fetching BitLocker recovery keys from Graph");
        let raw: Vec<GraphRecoveryKey> = self
            .client
            .get_all(RECOVERY_KEYS_PATH, &[], Self::audit_headers())
            .await?;
        Ok(GraphMapper::normalize_recovery_keys(raw))
    }

    async fn test_connection(&self) -> Result<()> {
        info!("Testing Graph connection");
        self.client.authenticate().await?;
        let _: Vec<GraphManagedDevice> = self
            .client
            .get_first_page(MANAGED_DEVICES_PATH, &[("$select", "id"), ("$top", "1")])
            .await?;
        info!("Graph connection test successful");
        Ok(())
    }

    fn source_name(&self) -> &str {
        "microsoft-graph"
    }
}
