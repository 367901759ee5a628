use std::path::Path;

use lockwatch_core::config::LockwatchConfig;
use lockwatch_core::connectors::InventorySource;
use lockwatch_graph::GraphInventorySource;
use tracing::{error, info};

/// Run the `check` command: authenticate and read one device.
pub async fn run(config_path: &str) -> anyhow::Result<()> {
    let config = LockwatchConfig::load(Path::new(config_path))?;
    config.validate()?;

    info!("Loaded configuration from {}", config_path);

    let source = GraphInventorySource::from_config(&config.graph, &config.report.target_platform);

    println!("Source:   {}", source.source_name());
    println!("Tenant:   {}", config.graph.tenant_id);
    println!("Endpoint: {}", config.graph.base_url);

    match source.test_connection().await {
        Ok(()) => {
            println!("Connection test: SUCCESS");
            Ok(())
        }
        Err(e) => {
            error!("Connection test failed: {e}");
            println!("Connection test: FAILED");
            Err(e.into())
        }
    }
}
