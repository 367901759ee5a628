use std::path::Path;

use lockwatch_core::config::{LockwatchConfig, CLIENT_SECRET_ENV};
use tracing::info;

/// Run the `init` command: write a default configuration file.
pub fn run(output: &str) -> anyhow::Result<()> {
    let config_path = Path::new(output);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists; remove it or pass --output to write elsewhere",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created directory: {}", parent.display());
        }
    }

    let config = LockwatchConfig::generate_default();
    std::fs::write(config_path, config.to_toml()?)?;
    info!("Wrote configuration to {}", config_path.display());

    println!("Lockwatch configuration written to {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Register an Entra ID app with the Graph application permissions");
    println!("     DeviceManagementManagedDevices.Read.All and BitlockerKey.Read.All");
    println!(
        "  2. Set graph.tenant_id and graph.client_id in {}",
        config_path.display()
    );
    println!("  3. Set graph.client_secret there or export {CLIENT_SECRET_ENV}");
    println!("  4. Run `lockwatch check` to test the connection");
    println!("  5. Run `lockwatch report` to write the report");

    Ok(())
}
