use std::path::Path;
use std::time::Instant;

use lockwatch_core::config::LockwatchConfig;
use lockwatch_core::export::write_report;
use lockwatch_core::report::{generate, DeviceReport};
use lockwatch_graph::GraphInventorySource;
use tracing::info;

/// Command-line values that take precedence over the `[report]` section.
#[derive(Debug, Default)]
pub struct ReportOverrides {
    pub output: Option<String>,
    pub windows11_min_version: Option<String>,
}

impl ReportOverrides {
    fn apply(self, config: &mut LockwatchConfig) {
        if let Some(output) = self.output {
            config.report.output_path = output;
        }
        if let Some(version) = self.windows11_min_version {
            config.report.windows11_min_version = version;
        }
    }
}

/// Run the `report` command: fetch, join, classify, and write the report.
pub async fn run(config_path: &str, overrides: ReportOverrides) -> anyhow::Result<()> {
    let mut config = LockwatchConfig::load(Path::new(config_path))?;
    overrides.apply(&mut config);
    config.validate()?;

    info!("Loaded configuration from {}", config_path);

    let policy = config.report.policy()?;
    let source = GraphInventorySource::from_config(&config.graph, &policy.target_platform);

    let start = Instant::now();
    let report = generate(&source, &policy).await?;
    let destination = Path::new(&config.report.output_path);
    write_report(&report, destination)?;
    let elapsed = start.elapsed();

    print_summary(&report);
    println!();
    println!("Report written to {}", destination.display());
    println!("Duration: {:.1}s", elapsed.as_secs_f64());

    Ok(())
}

fn print_summary(report: &DeviceReport) {
    println!("BitLocker Recovery Key Report");
    println!("=============================");
    println!(
        "Generated: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Devices:                {}", report.device_count());
    println!("  with escrowed key:    {}", report.escrowed_count());
    println!("  without escrowed key: {}", report.missing_escrow_count());
    println!();
    println!("{:<12} {:<11} {:>7}", "Version", "Encrypted", "Devices");
    println!("{:-<12} {:-<11} {:->7}", "", "", "");
    for row in &report.summary {
        println!(
            "{:<12} {:<11} {:>7}",
            row.windows_version.as_str(),
            row.encryption_status.as_str(),
            row.count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_graph() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/contoso/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "test-token",
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1.0/deviceManagement/managedDevices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [
                    {
                        "id": "md-1",
                        "deviceName": "PC-1",
                        "azureADDeviceId": "AAD-1",
                        "operatingSystem": "Windows",
                        "osVersion": "10.0.22631.4037",
                        "isEncrypted": true
                    }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1.0/informationProtection/bitlocker/recoveryKeys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [
                    {"id": "k1", "deviceId": "AAD-1", "volumeType": "operatingSystemVolume"}
                ]
            })))
            .mount(&server)
            .await;
        server
    }

    fn write_config(dir: &Path, server: &MockServer, output: &Path) -> String {
        let config_path = dir.join("lockwatch.toml");
        let content = format!(
            r#"
[graph]
tenant_id = "contoso"
client_id = "c"
client_secret = "s"
authority_url = "{uri}"
base_url = "{uri}"

[report]
output_path = "{output}"
"#,
            uri = server.uri(),
            output = output.display()
        );
        std::fs::write(&config_path, content).unwrap();
        config_path.to_string_lossy().to_string()
    }

    #[test]
    fn overrides_replace_config_values() {
        let mut config = LockwatchConfig::generate_default();
        ReportOverrides {
            output: Some("custom.xlsx".into()),
            windows11_min_version: Some("10.0.26100".into()),
        }
        .apply(&mut config);
        assert_eq!(config.report.output_path, "custom.xlsx");
        assert_eq!(config.report.windows11_min_version, "10.0.26100");

        ReportOverrides::default().apply(&mut config);
        assert_eq!(config.report.output_path, "custom.xlsx");
    }

    #[tokio::test]
    async fn report_writes_csv_directory() {
        let server = mock_graph().await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        let config_path = write_config(dir.path(), &server, &output);

        run(&config_path, ReportOverrides::default()).await.unwrap();

        let devices = std::fs::read_to_string(output.join("Devices.csv")).unwrap();
        assert!(devices.starts_with("DeviceName,ManagedDeviceId"));
        assert!(devices.contains("PC-1"));
        let summary = std::fs::read_to_string(output.join("Summary.csv")).unwrap();
        assert!(summary.contains("Windows 11,Yes,1"));
    }

    #[tokio::test]
    async fn report_output_override_writes_workbook() {
        let server = mock_graph().await;
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path(), &server, &dir.path().join("unused"));
        let workbook = dir.path().join("report.xlsx");

        let overrides = ReportOverrides {
            output: Some(workbook.to_string_lossy().to_string()),
            windows11_min_version: None,
        };
        run(&config_path, overrides).await.unwrap();

        let bytes = std::fs::read(&workbook).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(!dir.path().join("unused").exists());
    }

    #[tokio::test]
    async fn report_rejects_bad_threshold_override() {
        let server = mock_graph().await;
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path(), &server, &dir.path().join("out"));

        let overrides = ReportOverrides {
            output: None,
            windows11_min_version: Some("latest".into()),
        };
        let err = run(&config_path, overrides).await.unwrap_err();
        assert!(err.to_string().contains("windows11_min_version"));
    }
}
