//! TOML-based configuration system for Lockwatch.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LockwatchError, Result};
use crate::models::classification::{OsVersion, DEFAULT_WINDOWS11_MIN_VERSION};
use crate::report::ClassificationPolicy;

/// Environment variable that overrides `graph.client_secret`.
pub const CLIENT_SECRET_ENV: &str = "LOCKWATCH_CLIENT_SECRET";

/// Largest `$top` page size Graph accepts for managed devices.
const MAX_PAGE_SIZE: u32 = 999;

/// Top-level Lockwatch configuration, deserialized from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockwatchConfig {
    pub graph: GraphConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Microsoft Graph connection settings (app-only, client credentials).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub tenant_id: String,
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_authority_url")]
    pub authority_url: String,
    #[serde(default = "default_graph_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Ask Graph to filter devices by platform instead of fetching all of them.
    #[serde(default = "default_true")]
    pub server_side_filter: bool,
}

fn default_authority_url() -> String {
    "https://login.microsoftonline.com".into()
}

fn default_graph_base_url() -> String {
    "https://graph.microsoft.com".into()
}

fn default_page_size() -> u32 {
    500
}

fn default_true() -> bool {
    true
}

/// Report output and classification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_target_platform")]
    pub target_platform: String,
    #[serde(default = "default_windows11_min_version")]
    pub windows11_min_version: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            target_platform: default_target_platform(),
            windows11_min_version: default_windows11_min_version(),
        }
    }
}

fn default_output_path() -> String {
    "bitlocker-report.xlsx".into()
}

fn default_target_platform() -> String {
    "Windows".into()
}

fn default_windows11_min_version() -> String {
    DEFAULT_WINDOWS11_MIN_VERSION.into()
}

impl ReportConfig {
    /// Build the classification policy these settings describe.
    pub fn policy(&self) -> Result<ClassificationPolicy> {
        let windows11_min_version: OsVersion =
            self.windows11_min_version.parse().map_err(|e| {
                LockwatchError::Config(format!("report.windows11_min_version: {e}"))
            })?;
        Ok(ClassificationPolicy {
            target_platform: self.target_platform.clone(),
            windows11_min_version,
        })
    }
}

impl LockwatchConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// A non-empty `LOCKWATCH_CLIENT_SECRET` replaces the file's secret.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        if let Ok(secret) = std::env::var(CLIENT_SECRET_ENV) {
            if !secret.is_empty() {
                config.graph.client_secret = secret;
            }
        }
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| LockwatchError::Config(format!("failed to parse config: {e}")))
    }

    /// Validate the configuration, returning an error for invalid combinations.
    pub fn validate(&self) -> Result<()> {
        if self.graph.tenant_id.trim().is_empty() {
            return Err(LockwatchError::Config(
                "graph.tenant_id must not be empty".into(),
            ));
        }

        if self.graph.client_id.trim().is_empty() {
            return Err(LockwatchError::Config(
                "graph.client_id must not be empty".into(),
            ));
        }

        if self.graph.client_secret.is_empty() {
            return Err(LockwatchError::Config(format!(
                "graph.client_secret must be set in the config file or {CLIENT_SECRET_ENV}"
            )));
        }

        if self.graph.page_size == 0 || self.graph.page_size > MAX_PAGE_SIZE {
            return Err(LockwatchError::Config(format!(
                "graph.page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        if self.report.output_path.trim().is_empty() {
            return Err(LockwatchError::Config(
                "report.output_path must not be empty".into(),
            ));
        }

        if self.report.target_platform.trim().is_empty() {
            return Err(LockwatchError::Config(
                "report.target_platform must not be empty".into(),
            ));
        }

        self.report.policy()?;

        Ok(())
    }

    /// Generate a default configuration with placeholder credentials.
    pub fn generate_default() -> Self {
        Self {
            graph: GraphConfig {
                tenant_id: "00000000-0000-0000-0000-000000000000".into(),
                client_id: "00000000-0000-0000-0000-000000000000".into(),
                client_secret: String::new(),
                authority_url: default_authority_url(),
                base_url: default_graph_base_url(),
                page_size: default_page_size(),
                server_side_filter: true,
            },
            report: ReportConfig::default(),
        }
    }

    /// Serialize this configuration to TOML text.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| LockwatchError::Serialization(format!("failed to serialize config: {e}")))
    }
}
