//! OAuth 2.0 client-credentials flow against the Microsoft identity platform.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use lockwatch_core::config::GraphConfig;
use lockwatch_core::error::{LockwatchError, Result};

/// Scope requesting every application permission granted to the app.
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// App registration credentials for a single tenant.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub authority_url: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn from_config(config: &GraphConfig) -> Self {
        Self {
            authority_url: config.authority_url.clone(),
            tenant_id: config.tenant_id.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    pub fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_url.trim_end_matches('/'),
            self.tenant_id
        )
    }

    /// Request an access token for Microsoft Graph.
    pub async fn acquire_token(&self, http: &Client) -> Result<String> {
        let token_url = self.token_url();
        debug!(url = %token_url, "Requesting Graph access token");

        let response = http
            .post(&token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("scope", GRAPH_DEFAULT_SCOPE),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Token request rejected");
            return Err(LockwatchError::Auth(format!(
                "token request failed with status {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| LockwatchError::Auth(format!("failed to parse token response: {e}")))?;

        debug!(expires_in = ?token.expires_in, "Graph access token acquired");
        Ok(token.access_token)
    }
}
