use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use lockwatch_core::config::GraphConfig;
use lockwatch_core::error::{LockwatchError, Result};

use crate::auth::ClientCredentials;
use crate::models::GraphPage;

/// Authenticated HTTP client for Microsoft Graph collection endpoints.
///
/// A token is requested on first use and reused for the life of the client.
pub struct GraphClient {
    base_url: String,
    credentials: ClientCredentials,
    http: Client,
    access_token: RwLock<Option<String>>,
}

impl GraphClient {
    pub fn new(base_url: &str, credentials: ClientCredentials) -> Self {
        Self::with_http_client(base_url, credentials, Client::new())
    }

    /// Create a client with a custom reqwest::Client (useful for testing).
    pub fn with_http_client(base_url: &str, credentials: ClientCredentials, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            http,
            access_token: RwLock::new(None),
        }
    }

    pub fn from_config(config: &GraphConfig) -> Self {
        Self::new(&config.base_url, ClientCredentials::from_config(config))
    }

    /// Acquire a fresh access token, replacing any cached one.
    pub async fn authenticate(&self) -> Result<()> {
        let token = self.credentials.acquire_token(&self.http).await?;
        *self.access_token.write().await = Some(token);
        Ok(())
    }

    async fn bearer(&self) -> Result<String> {
        if let Some(token) = self.access_token.read().await.as_ref() {
            return Ok(token.clone());
        }
        self.authenticate().await?;
        self.access_token
            .read()
            .await
            .clone()
            .ok_or_else(|| LockwatchError::Auth("no access token after authentication".into()))
    }

    /// Fetch every page of a collection, following `@odata.nextLink`.
    ///
    /// `path` is relative to the Graph base URL (e.g. "/v1.0/deviceManagement/managedDevices");
    /// `query` applies to the first request only, since next links carry their own.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        headers: HeaderMap,
    ) -> Result<Vec<T>> {
        let bearer = self.bearer().await?;

        let mut items: Vec<T> = Vec::new();
        let mut request = self
            .http
            .get(format!("{}{path}", self.base_url))
            .query(query);
        let mut pages = 0usize;

        loop {
            let response = request
                .bearer_auth(&bearer)
                .headers(headers.clone())
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, path = %path, "Graph request failed");
                return Err(LockwatchError::Fetch(format!(
                    "Graph request to {path} failed with status {status}: {body}"
                )));
            }

            let page: GraphPage<T> = response.json().await.map_err(|e| {
                LockwatchError::Fetch(format!("failed to decode response from {path}: {e}"))
            })?;
            pages += 1;
            debug!(path = %path, page = pages, count = page.value.len(), "Fetched page");
            items.extend(page.value);

            match page.next_link {
                Some(next) => request = self.http.get(next),
                None => break,
            }
        }

        debug!(path = %path, pages, total = items.len(), "Pagination complete");
        Ok(items)
    }

    /// Fetch only the first page of a collection.
    pub async fn get_first_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let bearer = self.bearer().await?;
        let response = self
            .http
            .get(format!("{}{path}", self.base_url))
            .query(query)
            .bearer_auth(&bearer)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LockwatchError::Fetch(format!(
                "Graph request to {path} failed with status {status}: {body}"
            )));
        }

        let page: GraphPage<T> = response.json().await.map_err(|e| {
            LockwatchError::Fetch(format!("failed to decode response from {path}: {e}"))
        })?;
        Ok(page.value)
    }
}
