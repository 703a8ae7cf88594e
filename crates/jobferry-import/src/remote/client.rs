//! HTTP client for the remote automation server
//!
//! Fetches job listings and configuration documents, passing operator
//! credentials through as HTTP basic auth when present.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use jobferry_types::{ImportError, ImportResult, RemoteCredentials, RemoteFetcher};

/// Configuration for the remote HTTP client
#[derive(Debug, Clone)]
pub struct RemoteClientConfig {
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for RemoteClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// `RemoteFetcher` backed by reqwest
pub struct HttpRemoteFetcher {
    client: Client,
}

impl HttpRemoteFetcher {
    pub fn new(config: RemoteClientConfig) -> ImportResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ImportError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RemoteFetcher for HttpRemoteFetcher {
    async fn fetch(&self, url: &str, credentials: &RemoteCredentials) -> ImportResult<Bytes> {
        debug!("Fetching remote resource: {}", url);

        let mut request = self.client.get(url);
        if credentials.is_present() {
            request = request.basic_auth(
                credentials.username.as_deref().unwrap_or_default(),
                credentials.password.as_deref(),
            );
        }

        let response = request
            .send()
            .await
            .map_err(|e| ImportError::FetchFailed(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::FetchFailed(format!(
                "{} returned status {}",
                url, status
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| ImportError::FetchFailed(format!("Failed to read {}: {}", url, e)))
    }
}
