//! Remote server port
//!
//! The discovery and import services only need "fetch this URL, optionally
//! with basic credentials, and give me the bytes". Everything else (TLS,
//! timeouts, redirects) belongs to the implementation.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ImportResult;

/// Credentials passed through to the remote server
///
/// Held in memory for the lifetime of a session only; never persisted.
#[derive(Debug, Clone, Default)]
pub struct RemoteCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl RemoteCredentials {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    /// True when a username is present and should be sent as basic auth
    pub fn is_present(&self) -> bool {
        self.username.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// Retrieves remote resources over HTTP
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    /// Fetch `url` and return the full response body
    ///
    /// Implementations must release all network resources on every exit path
    /// and map non-success responses to `ImportError::FetchFailed`.
    async fn fetch(&self, url: &str, credentials: &RemoteCredentials) -> ImportResult<Bytes>;
}
