//! Local job store port
//!
//! The store offers no multi-item transaction; the orchestrator compensates
//! with an explicit rollback delete after a failed creation.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ImportResult;

/// Local job lifecycle as consumed by the import orchestrator
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Whether a job with this name already exists locally
    async fn has_job(&self, name: &str) -> ImportResult<bool>;

    /// Create a job from its raw configuration document
    ///
    /// Fails with `ImportError::DuplicateName` when the name is taken.
    async fn create_job(&self, name: &str, config_xml: Bytes) -> ImportResult<()>;

    /// Delete a job if it exists; succeeds when the job is absent
    async fn delete_job(&self, name: &str) -> ImportResult<()>;
}
