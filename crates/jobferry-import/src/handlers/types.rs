//! Request and response types for import handlers

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use jobferry_types::{RemoteJob, RemoteJobImportStatus};

use crate::services::ImportOrchestrator;

/// Application state for handlers
pub struct AppState {
    pub orchestrator: Arc<ImportOrchestrator>,
}

/// Request to query a remote server's job listing
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct QueryRequest {
    /// Root URL of the remote automation server
    #[schema(example = "https://ci.example.com/")]
    pub remote_url: String,
    /// Optional basic-auth username, passed through to the remote server
    pub username: Option<String>,
    /// Optional basic-auth password
    pub password: Option<String>,
}

/// Response with the discovered forest
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QueryResponse {
    /// Top-level jobs discovered below the remote root
    pub jobs: Vec<RemoteJob>,
    /// Failure message when the root listing could not be retrieved or parsed
    pub query_status: Option<String>,
}

/// Request to import a selection of discovered jobs
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ExecuteImportRequest {
    /// Urls of the selected jobs, in import order
    pub job_urls: Vec<String>,
}

/// Per-job import status as reported to the operator
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobImportStatusView {
    /// Job name (the candidate local name)
    pub name: String,
    /// Remote url of the job
    pub url: String,
    /// Human-readable outcome of the last attempt
    pub status: String,
    /// Whether the last attempt succeeded
    pub succeeded: bool,
}

impl From<&RemoteJobImportStatus> for JobImportStatusView {
    fn from(entry: &RemoteJobImportStatus) -> Self {
        Self {
            name: entry.job.name.clone(),
            url: entry.job.url.clone(),
            status: entry.status.to_string(),
            succeeded: entry.status.is_success(),
        }
    }
}

/// Response with the ledger snapshot after an import pass
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExecuteImportResponse {
    /// One entry per job attempted since the last reset or query
    pub statuses: Vec<JobImportStatusView>,
}

/// Response with the current session state
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionStatusResponse {
    /// Remote root of the current session, if a query has run
    pub remote_url: Option<String>,
    /// Failure message of the last query, if it failed
    pub query_status: Option<String>,
    /// Whether a discovered forest is available for import
    pub jobs_available: bool,
    /// Ledger snapshot
    pub statuses: Vec<JobImportStatusView>,
}
