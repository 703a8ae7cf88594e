//! Import orchestrator service
//!
//! Owns the per-session state (forest, ledger, credentials) and coordinates
//! the query / import / reset operations against the remote server and the
//! local job store.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use jobferry_types::{
    find_job, ImportStatus, JobStore, RemoteCredentials, RemoteFetcher, RemoteJob,
    RemoteJobImportStatus, StatusLedger,
};

use super::{ImportServiceError, ImportServiceResult, RemoteTreeFetcher};

/// Per-session state, replaced wholesale by each query
///
/// Forest and ledger always belong to the same query: `query` swaps both
/// under one write lock, so an import pass can never observe a forest from a
/// different query than its ledger.
#[derive(Default)]
struct ImportSession {
    remote_url: Option<String>,
    credentials: RemoteCredentials,
    jobs: Vec<RemoteJob>,
    ledger: StatusLedger,
    query_status: Option<String>,
}

/// Result of a query operation
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub jobs: Vec<RemoteJob>,
    /// Failure message when the root listing could not be retrieved or parsed
    pub query_status: Option<String>,
}

/// Import orchestrator coordinating discovery and import for one session
pub struct ImportOrchestrator {
    store: Arc<dyn JobStore>,
    fetcher: Arc<dyn RemoteFetcher>,
    tree_fetcher: RemoteTreeFetcher,
    session: RwLock<ImportSession>,
}

impl ImportOrchestrator {
    pub fn new(store: Arc<dyn JobStore>, fetcher: Arc<dyn RemoteFetcher>) -> Self {
        let tree_fetcher = RemoteTreeFetcher::new(fetcher.clone());
        Self {
            store,
            fetcher,
            tree_fetcher,
            session: RwLock::new(ImportSession::default()),
        }
    }

    /// Rebuild the forest from the remote server
    ///
    /// Discards the prior forest, ledger and query status atomically, then
    /// discovers the hierarchy below `remote_url`. A discovery failure is
    /// recorded as the query status and leaves the forest empty; it is not an
    /// error at this level.
    pub async fn query(
        &self,
        remote_url: &str,
        username: Option<String>,
        password: Option<String>,
    ) -> ImportServiceResult<QueryOutcome> {
        let remote_url = remote_url.trim();
        validate_remote_url(remote_url)?;

        let mut session = self.session.write().await;
        session.jobs.clear();
        session.ledger.clear();
        session.query_status = None;
        session.remote_url = Some(remote_url.to_string());
        session.credentials = RemoteCredentials::new(username, password);

        let credentials = session.credentials.clone();
        match self.tree_fetcher.fetch_all(remote_url, &credentials).await {
            Ok(forest) => {
                info!(
                    "Query of {} discovered {} top-level jobs",
                    remote_url,
                    forest.len()
                );
                session.jobs = forest;
            }
            Err(e) => {
                warn!("Query of {} failed: {}", remote_url, e);
                session.query_status = Some(format!("Query failed: {}", e));
            }
        }

        Ok(QueryOutcome {
            jobs: session.jobs.clone(),
            query_status: session.query_status.clone(),
        })
    }

    /// Run an import pass over the current forest
    ///
    /// Selections are processed in caller order. Unresolved or blank urls are
    /// skipped without a ledger entry. The duplicate-name check runs before
    /// any remote fetch; a failed fetch or creation records a failure status
    /// and triggers one best-effort rollback delete. Failures never abort the
    /// remaining selections.
    pub async fn import(&self, job_urls: &[String]) -> Vec<RemoteJobImportStatus> {
        let mut session = self.session.write().await;
        let session = &mut *session;
        let credentials = session.credentials.clone();

        for job_url in job_urls {
            let job_url = job_url.trim();
            if job_url.is_empty() {
                continue;
            }

            let Some(job) = find_job(&session.jobs, job_url) else {
                debug!("Selection {} not present in the current forest", job_url);
                continue;
            };

            session.ledger.entry(job);

            match self.store.has_job(&job.name).await {
                Ok(true) => {
                    session.ledger.set_status(job, ImportStatus::DuplicateName);
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!("Local store lookup for '{}' failed: {}", job.name, e);
                    session.ledger.set_status(
                        job,
                        ImportStatus::Failed {
                            message: e.to_string(),
                        },
                    );
                    continue;
                }
            }

            match self.create_from_remote(job, &credentials).await {
                Ok(()) => {
                    info!("Imported job '{}' from {}", job.name, job.url);
                    session.ledger.set_status(job, ImportStatus::Succeeded);
                }
                Err(e) => {
                    warn!("Job import failed for '{}': {}", job.name, e);
                    session.ledger.set_status(
                        job,
                        ImportStatus::Failed {
                            message: e.to_string(),
                        },
                    );

                    // A failed creation may leave a half-initialized job
                    // behind; remove it if it is there. Rollback failures are
                    // logged and swallowed.
                    if let Err(rollback) = self.store.delete_job(&job.name).await {
                        warn!(
                            "Rollback delete for '{}' failed: {}",
                            job.name, rollback
                        );
                    }
                }
            }
        }

        session.ledger.iter().cloned().collect()
    }

    /// Fetch the job's full configuration and create it locally
    async fn create_from_remote(
        &self,
        job: &RemoteJob,
        credentials: &RemoteCredentials,
    ) -> jobferry_types::ImportResult<()> {
        let config_url = format!("{}/config.xml", job.url.trim_end_matches('/'));
        let config_xml = self.fetcher.fetch(&config_url, credentials).await?;
        self.store.create_job(&job.name, config_xml).await
    }

    /// Discard all session state
    pub async fn reset(&self) {
        let mut session = self.session.write().await;
        *session = ImportSession::default();
        debug!("Session state cleared");
    }

    /// Current forest
    pub async fn jobs(&self) -> Vec<RemoteJob> {
        self.session.read().await.jobs.clone()
    }

    /// Ledger snapshot in job order
    pub async fn statuses(&self) -> Vec<RemoteJobImportStatus> {
        self.session.read().await.ledger.iter().cloned().collect()
    }

    /// Failure message of the last query, if it failed
    pub async fn query_status(&self) -> Option<String> {
        self.session.read().await.query_status.clone()
    }

    /// Remote root of the current session, if a query has run
    pub async fn remote_url(&self) -> Option<String> {
        self.session.read().await.remote_url.clone()
    }
}

fn validate_remote_url(remote_url: &str) -> ImportServiceResult<()> {
    if remote_url.is_empty() {
        return Err(ImportServiceError::Validation(
            "remote_url must not be empty".to_string(),
        ));
    }

    let parsed = Url::parse(remote_url).map_err(|e| {
        ImportServiceError::Validation(format!("remote_url is not a valid URL: {}", e))
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ImportServiceError::Validation(format!(
            "remote_url must be http or https, got '{}'",
            parsed.scheme()
        )));
    }

    Ok(())
}
