//! `jobferry serve` - run the import HTTP API

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tracing::info;

use jobferry_import::handlers::{self, types::AppState};
use jobferry_import::{FsJobStore, HttpRemoteFetcher, ImportOrchestrator, RemoteClientConfig};

#[derive(Args)]
pub struct ServeCommand {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8750", env = "JOBFERRY_LISTEN")]
    listen: String,

    /// Directory holding the local job store
    #[arg(long, default_value = "./jobs", env = "JOBFERRY_JOBS_DIR")]
    jobs_dir: PathBuf,

    /// Timeout for requests to the remote server, in seconds
    #[arg(long, default_value_t = 30, env = "JOBFERRY_REMOTE_TIMEOUT_SECS")]
    remote_timeout_secs: u64,
}

impl ServeCommand {
    pub async fn run(self) -> anyhow::Result<()> {
        let store = FsJobStore::open(&self.jobs_dir)
            .await
            .with_context(|| format!("Failed to open job store at {}", self.jobs_dir.display()))?;

        let fetcher = HttpRemoteFetcher::new(RemoteClientConfig {
            timeout: Duration::from_secs(self.remote_timeout_secs),
        })
        .context("Failed to create remote HTTP client")?;

        let orchestrator = Arc::new(ImportOrchestrator::new(
            Arc::new(store),
            Arc::new(fetcher),
        ));
        let state = Arc::new(AppState { orchestrator });
        let router = handlers::configure_routes().with_state(state);

        let listener = tokio::net::TcpListener::bind(&self.listen)
            .await
            .with_context(|| format!("Failed to bind {}", self.listen))?;
        info!("Jobferry listening on {}", self.listen);

        axum::serve(listener, router)
            .await
            .context("Server terminated")?;
        Ok(())
    }
}
