//! Filesystem-backed job store
//!
//! Lays out one directory per job under a root directory, with the raw
//! configuration document stored as `config.xml`. Job names are validated
//! before any path is built, since they come from a remote listing.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info};

use jobferry_types::{ImportError, ImportResult, JobStore};

const CONFIG_FILE: &str = "config.xml";

/// `JobStore` that keeps jobs as directories on the local filesystem
pub struct FsJobStore {
    root: PathBuf,
}

impl FsJobStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> ImportResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| ImportError::Store(format!("Failed to create {}: {}", root.display(), e)))?;
        debug!("Job store opened at {}", root.display());
        Ok(Self { root })
    }

    fn job_dir(&self, name: &str) -> ImportResult<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

/// Job names become path components, so anything that could escape the store
/// root is rejected outright.
fn validate_name(name: &str) -> ImportResult<()> {
    if name.is_empty() {
        return Err(ImportError::InvalidName("name must not be empty".to_string()));
    }
    if name == "." || name == ".." {
        return Err(ImportError::InvalidName(format!("'{}' is reserved", name)));
    }
    if name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(ImportError::InvalidName(format!(
            "'{}' contains a path separator",
            name
        )));
    }
    Ok(())
}

async fn path_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

#[async_trait]
impl JobStore for FsJobStore {
    async fn has_job(&self, name: &str) -> ImportResult<bool> {
        let dir = self.job_dir(name)?;
        Ok(path_exists(&dir).await)
    }

    async fn create_job(&self, name: &str, config_xml: Bytes) -> ImportResult<()> {
        let dir = self.job_dir(name)?;
        if path_exists(&dir).await {
            return Err(ImportError::DuplicateName(name.to_string()));
        }

        tokio::fs::create_dir(&dir)
            .await
            .map_err(|e| ImportError::Store(format!("Failed to create job '{}': {}", name, e)))?;
        tokio::fs::write(dir.join(CONFIG_FILE), &config_xml)
            .await
            .map_err(|e| {
                ImportError::Store(format!("Failed to write config for '{}': {}", name, e))
            })?;

        info!("Created job '{}' in {}", name, self.root.display());
        Ok(())
    }

    async fn delete_job(&self, name: &str) -> ImportResult<()> {
        let dir = self.job_dir(name)?;
        if !path_exists(&dir).await {
            return Ok(());
        }

        tokio::fs::remove_dir_all(&dir)
            .await
            .map_err(|e| ImportError::Store(format!("Failed to delete job '{}': {}", name, e)))?;
        info!("Deleted job '{}'", name);
        Ok(())
    }
}
