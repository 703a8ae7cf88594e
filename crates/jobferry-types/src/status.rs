//! Import status bookkeeping
//!
//! The `StatusLedger` records the outcome of every import attempt since the
//! last reset or query. It is keyed by the job's stable `url` in a `BTreeMap`,
//! so entries iterate in the job total order and updating an existing entry
//! never reorders the ledger.

use std::collections::BTreeMap;
use std::fmt;

use crate::job::RemoteJob;

/// Outcome of the last import attempt for one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    /// Entry exists but nothing has been attempted yet
    Pending,
    /// Job configuration was fetched and created locally
    Succeeded,
    /// A local job with the candidate name already exists; nothing was created
    DuplicateName,
    /// Fetch or creation failed; a rollback delete was attempted
    Failed { message: String },
}

impl ImportStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportStatus::Succeeded)
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStatus::Pending => Ok(()),
            ImportStatus::Succeeded => write!(f, "Success"),
            ImportStatus::DuplicateName => {
                write!(f, "Failed: a job with this name already exists")
            }
            ImportStatus::Failed { message } => write!(f, "Failed: {}", message),
        }
    }
}

/// Per-job import status entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteJobImportStatus {
    pub job: RemoteJob,
    pub status: ImportStatus,
}

impl RemoteJobImportStatus {
    pub fn new(job: RemoteJob) -> Self {
        Self {
            job,
            status: ImportStatus::Pending,
        }
    }
}

/// Ordered mapping from job `url` to its last import status
#[derive(Debug, Clone, Default)]
pub struct StatusLedger {
    entries: BTreeMap<String, RemoteJobImportStatus>,
}

impl StatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure an entry exists for `job`, creating it as `Pending` on first
    /// encounter, and return a mutable reference to it
    pub fn entry(&mut self, job: &RemoteJob) -> &mut RemoteJobImportStatus {
        self.entries
            .entry(job.url.clone())
            .or_insert_with(|| RemoteJobImportStatus::new(job.clone()))
    }

    /// Update the status of `job`, inserting the entry if missing
    pub fn set_status(&mut self, job: &RemoteJob, status: ImportStatus) {
        self.entry(job).status = status;
    }

    pub fn get(&self, url: &str) -> Option<&RemoteJobImportStatus> {
        self.entries.get(url)
    }

    /// Iterate entries in job order
    pub fn iter(&self) -> impl Iterator<Item = &RemoteJobImportStatus> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard all entries (on reset or a new query)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(name: &str, url: &str) -> RemoteJob {
        RemoteJob::leaf(name, url, "")
    }

    #[test]
    fn entry_is_created_once_and_updated_in_place() {
        let mut ledger = StatusLedger::new();
        let a = job("a", "https://ci.example.com/job/a/");

        ledger.entry(&a);
        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.get(&a.url).unwrap().status,
            ImportStatus::Pending
        );

        ledger.set_status(&a, ImportStatus::Succeeded);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get(&a.url).unwrap().status.is_success());
    }

    #[test]
    fn iteration_follows_job_order_and_updates_do_not_reorder() {
        let mut ledger = StatusLedger::new();
        let b = job("b", "https://ci.example.com/job/b/");
        let a = job("a", "https://ci.example.com/job/a/");

        ledger.entry(&b);
        ledger.entry(&a);
        ledger.set_status(&b, ImportStatus::DuplicateName);

        let names: Vec<&str> = ledger.iter().map(|e| e.job.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn clear_discards_everything() {
        let mut ledger = StatusLedger::new();
        ledger.entry(&job("a", "https://ci.example.com/job/a/"));
        ledger.clear();
        assert!(ledger.is_empty());
    }

    #[test]
    fn status_messages_are_human_readable() {
        assert_eq!(ImportStatus::Pending.to_string(), "");
        assert_eq!(ImportStatus::Succeeded.to_string(), "Success");
        assert_eq!(
            ImportStatus::Failed {
                message: "connection refused".to_string()
            }
            .to_string(),
            "Failed: connection refused"
        );
    }
}
