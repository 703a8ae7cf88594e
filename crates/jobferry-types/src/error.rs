//! Error types for the import system

use thiserror::Error;

/// Result type for discovery and import operations
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that can occur during discovery and import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// Remote resource could not be retrieved
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Remote listing payload could not be parsed
    #[error("Malformed job listing: {0}")]
    MalformedListing(String),

    /// The root listing of a query could not be retrieved or parsed
    #[error("Discovery failed: {0}")]
    DiscoveryFailed(String),

    /// A job with this name already exists in the local store
    #[error("A job named '{0}' already exists")]
    DuplicateName(String),

    /// Job name rejected by the local store
    #[error("Invalid job name: {0}")]
    InvalidName(String),

    /// Local job store rejected an operation
    #[error("Store error: {0}")]
    Store(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
