//! Core types and traits for the Jobferry import system
//!
//! This crate provides the foundational abstractions for discovering build
//! jobs on a remote automation server and importing them into a local store.
//!
//! # Architecture
//!
//! - **Types**: `RemoteJob` (the discovered job tree), `StatusLedger` and
//!   `RemoteJobImportStatus` (per-job import bookkeeping)
//! - **Traits**: `RemoteFetcher` and `JobStore` define the interfaces to the
//!   remote server and the local job store
//! - **Errors**: Unified error handling across discovery and import
//!
//! # Usage
//!
//! The orchestration crate (`jobferry-import`) depends on this crate and
//! implements the discovery and import services against these traits.

pub mod error;
pub mod job;
pub mod remote;
pub mod status;
pub mod store;

pub use error::{ImportError, ImportResult};
pub use job::{find_job, RemoteJob};
pub use remote::{RemoteCredentials, RemoteFetcher};
pub use status::{ImportStatus, RemoteJobImportStatus, StatusLedger};
pub use store::JobStore;
