//! Jobferry import orchestrator
//!
//! This crate provides the HTTP API and orchestration layer for discovering
//! build jobs on a remote automation server and importing them into the local
//! job store.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP endpoints for the query / import / reset operations
//! - **Services**: tree discovery and import orchestration
//! - **Remote**: reqwest-based fetcher and the XML listing parser
//! - **Store**: filesystem-backed `JobStore` implementation

pub mod handlers;
pub mod remote;
pub mod services;
pub mod store;

pub use remote::{HttpRemoteFetcher, RemoteClientConfig};
pub use services::{ImportOrchestrator, RemoteTreeFetcher};
pub use store::FsJobStore;
