//! Remote server access: HTTP client and listing parser

mod client;
pub mod listing;

pub use client::{HttpRemoteFetcher, RemoteClientConfig};
