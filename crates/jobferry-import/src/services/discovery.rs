//! Recursive discovery of the remote job tree
//!
//! Walks the remote listing endpoint depth-first and materializes a
//! `RemoteJob` forest. The walk is externally controlled, so it defends
//! against cycles with a visited set and absorbs non-root failures as
//! "this node has no further children".

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, warn};

use jobferry_types::{ImportError, ImportResult, RemoteCredentials, RemoteFetcher, RemoteJob};

use crate::remote::listing;

const LISTING_QUERY: &str = "api/xml?tree=jobs[name,url,description]";

/// Discovers the job hierarchy exposed by a remote automation server
pub struct RemoteTreeFetcher {
    fetcher: Arc<dyn RemoteFetcher>,
}

impl RemoteTreeFetcher {
    pub fn new(fetcher: Arc<dyn RemoteFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch the full forest rooted at `root_url`
    ///
    /// Fails only when the root listing itself cannot be retrieved or
    /// parsed. Failures below the root leave the affected node childless and
    /// visible, so one unreachable subtree cannot blank the whole query.
    pub async fn fetch_all(
        &self,
        root_url: &str,
        credentials: &RemoteCredentials,
    ) -> ImportResult<Vec<RemoteJob>> {
        let mut visited = HashSet::new();
        let (jobs, _folder) = self
            .fetch_level(root_url.to_string(), credentials, &mut visited)
            .await
            .map_err(|e| ImportError::DiscoveryFailed(e.to_string()))?;

        debug!(
            "Discovered {} top-level jobs below {}",
            jobs.len(),
            root_url
        );
        Ok(jobs)
    }

    /// Fetch one node's listing and recurse into its children
    ///
    /// Returns the node's children (sorted) and whether the node's own
    /// listing declared it a folder. A location already visited in this
    /// traversal yields an empty, non-folder result so self-referential
    /// listings cannot recurse forever.
    fn fetch_level<'a>(
        &'a self,
        url: String,
        credentials: &'a RemoteCredentials,
        visited: &'a mut HashSet<String>,
    ) -> Pin<Box<dyn Future<Output = ImportResult<(Vec<RemoteJob>, bool)>> + Send + 'a>> {
        Box::pin(async move {
            let base = normalize_location(&url);
            if !visited.insert(base.clone()) {
                warn!("Listing for {} already visited, treating as leaf", base);
                return Ok((Vec::new(), false));
            }

            let listing_url = format!("{}{}", base, LISTING_QUERY);
            let payload = self.fetcher.fetch(&listing_url, credentials).await?;
            let listing = listing::parse_listing(&payload)?;

            let mut jobs = Vec::with_capacity(listing.jobs.len());
            for entry in listing.jobs {
                if entry.url.trim().is_empty() {
                    warn!("Skipping listed job '{}' with blank url", entry.name);
                    continue;
                }

                let (children, child_is_folder) = match self
                    .fetch_level(entry.url.clone(), credentials, &mut *visited)
                    .await
                {
                    Ok(result) => result,
                    Err(e) => {
                        warn!("Listing for {} failed, treating as childless: {}", entry.url, e);
                        (Vec::new(), false)
                    }
                };

                let hidden = child_is_folder && children.iter().all(|c| c.hidden);
                jobs.push(RemoteJob {
                    name: entry.name,
                    url: entry.url,
                    description: entry.description,
                    children,
                    hidden,
                });
            }

            jobs.sort();
            Ok((jobs, listing.folder))
        })
    }
}

/// Ensure a location ends with a single trailing separator
fn normalize_location(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
