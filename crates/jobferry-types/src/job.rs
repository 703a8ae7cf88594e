//! Remote job tree
//!
//! A `RemoteJob` is one node of the job hierarchy discovered on a remote
//! automation server. Nodes are immutable after discovery: the `hidden` flag
//! is computed bottom-up while the tree is built and never mutated afterward.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One node of the discovered remote job hierarchy
///
/// `url` is the canonical remote address of the node and is unique within one
/// discovered forest; it is the stable key used for selection and lookup.
/// `hidden` is true iff the node is a pure folder: its own listing carried a
/// folder marker and every descendant is itself hidden, i.e. nothing
/// importable exists anywhere below it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemoteJob {
    /// Remote job identifier, used as the candidate local job name
    pub name: String,
    /// Canonical remote address of this node
    pub url: String,
    /// Free-text description, empty if the listing carried none
    #[serde(default)]
    pub description: String,
    /// Direct descendants, kept sorted by the job total order
    #[serde(default)]
    pub children: Vec<RemoteJob>,
    /// True iff this subtree contains no importable leaf job
    pub hidden: bool,
}

impl RemoteJob {
    /// Create a leaf node with no children
    pub fn leaf(
        name: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: description.into(),
            children: Vec::new(),
            hidden: false,
        }
    }

    /// Depth-first search for a node by `url` within this subtree
    pub fn find(&self, url: &str) -> Option<&RemoteJob> {
        if self.url == url {
            return Some(self);
        }
        find_job(&self.children, url)
    }
}

/// Depth-first search for a node by `url` over a whole forest
///
/// Searches children even when a shallower sibling exists; returns the first
/// match in the forest order. `url` values are unique within one forest, so
/// at most one node can match.
pub fn find_job<'a>(forest: &'a [RemoteJob], url: &str) -> Option<&'a RemoteJob> {
    for job in forest {
        if let Some(found) = job.find(url) {
            return Some(found);
        }
    }
    None
}

// Identity and ordering are defined by (url, name) only, so nodes can live in
// ordered maps and render deterministically across repeated queries.
impl PartialEq for RemoteJob {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.name == other.name
    }
}

impl Eq for RemoteJob {}

impl PartialOrd for RemoteJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RemoteJob {
    fn cmp(&self, other: &Self) -> Ordering {
        self.url
            .cmp(&other.url)
            .then_with(|| self.name.cmp(&other.name))
    }
}
