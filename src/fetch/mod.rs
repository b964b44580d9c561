//! # Link Fetcher Trait
//!
//! This is THE contract between the search engine and the remote link
//! service. A fetcher answers one question: which titles does this title
//! link to (outbound), or which titles link to it (inbound)?
//!
//! ## Implementations
//!
//! | Fetcher | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryFetcher` | `memory` | In-memory link table for fixtures/embedding |
//! | `MediaWikiFetcher` | `mediawiki` | MediaWiki `action=query` API over HTTP |
//!
//! Fetch failures never abort a search. They are reported as values
//! ([`FetchOutcome`]) so callers can tell "no links" from "lookup failed"
//! while still degrading both to an empty neighbor set.

pub mod memory;
#[cfg(feature = "mediawiki")]
pub mod mediawiki;

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use crate::model::{LinkDirection, Title};

pub use memory::MemoryFetcher;
#[cfg(feature = "mediawiki")]
pub use mediawiki::MediaWikiFetcher;

// ============================================================================
// Fetch errors and outcomes
// ============================================================================

/// Why a single lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Result of one `(title, direction)` lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Complete, non-empty link list.
    Links(Vec<Title>),
    /// Complete, and the title has no links in that direction
    /// (or does not exist).
    Empty,
    /// Pagination broke part-way. `links` holds what was accumulated
    /// before the error; the list is silently incomplete.
    Partial { links: Vec<Title>, error: FetchError },
    /// Nothing was retrieved.
    Failed(FetchError),
}

impl FetchOutcome {
    /// Wrap a complete link list.
    pub fn complete(links: Vec<Title>) -> Self {
        if links.is_empty() { Self::Empty } else { Self::Links(links) }
    }

    /// Wrap an interrupted link list.
    pub fn interrupted(links: Vec<Title>, error: FetchError) -> Self {
        if links.is_empty() { Self::Failed(error) } else { Self::Partial { links, error } }
    }

    /// Neighbor set under the fail-soft policy: partial lists are kept
    /// as-is, failures become "no neighbors".
    pub fn into_links(self) -> Vec<Title> {
        match self {
            Self::Links(links) | Self::Partial { links, .. } => links,
            Self::Empty | Self::Failed(_) => Vec::new(),
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Partial { error, .. } | Self::Failed(error) => Some(error),
            Self::Links(_) | Self::Empty => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial { .. })
    }
}

// ============================================================================
// LinkFetcher Trait
// ============================================================================

/// The link lookup contract.
///
/// Implementations must drain any pagination before returning, return each
/// linked title at most once, and never panic on service errors: an error
/// mid-pagination becomes [`FetchOutcome::Partial`], an error before any
/// page arrived becomes [`FetchOutcome::Failed`].
///
/// Fetchers are called concurrently from one search and must not rely on
/// shared mutable state between calls.
#[async_trait]
pub trait LinkFetcher: Send + Sync {
    /// Look up the titles linked from (`Outbound`) or to (`Inbound`) `title`.
    async fn fetch_links(&self, title: &Title, direction: LinkDirection) -> FetchOutcome;
}

#[async_trait]
impl<F: LinkFetcher + ?Sized> LinkFetcher for Arc<F> {
    async fn fetch_links(&self, title: &Title, direction: LinkDirection) -> FetchOutcome {
        (**self).fetch_links(title, direction).await
    }
}

#[async_trait]
impl<F: LinkFetcher + ?Sized> LinkFetcher for &F {
    async fn fetch_links(&self, title: &Title, direction: LinkDirection) -> FetchOutcome {
        (**self).fetch_links(title, direction).await
    }
}

/// Append `candidates` to `links`, skipping titles already present.
/// Keeps the order in which the service returned them.
pub(crate) fn extend_distinct(
    links: &mut Vec<Title>,
    seen: &mut hashbrown::HashSet<Title>,
    candidates: impl IntoIterator<Item = Title>,
) {
    for title in candidates {
        if seen.insert(title.clone()) {
            links.push(title);
        }
    }
}
