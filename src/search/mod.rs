//! # Search Engine
//!
//! Breadth-first path search over a graph that is only known through a
//! [`LinkFetcher`](crate::fetch::LinkFetcher).
//!
//! ```text
//!   start ──forward (outbound)──▶ ... ◀──backward (inbound)── end
//!                           intersection
//! ```
//!
//! Two strategies share one layer mechanism ([`LayerExpander`]):
//!
//! | Strategy | Module | Meets when | Default cap |
//! |----------|--------|------------|-------------|
//! | Bidirectional | `bidirectional` | a neighbor is in the other direction's path map | 4 |
//! | Forward-only | `forward` | a neighbor equals the goal title | 5 |
//!
//! Each layer is fetched concurrently (bounded), then merged serially in
//! frontier order, so results are reproducible for fixed fetch answers.
//! A search never returns `Err`: the three outcomes are values of
//! [`SearchStatus`].

pub mod expander;
pub mod bidirectional;
pub mod forward;

use std::time::Duration;
use serde::Serialize;
use crate::model::{LinkGraph, Path};

pub use expander::{LayerExpander, Meet, Side};
pub use bidirectional::{bidirectional_search, SearchPhase, SearchState};
pub use forward::forward_only_search;

// ============================================================================
// Outcome types
// ============================================================================

/// Which algorithm produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Bidirectional,
    ForwardOnly,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bidirectional => f.write_str("bidirectional"),
            Self::ForwardOnly => f.write_str("forward-only"),
        }
    }
}

/// Terminal state of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchStatus {
    /// A connecting path was found.
    Found { path: Path },
    /// A frontier emptied before the directions met.
    Exhausted,
    /// The depth cap ran out first.
    DepthExceeded { cap: usize },
}

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Depth steps started.
    pub depth: usize,
    /// Lookups issued.
    pub fetches: usize,
    /// Lookups that produced nothing (error or timeout).
    pub failed_fetches: usize,
    /// Lookups cut short mid-pagination.
    pub truncated_fetches: usize,
    pub nodes: usize,
    pub edges: usize,
    pub elapsed: Duration,
}

/// Everything one search call hands back.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub strategy: Strategy,
    pub status: SearchStatus,
    /// Explored graph, for the renderer.
    pub graph: LinkGraph,
    pub stats: SearchStats,
}

impl SearchResult {
    pub fn path(&self) -> Option<&Path> {
        match &self.status {
            SearchStatus::Found { path } => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.status, SearchStatus::Found { .. })
    }

    pub fn into_path(self) -> Option<Path> {
        match self.status {
            SearchStatus::Found { path } => Some(path),
            _ => None,
        }
    }
}
