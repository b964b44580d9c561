//! Bidirectional BFS: forward over outbound links from the start, backward
//! over inbound links from the end, one depth at a time.
//!
//! ```text
//!             ┌──────────────────────── next depth ───────────────────────┐
//!             ▼                                                           │
//! Initial ─▶ ExpandingForward ──no meet──▶ ExpandingBackward ──no meet────┘
//!             │ meet                         │ meet
//!             ▼                              ▼
//!           Found                          Found
//!
//! before each depth: empty frontier ─▶ Exhausted, cap reached ─▶ DepthExceeded
//! ```
//!
//! Within one depth the forward layer is fully fetched and merged before the
//! backward layer starts. A forward meet therefore wins even when the
//! backward layer of the same depth would have met elsewhere, possibly on a
//! shorter route. This ordering is deliberate and observable; callers that
//! need a strict shortest path must not rely on it.

use std::time::Instant;

use crate::config::SearchConfig;
use crate::fetch::LinkFetcher;
use crate::model::{LinkDirection, LinkGraph, NodeRole, Path, Title};
use super::{LayerExpander, Meet, SearchResult, SearchStats, SearchStatus, Side, Strategy};

/// States of one bidirectional search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPhase {
    Initial,
    ExpandingForward,
    ExpandingBackward,
    Found(Path),
    DepthExceeded,
    Exhausted,
}

impl SearchPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Found(_) | Self::DepthExceeded | Self::Exhausted)
    }
}

/// Everything a bidirectional search owns while it runs.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub forward: Side,
    pub backward: Side,
    pub graph: LinkGraph,
    pub depth: usize,
}

impl SearchState {
    /// Frontiers and path maps seeded with their origins; the graph holds
    /// the start and end nodes.
    pub fn new(start: &Title, end: &Title) -> Self {
        let mut graph = LinkGraph::new();
        graph.add_node(start.clone(), NodeRole::Start);
        graph.add_node(end.clone(), NodeRole::End);
        Self {
            forward: Side::new(start.clone(), LinkDirection::Outbound),
            backward: Side::new(end.clone(), LinkDirection::Inbound),
            graph,
            depth: 0,
        }
    }

    /// Decide what happens before the next depth step.
    fn next_depth(&mut self, cap: usize) -> SearchPhase {
        if self.forward.frontier.is_empty() || self.backward.frontier.is_empty() {
            return SearchPhase::Exhausted;
        }
        if self.depth >= cap {
            return SearchPhase::DepthExceeded;
        }
        self.depth += 1;
        SearchPhase::ExpandingForward
    }
}

/// Search for a path from `start` to `end`, meeting in the middle.
///
/// `start == end` is found immediately as the one-title path, without any
/// lookups.
pub async fn bidirectional_search<F: LinkFetcher + ?Sized>(
    fetcher: &F,
    start: &Title,
    end: &Title,
    config: &SearchConfig,
) -> SearchResult {
    let started = Instant::now();
    let expander = LayerExpander::new(fetcher, config);
    let cap = config.bidirectional_depth_cap;

    let mut state = SearchState::new(start, end);
    let mut stats = SearchStats::default();
    let mut phase = SearchPhase::Initial;

    tracing::info!(%start, %end, cap, "bidirectional search started");

    while !phase.is_terminal() {
        let next = match phase {
            SearchPhase::Initial if start == end => SearchPhase::Found(Path::single(start.clone())),
            SearchPhase::Initial => state.next_depth(cap),
            SearchPhase::ExpandingForward => {
                tracing::info!(
                    depth = state.depth,
                    titles = state.forward.frontier.len(),
                    "expanding forward layer",
                );
                let meet = Meet::Opposite(&state.backward.paths);
                match expander.expand(&mut state.forward, meet, &mut state.graph, &mut stats).await {
                    Some(path) => SearchPhase::Found(path),
                    None => SearchPhase::ExpandingBackward,
                }
            }
            SearchPhase::ExpandingBackward => {
                tracing::info!(
                    depth = state.depth,
                    titles = state.backward.frontier.len(),
                    "expanding backward layer",
                );
                let meet = Meet::Opposite(&state.forward.paths);
                match expander.expand(&mut state.backward, meet, &mut state.graph, &mut stats).await {
                    Some(path) => SearchPhase::Found(path),
                    None => state.next_depth(cap),
                }
            }
            terminal => terminal,
        };
        tracing::debug!(depth = state.depth, phase = ?next, "phase transition");
        phase = next;
    }

    stats.depth = state.depth;
    stats.nodes = state.graph.node_count();
    stats.edges = state.graph.edge_count();
    stats.elapsed = started.elapsed();

    let status = match phase {
        SearchPhase::Found(path) => SearchStatus::Found { path },
        SearchPhase::DepthExceeded => SearchStatus::DepthExceeded { cap },
        _ => SearchStatus::Exhausted,
    };

    match &status {
        SearchStatus::Found { path } => {
            tracing::info!(hops = path.hops(), depth = stats.depth, elapsed = ?stats.elapsed, %path, "path found");
        }
        SearchStatus::DepthExceeded { cap } => {
            tracing::info!(cap, nodes = stats.nodes, "depth cap reached without a path");
        }
        SearchStatus::Exhausted => {
            tracing::info!(depth = stats.depth, nodes = stats.nodes, "frontier exhausted without a path");
        }
    }

    SearchResult { strategy: Strategy::Bidirectional, status, graph: state.graph, stats }
}
