//! Forward-only BFS, the fallback strategy.
//!
//! Follows outbound links from the start alone and stops the moment a
//! fetched link is exactly the goal title. It covers the whole distance by
//! itself, so its depth cap is larger than the bidirectional one.

use std::time::Instant;

use crate::config::SearchConfig;
use crate::fetch::LinkFetcher;
use crate::model::{LinkDirection, LinkGraph, NodeRole, Path, Title};
use super::{LayerExpander, Meet, SearchResult, SearchStats, SearchStatus, Side, Strategy};

/// Search for a path from `start` to `goal` using outbound links only.
pub async fn forward_only_search<F: LinkFetcher + ?Sized>(
    fetcher: &F,
    start: &Title,
    goal: &Title,
    config: &SearchConfig,
) -> SearchResult {
    let started = Instant::now();
    let expander = LayerExpander::new(fetcher, config);
    let cap = config.fallback_depth_cap;

    let mut graph = LinkGraph::new();
    graph.add_node(start.clone(), NodeRole::Start);
    graph.add_node(goal.clone(), NodeRole::End);

    let mut side = Side::new(start.clone(), LinkDirection::Outbound);
    let mut stats = SearchStats::default();

    tracing::info!(%start, %goal, cap, "forward-only search started");

    let status = if start == goal {
        SearchStatus::Found { path: Path::single(start.clone()) }
    } else {
        loop {
            if side.frontier.is_empty() {
                break SearchStatus::Exhausted;
            }
            if stats.depth >= cap {
                break SearchStatus::DepthExceeded { cap };
            }
            stats.depth += 1;
            tracing::info!(depth = stats.depth, titles = side.frontier.len(), "expanding forward layer");

            if let Some(path) = expander.expand(&mut side, Meet::Goal(goal), &mut graph, &mut stats).await {
                break SearchStatus::Found { path };
            }
        }
    };

    stats.nodes = graph.node_count();
    stats.edges = graph.edge_count();
    stats.elapsed = started.elapsed();

    match &status {
        SearchStatus::Found { path } => {
            tracing::info!(hops = path.hops(), depth = stats.depth, elapsed = ?stats.elapsed, %path, "goal reached");
        }
        other => tracing::info!(status = ?other, nodes = stats.nodes, "goal not reached"),
    }

    SearchResult { strategy: Strategy::ForwardOnly, status, graph, stats }
}
