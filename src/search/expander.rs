//! Layer expansion: fetch one frontier concurrently, then merge serially.
//!
//! A layer runs in two phases with a barrier in between:
//!
//! 1. **Fetch**: one lookup per frontier title, at most
//!    `max_concurrent_fetches` in flight, each bounded by
//!    `fetch_timeout_ms`. Every lookup is awaited, including ones whose
//!    merge will later be skipped.
//! 2. **Merge**: walk the titles in frontier order and their links in
//!    service order: add the edge, test the meet rule, record first
//!    discoveries into the path map and the next frontier. The first meet
//!    ends the merge and returns the assembled path.
//!
//! Only phase 2 touches the graph and path maps, and it runs on the
//! caller's task, so fetch workers share no mutable state.

use futures::stream::{self, StreamExt};

use crate::config::SearchConfig;
use crate::fetch::{FetchError, FetchOutcome, LinkFetcher};
use crate::model::{Frontier, LinkDirection, LinkGraph, NodeRole, Path, PathMap, Title};
use super::SearchStats;

/// One search direction: which links it follows, what it must expand next,
/// and how it reached everything it has seen.
#[derive(Debug, Clone)]
pub struct Side {
    pub direction: LinkDirection,
    pub frontier: Frontier,
    pub paths: PathMap,
}

impl Side {
    /// A side rooted at `origin`.
    pub fn new(origin: Title, direction: LinkDirection) -> Self {
        Self {
            direction,
            frontier: Frontier::seeded(origin.clone()),
            paths: PathMap::seeded(origin),
        }
    }
}

/// When a discovered neighbor ends the search.
#[derive(Debug, Clone, Copy)]
pub enum Meet<'a> {
    /// The neighbor is already in the opposite direction's path map.
    Opposite(&'a PathMap),
    /// The neighbor is exactly this title.
    Goal(&'a Title),
}

/// Expands frontiers against a fetcher under one search's limits.
pub struct LayerExpander<'a, F: ?Sized> {
    fetcher: &'a F,
    config: &'a SearchConfig,
}

impl<'a, F: LinkFetcher + ?Sized> LayerExpander<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a SearchConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fetch links for every title, bounded and concurrent. Outcomes come
    /// back in the order of `titles` regardless of completion order.
    ///
    /// A concurrency limit of zero runs lookups one at a time.
    pub async fn fetch_layer(&self, titles: &[Title], direction: LinkDirection) -> Vec<FetchOutcome> {
        let fetcher = self.fetcher;
        let timeout = self.config.fetch_timeout();
        let limit = self.config.max_concurrent_fetches.max(1);

        stream::iter(titles)
            .map(move |title| async move {
                match tokio::time::timeout(timeout, fetcher.fetch_links(title, direction)).await {
                    Ok(outcome) => outcome,
                    Err(_) => FetchOutcome::Failed(FetchError::Timeout(timeout)),
                }
            })
            .buffered(limit)
            .collect()
            .await
    }

    /// Expand `side`'s current frontier by one layer.
    ///
    /// Returns the full start-to-end path at the first meet, after marking
    /// the meeting title as an intersection when meeting another direction.
    /// On return the frontier holds the next layer (partial if a meet cut
    /// the merge short).
    pub async fn expand(
        &self,
        side: &mut Side,
        meet: Meet<'_>,
        graph: &mut LinkGraph,
        stats: &mut SearchStats,
    ) -> Option<Path> {
        let titles = side.frontier.take();
        tracing::debug!(direction = %side.direction, titles = titles.len(), "fetching layer");

        let outcomes = self.fetch_layer(&titles, side.direction).await;
        record_outcomes(&titles, &outcomes, side.direction, stats);

        merge_layer(side, &titles, outcomes, meet, graph)
    }
}

fn record_outcomes(
    titles: &[Title],
    outcomes: &[FetchOutcome],
    direction: LinkDirection,
    stats: &mut SearchStats,
) {
    stats.fetches += outcomes.len();
    for (title, outcome) in titles.iter().zip(outcomes) {
        match outcome {
            FetchOutcome::Failed(error) => {
                stats.failed_fetches += 1;
                tracing::warn!(%title, %direction, %error, "lookup failed, treating as no links");
            }
            FetchOutcome::Partial { links, error } => {
                stats.truncated_fetches += 1;
                tracing::warn!(%title, %direction, kept = links.len(), %error, "link list truncated");
            }
            FetchOutcome::Links(_) | FetchOutcome::Empty => {}
        }
    }
}

/// Serial merge of fetched links into the graph and `side`.
pub(crate) fn merge_layer(
    side: &mut Side,
    titles: &[Title],
    outcomes: Vec<FetchOutcome>,
    meet: Meet<'_>,
    graph: &mut LinkGraph,
) -> Option<Path> {
    for (parent, outcome) in titles.iter().zip(outcomes) {
        // Every frontier title was recorded when it was discovered.
        let Some(parent_path) = side.paths.get(parent.as_str()).map(<[Title]>::to_vec) else { continue };

        for link in outcome.into_links() {
            graph.add_edge(parent, &link);

            if let Some(path) = meet_path(side.direction, &parent_path, &link, meet) {
                if let Meet::Opposite(_) = meet {
                    graph.set_role(&link, NodeRole::Intersection);
                }
                tracing::info!(title = %link, direction = %side.direction, "directions met");
                return Some(path);
            }

            if side.paths.record(&link, &parent_path) {
                side.frontier.push(link);
            }
        }
    }
    None
}

/// The full path if reaching `link` from `parent_path` satisfies `meet`.
fn meet_path(
    direction: LinkDirection,
    parent_path: &[Title],
    link: &Title,
    meet: Meet<'_>,
) -> Option<Path> {
    let other = match meet {
        Meet::Goal(goal) if link == goal => &[][..],
        Meet::Goal(_) => return None,
        Meet::Opposite(map) => map.get(link.as_str())?,
    };

    let mut own = parent_path.to_vec();
    own.push(link.clone());
    if other.is_empty() {
        return Path::from_titles(own);
    }

    // `other` runs from the opposite origin to `link`.
    let (mut titles, backward) = match direction {
        LinkDirection::Outbound => (own, other.to_vec()),
        LinkDirection::Inbound => (other.to_vec(), own),
    };
    titles.extend(backward.into_iter().rev().skip(1));
    Path::from_titles(titles)
}

// ============================================================================
// Tests
// ============================================================================
