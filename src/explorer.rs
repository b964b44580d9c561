//! Explorer: the orchestrator around the search strategies.
//!
//! ```text
//! explore(start, end)
//!   ├─ bidirectional search ── Found ─▶ demonstrate ── Completed ──────────┐
//!   │                            │                        │                 │
//!   │                     Exhausted / DepthExceeded  Broken / Aborted       │
//!   │                            ▼                        ▼                 ▼
//!   └─────────────────────── forward-only search ── Found ─▶ demonstrate ─▶ render accepted path
//! ```
//!
//! The retry is a caller-level policy: each strategy runs with fresh state,
//! and the fallback does not reuse anything the first attempt explored.
//! Renderers see exactly one graph, the one behind the accepted path.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SearchConfig;
use crate::fetch::LinkFetcher;
use crate::model::{LinkGraph, Path, Title};
use crate::render::GraphRenderer;
use crate::replay::{Demonstrator, Replay};
use crate::search::{
    bidirectional_search, forward_only_search, SearchResult, SearchStats, SearchStatus, Strategy,
};
use crate::{Error, Result};

/// One strategy run inside an exploration.
#[derive(Debug, Clone, Serialize)]
pub struct Attempt {
    pub strategy: Strategy,
    pub started_at: DateTime<Utc>,
    #[serde(flatten)]
    pub status: SearchStatus,
    pub stats: SearchStats,
    /// Present only when the attempt found a path.
    pub replay: Option<Replay>,
}

/// Report of a full exploration.
#[derive(Debug, Clone, Serialize)]
pub struct Exploration {
    pub start: Title,
    pub end: Title,
    pub attempts: Vec<Attempt>,
    /// The accepted path, if any attempt produced one.
    pub path: Option<Path>,
    /// Graph explored by the attempt that produced `path`.
    #[serde(skip)]
    pub graph: Option<LinkGraph>,
}

/// Path finding over one link fetcher with one configuration.
pub struct Explorer<F> {
    fetcher: F,
    config: SearchConfig,
}

impl<F: LinkFetcher> Explorer<F> {
    pub fn new(fetcher: F, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { fetcher, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Bidirectional search between two titles.
    pub async fn find_path(&self, start: &str, end: &str) -> Result<SearchResult> {
        let (start, end) = parse_titles(start, end)?;
        Ok(bidirectional_search(&self.fetcher, &start, &end, &self.config).await)
    }

    /// Forward-only search between two titles.
    pub async fn find_path_forward_only(&self, start: &str, end: &str) -> Result<SearchResult> {
        let (start, end) = parse_titles(start, end)?;
        Ok(forward_only_search(&self.fetcher, &start, &end, &self.config).await)
    }

    /// Search, demonstrate, and fall back to forward-only search when the
    /// first attempt finds nothing or its path cannot be replayed. The
    /// accepted path, if any, is rendered once at the end.
    pub async fn explore(
        &self,
        start: &str,
        end: &str,
        renderers: &mut [Box<dyn GraphRenderer>],
        demonstrator: &dyn Demonstrator,
    ) -> Result<Exploration> {
        let (start, end) = parse_titles(start, end)?;
        let mut exploration = Exploration {
            start: start.clone(),
            end: end.clone(),
            attempts: Vec::new(),
            path: None,
            graph: None,
        };

        let started_at = Utc::now();
        let first = bidirectional_search(&self.fetcher, &start, &end, &self.config).await;
        let accepted = self.present(first, started_at, demonstrator, &mut exploration).await;

        if !accepted {
            tracing::info!(%start, %end, "first attempt unusable, retrying with forward-only search");
            let started_at = Utc::now();
            let second = forward_only_search(&self.fetcher, &start, &end, &self.config).await;
            self.present(second, started_at, demonstrator, &mut exploration).await;
        }

        match (&exploration.graph, &exploration.path) {
            (Some(graph), Some(path)) => {
                for renderer in renderers.iter_mut() {
                    renderer.render(graph, path)?;
                }
            }
            _ => tracing::info!(%start, %end, "no path found; check that both titles exist"),
        }
        Ok(exploration)
    }

    /// Record an attempt, demonstrating it if it found a path. Returns true
    /// if the path should be accepted without retry.
    async fn present(
        &self,
        result: SearchResult,
        started_at: DateTime<Utc>,
        demonstrator: &dyn Demonstrator,
        exploration: &mut Exploration,
    ) -> bool {
        let SearchResult { strategy, status, graph, stats } = result;

        let replay = match &status {
            SearchStatus::Found { path } => {
                tracing::info!(%strategy, hops = path.hops(), elapsed = ?stats.elapsed, "path found: {path}");
                let replay = match demonstrator.demonstrate(path).await {
                    Ok(replay) => replay,
                    Err(e) => {
                        tracing::warn!(%strategy, error = %e, "demonstration failed");
                        Replay::Aborted { reason: e.to_string() }
                    }
                };
                exploration.path = Some(path.clone());
                exploration.graph = Some(graph);
                Some(replay)
            }
            SearchStatus::Exhausted | SearchStatus::DepthExceeded { .. } => None,
        };

        let accepted = replay.as_ref().is_some_and(Replay::is_completed);
        if strategy == Strategy::Bidirectional && !accepted {
            exploration.path = None;
            exploration.graph = None;
        }

        exploration.attempts.push(Attempt { strategy, started_at, status, stats, replay });
        accepted
    }
}

/// Trim both titles and reject blank ones.
fn parse_titles(start: &str, end: &str) -> Result<(Title, Title)> {
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return Err(Error::InvalidInput("both start and end titles are required".into()));
    }
    Ok((Title::from(start), Title::from(end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_titles_trims() {
        let (s, e) = parse_titles("  Alpha ", "Omega\n").unwrap();
        assert_eq!(s.as_str(), "Alpha");
        assert_eq!(e.as_str(), "Omega");
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(matches!(parse_titles("   ", "Omega"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_titles("Alpha", ""), Err(Error::InvalidInput(_))));
    }
}
