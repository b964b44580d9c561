//! Path replay.
//!
//! A demonstrator walks a found path step by step, the way a reader would
//! click from one document to the next, and reports whether every step
//! could actually be taken. A failed replay makes the explorer retry with
//! the forward-only strategy.

use async_trait::async_trait;
use serde::Serialize;

use crate::fetch::LinkFetcher;
use crate::model::{LinkDirection, Path, Title};
use crate::Result;

/// How a replay ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "replay", rename_all = "snake_case")]
pub enum Replay {
    Completed,
    /// No link from `from` to `to` could be followed.
    Broken { from: Title, to: Title },
    /// The demonstrator itself failed before finishing.
    Aborted { reason: String },
}

impl Replay {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Replays a path against some rendering of the documents.
#[async_trait]
pub trait Demonstrator: Send + Sync {
    async fn demonstrate(&self, path: &Path) -> Result<Replay>;
}

/// Accepts every path without checking it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReplay;

#[async_trait]
impl Demonstrator for NoReplay {
    async fn demonstrate(&self, _path: &Path) -> Result<Replay> {
        Ok(Replay::Completed)
    }
}

/// Headless replay: for each step, re-fetch the current document's
/// outbound links and require the next title among them.
///
/// Catches paths assembled from inbound lookups that do not hold when
/// followed forward. A step whose lookup fails counts as broken.
pub struct LinkCheckDemonstrator<F> {
    fetcher: F,
}

impl<F: LinkFetcher> LinkCheckDemonstrator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl<F: LinkFetcher> Demonstrator for LinkCheckDemonstrator<F> {
    async fn demonstrate(&self, path: &Path) -> Result<Replay> {
        for (from, to) in path.steps() {
            let outcome = self.fetcher.fetch_links(from, LinkDirection::Outbound).await;
            if let Some(error) = outcome.error() {
                tracing::warn!(%from, %error, "replay lookup failed");
            }
            if !outcome.into_links().contains(to) {
                tracing::warn!(%from, %to, "link not found on page");
                return Ok(Replay::Broken { from: from.clone(), to: to.clone() });
            }
            tracing::debug!(%from, %to, "step replayed");
        }
        tracing::info!(hops = path.hops(), "replay completed");
        Ok(Replay::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;

    fn path(titles: &[&str]) -> Path {
        Path::from_titles(titles.iter().map(|t| Title::from(*t)).collect()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_path_replays() {
        let f = MemoryFetcher::from_links([("A", "B"), ("B", "C")]);
        let demo = LinkCheckDemonstrator::new(f);
        assert_eq!(demo.demonstrate(&path(&["A", "B", "C"])).await.unwrap(), Replay::Completed);
    }

    #[tokio::test]
    async fn test_missing_link_breaks_replay() {
        let f = MemoryFetcher::from_links([("A", "B")]);
        let demo = LinkCheckDemonstrator::new(f);
        let replay = demo.demonstrate(&path(&["A", "B", "C"])).await.unwrap();
        assert_eq!(replay, Replay::Broken { from: Title::from("B"), to: Title::from("C") });
    }

    #[tokio::test]
    async fn test_single_title_path_is_trivially_replayed() {
        let demo = LinkCheckDemonstrator::new(MemoryFetcher::new());
        assert!(demo.demonstrate(&path(&["A"])).await.unwrap().is_completed());
    }
}
