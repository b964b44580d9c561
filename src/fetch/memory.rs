//! In-memory link fetcher.
//!
//! This is the reference implementation of `LinkFetcher`. It serves a
//! directed link table held in HashMaps protected by RwLock.
//!
//! Besides plain links it can inject the failure modes a remote service
//! shows in practice, per `(title, direction)`:
//!
//! - **failures**: the lookup returns `FetchOutcome::Failed`
//! - **truncation**: only the first `n` links arrive, then pagination fails
//! - **latency**: the lookup sleeps before answering
//!
//! Every call is logged, and the peak number of concurrent calls is
//! tracked, so tests can observe how a search drove the service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::model::{LinkDirection, Title};
use super::{FetchError, FetchOutcome, LinkFetcher};

// ============================================================================
// MemoryFetcher
// ============================================================================

/// In-memory directed link table.
#[derive(Clone, Default)]
pub struct MemoryFetcher {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    outbound: RwLock<HashMap<Title, Vec<Title>>>,
    inbound: RwLock<HashMap<Title, Vec<Title>>>,
    failures: RwLock<HashMap<(Title, LinkDirection), FetchError>>,
    truncations: RwLock<HashMap<(Title, LinkDirection), usize>>,
    delays: RwLock<HashMap<(Title, LinkDirection), Duration>>,
    calls: RwLock<Vec<(Title, LinkDirection)>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(from, to)` pairs.
    pub fn from_links<'a>(links: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let fetcher = Self::new();
        for (from, to) in links {
            fetcher.add_link(from, to);
        }
        fetcher
    }

    /// Add a directed link `from -> to`. Visible both as an outbound link of
    /// `from` and an inbound link of `to`. Duplicates are ignored.
    pub fn add_link(&self, from: &str, to: &str) {
        let (from, to) = (Title::from(from), Title::from(to));
        push_distinct(&mut self.inner.outbound.write(), &from, &to);
        push_distinct(&mut self.inner.inbound.write(), &to, &from);
    }

    /// Add links along a chain: `a -> b -> c ...`.
    pub fn add_chain(&self, titles: &[&str]) {
        for pair in titles.windows(2) {
            self.add_link(pair[0], pair[1]);
        }
    }

    /// Make every lookup of `title` in `direction` fail.
    pub fn fail(&self, title: &str, direction: LinkDirection) {
        self.inner.failures.write().insert(
            (Title::from(title), direction),
            FetchError::Unavailable(format!("injected failure for {title} ({direction})")),
        );
    }

    /// Serve only the first `keep` links of `title`, then fail mid-pagination.
    pub fn truncate(&self, title: &str, direction: LinkDirection, keep: usize) {
        self.inner.truncations.write().insert((Title::from(title), direction), keep);
    }

    /// Delay lookups of `title` in `direction` by `delay`.
    pub fn delay(&self, title: &str, direction: LinkDirection, delay: Duration) {
        self.inner.delays.write().insert((Title::from(title), direction), delay);
    }

    /// Every lookup made so far, in call order.
    pub fn calls(&self) -> Vec<(Title, LinkDirection)> {
        self.inner.calls.read().clone()
    }

    /// True if `title` was looked up in `direction`.
    pub fn was_fetched(&self, title: &str, direction: LinkDirection) -> bool {
        self.inner.calls.read().iter().any(|(t, d)| t.as_str() == title && *d == direction)
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls.read().len()
    }

    /// Highest number of lookups observed in flight at once.
    pub fn peak_concurrency(&self) -> usize {
        self.inner.peak_in_flight.load(Ordering::SeqCst)
    }

    fn links(&self, title: &Title, direction: LinkDirection) -> Vec<Title> {
        let table = match direction {
            LinkDirection::Outbound => self.inner.outbound.read(),
            LinkDirection::Inbound => self.inner.inbound.read(),
        };
        table.get(title).cloned().unwrap_or_default()
    }
}

fn push_distinct(table: &mut HashMap<Title, Vec<Title>>, key: &Title, value: &Title) {
    let entry = table.entry(key.clone()).or_default();
    if !entry.contains(value) {
        entry.push(value.clone());
    }
}

/// Decrements the in-flight counter when a lookup finishes or is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// LinkFetcher impl
// ============================================================================

#[async_trait]
impl LinkFetcher for MemoryFetcher {
    async fn fetch_links(&self, title: &Title, direction: LinkDirection) -> FetchOutcome {
        self.inner.calls.write().push((title.clone(), direction));

        let now = self.inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.inner.in_flight);

        let key = (title.clone(), direction);
        let delay = self.inner.delays.read().get(&key).copied();
        match delay {
            Some(d) => tokio::time::sleep(d).await,
            None => tokio::task::yield_now().await,
        }

        if let Some(err) = self.inner.failures.read().get(&key) {
            return FetchOutcome::Failed(err.clone());
        }

        let links = self.links(title, direction);
        if let Some(&keep) = self.inner.truncations.read().get(&key) {
            if keep < links.len() {
                let partial = links.into_iter().take(keep).collect();
                return FetchOutcome::interrupted(
                    partial,
                    FetchError::Transport(format!("connection reset after {keep} links")),
                );
            }
        }

        FetchOutcome::complete(links)
    }
}

// ============================================================================
// Tests
// ============================================================================
