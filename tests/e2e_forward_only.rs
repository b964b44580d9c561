//! End-to-end tests for the forward-only fallback search.

use std::time::Duration;

use pretty_assertions::assert_eq;
use linkpath::{
    bidirectional_search, forward_only_search, LinkDirection, MemoryFetcher, NodeRole,
    SearchConfig, SearchStatus, Strategy, Title,
};

fn t(title: &str) -> Title {
    Title::from(title)
}

fn titles(names: &[&str]) -> Vec<Title> {
    names.iter().map(|n| Title::from(*n)).collect()
}

fn chain(len: usize) -> (MemoryFetcher, Vec<String>) {
    let names: Vec<String> = (0..=len).map(|i| format!("N{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let fetcher = MemoryFetcher::new();
    fetcher.add_chain(&refs);
    (fetcher, names)
}

#[tokio::test]
async fn test_finds_chain_using_outbound_links_only() {
    let fetcher = MemoryFetcher::new();
    fetcher.add_chain(&["A", "B", "C", "D"]);

    let result = forward_only_search(&fetcher, &t("A"), &t("D"), &SearchConfig::default()).await;

    assert_eq!(result.strategy, Strategy::ForwardOnly);
    assert_eq!(result.path().unwrap().titles(), titles(&["A", "B", "C", "D"]).as_slice());
    assert_eq!(result.stats.depth, 3);
    assert!(fetcher.calls().iter().all(|(_, d)| *d == LinkDirection::Outbound));
    assert_eq!(result.graph.role("D"), Some(NodeRole::End));
}

#[tokio::test]
async fn test_same_start_and_goal() {
    let fetcher = MemoryFetcher::new();
    let result = forward_only_search(&fetcher, &t("A"), &t("A"), &SearchConfig::default()).await;
    assert_eq!(result.path().unwrap().titles(), titles(&["A"]).as_slice());
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_goal_match_is_exact_string() {
    let fetcher = MemoryFetcher::from_links([("A", "goal")]);
    let result = forward_only_search(&fetcher, &t("A"), &t("Goal"), &SearchConfig::default()).await;
    assert_eq!(result.status, SearchStatus::Exhausted);
}

#[tokio::test]
async fn test_fallback_cap_covers_five_hops() {
    let (fetcher, names) = chain(5);
    let result = forward_only_search(&fetcher, &t(&names[0]), &t(&names[5]), &SearchConfig::default()).await;
    assert_eq!(result.path().unwrap().hops(), 5);
    assert_eq!(result.stats.depth, 5);
}

#[tokio::test]
async fn test_fallback_cap_exceeded() {
    let (fetcher, names) = chain(6);
    let result = forward_only_search(&fetcher, &t(&names[0]), &t(&names[6]), &SearchConfig::default()).await;
    assert_eq!(result.status, SearchStatus::DepthExceeded { cap: 5 });
    assert_eq!(result.stats.depth, 5);
}

#[tokio::test]
async fn test_zero_concurrency_still_completes() {
    let fetcher = MemoryFetcher::from_links([("A", "B"), ("A", "C"), ("C", "Z")]);
    let config = SearchConfig { max_concurrent_fetches: 0, ..SearchConfig::default() };

    let (src, dst) = (t("A"), t("Z"));
    let search = forward_only_search(&fetcher, &src, &dst, &config);
    let result = tokio::time::timeout(Duration::from_secs(5), search)
        .await
        .expect("search with zero concurrency must not stall");
    assert_eq!(result.path().unwrap().titles(), titles(&["A", "C", "Z"]).as_slice());
}

#[tokio::test]
async fn test_first_goal_hit_in_frontier_order_wins() {
    // Both B and C link to the goal at depth 2; B is first in A's links.
    let fetcher = MemoryFetcher::from_links([("A", "B"), ("A", "C"), ("C", "Z"), ("B", "Z")]);
    let result = forward_only_search(&fetcher, &t("A"), &t("Z"), &SearchConfig::default()).await;
    assert_eq!(result.path().unwrap().titles(), titles(&["A", "B", "Z"]).as_slice());
}

#[tokio::test]
async fn test_recovers_where_bidirectional_exhausts() {
    // Inbound lookups of the goal fail, so the backward side never starts.
    let fetcher = MemoryFetcher::new();
    fetcher.add_chain(&["S", "A", "B", "E"]);
    fetcher.fail("E", LinkDirection::Inbound);
    let config = SearchConfig::default();

    let first = bidirectional_search(&fetcher, &t("S"), &t("E"), &config).await;
    assert_eq!(first.status, SearchStatus::Exhausted);

    let retry = forward_only_search(&fetcher, &t("S"), &t("E"), &config).await;
    assert_eq!(retry.path().unwrap().titles(), titles(&["S", "A", "B", "E"]).as_slice());
    assert_eq!(retry.stats.failed_fetches, 0);
}
