//! Property tests for graph merging: repeated links never duplicate nodes
//! or edges, whatever order they arrive in.

use std::collections::BTreeSet;

use async_trait::async_trait;
use proptest::prelude::*;
use linkpath::search::{LayerExpander, Meet, Side};
use linkpath::{
    FetchOutcome, LinkDirection, LinkFetcher, LinkGraph, NodeRole, PathMap, SearchConfig,
    SearchStats, Title,
};

fn title_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "B", "C", "D", "E", "F"]).prop_map(str::to_owned)
}

proptest! {
    #[test]
    fn edges_merge_to_distinct_unordered_pairs(
        pairs in prop::collection::vec((title_strategy(), title_strategy()), 0..40),
    ) {
        let mut graph = LinkGraph::new();
        // Add everything twice, the second time reversed.
        for (x, y) in pairs.iter().chain(pairs.iter()) {
            graph.add_edge(&Title::from(x.as_str()), &Title::from(y.as_str()));
        }
        for (x, y) in &pairs {
            graph.add_edge(&Title::from(y.as_str()), &Title::from(x.as_str()));
        }

        let nodes: BTreeSet<&str> = pairs.iter().flat_map(|(x, y)| [x.as_str(), y.as_str()]).collect();
        let edges: BTreeSet<(&str, &str)> = pairs
            .iter()
            .map(|(x, y)| if x <= y { (x.as_str(), y.as_str()) } else { (y.as_str(), x.as_str()) })
            .collect();

        prop_assert_eq!(graph.node_count(), nodes.len());
        prop_assert_eq!(graph.edge_count(), edges.len());
        for (x, y) in &pairs {
            prop_assert!(graph.has_edge(x, y));
            prop_assert!(graph.has_edge(y, x));
        }
    }

    #[test]
    fn first_discovery_wins(
        discoveries in prop::collection::vec(title_strategy(), 1..20),
    ) {
        let mut map = PathMap::seeded(Title::from("root"));
        let root = vec![Title::from("root")];
        let mut first_seen: Vec<String> = Vec::new();

        for (i, name) in discoveries.iter().enumerate() {
            let mut parent = root.clone();
            parent.push(Title::from(format!("via{i}")));
            let fresh = map.record(&Title::from(name.as_str()), &parent);
            prop_assert_eq!(fresh, !first_seen.contains(name));
            if fresh {
                first_seen.push(name.clone());
            }
        }

        for name in &first_seen {
            let idx = discoveries.iter().position(|d| d == name).unwrap();
            let recorded = map.get(name).unwrap();
            prop_assert_eq!(recorded.len(), 3);
            prop_assert_eq!(recorded[1].as_str(), format!("via{idx}"));
        }
        prop_assert_eq!(map.len(), first_seen.len() + 1);
    }
}

/// A service that repeats every link and lists the parent itself.
struct EchoingFetcher;

#[async_trait]
impl LinkFetcher for EchoingFetcher {
    async fn fetch_links(&self, title: &Title, _direction: LinkDirection) -> FetchOutcome {
        match title.as_str() {
            "S" => FetchOutcome::Links(
                ["A", "B", "A", "S", "B", "C"].into_iter().map(Title::from).collect(),
            ),
            _ => FetchOutcome::Empty,
        }
    }
}

#[tokio::test]
async fn test_duplicate_links_expand_once() {
    let config = SearchConfig::default();
    let expander = LayerExpander::new(&EchoingFetcher, &config);
    let mut side = Side::new(Title::from("S"), LinkDirection::Outbound);
    let mut graph = LinkGraph::new();
    graph.add_node(Title::from("S"), NodeRole::Start);
    let mut stats = SearchStats::default();
    let goal = Title::from("Z");

    let met = expander.expand(&mut side, Meet::Goal(&goal), &mut graph, &mut stats).await;

    assert!(met.is_none());
    let next: Vec<&str> = side.frontier.titles().iter().map(Title::as_str).collect();
    assert_eq!(next, ["A", "B", "C"]);
    assert_eq!(graph.node_count(), 4);
    // The self link S -- S is kept as an edge but never re-enters the frontier.
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.role("S"), Some(NodeRole::Start));
    assert_eq!(stats.fetches, 1);
}
