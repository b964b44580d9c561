//! LinkGraph: the undirected picture of everything a search explored.
//!
//! Nodes carry a [`NodeRole`]; edges are undirected and stored once per
//! unordered title pair. Both insertions are idempotent and nothing is ever
//! removed. Insertion order is kept so renderers see a stable layout input.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use super::Title;

/// Role a title plays in a search, used by renderers for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Start,
    End,
    Normal,
    Intersection,
}

/// Unordered title pair. `a <= b` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub a: Title,
    pub b: Title,
}

impl Edge {
    pub fn new(x: Title, y: Title) -> Self {
        if x <= y { Self { a: x, b: y } } else { Self { a: y, b: x } }
    }

    pub fn connects(&self, x: &str, y: &str) -> bool {
        (self.a.as_str() == x && self.b.as_str() == y)
            || (self.a.as_str() == y && self.b.as_str() == x)
    }
}

/// Accumulated undirected graph of explored titles.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    roles: HashMap<Title, NodeRole>,
    node_order: Vec<Title>,
    edge_set: HashSet<Edge>,
    edge_order: Vec<Edge>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns false (and leaves the role untouched) if the
    /// title is already present.
    pub fn add_node(&mut self, title: Title, role: NodeRole) -> bool {
        if self.roles.contains_key(&title) {
            return false;
        }
        self.roles.insert(title.clone(), role);
        self.node_order.push(title);
        true
    }

    /// Overwrite the role of a node, inserting it if absent.
    pub fn set_role(&mut self, title: &Title, role: NodeRole) {
        match self.roles.get_mut(title) {
            Some(r) => *r = role,
            None => {
                self.add_node(title.clone(), role);
            }
        }
    }

    /// Add an undirected edge, creating `Normal` endpoints as needed.
    /// Returns false if the edge already existed.
    pub fn add_edge(&mut self, x: &Title, y: &Title) -> bool {
        self.add_node(x.clone(), NodeRole::Normal);
        self.add_node(y.clone(), NodeRole::Normal);
        let edge = Edge::new(x.clone(), y.clone());
        if !self.edge_set.insert(edge.clone()) {
            return false;
        }
        self.edge_order.push(edge);
        true
    }

    pub fn contains(&self, title: &str) -> bool {
        self.roles.contains_key(title)
    }

    pub fn role(&self, title: &str) -> Option<NodeRole> {
        self.roles.get(title).copied()
    }

    pub fn has_edge(&self, x: &str, y: &str) -> bool {
        self.edge_set.contains(&Edge::new(Title::from(x), Title::from(y)))
    }

    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    /// Nodes with their roles, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&Title, NodeRole)> {
        self.node_order.iter().map(|t| (t, self.roles[t]))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_is_idempotent() {
        let mut g = LinkGraph::new();
        assert!(g.add_node(Title::from("A"), NodeRole::Start));
        assert!(!g.add_node(Title::from("A"), NodeRole::Normal));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.role("A"), Some(NodeRole::Start));
    }

    #[test]
    fn test_edges_are_undirected() {
        let mut g = LinkGraph::new();
        let (a, b) = (Title::from("A"), Title::from("B"));
        assert!(g.add_edge(&a, &b));
        assert!(!g.add_edge(&b, &a));
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge("B", "A"));
        assert_eq!(g.role("B"), Some(NodeRole::Normal));
    }

    #[test]
    fn test_set_role_overwrites() {
        let mut g = LinkGraph::new();
        g.add_node(Title::from("X"), NodeRole::Normal);
        g.set_role(&Title::from("X"), NodeRole::Intersection);
        assert_eq!(g.role("X"), Some(NodeRole::Intersection));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut g = LinkGraph::new();
        g.add_node(Title::from("S"), NodeRole::Start);
        g.add_node(Title::from("E"), NodeRole::End);
        g.add_edge(&Title::from("S"), &Title::from("M"));
        let order: Vec<&str> = g.nodes().map(|(t, _)| t.as_str()).collect();
        assert_eq!(order, vec!["S", "E", "M"]);
    }
}
