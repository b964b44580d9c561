//! Per-direction BFS bookkeeping: the path map and the frontier.

use hashbrown::HashMap;
use super::Title;

/// Title → titles from this direction's origin to it, both ends included.
///
/// A title is recorded once, at first discovery. Under BFS that first
/// route is a shortest one in this direction.
#[derive(Debug, Clone, Default)]
pub struct PathMap {
    paths: HashMap<Title, Vec<Title>>,
}

impl PathMap {
    /// A map holding only `origin -> [origin]`.
    pub fn seeded(origin: Title) -> Self {
        let mut paths = HashMap::new();
        paths.insert(origin.clone(), vec![origin]);
        Self { paths }
    }

    pub fn get(&self, title: &str) -> Option<&[Title]> {
        self.paths.get(title).map(Vec::as_slice)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.paths.contains_key(title)
    }

    /// Record `title` as reached through `parent_path`. No-op (returns
    /// false) if the title is already known.
    pub fn record(&mut self, title: &Title, parent_path: &[Title]) -> bool {
        if self.paths.contains_key(title) {
            return false;
        }
        let mut path = Vec::with_capacity(parent_path.len() + 1);
        path.extend_from_slice(parent_path);
        path.push(title.clone());
        self.paths.insert(title.clone(), path);
        true
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Titles discovered at the previous depth, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    titles: Vec<Title>,
}

impl Frontier {
    pub fn seeded(origin: Title) -> Self {
        Self { titles: vec![origin] }
    }

    pub fn push(&mut self, title: Title) {
        self.titles.push(title);
    }

    /// Take the current layer, leaving the frontier empty for the next one.
    pub fn take(&mut self) -> Vec<Title> {
        std::mem::take(&mut self.titles)
    }

    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_first_discovery_only() {
        let mut map = PathMap::seeded(Title::from("A"));
        let a_path = map.get("A").unwrap().to_vec();
        assert!(map.record(&Title::from("B"), &a_path));

        let b_path = map.get("B").unwrap().to_vec();
        assert!(!map.record(&Title::from("B"), &b_path));
        assert_eq!(map.get("B").unwrap(), &[Title::from("A"), Title::from("B")]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_frontier_take_clears() {
        let mut f = Frontier::seeded(Title::from("A"));
        f.push(Title::from("B"));
        let layer = f.take();
        assert_eq!(layer.len(), 2);
        assert!(f.is_empty());
    }
}
