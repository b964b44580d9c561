//! Path: an ordered sequence of titles joined by hyperlinks.

use serde::{Deserialize, Serialize};
use super::Title;

/// A connecting path: `start -> ... -> end`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    titles: Vec<Title>,
}

impl Path {
    pub fn single(title: Title) -> Self {
        Self { titles: vec![title] }
    }

    /// Build a path from titles. Returns `None` for an empty sequence.
    pub fn from_titles(titles: Vec<Title>) -> Option<Self> {
        if titles.is_empty() {
            None
        } else {
            Some(Self { titles })
        }
    }

    /// Number of hops (links followed).
    pub fn hops(&self) -> usize {
        self.titles.len() - 1
    }

    /// True for the single-title path of a start that is its own end.
    pub fn is_trivial(&self) -> bool {
        self.titles.len() == 1
    }

    pub fn start(&self) -> &Title {
        &self.titles[0]
    }

    pub fn end(&self) -> &Title {
        &self.titles[self.titles.len() - 1]
    }

    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t.as_str() == title)
    }

    /// Consecutive `(from, to)` pairs along the path.
    pub fn steps(&self) -> impl Iterator<Item = (&Title, &Title)> {
        self.titles.windows(2).map(|w| (&w[0], &w[1]))
    }

    pub fn into_titles(self) -> Vec<Title> {
        self.titles
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, title) in self.titles.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{title}")?;
        }
        Ok(())
    }
}
