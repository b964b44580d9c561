//! # linkpath: shortest link paths through a remote hyperlink graph
//!
//! Finds a connecting path between two documents of a graph that is never
//! loaded up front: neighbors are discovered on demand through a
//! rate-limited lookup service (for example the MediaWiki API).
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `LinkFetcher` is the contract between search and service
//! 2. **Fail-soft lookups**: a failed lookup is an explicit value, never a search error
//! 3. **Barrier per layer**: fetch concurrently, merge serially, reproducibly
//! 4. **Injected limits**: every cap and timeout arrives through `SearchConfig`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linkpath::{Explorer, MemoryFetcher, SearchConfig};
//!
//! # async fn example() -> linkpath::Result<()> {
//! let fetcher = MemoryFetcher::new();
//! fetcher.add_chain(&["Pacific War", "Aircraft", "Floating-point arithmetic"]);
//!
//! let explorer = Explorer::new(fetcher, SearchConfig::default())?;
//! let result = explorer.find_path("Pacific War", "Floating-point arithmetic").await?;
//!
//! if let Some(path) = result.path() {
//!     println!("{} hops: {path}", path.hops());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Link Fetchers
//!
//! | Fetcher | Feature | Description |
//! |---------|---------|-------------|
//! | Memory | (always) | In-memory link table for testing/embedding |
//! | MediaWiki | `mediawiki` | Paginated `action=query` lookups over HTTP |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod fetch;
pub mod search;
pub mod config;
pub mod render;
pub mod replay;
pub mod explorer;
pub mod logging;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Title, LinkDirection, Path, LinkGraph, NodeRole, Edge,
    PathMap, Frontier,
};

// ============================================================================
// Re-exports: Fetchers
// ============================================================================

pub use fetch::{LinkFetcher, FetchOutcome, FetchError, MemoryFetcher};
#[cfg(feature = "mediawiki")]
pub use fetch::MediaWikiFetcher;

// ============================================================================
// Re-exports: Search
// ============================================================================

pub use search::{
    bidirectional_search, forward_only_search,
    SearchResult, SearchStatus, SearchStats, Strategy,
};
pub use config::{SearchConfig, MediaWikiConfig, Settings};

// ============================================================================
// Re-exports: Orchestration
// ============================================================================

pub use explorer::{Explorer, Exploration, Attempt};
pub use render::{GraphRenderer, DotRenderer, JsonRenderer};
pub use replay::{Demonstrator, Replay, NoReplay, LinkCheckDemonstrator};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Replay error: {0}")]
    Replay(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
