//! Search and service configuration.
//!
//! Every knob the engine reads is injected through these values; nothing is
//! a module-level global. Both types deserialize from JSON with defaults
//! for omitted fields, so a config file only needs to name what it changes.

use std::path::Path as FsPath;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

// ============================================================================
// SearchConfig
// ============================================================================

/// Limits for one search invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound on lookups in flight at once within a layer.
    pub max_concurrent_fetches: usize,
    /// Timeout applied to each individual `LinkFetcher` call.
    pub fetch_timeout_ms: u64,
    /// Depth steps the bidirectional search may run.
    pub bidirectional_depth_cap: usize,
    /// Depth steps the forward-only fallback may run.
    pub fallback_depth_cap: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 25,
            fetch_timeout_ms: 5_000,
            bidirectional_depth_cap: 4,
            fallback_depth_cap: 5,
        }
    }
}

impl SearchConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Reject values that would make a search meaningless or hang.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_fetches == 0 {
            return Err(Error::Config("max_concurrent_fetches must be at least 1".into()));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(Error::Config("fetch_timeout_ms must be positive".into()));
        }
        if self.bidirectional_depth_cap == 0 || self.fallback_depth_cap == 0 {
            return Err(Error::Config("depth caps must be at least 1".into()));
        }
        Ok(())
    }
}

// ============================================================================
// MediaWikiConfig
// ============================================================================

/// Where and how to reach the MediaWiki API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaWikiConfig {
    /// `api.php` endpoint.
    pub api_url: String,
    pub user_agent: String,
    /// Timeout for each HTTP request (one page of results).
    pub request_timeout_ms: u64,
}

impl Default for MediaWikiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://ko.wikipedia.org/w/api.php".into(),
            user_agent: format!("linkpath/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_ms: 5_000,
        }
    }
}

// ============================================================================
// File loading
// ============================================================================

/// Top-level config file layout.
///
/// ```json
/// { "search": { "max_concurrent_fetches": 10 },
///   "mediawiki": { "api_url": "https://en.wikipedia.org/w/api.php" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchConfig,
    pub mediawiki: MediaWikiConfig,
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.search.validate()?;
        Ok(settings)
    }

    pub fn load(path: &FsPath) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
