//! MediaWiki API link fetcher.
//!
//! Talks to a MediaWiki `api.php` endpoint with `action=query`:
//!
//! ```text
//! Outbound: prop=links      plnamespace=0 pllimit=max plcontinue=<token>
//! Inbound:  prop=linkshere  lhnamespace=0 lhlimit=max lhcontinue=<token>
//! ```
//!
//! Every request asks the service to follow redirects (`redirects=1`), so
//! title normalization is the service's job. Pagination is drained until
//! the response carries no continuation token. An error after at least one
//! page yields `FetchOutcome::Partial` with what arrived so far; there is
//! no retry.

use std::collections::HashMap;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::MediaWikiConfig;
use crate::model::{LinkDirection, Title};
use crate::{Error, Result};
use super::{extend_distinct, FetchError, FetchOutcome, LinkFetcher};

/// MediaWiki-backed link fetcher.
#[derive(Debug, Clone)]
pub struct MediaWikiFetcher {
    client: Client,
    config: MediaWikiConfig,
}

impl MediaWikiFetcher {
    pub fn new(config: MediaWikiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone())
            .gzip(true)
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &MediaWikiConfig {
        &self.config
    }

    /// Fetch one page of results.
    async fn query_page(
        &self,
        title: &Title,
        direction: LinkDirection,
        continuation: Option<&str>,
    ) -> std::result::Result<QueryResponse, FetchError> {
        let mut params = query_params(title, direction);
        if let Some(token) = continuation {
            params.push((continue_key(direction), token.to_owned()));
        }

        let resp = self.client
            .get(&self.config.api_url)
            .query(&params)
            .send()
            .await
            .map_err(transport_err)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(transport_err)?;
        parse_response(&body)
    }
}

#[async_trait]
impl LinkFetcher for MediaWikiFetcher {
    async fn fetch_links(&self, title: &Title, direction: LinkDirection) -> FetchOutcome {
        let mut links = Vec::new();
        let mut seen = hashbrown::HashSet::new();
        let mut continuation: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let resp = match self.query_page(title, direction, continuation.as_deref()).await {
                Ok(resp) => resp,
                Err(error) => {
                    tracing::debug!(%title, %direction, pages, %error, "pagination interrupted");
                    return FetchOutcome::interrupted(links, error);
                }
            };
            pages += 1;

            let Some(page_links) = resp.page_links(direction) else { break };
            extend_distinct(&mut links, &mut seen, page_links);

            match resp.continuation(direction) {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        tracing::debug!(%title, %direction, pages, links = links.len(), "links fetched");
        FetchOutcome::complete(links)
    }
}

fn transport_err(e: reqwest::Error) -> FetchError {
    FetchError::Transport(e.to_string())
}

// ============================================================================
// Request parameters
// ============================================================================

fn query_params(title: &Title, direction: LinkDirection) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("action", "query".to_owned()),
        ("format", "json".to_owned()),
        ("redirects", "1".to_owned()),
        ("titles", title.as_str().to_owned()),
    ];
    match direction {
        LinkDirection::Outbound => params.extend([
            ("prop", "links".to_owned()),
            ("plnamespace", "0".to_owned()),
            ("pllimit", "max".to_owned()),
        ]),
        LinkDirection::Inbound => params.extend([
            ("prop", "linkshere".to_owned()),
            ("lhnamespace", "0".to_owned()),
            ("lhlimit", "max".to_owned()),
        ]),
    }
    params
}

fn continue_key(direction: LinkDirection) -> &'static str {
    match direction {
        LinkDirection::Outbound => "plcontinue",
        LinkDirection::Inbound => "lhcontinue",
    }
}

// ============================================================================
// Response shape
// ============================================================================

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(rename = "continue")]
    continuation: Option<Continuation>,
    query: Option<QueryBody>,
    /// Present when the API refused the request (`ratelimited`, `maxlag`, ...),
    /// which it reports with HTTP 200.
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct Continuation {
    plcontinue: Option<String>,
    lhcontinue: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    links: Option<Vec<LinkEntry>>,
    linkshere: Option<Vec<LinkEntry>>,
}

#[derive(Debug, Deserialize)]
struct LinkEntry {
    title: String,
}

impl QueryResponse {
    /// Links on the queried page, or `None` when the page is missing
    /// (`"-1"`) or has no list for this direction.
    fn page_links(&self, direction: LinkDirection) -> Option<Vec<Title>> {
        let pages = &self.query.as_ref()?.pages;
        let (id, page) = pages.iter().next()?;
        if id == "-1" {
            return None;
        }
        let entries = match direction {
            LinkDirection::Outbound => page.links.as_ref(),
            LinkDirection::Inbound => page.linkshere.as_ref(),
        }?;
        Some(entries.iter().map(|e| Title::from(e.title.as_str())).collect())
    }

    fn continuation(&self, direction: LinkDirection) -> Option<String> {
        let c = self.continuation.as_ref()?;
        match direction {
            LinkDirection::Outbound => c.plcontinue.clone(),
            LinkDirection::Inbound => c.lhcontinue.clone(),
        }
    }
}

fn parse_response(body: &str) -> std::result::Result<QueryResponse, FetchError> {
    let resp: QueryResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    match resp.error {
        Some(ApiError { code, info }) => Err(FetchError::Unavailable(format!("{code}: {info}"))),
        None => Ok(resp),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_outbound_page_with_continuation() {
        let body = r#"{
            "continue": {"plcontinue": "736|0|Zeta", "continue": "||"},
            "query": {"pages": {"736": {"pageid": 736, "ns": 0, "title": "Alpha",
                "links": [{"ns": 0, "title": "Beta"}, {"ns": 0, "title": "Gamma"}]}}}
        }"#;
        let resp = parse_response(body).unwrap();
        let links = resp.page_links(LinkDirection::Outbound).unwrap();
        assert_eq!(links, vec![Title::from("Beta"), Title::from("Gamma")]);
        assert_eq!(resp.continuation(LinkDirection::Outbound).as_deref(), Some("736|0|Zeta"));
        assert!(resp.continuation(LinkDirection::Inbound).is_none());
    }

    #[test]
    fn test_parse_inbound_last_page() {
        let body = r#"{"batchcomplete": "",
            "query": {"pages": {"12": {"pageid": 12, "ns": 0, "title": "Omega",
                "linkshere": [{"pageid": 3, "ns": 0, "title": "Psi"}]}}}}"#;
        let resp = parse_response(body).unwrap();
        assert_eq!(resp.page_links(LinkDirection::Inbound).unwrap(), vec![Title::from("Psi")]);
        assert!(resp.continuation(LinkDirection::Inbound).is_none());
    }

    #[test]
    fn test_missing_page_has_no_links() {
        let body = r#"{"query": {"pages": {"-1": {"ns": 0, "title": "Nope", "missing": ""}}}}"#;
        let resp = parse_response(body).unwrap();
        assert!(resp.page_links(LinkDirection::Outbound).is_none());
    }

    #[test]
    fn test_page_without_link_list() {
        let body = r#"{"query": {"pages": {"5": {"pageid": 5, "ns": 0, "title": "Stub"}}}}"#;
        let resp = parse_response(body).unwrap();
        assert!(resp.page_links(LinkDirection::Outbound).is_none());
    }

    #[test]
    fn test_api_error_body_is_an_error() {
        let body = r#"{"error": {"code": "ratelimited",
            "info": "You've exceeded your rate limit. Please wait some time and try again.",
            "*": "See https://ko.wikipedia.org/w/api.php for API usage."}}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(&err, FetchError::Unavailable(msg) if msg.starts_with("ratelimited: ")));

        // Mid-pagination the same error keeps what already arrived.
        let outcome = FetchOutcome::interrupted(vec![Title::from("Beta")], err.clone());
        assert!(outcome.is_partial());
        assert!(FetchOutcome::interrupted(Vec::new(), err).is_failed());
    }

    #[test]
    fn test_malformed_body() {
        let err = parse_response("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn test_query_params_by_direction() {
        let out = query_params(&Title::from("A"), LinkDirection::Outbound);
        assert!(out.contains(&("prop", "links".to_owned())));
        assert!(out.contains(&("redirects", "1".to_owned())));
        let inb = query_params(&Title::from("A"), LinkDirection::Inbound);
        assert!(inb.contains(&("prop", "linkshere".to_owned())));
        assert_eq!(continue_key(LinkDirection::Inbound), "lhcontinue");
    }
}
