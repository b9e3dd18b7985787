//! DuckDuckGo HTML-endpoint client (no API key required).
//!
//! Scrapes the `html.duckduckgo.com` results page. Result links are often
//! wrapped in a `/l/?uddg=<encoded>` redirect, which we unwrap before
//! handing the URL to the scorer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use sitescout_shared::{Candidate, Result, SiteScoutError};

use crate::SearchProvider;

/// Production endpoint; overridable for tests.
const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// User-Agent string for search requests.
const USER_AGENT: &str = concat!("SiteScout/", env!("CARGO_PKG_VERSION"));

/// DuckDuckGo HTML search client.
pub struct DuckDuckGoSearch {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoSearch {
    /// Create a client. Needs no credentials.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SiteScoutError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Point the client at a different endpoint (mock server in tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| SiteScoutError::Search(format!("{query}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteScoutError::Search(format!("{query}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SiteScoutError::Search(format!("{query}: body read failed: {e}")))?;

        let candidates = parse_results(&body);
        debug!(%query, count = candidates.len(), "duckduckgo results");
        Ok(candidates)
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}

/// Extract candidates from a DuckDuckGo HTML results page.
fn parse_results(html: &str) -> Vec<Candidate> {
    let doc = Html::parse_document(html);
    let result_sel = Selector::parse("div.result").unwrap();
    let title_sel = Selector::parse("a.result__a").unwrap();
    let snippet_sel = Selector::parse("a.result__snippet").unwrap();

    let mut candidates = Vec::new();

    for result in doc.select(&result_sel) {
        let Some(anchor) = result.select(&title_sel).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(url) = unwrap_redirect(href) else {
            continue;
        };

        let title = anchor.text().collect::<String>().trim().to_string();
        let snippet = result
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let domain = Url::parse(&url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();

        candidates.push(Candidate {
            url,
            title,
            snippet,
            domain,
        });
    }

    candidates
}

/// Resolve a result href to a plain URL.
///
/// Handles three shapes: absolute URLs, protocol-relative redirect links
/// (`//duckduckgo.com/l/?uddg=<encoded>`), and anything else (dropped).
fn unwrap_redirect(href: &str) -> Option<String> {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&absolute).ok()?;

    if parsed.path() == "/l/" || parsed.path() == "/l" {
        // Redirect wrapper: the real URL lives in the uddg param, already
        // percent-decoded by query_pairs().
        return parsed
            .query_pairs()
            .find(|(k, _)| k == "uddg")
            .map(|(_, v)| v.into_owned());
    }

    Some(parsed.into())
}
