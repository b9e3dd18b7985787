//! Google Custom Search JSON API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use sitescout_shared::{Candidate, Result, SiteScoutError};

use crate::SearchProvider;

/// Production endpoint; overridable for tests.
const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Results requested per query.
const RESULTS_PER_QUERY: u8 = 5;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Cooldown after an HTTP 429 before the next query proceeds.
const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(30);

/// User-Agent string for search requests.
const USER_AGENT: &str = concat!("SiteScout/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Response shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default, rename = "displayLink")]
    display_link: String,
}

impl From<SearchItem> for Candidate {
    fn from(item: SearchItem) -> Self {
        Self {
            url: item.link,
            title: item.title,
            snippet: item.snippet,
            domain: item.display_link,
        }
    }
}

// ---------------------------------------------------------------------------
// GoogleSearch
// ---------------------------------------------------------------------------

/// Google Custom Search client.
pub struct GoogleSearch {
    client: Client,
    endpoint: String,
    api_key: String,
    cse_id: String,
    cooldown: Duration,
}

impl GoogleSearch {
    /// Create a client with API credentials.
    pub fn new(api_key: impl Into<String>, cse_id: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SiteScoutError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            cse_id: cse_id.into(),
            cooldown: RATE_LIMIT_COOLDOWN,
        })
    }

    /// Point the client at a different endpoint (mock server in tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the rate-limit cooldown (tests shorten it).
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("num", &RESULTS_PER_QUERY.to_string()),
                ("safe", "medium"),
            ])
            .send()
            .await
            .map_err(|e| SiteScoutError::Search(format!("{query}: {e}")))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            warn!(%query, cooldown_secs = self.cooldown.as_secs(), "rate limited, cooling down");
            tokio::time::sleep(self.cooldown).await;
            return Ok(Vec::new());
        }

        let status = response.status();
        if !status.is_success() {
            return Err(SiteScoutError::Search(format!("{query}: HTTP {status}")));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SiteScoutError::Search(format!("{query}: malformed response: {e}")))?;

        debug!(%query, items = parsed.items.len(), "google results");
        Ok(parsed.items.into_iter().map(Candidate::from).collect())
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn body() -> serde_json::Value {
        serde_json::json!({
            "items": [
                {
                    "title": "Acme Official Site",
                    "link": "https://acme.com",
                    "snippet": "Acme makes everything.",
                    "displayLink": "acme.com"
                },
                {
                    "title": "Acme | Facebook",
                    "link": "https://facebook.com/acme",
                    "snippet": "",
                    "displayLink": "facebook.com"
                }
            ]
        })
    }

    #[tokio::test]
    async fn parses_items_into_candidates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("q", "Acme"))
            .and(query_param("num", "5"))
            .and(query_param("safe", "medium"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body()))
            .mount(&server)
            .await;

        let provider = GoogleSearch::new("test-key", "test-cx")
            .unwrap()
            .with_endpoint(format!("{}/", server.uri()));

        let candidates = provider.search("Acme").await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].url, "https://acme.com");
        assert_eq!(candidates[0].domain, "acme.com");
        assert_eq!(candidates[1].title, "Acme | Facebook");
    }

    #[tokio::test]
    async fn missing_items_is_empty_not_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let provider = GoogleSearch::new("k", "cx")
            .unwrap()
            .with_endpoint(format!("{}/", server.uri()));

        let candidates = provider.search("nothing").await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn rate_limit_cools_down_and_yields_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let provider = GoogleSearch::new("k", "cx")
            .unwrap()
            .with_endpoint(format!("{}/", server.uri()))
            .with_cooldown(Duration::from_millis(10));

        let started = std::time::Instant::now();
        let candidates = provider.search("Acme").await.unwrap();
        assert!(candidates.is_empty());
        assert!(started.elapsed() >= Duration::from_millis(10));
    }

    #[tokio::test]
    async fn server_error_is_a_search_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = GoogleSearch::new("k", "cx")
            .unwrap()
            .with_endpoint(format!("{}/", server.uri()));

        let err = provider.search("Acme").await.unwrap_err();
        assert!(matches!(err, SiteScoutError::Search(_)));
    }
}
