//! Search collaborators: the external capability that turns a free-text
//! query into website candidates.
//!
//! The pipeline core only sees the [`SearchProvider`] trait and the
//! [`Candidate`] output shape; the concrete clients (Google Custom Search,
//! DuckDuckGo HTML) live here, together with the multi-query gathering
//! policy (URL dedup, pacing, rate-limit cooldown).

mod duckduckgo;
mod google;

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use sitescout_shared::{Candidate, Result};

pub use duckduckgo::DuckDuckGoSearch;
pub use google::GoogleSearch;

/// Delay between consecutive queries to the same provider.
pub const QUERY_PACING: Duration = Duration::from_millis(500);

/// An opaque search capability: query in, ordered candidates out.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one query and return its candidates in provider order.
    async fn search(&self, query: &str) -> Result<Vec<Candidate>>;

    /// Provider name for logs.
    fn name(&self) -> &'static str;
}

/// Run up to `max_queries` queries and merge their candidates.
///
/// Candidates are deduplicated by URL in first-seen order. A failed query
/// is logged and skipped so one bad query never sinks the whole resolution
/// attempt. A `pacing` delay separates consecutive provider calls.
pub async fn gather(
    provider: &dyn SearchProvider,
    queries: &[String],
    max_queries: usize,
    pacing: Duration,
) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = Vec::new();
    let mut seen_urls: HashSet<String> = HashSet::new();

    for (i, query) in queries.iter().take(max_queries).enumerate() {
        if i > 0 && !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }

        match provider.search(query).await {
            Ok(candidates) => {
                debug!(provider = provider.name(), %query, count = candidates.len(), "query results");
                for candidate in candidates {
                    if !candidate.url.is_empty() && seen_urls.insert(candidate.url.clone()) {
                        merged.push(candidate);
                    }
                }
            }
            Err(e) => {
                warn!(provider = provider.name(), %query, error = %e, "query failed, skipping");
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider {
        pages: Vec<Vec<Candidate>>,
    }

    #[async_trait]
    impl SearchProvider for FixedProvider {
        async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
            let idx: usize = query.parse().unwrap_or(0);
            Ok(self.pages.get(idx).cloned().unwrap_or_default())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn candidate(url: &str) -> Candidate {
        Candidate {
            url: url.into(),
            title: String::new(),
            snippet: String::new(),
            domain: String::new(),
        }
    }

    #[tokio::test]
    async fn gather_dedups_by_url_first_seen() {
        let provider = FixedProvider {
            pages: vec![
                vec![candidate("https://a.com"), candidate("https://b.com")],
                vec![candidate("https://b.com"), candidate("https://c.com")],
            ],
        };

        let queries = vec!["0".to_string(), "1".to_string()];
        let merged = gather(&provider, &queries, 2, Duration::ZERO).await;

        let urls: Vec<&str> = merged.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.com", "https://b.com", "https://c.com"]);
    }

    #[tokio::test]
    async fn gather_respects_max_queries() {
        let provider = FixedProvider {
            pages: vec![
                vec![candidate("https://a.com")],
                vec![candidate("https://b.com")],
                vec![candidate("https://c.com")],
            ],
        };

        let queries = vec!["0".into(), "1".into(), "2".into()];
        let merged = gather(&provider, &queries, 2, Duration::ZERO).await;
        assert_eq!(merged.len(), 2);
    }

    #[tokio::test]
    async fn gather_skips_empty_urls() {
        let provider = FixedProvider {
            pages: vec![vec![candidate(""), candidate("https://a.com")]],
        };
        let merged = gather(&provider, &["0".into()], 1, Duration::ZERO).await;
        assert_eq!(merged.len(), 1);
    }
}
