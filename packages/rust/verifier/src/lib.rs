//! URL reachability verification with bounded-concurrency batch mode.
//!
//! A verification never errors at the API level: every outcome (timeout,
//! refused connection, HTTP 500) degrades to a `(false, status)` value so
//! the pipeline can annotate the record and move on.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::Semaphore;
use tracing::{debug, instrument, warn};

use sitescout_shared::{Result, SiteScoutError, Verification, VerifyConfig};

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default bounded worker-pool width for batch verification.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Transport error messages are truncated to this many characters.
const MAX_ERROR_LEN: usize = 50;

/// User-Agent string for verification requests.
const USER_AGENT: &str = concat!("SiteScout/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Verifier
// ---------------------------------------------------------------------------

/// Checks HTTP reachability of resolved or pre-existing URLs.
pub struct Verifier {
    client: Client,
    concurrency: usize,
}

impl Verifier {
    /// Create a verifier with the given settings.
    pub fn new(config: &VerifyConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SiteScoutError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            concurrency: config.concurrency.max(1),
        })
    }

    /// Create a verifier with the default settings.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&VerifyConfig {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Verify a single URL.
    ///
    /// Empty input short-circuits to `(false, "Empty URL")`. A URL without
    /// a scheme is retried as `http://{url}`. Redirects are followed; any
    /// status below 400 counts as working.
    pub async fn verify(&self, url: &str) -> Verification {
        verify_url(&self.client, url).await
    }

    /// Verify many URLs concurrently over a bounded worker pool.
    ///
    /// Takes `(key, url)` pairs and returns `(key, verification)` pairs in
    /// completion order; callers write results back by key. One slow or
    /// failing host never blocks the rest beyond its own timeout, and a
    /// panicked task degrades to a failed verification under its key.
    #[instrument(skip_all, fields(count = jobs.len(), concurrency = self.concurrency))]
    pub async fn verify_batch(&self, jobs: &[(usize, String)]) -> Vec<(usize, Verification)> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(jobs.len());

        for (key, url) in jobs {
            let key = *key;
            let url = url.clone();
            let client = self.client.clone();
            let sem = semaphore.clone();

            handles.push(tokio::spawn(async move {
                let _permit = sem.acquire().await.expect("semaphore closed");
                (key, verify_url(&client, &url).await)
            }));
        }

        collect_results(jobs, handles).await
    }
}

/// Join batch task handles, keeping every input key in the output.
///
/// Handles are pushed in `jobs` order, so a crashed task's key is still
/// known and its record gets a failed verification instead of no result.
async fn collect_results(
    jobs: &[(usize, String)],
    handles: Vec<tokio::task::JoinHandle<(usize, Verification)>>,
) -> Vec<(usize, Verification)> {
    let mut results = Vec::with_capacity(handles.len());
    for ((key, url), handle) in jobs.iter().zip(handles) {
        match handle.await {
            Ok(pair) => results.push(pair),
            Err(e) => {
                warn!(key, %url, error = %e, "verification task crashed");
                results.push((*key, Verification::new(false, "verification task failed")));
            }
        }
    }
    results
}

/// Check one URL against the shared client.
async fn verify_url(client: &Client, url: &str) -> Verification {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Verification::new(false, "Empty URL");
    }

    let target = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    debug!(url = %target, "verifying");

    match client.get(&target).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            if status == 404 {
                Verification::new(false, "Error 404")
            } else if status >= 400 {
                Verification::new(false, format!("Error {status}"))
            } else {
                Verification::new(true, "OK")
            }
        }
        Err(e) if e.is_timeout() => Verification::new(false, "Timeout"),
        Err(e) if e.is_connect() => Verification::new(false, "Connection Error"),
        Err(e) => {
            let message: String = e.to_string().chars().take(MAX_ERROR_LEN).collect();
            Verification::new(false, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn quick_verifier(timeout_secs: u64) -> Verifier {
        Verifier::new(&VerifyConfig {
            concurrency: 4,
            timeout_secs,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn empty_url_short_circuits() {
        let verifier = quick_verifier(1);
        let result = verifier.verify("").await;
        assert!(!result.works);
        assert_eq!(result.status, "Empty URL");

        let result = verifier.verify("   ").await;
        assert_eq!(result.status, "Empty URL");
    }

    #[tokio::test]
    async fn ok_response_works() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let verifier = quick_verifier(5);
        let result = verifier.verify(&server.uri()).await;
        assert!(result.works);
        assert_eq!(result.status, "OK");
    }

    #[tokio::test]
    async fn missing_scheme_gets_http_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        // Strip the "http://" that MockServer::uri reports.
        let bare = server.uri().trim_start_matches("http://").to_string();

        let verifier = quick_verifier(5);
        let result = verifier.verify(&bare).await;
        assert!(result.works);
    }

    #[tokio::test]
    async fn error_statuses_are_distinguished() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let verifier = quick_verifier(5);

        let result = verifier.verify(&format!("{}/missing", server.uri())).await;
        assert!(!result.works);
        assert_eq!(result.status, "Error 404");

        let result = verifier.verify(&format!("{}/broken", server.uri())).await;
        assert!(!result.works);
        assert_eq!(result.status, "Error 503");
    }

    #[tokio::test]
    async fn unresolvable_host_is_a_connection_error() {
        let verifier = quick_verifier(5);
        let result = verifier
            .verify("http://this-host-does-not-resolve.invalid")
            .await;
        assert!(!result.works);
        assert_eq!(result.status, "Connection Error");
    }

    #[tokio::test]
    async fn slow_host_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let verifier = quick_verifier(1);
        let result = verifier.verify(&server.uri()).await;
        assert!(!result.works);
        assert_eq!(result.status, "Timeout");
    }

    #[tokio::test]
    async fn batch_completes_despite_one_slow_host() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let jobs: Vec<(usize, String)> = vec![
            (0, format!("{}/a", server.uri())),
            (1, format!("{}/slow", server.uri())),
            (2, format!("{}/b", server.uri())),
            (3, format!("{}/c", server.uri())),
        ];

        let verifier = quick_verifier(1);
        let results = verifier.verify_batch(&jobs).await;

        assert_eq!(results.len(), 4);
        let slow = results.iter().find(|(k, _)| *k == 1).unwrap();
        assert!(!slow.1.works);
        assert_eq!(slow.1.status, "Timeout");

        for key in [0usize, 2, 3] {
            let entry = results.iter().find(|(k, _)| *k == key).unwrap();
            assert!(entry.1.works, "url {key} should verify despite slow host");
        }
    }

    #[tokio::test]
    async fn crashed_task_keeps_its_key_as_a_failure() {
        let jobs: Vec<(usize, String)> = vec![
            (3, "https://a.example".into()),
            (7, "https://b.example".into()),
        ];
        let handles = vec![
            tokio::spawn(async { (3, Verification::new(true, "OK")) }),
            tokio::spawn(async { panic!("worker died") }),
        ];

        let results = collect_results(&jobs, handles).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, 3);
        assert!(results[0].1.works);
        // The crashed task still reports under its key, as a failure.
        assert_eq!(results[1].0, 7);
        assert!(!results[1].1.works);
        assert_eq!(results[1].1.status, "verification task failed");
    }
}
