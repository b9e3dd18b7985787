//! End-to-end enrich pipeline: table → dedup → resolve → verify → classify → export.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use sitescout_classify::classify;
use sitescout_matching::{find_duplicate_groups, normalize_name};
use sitescout_resolver::{build_queries, select_best};
use sitescout_search::{SearchProvider, gather};
use sitescout_shared::{Record, Result, SiteScoutError, VerifyConfig};
use sitescout_tabular::{export_table, load_table};
use sitescout_verifier::Verifier;

/// Note recorded on rows whose name cell is blank, so the export explains
/// why no lookup was attempted.
pub const NOTE_EMPTY_NAME: &str = "empty name";

/// Verification status for rows that still have no URL after resolution.
pub const STATUS_NO_URL: &str = "No URL";

/// Configuration for one enrich run.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Input table path (CSV).
    pub input: PathBuf,
    /// Output table path (CSV).
    pub output: PathBuf,
    /// Similarity threshold for duplicate clustering, in `[0.0, 1.0]`.
    pub similarity_threshold: f64,
    /// How many query variants to send per unresolved name.
    pub max_queries: usize,
    /// Delay between consecutive queries to the provider.
    pub query_pacing: Duration,
    /// URL verification settings (concurrency, timeout).
    pub verify: VerifyConfig,
}

/// Result of one enrich run.
#[derive(Debug)]
pub struct RunSummary {
    /// Rows in the input table.
    pub total: usize,
    /// Rows flagged as duplicates.
    pub duplicates: usize,
    /// Rows whose URL was newly found this run.
    pub found: usize,
    /// Rows whose URL verified as working.
    pub working: usize,
    /// Rows whose URL failed verification.
    pub failing: usize,
    /// Rows that ended the run without any URL.
    pub no_url: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each name lookup, whether or not a URL was found.
    fn name_resolved(&self, name: &str, found: bool, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, summary: &RunSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn name_resolved(&self, _name: &str, _found: bool, _current: usize, _total: usize) {}
    fn done(&self, _summary: &RunSummary) {}
}

/// Run the full enrich pipeline.
///
/// 1. Load the input table
/// 2. Cluster near-duplicate names
/// 3. Resolve missing websites through `provider` (skipped when `None`)
/// 4. Verify every URL concurrently
/// 5. Classify every row
/// 6. Export the annotated table
#[instrument(skip_all, fields(input = %config.input.display(), output = %config.output.display()))]
pub async fn run_enrich(
    config: &EnrichConfig,
    provider: Option<&dyn SearchProvider>,
    progress: &dyn ProgressReporter,
) -> Result<RunSummary> {
    let start = Instant::now();

    // --- Phase 1: Load ---
    progress.phase("Loading input table");
    let table = load_table(&config.input)?;
    let mut records = table.to_records();
    info!(rows = records.len(), path = %config.input.display(), "table loaded");

    // --- Phase 2: Duplicate detection ---
    progress.phase("Detecting duplicates");
    mark_duplicates(&mut records, config.similarity_threshold);

    // --- Phase 3: Resolve missing websites ---
    if let Some(provider) = provider {
        progress.phase("Resolving missing websites");
        resolve_missing(&mut records, provider, config, progress).await;
    } else {
        info!("no search provider, skipping resolution");
    }

    // --- Phase 4: Verify URLs ---
    progress.phase("Verifying websites");
    verify_all(&mut records, &config.verify).await?;

    // --- Phase 5: Classify ---
    progress.phase("Classifying organizations");
    for record in &mut records {
        let (company_type, description) = classify(&record.raw_name, record.website.as_deref());
        record.company_type = company_type;
        record.category_description = description;
    }

    // --- Phase 6: Export ---
    progress.phase("Exporting results");
    export_table(&config.output, &table, &records)?;

    let summary = summarize(&records, start.elapsed());
    progress.done(&summary);

    info!(
        total = summary.total,
        duplicates = summary.duplicates,
        found = summary.found,
        working = summary.working,
        failing = summary.failing,
        no_url = summary.no_url,
        elapsed_ms = summary.elapsed.as_millis(),
        "enrich pipeline complete"
    );

    Ok(summary)
}

/// Normalize every name and flag members of near-duplicate clusters.
fn mark_duplicates(records: &mut [Record], threshold: f64) {
    for record in records.iter_mut() {
        record.normalized_name = normalize_name(&record.raw_name);
    }

    let normalized: Vec<String> = records.iter().map(|r| r.normalized_name.clone()).collect();
    let groups = find_duplicate_groups(&normalized, threshold);

    for group in &groups {
        for &idx in &group.members {
            records[idx].is_duplicate = true;
            records[idx].duplicate_group = Some(group.label.clone());
        }
    }

    info!(groups = groups.len(), "duplicate clusters found");
}

/// Look up a website for every record that still lacks one.
///
/// Lookups are memoized by normalized name, so near-identical rows in the
/// same table cost a single provider round trip.
async fn resolve_missing(
    records: &mut [Record],
    provider: &dyn SearchProvider,
    config: &EnrichConfig,
    progress: &dyn ProgressReporter,
) {
    let pending: Vec<usize> = (0..records.len())
        .filter(|&i| !records[i].has_url())
        .collect();
    let total = pending.len();

    let mut memo: HashMap<String, (Option<String>, String)> = HashMap::new();

    for (done, idx) in pending.into_iter().enumerate() {
        let name = records[idx].raw_name.trim().to_string();
        if name.is_empty() {
            records[idx].search_notes = NOTE_EMPTY_NAME.to_string();
            progress.name_resolved("(blank)", false, done + 1, total);
            continue;
        }

        // Rows made of nothing but corporate suffixes normalize to "";
        // fall back to the raw name so they don't share one cache slot.
        let key = if records[idx].normalized_name.is_empty() {
            name.to_lowercase()
        } else {
            records[idx].normalized_name.clone()
        };

        let (url, note) = match memo.get(&key) {
            Some(cached) => cached.clone(),
            None => {
                let queries = build_queries(&name);
                let candidates =
                    gather(provider, &queries, config.max_queries, config.query_pacing).await;
                let outcome = select_best(&name, &candidates);
                memo.insert(key, outcome.clone());
                outcome
            }
        };

        if let Some(url) = url {
            records[idx].website = Some(url.clone());
            records[idx].found_url = Some(url);
        }
        records[idx].search_notes = note;
        progress.name_resolved(&name, records[idx].found_url.is_some(), done + 1, total);
    }
}

/// Verify every record that carries a URL; rows without one are marked
/// not-working with [`STATUS_NO_URL`].
async fn verify_all(records: &mut [Record], verify: &VerifyConfig) -> Result<()> {
    let jobs: Vec<(usize, String)> = records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.website.as_ref().filter(|_| r.has_url()).map(|u| (i, u.clone())))
        .collect();

    if !jobs.is_empty() {
        let verifier = Verifier::new(verify)?;
        for (idx, verification) in verifier.verify_batch(&jobs).await {
            let record = records
                .get_mut(idx)
                .ok_or_else(|| SiteScoutError::validation("verification index out of range"))?;
            record.url_works = Some(verification.works);
            record.verification_status = verification.status;
        }
    }

    for record in records.iter_mut() {
        if !record.has_url() {
            record.url_works = Some(false);
            record.verification_status = STATUS_NO_URL.to_string();
        }
    }

    Ok(())
}

fn summarize(records: &[Record], elapsed: Duration) -> RunSummary {
    RunSummary {
        total: records.len(),
        duplicates: records.iter().filter(|r| r.is_duplicate).count(),
        found: records.iter().filter(|r| r.found_url.is_some()).count(),
        working: records.iter().filter(|r| r.url_works == Some(true)).count(),
        failing: records
            .iter()
            .filter(|r| r.has_url() && r.url_works == Some(false))
            .count(),
        no_url: records.iter().filter(|r| !r.has_url()).count(),
        elapsed,
    }
}
