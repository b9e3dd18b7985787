//! Core domain types for the SiteScout enrichment pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One organization row flowing through the pipeline.
///
/// Created once at load time, annotated in place by each stage, exported
/// exactly once in input order. Pipeline stages own disjoint fields:
/// dedup writes `is_duplicate`/`duplicate_group`, resolution writes
/// `website`/`found_url`/`search_notes`, verification writes
/// `url_works`/`verification_status`, classification writes
/// `company_type`/`category_description`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    /// Organization name as it appeared in the input.
    pub raw_name: String,
    /// Website URL, either pre-existing or filled in by resolution.
    pub website: Option<String>,
    /// Name with legal suffixes and punctuation stripped, for comparison.
    pub normalized_name: String,
    /// Whether this record belongs to a duplicate group.
    pub is_duplicate: bool,
    /// Label of the duplicate group (`Group_1`, `Group_2`, ...), if any.
    pub duplicate_group: Option<String>,
    /// URL discovered by the resolver (never set for pre-existing websites).
    pub found_url: Option<String>,
    /// Resolution outcome note ("score 85, domain: acme.com", "no candidates", ...).
    pub search_notes: String,
    /// Verification verdict; `None` until the record has been verified.
    pub url_works: Option<bool>,
    /// Verification status string ("OK", "Error 404", "Timeout", "No URL", ...).
    pub verification_status: String,
    /// Coarse organization type ("Publisher", "Hardware Provider", ...).
    pub company_type: String,
    /// Human-readable category description, truncated to 50 characters.
    pub category_description: String,
}

impl Record {
    /// Create a record from a name and optional website cell.
    pub fn new(raw_name: impl Into<String>, website: Option<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            website: website.filter(|w| !w.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Whether the record has any URL to verify (pre-existing or found).
    pub fn has_url(&self) -> bool {
        self.website
            .as_deref()
            .is_some_and(|w| !w.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// A search result considered as a possible official URL.
///
/// Ephemeral: produced by a search provider, scored, and discarded once the
/// best one is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Result URL.
    pub url: String,
    /// Result title.
    pub title: String,
    /// Result snippet / body text.
    pub snippet: String,
    /// Display domain as reported by the provider (e.g. `acme.com`).
    pub domain: String,
}

/// A candidate together with its heuristic score.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// The underlying candidate.
    pub candidate: Candidate,
    /// Confidence score, clamped to [0, 100].
    pub score: i32,
    /// Audit note of the form `score {S}, domain: {D}`.
    pub rationale: String,
}

// ---------------------------------------------------------------------------
// DuplicateGroup
// ---------------------------------------------------------------------------

/// A cluster of record indices judged to refer to the same organization.
///
/// Groups are disjoint: a record belongs to at most one group and is never
/// reconsidered as a seed once assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Group label, `Group_{n}` in discovery order.
    pub label: String,
    /// Member record indices, input order preserved.
    pub members: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Outcome of checking one URL's reachability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    /// Whether the URL responded with a non-error status.
    pub works: bool,
    /// Status string ("OK", "Error 404", "Timeout", "Connection Error", ...).
    pub status: String,
    /// When the check completed.
    pub checked_at: DateTime<Utc>,
}

impl Verification {
    /// Build a verification result stamped with the current time.
    pub fn new(works: bool, status: impl Into<String>) -> Self {
        Self {
            works,
            status: status.into(),
            checked_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// RowMarker
// ---------------------------------------------------------------------------

/// Export-time row marker, in descending display priority.
///
/// Duplicate membership outranks a verification failure, which outranks a
/// newly found URL; rows with a pre-existing, working URL carry no marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMarker {
    /// Record belongs to a duplicate group.
    Duplicate,
    /// Record's URL failed verification.
    VerificationFailed,
    /// Record's URL was newly discovered by the resolver.
    NewlyFound,
    /// Nothing to flag.
    None,
}

impl RowMarker {
    /// Derive the marker for a record, honoring the priority order.
    pub fn for_record(record: &Record) -> Self {
        if record.is_duplicate {
            Self::Duplicate
        } else if record.has_url() && record.url_works == Some(false) {
            Self::VerificationFailed
        } else if record.found_url.is_some() {
            Self::NewlyFound
        } else {
            Self::None
        }
    }

    /// Label used in the exported `row_marker` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::VerificationFailed => "verification_failed",
            Self::NewlyFound => "newly_found",
            Self::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_blank_website_is_none() {
        let record = Record::new("Acme Corp", Some("   ".into()));
        assert!(record.website.is_none());
        assert!(!record.has_url());

        let record = Record::new("Acme Corp", Some("acme.com".into()));
        assert!(record.has_url());
    }

    #[test]
    fn row_marker_priority() {
        let mut record = Record::new("Acme", Some("https://acme.com".into()));
        record.found_url = Some("https://acme.com".into());
        record.url_works = Some(false);
        record.is_duplicate = true;

        // Duplicate wins over everything.
        assert_eq!(RowMarker::for_record(&record), RowMarker::Duplicate);

        record.is_duplicate = false;
        assert_eq!(RowMarker::for_record(&record), RowMarker::VerificationFailed);

        record.url_works = Some(true);
        assert_eq!(RowMarker::for_record(&record), RowMarker::NewlyFound);

        record.found_url = None;
        assert_eq!(RowMarker::for_record(&record), RowMarker::None);
        assert_eq!(RowMarker::None.as_str(), "");
    }

    #[test]
    fn verification_serialization() {
        let v = Verification::new(true, "OK");
        let json = serde_json::to_string(&v).expect("serialize");
        assert!(json.contains("\"OK\""));
    }
}
