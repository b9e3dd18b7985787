//! Best-candidate selection with failure notes.

use tracing::debug;

use sitescout_shared::{Candidate, ScoredCandidate};

use crate::score::score_candidate;

/// Outcome note when the provider returned nothing at all.
pub const NOTE_NO_CANDIDATES: &str = "no candidates";

/// Outcome note when every returned candidate had an empty URL.
pub const NOTE_NO_VALID_CANDIDATES: &str = "no valid candidates";

/// Score every candidate for `query`, order-preserving.
///
/// Candidates with an empty URL are excluded before scoring.
pub fn score_candidates(query: &str, candidates: &[Candidate]) -> Vec<ScoredCandidate> {
    candidates
        .iter()
        .filter(|c| !c.url.is_empty())
        .map(|c| {
            let score = score_candidate(&c.url, &c.domain, &c.title, &c.snippet, query);
            ScoredCandidate {
                rationale: format!("score {score}, domain: {}", c.domain),
                candidate: c.clone(),
                score,
            }
        })
        .collect()
}

/// Pick the best-scoring candidate URL for `query`.
///
/// Returns `(selected_url, note)`. On success the note is the winner's
/// rationale (`"score {S}, domain: {D}"`); on a miss the note says why.
/// Ties go to the first-seen candidate.
pub fn select_best(query: &str, candidates: &[Candidate]) -> (Option<String>, String) {
    if candidates.is_empty() {
        return (None, NOTE_NO_CANDIDATES.to_string());
    }

    let scored = score_candidates(query, candidates);
    if scored.is_empty() {
        return (None, NOTE_NO_VALID_CANDIDATES.to_string());
    }

    // Strictly-greater comparison keeps the first-seen winner on ties.
    let mut best = &scored[0];
    for candidate in &scored[1..] {
        if candidate.score > best.score {
            best = candidate;
        }
    }

    debug!(
        url = %best.candidate.url,
        score = best.score,
        considered = scored.len(),
        "selected candidate"
    );

    (Some(best.candidate.url.clone()), best.rationale.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(url: &str, title: &str, domain: &str) -> Candidate {
        Candidate {
            url: url.into(),
            title: title.into(),
            snippet: String::new(),
            domain: domain.into(),
        }
    }

    #[test]
    fn official_site_beats_social_profile() {
        let candidates = vec![
            candidate("https://facebook.com/acme", "Acme | Facebook", "facebook.com"),
            candidate("https://acme.com", "Acme Official Site", "acme.com"),
        ];

        let (url, note) = select_best("Acme", &candidates);
        assert_eq!(url.as_deref(), Some("https://acme.com"));
        assert!(note.starts_with("score "));
        assert!(note.ends_with("domain: acme.com"));
    }

    #[test]
    fn empty_input_reports_no_candidates() {
        let (url, note) = select_best("Acme", &[]);
        assert!(url.is_none());
        assert_eq!(note, "no candidates");
    }

    #[test]
    fn empty_urls_report_no_valid_candidates() {
        let candidates = vec![
            candidate("", "Acme", "acme.com"),
            candidate("", "Acme 2", "acme.org"),
        ];
        let (url, note) = select_best("Acme", &candidates);
        assert!(url.is_none());
        assert_eq!(note, "no valid candidates");
    }

    #[test]
    fn ties_go_to_first_seen() {
        let candidates = vec![
            candidate("https://acme.com", "Acme", "acme.com"),
            candidate("https://acme.net", "Acme", "acme.net"),
        ];
        let (url, _) = select_best("Acme", &candidates);
        assert_eq!(url.as_deref(), Some("https://acme.com"));
    }

    #[test]
    fn rationale_carries_score_and_domain() {
        let scored = score_candidates("Acme", &[candidate("https://acme.com", "Acme", "acme.com")]);
        assert_eq!(scored.len(), 1);
        assert_eq!(
            scored[0].rationale,
            format!("score {}, domain: acme.com", scored[0].score)
        );
    }
}
