//! Candidate scoring, ranking, and selection.
//!
//! Given search results for an organization name, decide which URL, if
//! any, is the organization's official website. The heuristic is a fixed
//! additive rule table (see [`score::score_candidate`]); it is a best-effort
//! signal, not ground truth.

pub mod queries;
pub mod score;
pub mod select;

pub use queries::build_queries;
pub use score::score_candidate;
pub use select::{NOTE_NO_CANDIDATES, NOTE_NO_VALID_CANDIDATES, score_candidates, select_best};
