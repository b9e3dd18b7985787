//! Name normalization and fuzzy-duplicate clustering.
//!
//! Two organizations rarely spell their name identically across a
//! spreadsheet ("Acme Inc.", "ACME Corporation", "acme"). This crate strips
//! the legal noise and clusters records whose cleaned names are nearly the
//! same edit-distance-wise, so the pipeline can flag probable duplicates
//! before spending search-provider quota on them.

mod cluster;
mod normalize;

pub use cluster::{DEFAULT_THRESHOLD, find_duplicate_groups, similarity};
pub use normalize::normalize_name;
