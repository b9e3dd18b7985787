//! Pipeline core for sitescout: wires loading, deduplication, URL
//! resolution, verification, classification, and export into one run.

pub mod pipeline;

pub use pipeline::{EnrichConfig, ProgressReporter, RunSummary, SilentProgress, run_enrich};
