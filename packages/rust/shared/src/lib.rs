//! Shared types, error model, and configuration for SiteScout.
//!
//! This crate is the foundation depended on by all other SiteScout crates.
//! It provides:
//! - [`SiteScoutError`], the unified error type
//! - Domain types ([`Record`], [`Candidate`], [`DuplicateGroup`], [`Verification`])
//! - Configuration ([`AppConfig`], [`VerifyConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, GoogleConfig, VerifyConfig, config_dir, config_file_path,
    google_credentials, init_config, load_config, load_config_from,
};
pub use error::{Result, SiteScoutError};
pub use types::{Candidate, DuplicateGroup, Record, RowMarker, ScoredCandidate, Verification};
