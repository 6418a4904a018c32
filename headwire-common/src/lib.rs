//! Common types shared across Headwire crates.
//!
//! This crate defines the pipeline configuration, shared error types, and
//! observability helpers used throughout the Headwire workspace. It is
//! intentionally lightweight so that all crates can depend on it without
//! introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`ExtractorConfig`]: tuning knobs for the headline extraction pipeline
//! - [`OutputConfig`]: where enriched batches and debug artifacts land
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`HeadwireError`] and [`Result`]: shared error handling
//!
//! # Examples
//!
//! Constructing a default configuration:
//!
//! ```rust
//! use headwire_common::ExtractorConfig;
//!
//! let mut cfg = ExtractorConfig::default();
//! cfg.batch_size = 20;
//! assert_eq!(cfg.max_concurrent_requests, 5);
//! ```
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub mod observability;

/// Tuning knobs for one headline-extraction pipeline run.
///
/// Passed explicitly into the orchestrator entry point so tests can run with
/// isolated parameters instead of process-wide constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum number of in-flight page fetches at any instant.
    pub max_concurrent_requests: usize,
    /// Number of records processed per sequential batch.
    pub batch_size: usize,
    /// Hard per-attempt timeout for a fetch or browser navigation, seconds.
    pub request_timeout_secs: u64,
    /// Total attempts per record before settling on the sentinel title.
    pub max_retries: u32,
    /// Pause inserted between consecutive batches, milliseconds.
    pub batch_cooldown_ms: u64,
    /// Base unit for exponential retry backoff, milliseconds.
    pub backoff_base_ms: u64,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Skip TLS certificate verification on page fetches.
    pub accept_invalid_certs: bool,
    /// Hosts whose pages only produce a headline after script execution.
    /// Matched by suffix against the URL host.
    pub render_hosts: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 5,
            batch_size: 10,
            request_timeout_secs: 30,
            max_retries: 3,
            batch_cooldown_ms: 500,
            backoff_base_ms: 1000,
            headless: true,
            accept_invalid_certs: true,
            render_hosts: Vec::new(),
        }
    }
}

impl ExtractorConfig {
    /// Per-attempt timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Inter-batch cooldown as a [`Duration`].
    pub fn batch_cooldown(&self) -> Duration {
        Duration::from_millis(self.batch_cooldown_ms)
    }

    /// Backoff base unit as a [`Duration`].
    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }
}

/// Filesystem destinations for pipeline output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving enriched batch files.
    pub results_dir: PathBuf,
    /// Directory receiving rendered-page dumps and screenshots when every
    /// title candidate fails.
    pub debug_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("out/headlines"),
            debug_dir: PathBuf::from("out/debug"),
        }
    }
}

/// Error types used across the Headwire system.
#[derive(thiserror::Error, Debug)]
pub enum HeadwireError {
    /// The uploaded batch did not have the expected shape.
    #[error("invalid batch: {0}")]
    InvalidBatch(String),

    /// A driver (browser, network, etc.) reported an error.
    #[error("driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing pipeline output failed.
    #[error("output error: {0}")]
    Output(String),
}

/// Convenient alias for results that use [`HeadwireError`].
pub type Result<T> = std::result::Result<T, HeadwireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let cfg = ExtractorConfig::default();
        assert_eq!(cfg.max_concurrent_requests, 5);
        assert_eq!(cfg.batch_size, 10);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.batch_cooldown(), Duration::from_millis(500));
    }

    #[test]
    fn partial_yaml_like_json_fills_defaults() {
        let cfg: ExtractorConfig = serde_json::from_str(r#"{"batch_size": 4}"#).unwrap();
        assert_eq!(cfg.batch_size, 4);
        assert_eq!(cfg.max_concurrent_requests, 5);
        assert!(cfg.render_hosts.is_empty());
    }
}
