//! # Extract Indexer
//!
//! Entry point and configuration for running the indexing sink.
//!
//! This crate reads the sink, store and scanner settings from the
//! environment, builds a ready [`extract_sink::Sink`] over a Solr core and
//! installs the tracing subscriber.

pub mod config;

pub use config::{Dependencies, ScannerOptions};

use extract_sink::{SinkError, UnsupportedDigestError};
use extract_sink_repository::{StoreConfigError, StoreError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Sink error.
    #[error("Sink error: {0}")]
    SinkError(#[from] SinkError),

    /// Unknown id digest.
    #[error("Sink error: {0}")]
    UnsupportedDigest(#[from] UnsupportedDigestError),

    /// Store error.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Store client could not be created.
    #[error("Store configuration error: {0}")]
    StoreConfigError(#[from] StoreConfigError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. With `json` set,
/// events are written as JSON lines.
pub fn init_tracing(json: bool) -> Result<(), IndexingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| IndexingError::config(format!("Failed to initialize tracing: {}", e)))
}
