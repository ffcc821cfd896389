//! # Extract Sink Repository
//!
//! This crate defines the [`DocumentStore`] interface the indexing sink
//! writes through, the [`StoreError`] taxonomy every implementation reports
//! failures in, and a concrete implementation for Solr's JSON update handler.

pub mod errors;
pub mod interfaces;
pub mod solr;
pub mod types;

pub use errors::{StoreConfigError, StoreError};
pub use interfaces::DocumentStore;
pub use solr::{SolrClient, SolrConfig, DEFAULT_SOLR_URL};
pub use types::UpdateResponse;
