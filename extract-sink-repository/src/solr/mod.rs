//! Solr implementation of the document store.
//!
//! Documents are sent to the core's JSON update handler; commits are explicit
//! `commit` commands on the same handler.

mod client;
mod config;

pub use client::SolrClient;
pub use config::{SolrConfig, DEFAULT_SOLR_URL};
