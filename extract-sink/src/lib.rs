//! # Extract Sink
//!
//! The output stage of the extraction pipeline: writes extracted documents
//! into a search index through a [`DocumentStore`].
//!
//! ## Architecture
//!
//! 1. **Fields**: normalizes metadata names into safe index field names
//! 2. **Identity**: derives a deterministic document id from the output path
//! 3. **Mapper**: turns extracted metadata into field writes
//! 4. **Writer**: assembles, submits and classifies failures per document
//! 5. **Batcher**: serializes commits and flushes every `commit_interval` writes

pub mod batcher;
pub mod config;
pub mod errors;
pub mod fields;
pub mod identity;
pub mod mapper;
pub mod path_filter;
pub mod writer;

pub use batcher::{CommitBatcher, CommitOutcome};
pub use config::SinkConfig;
pub use errors::{FailureKind, IndexWriteError, SinkError, UnsupportedDigestError};
pub use fields::normalize_name;
pub use identity::{generate_id, DigestAlgorithm};
pub use mapper::FieldMapper;
pub use path_filter::{BasePathFilter, IdentityPathFilter, PathFilter};
pub use writer::Sink;

pub use extract_sink_repository::{DocumentStore, StoreError, UpdateResponse};
pub use extract_sink_shared::{Document, FieldValue, IndexDocument, Metadata, WriteMode};
