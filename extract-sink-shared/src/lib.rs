//! # Extract Sink Shared
//!
//! Types shared between the indexing sink and its document store: the
//! incoming [`Document`] with its extracted [`Metadata`], and the assembled
//! [`IndexDocument`] that is submitted to the store.

mod document;
mod index_document;
mod metadata;

pub use document::Document;
pub use index_document::{FieldValue, IndexDocument, WriteMode};
pub use metadata::Metadata;
