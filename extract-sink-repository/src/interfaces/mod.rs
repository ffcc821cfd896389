//! Interface definitions for the document store.
//!
//! The sink only depends on the `DocumentStore` trait, so backends can be
//! swapped and tests can inject recording mocks.

mod document_store;

pub use document_store::DocumentStore;
