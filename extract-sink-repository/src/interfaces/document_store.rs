//! Document store trait definition.

use std::time::Duration;

use crate::errors::StoreError;
use crate::types::UpdateResponse;
use extract_sink_shared::IndexDocument;

/// Abstracts the remote search index the sink writes to.
///
/// Calls are synchronous and block the calling thread until the store
/// responds. Implementations must be `Send + Sync`: many writer threads share
/// one store through the sink.
pub trait DocumentStore: Send + Sync {
    /// Add or replace a document.
    ///
    /// # Arguments
    ///
    /// * `document` - The assembled field set
    /// * `commit_within` - Optional hint asking the store to make the write
    ///   visible within this duration without an explicit commit
    ///
    /// # Returns
    ///
    /// * `Ok(UpdateResponse)` - With the store-reported latency
    /// * `Err(StoreError)` - Classified as server, malformed or communication
    fn upsert(
        &self,
        document: &IndexDocument,
        commit_within: Option<Duration>,
    ) -> Result<UpdateResponse, StoreError>;

    /// Make every previously submitted write visible to queries.
    fn commit(&self) -> Result<UpdateResponse, StoreError>;

    /// Release the underlying connection. Called once, at shutdown.
    fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
