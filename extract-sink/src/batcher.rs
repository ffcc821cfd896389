//! Commit batching.
//!
//! Writes proceed in parallel; only the commit check is serialized. The gate
//! is held across the commit round-trip so at most one commit is in flight.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, error, info};

use crate::errors::FailureKind;
use extract_sink_repository::DocumentStore;

/// Result of a commit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// No commit was due once the gate was held.
    Skipped,
    /// The store committed; `flushed` pending writes were reset.
    Committed { flushed: usize },
    /// The commit failed and the pending count was kept.
    Failed(FailureKind),
}

/// Pending write counter and commit gate.
#[derive(Debug, Default)]
pub struct CommitBatcher {
    pending: AtomicUsize,
    gate: Mutex<()>,
}

impl CommitBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes recorded since the last successful commit.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Record a successful write and return the new pending count.
    pub fn record_write(&self) -> usize {
        self.pending.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Commit if anything is pending and at least `threshold` writes are.
    ///
    /// Failures are logged and never returned as errors: the writes they
    /// would have flushed already succeeded, and the next check past the
    /// threshold retries.
    pub fn maybe_commit(&self, store: &dyn DocumentStore, threshold: usize) -> CommitOutcome {
        // Blocks until free. Poisoning only means another committer panicked;
        // the gate guards no data.
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);

        let pending = self.pending();
        if pending == 0 || pending < threshold {
            debug!(pending, threshold, "No commit due");
            return CommitOutcome::Skipped;
        }

        info!(pending, "Committing to index");

        match store.commit() {
            Ok(response) => {
                let flushed = self.pending.swap(0, Ordering::SeqCst);
                info!(
                    elapsed_ms = response.elapsed_ms() as u64,
                    flushed, "Committed to index"
                );
                CommitOutcome::Committed { flushed }
            }
            Err(e) => {
                let kind = FailureKind::from(&e);
                error!(
                    kind = ?kind,
                    error = %e,
                    "Failed to commit to index. {}",
                    kind.reason()
                );
                CommitOutcome::Failed(kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract_sink_repository::{StoreError, UpdateResponse};
    use extract_sink_shared::IndexDocument;
    use std::time::Duration;

    /// Mock store counting commits, optionally failing them.
    struct MockStore {
        commits: AtomicUsize,
        fail_with: Option<StoreError>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                commits: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(err: StoreError) -> Self {
            Self {
                commits: AtomicUsize::new(0),
                fail_with: Some(err),
            }
        }
    }

    impl DocumentStore for MockStore {
        fn upsert(
            &self,
            _document: &IndexDocument,
            _commit_within: Option<Duration>,
        ) -> Result<UpdateResponse, StoreError> {
            Ok(UpdateResponse::default())
        }

        fn commit(&self) -> Result<UpdateResponse, StoreError> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(UpdateResponse::from_millis(3)),
            }
        }
    }

    #[test]
    fn test_below_threshold_skips() {
        let store = MockStore::new();
        let batcher = CommitBatcher::new();
        for _ in 0..4 {
            batcher.record_write();
        }

        assert_eq!(batcher.maybe_commit(&store, 5), CommitOutcome::Skipped);
        assert_eq!(store.commits.load(Ordering::SeqCst), 0);
        assert_eq!(batcher.pending(), 4);
    }

    #[test]
    fn test_at_threshold_commits() {
        let store = MockStore::new();
        let batcher = CommitBatcher::new();
        for _ in 0..5 {
            batcher.record_write();
        }

        assert_eq!(
            batcher.maybe_commit(&store, 5),
            CommitOutcome::Committed { flushed: 5 }
        );
        assert_eq!(store.commits.load(Ordering::SeqCst), 1);
        assert_eq!(batcher.pending(), 0);
    }

    #[test]
    fn test_zero_threshold_flushes_anything_pending() {
        let store = MockStore::new();
        let batcher = CommitBatcher::new();

        assert_eq!(batcher.maybe_commit(&store, 0), CommitOutcome::Skipped);

        batcher.record_write();
        assert_eq!(
            batcher.maybe_commit(&store, 0),
            CommitOutcome::Committed { flushed: 1 }
        );
        assert_eq!(store.commits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_keeps_pending() {
        let store = MockStore::failing(StoreError::malformed(503, "unavailable"));
        let batcher = CommitBatcher::new();
        for _ in 0..3 {
            batcher.record_write();
        }

        assert_eq!(
            batcher.maybe_commit(&store, 3),
            CommitOutcome::Failed(FailureKind::MalformedRequest { code: 503 })
        );
        assert_eq!(batcher.pending(), 3);

        batcher.record_write();
        assert_eq!(
            batcher.maybe_commit(&store, 3),
            CommitOutcome::Failed(FailureKind::MalformedRequest { code: 503 })
        );
        assert_eq!(store.commits.load(Ordering::SeqCst), 2);
        assert_eq!(batcher.pending(), 4);
    }

    #[test]
    fn test_record_write_returns_count() {
        let batcher = CommitBatcher::new();
        assert_eq!(batcher.record_write(), 1);
        assert_eq!(batcher.record_write(), 2);
    }
}
