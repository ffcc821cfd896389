//! Response types for document store operations.

use std::time::Duration;

/// Outcome of a successful upsert or commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateResponse {
    /// Time the store reports it spent on the request.
    pub elapsed: Duration,
}

impl UpdateResponse {
    pub fn new(elapsed: Duration) -> Self {
        Self { elapsed }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}
