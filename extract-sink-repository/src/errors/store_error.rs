//! Store error types.
//!
//! Every failure a store call can report falls into exactly one of three
//! classes, so callers can classify without knowing the client library.

use thiserror::Error;

/// Errors reported by a document store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store accepted the request but failed while processing it.
    #[error("Server error: {0}")]
    Server(String),

    /// The store rejected the request with an error status.
    #[error("HTTP error {code}: {message}")]
    Malformed { code: u16, message: String },

    /// The request or response could not be transported.
    #[error("Communication error: {0}")]
    Communication(String),
}

impl StoreError {
    /// Create a server error.
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    /// Create a malformed-request error carrying the status code.
    pub fn malformed(code: u16, msg: impl Into<String>) -> Self {
        Self::Malformed {
            code,
            message: msg.into(),
        }
    }

    /// Create a communication error.
    pub fn communication(msg: impl Into<String>) -> Self {
        Self::Communication(msg.into())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Communication(err.to_string())
    }
}
