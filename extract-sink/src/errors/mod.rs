//! Error types for the indexing sink.

use std::path::PathBuf;

use extract_sink_repository::StoreError;
use thiserror::Error;

/// Classification of a failed store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The store failed while processing the request.
    Server,
    /// The store rejected the request with the given status code.
    MalformedRequest { code: u16 },
    /// The store could not be reached or the response was lost.
    Communication,
}

impl FailureKind {
    /// Human readable explanation, used in error messages and logs.
    pub fn reason(&self) -> String {
        match self {
            FailureKind::Server => "There was a server-side error.".to_string(),
            FailureKind::MalformedRequest { code } => {
                format!("HTTP error {} was returned.", code)
            }
            FailureKind::Communication => {
                "There was an error communicating with the server.".to_string()
            }
        }
    }
}

/// Explanation of a store failure by its classification.
pub fn failure_reason(err: &StoreError) -> String {
    FailureKind::from(err).reason()
}

impl From<&StoreError> for FailureKind {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::Server(_) => FailureKind::Server,
            StoreError::Malformed { code, .. } => FailureKind::MalformedRequest { code: *code },
            StoreError::Communication(_) => FailureKind::Communication,
        }
    }
}

/// A document could not be added to the index.
#[derive(Debug, Clone, Error)]
#[error("Unable to add file to index: {}. {}", .file.display(), failure_reason(.cause))]
pub struct IndexWriteError {
    /// The file the document was extracted from.
    pub file: PathBuf,
    /// The store failure.
    #[source]
    pub cause: StoreError,
}

impl IndexWriteError {
    pub fn new(file: impl Into<PathBuf>, cause: StoreError) -> Self {
        Self {
            file: file.into(),
            cause,
        }
    }

    pub fn kind(&self) -> FailureKind {
        FailureKind::from(&self.cause)
    }
}

/// The configured digest algorithm is not available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No such algorithm: {algorithm}.")]
pub struct UnsupportedDigestError {
    pub algorithm: String,
}

impl UnsupportedDigestError {
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
        }
    }
}

/// Errors returned by the sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The store rejected or failed the document.
    #[error(transparent)]
    Write(#[from] IndexWriteError),

    /// The document's content stream could not be read to completion.
    #[error("Unable to read content of {}: {source}", .file.display())]
    ContentRead {
        file: PathBuf,
        source: std::io::Error,
    },

    /// An unknown digest algorithm was configured.
    #[error(transparent)]
    UnsupportedDigest(#[from] UnsupportedDigestError),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SinkError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn content_read(file: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ContentRead {
            file: file.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_mapping() {
        assert_eq!(
            FailureKind::from(&StoreError::server("boom")),
            FailureKind::Server
        );
        assert_eq!(
            FailureKind::from(&StoreError::malformed(400, "bad")),
            FailureKind::MalformedRequest { code: 400 }
        );
        assert_eq!(
            FailureKind::from(&StoreError::communication("refused")),
            FailureKind::Communication
        );
    }

    #[test]
    fn test_index_write_error_message() {
        let err = IndexWriteError::new("/data/a.pdf", StoreError::malformed(400, "bad"));
        assert_eq!(
            err.to_string(),
            "Unable to add file to index: /data/a.pdf. HTTP error 400 was returned."
        );

        let err = IndexWriteError::new("/data/a.pdf", StoreError::communication("refused"));
        assert_eq!(
            err.to_string(),
            "Unable to add file to index: /data/a.pdf. \
             There was an error communicating with the server."
        );
    }

    #[test]
    fn test_unsupported_digest_message() {
        assert_eq!(
            UnsupportedDigestError::new("ROT13").to_string(),
            "No such algorithm: ROT13."
        );
    }
}
