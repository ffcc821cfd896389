//! The unit of work handed to the sink by the extraction stage.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use crate::Metadata;

/// A file whose text and metadata have already been extracted.
///
/// The content stream is consumed exactly once, by the sink's `write`, which
/// takes the document by value.
pub struct Document {
    /// Path of the source file, before the sink's path filter is applied.
    pub path: PathBuf,
    /// Metadata reported by the extractor.
    pub metadata: Metadata,
    /// Decoded text of the file, as UTF-8.
    pub content: Box<dyn Read + Send>,
    /// Character encoding the extractor declared for the source.
    pub encoding: String,
}

impl Document {
    /// Create a document with no metadata and a UTF-8 declared encoding.
    pub fn new(path: impl Into<PathBuf>, content: impl Read + Send + 'static) -> Self {
        Self {
            path: path.into(),
            metadata: Metadata::new(),
            content: Box::new(content),
            encoding: "UTF-8".to_string(),
        }
    }

    /// Set the extracted metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the declared encoding.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("metadata", &self.metadata)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}
