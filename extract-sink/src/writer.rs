//! The indexing sink.
//!
//! Assembles each extracted document into an index document, submits it to
//! the store and drives commit batching.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::batcher::{CommitBatcher, CommitOutcome};
use crate::config::SinkConfig;
use crate::errors::{IndexWriteError, SinkError};
use crate::mapper::FieldMapper;
use crate::path_filter::{IdentityPathFilter, PathFilter};
use extract_sink_repository::DocumentStore;
use extract_sink_shared::{Document, FieldValue, IndexDocument};

/// Writes extracted documents to a [`DocumentStore`].
///
/// A sink is shared by many writer threads; `write` never blocks on another
/// writer, only the commit check is serialized. Call [`Sink::finish`] once
/// every writer is done.
///
/// # Example
///
/// ```ignore
/// let config = SinkConfig::default()
///     .with_id_algorithm(Some("SHA-256"))?
///     .with_commit_interval(100);
/// let sink = Sink::new(Arc::new(solr), config);
///
/// sink.write(Document::new("/data/a.txt", File::open("/data/a.txt")?))?;
/// sink.finish();
/// ```
pub struct Sink {
    store: Arc<dyn DocumentStore>,
    config: SinkConfig,
    mapper: FieldMapper,
    path_filter: Box<dyn PathFilter>,
    batcher: CommitBatcher,
}

impl Sink {
    /// Create a sink writing through `store`, with paths left unchanged.
    pub fn new(store: Arc<dyn DocumentStore>, config: SinkConfig) -> Self {
        Self {
            mapper: FieldMapper::from_config(&config),
            store,
            config,
            path_filter: Box::new(IdentityPathFilter),
            batcher: CommitBatcher::new(),
        }
    }

    /// Rewrite source paths with `filter` before they are indexed.
    pub fn with_path_filter(mut self, filter: impl PathFilter + 'static) -> Self {
        self.path_filter = Box::new(filter);
        self
    }

    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Successful writes not yet covered by a commit.
    pub fn pending(&self) -> usize {
        self.batcher.pending()
    }

    /// The id of a document with this output path, if ids are configured.
    pub fn generate_id(&self, output_path: &str) -> Option<String> {
        self.config
            .id_settings()
            .map(|(_, algorithm)| algorithm.generate_id(output_path))
    }

    /// Assemble the index document for `document`, consuming its content.
    fn assemble(&self, document: Document) -> Result<IndexDocument, SinkError> {
        let Document {
            path,
            metadata,
            mut content,
            ..
        } = document;

        let output_path = self.path_filter.filter(&path).to_string_lossy().into_owned();
        let mut fields = IndexDocument::new();

        if self.config.output_metadata {
            self.mapper.set_metadata_fields(&mut fields, &metadata);
        }

        if let Some(tags) = &self.config.tags {
            for (name, value) in tags {
                self.mapper.set(&mut fields, name, value.as_str());
            }
        }

        let mut text = String::new();
        content
            .read_to_string(&mut text)
            .map_err(|e| SinkError::content_read(&path, e))?;

        self.mapper.set(&mut fields, &self.config.path_field, output_path.as_str());
        self.mapper.set(&mut fields, &self.config.text_field, text);

        // Ids are never wrapped: an atomic id would break upserts keyed on it.
        if let Some((id_field, algorithm)) = self.config.id_settings() {
            fields.set_field(id_field, FieldValue::Plain(algorithm.generate_id(&output_path)));
        }

        Ok(fields)
    }

    /// Write one document to the store.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The store accepted the document
    /// * `Err(SinkError::Write)` - The store failed; the document is not indexed
    /// * `Err(SinkError::ContentRead)` - The content stream could not be read
    #[instrument(skip(self, document), fields(file = %document.path.display()))]
    pub fn write(&self, document: Document) -> Result<(), SinkError> {
        let file = document.path.clone();
        let encoding = document.encoding.clone();
        let fields = self.assemble(document)?;

        let response = self
            .store
            .upsert(&fields, self.config.commit_within())
            .map_err(|cause| IndexWriteError::new(&file, cause))?;

        info!(
            elapsed_ms = response.elapsed_ms() as u64,
            encoding = %encoding,
            "Document added to index: {}",
            file.display()
        );

        self.batcher.record_write();

        if self.config.commit_interval > 0 {
            self.batcher
                .maybe_commit(self.store.as_ref(), self.config.commit_interval);
        }

        Ok(())
    }

    /// Commit if at least `threshold` writes are pending. Failures are logged.
    pub fn maybe_commit(&self, threshold: usize) -> CommitOutcome {
        self.batcher.maybe_commit(self.store.as_ref(), threshold)
    }

    /// Flush pending writes when batching is enabled, then release the store.
    ///
    /// Writers must be quiesced first. The store is closed exactly once, even
    /// when the final commit fails.
    pub fn finish(self) {
        if self.config.commit_interval > 0 {
            self.batcher.maybe_commit(self.store.as_ref(), 0);
        }

        if let Err(e) = self.store.close() {
            warn!(error = %e, "Failed to close document store");
        }

        info!(pending = self.batcher.pending(), "Sink finished");
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("config", &self.config)
            .field("pending", &self.batcher.pending())
            .finish_non_exhaustive()
    }
}
