//! Dependency initialization and wiring for the extract indexer.

use std::env;
use std::sync::Arc;

use tracing::info;

use super::env::{sink_config, solr_config, Lookup};
use super::scanner::ScannerOptions;
use crate::IndexingError;
use extract_sink::Sink;
use extract_sink_repository::SolrClient;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The sink, writing to the configured Solr core.
    pub sink: Sink,
    /// Options for the upstream scanner.
    pub scanner: ScannerOptions,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables, after loading
    /// a `.env` file if one is present.
    ///
    /// See [`solr_config`](super::solr_config), [`sink_config`](super::sink_config)
    /// and [`ScannerOptions::from_lookup`] for the variables read.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If a variable is invalid or the client cannot be built
    pub fn from_env() -> Result<Self, IndexingError> {
        dotenv::dotenv().ok();
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    /// Initialize all dependencies from the given variable lookup.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, IndexingError> {
        let solr = solr_config(lookup)?;
        let config = sink_config(lookup)?;
        let scanner = ScannerOptions::from_lookup(lookup)?;

        info!(
            solr_url = %solr.core_url,
            id_algorithm = ?config.id_algorithm,
            commit_interval = config.commit_interval,
            commit_within_secs = config.commit_within,
            atomic_writes = config.atomic_writes,
            path_base = ?scanner.path_base,
            "Initializing dependencies"
        );

        let client = SolrClient::new(solr)?;

        let mut sink = Sink::new(Arc::new(client), config);
        if let Some(filter) = scanner.path_filter() {
            sink = sink.with_path_filter(filter);
        }

        Ok(Self { sink, scanner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract_sink::DigestAlgorithm;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Dependencies, IndexingError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Dependencies::from_lookup(&move |key: &str| map.get(key).cloned())
    }

    #[test]
    fn test_from_lookup_builds_sink() {
        let deps = from_pairs(&[
            ("SOLR_URL", "http://localhost:8983/solr/docs"),
            ("SINK_ID_ALGORITHM", "SHA-1"),
            ("SINK_COMMIT_INTERVAL", "25"),
            ("SCANNER_PATH_BASE", "/srv/share"),
        ])
        .unwrap();

        assert_eq!(deps.sink.config().id_algorithm, Some(DigestAlgorithm::Sha1));
        assert_eq!(deps.sink.config().commit_interval, 25);
        assert_eq!(deps.sink.pending(), 0);
        assert!(deps.scanner.path_base.is_some());
    }

    #[test]
    fn test_invalid_config_fails_before_client() {
        assert!(matches!(
            from_pairs(&[("SINK_COMMIT_WITHIN", "later")]),
            Err(IndexingError::SinkError(_))
        ));
        assert!(matches!(
            from_pairs(&[("SOLR_URL", "::")]),
            Err(IndexingError::StoreConfigError(_))
        ));
    }
}
