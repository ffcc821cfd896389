//! Solr connection configuration.

use std::time::Duration;

use url::Url;

use crate::errors::StoreConfigError;

/// Default core URL.
pub const DEFAULT_SOLR_URL: &str = "http://127.0.0.1:8983/solr/extract";

/// Configuration for the Solr client.
#[derive(Debug, Clone)]
pub struct SolrConfig {
    /// URL of the Solr core (or collection), e.g. `http://host:8983/solr/extract`.
    pub core_url: Url,
    /// Transport timeout applied to every request. `None` waits for Solr
    /// however long it takes.
    pub timeout: Option<Duration>,
}

impl SolrConfig {
    /// Create a config for the given core URL, without a request timeout.
    pub fn new(core_url: &str) -> Result<Self, StoreConfigError> {
        Ok(Self {
            core_url: Url::parse(core_url)?,
            timeout: None,
        })
    }

    /// Set a request timeout. A zero duration means no timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// The JSON update handler of the configured core.
    pub fn update_url(&self) -> Result<Url, StoreConfigError> {
        let mut base = self.core_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut update = base.join("update")?;
        update.query_pairs_mut().append_pair("wt", "json");
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_url_without_trailing_slash() {
        let config = SolrConfig::new("http://localhost:8983/solr/docs").unwrap();
        assert_eq!(
            config.update_url().unwrap().as_str(),
            "http://localhost:8983/solr/docs/update?wt=json"
        );
    }

    #[test]
    fn test_update_url_with_trailing_slash() {
        let config = SolrConfig::new("http://localhost:8983/solr/docs/").unwrap();
        assert_eq!(
            config.update_url().unwrap().as_str(),
            "http://localhost:8983/solr/docs/update?wt=json"
        );
    }

    #[test]
    fn test_invalid_url() {
        let result = SolrConfig::new("not a url");
        assert!(matches!(result, Err(StoreConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_no_timeout_by_default() {
        let config = SolrConfig::new(DEFAULT_SOLR_URL).unwrap();
        assert_eq!(config.core_url.as_str(), DEFAULT_SOLR_URL);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_with_timeout() {
        let config = SolrConfig::new(DEFAULT_SOLR_URL)
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));

        let config = config.with_timeout(Duration::ZERO);
        assert_eq!(config.timeout, None);
    }
}
