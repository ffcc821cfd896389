//! Solr client implementation.
//!
//! This module provides the concrete implementation of `DocumentStore` over
//! Solr's JSON update handler, using a blocking HTTP client.

use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::{StoreConfigError, StoreError};
use crate::interfaces::DocumentStore;
use crate::solr::config::SolrConfig;
use crate::types::UpdateResponse;
use extract_sink_shared::IndexDocument;

/// Solr document store.
///
/// # Example
///
/// ```ignore
/// let config = SolrConfig::new("http://localhost:8983/solr/extract")?;
/// let client = SolrClient::new(config)?;
///
/// client.upsert(&document, None)?;
/// client.commit()?;
/// ```
pub struct SolrClient {
    /// `None` once the client has been closed.
    http: RwLock<Option<Client>>,
    update_url: Url,
}

impl SolrClient {
    /// Create a new Solr client for the configured core.
    ///
    /// # Returns
    ///
    /// * `Ok(SolrClient)` - A new client instance
    /// * `Err(StoreConfigError)` - If the URL or HTTP client is invalid
    pub fn new(config: SolrConfig) -> Result<Self, StoreConfigError> {
        let update_url = config.update_url()?;
        // The blocking client defaults to 30 s; `None` has to be set explicitly.
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreConfigError::client(e.to_string()))?;

        info!(
            url = %config.core_url,
            timeout = ?config.timeout,
            "Created Solr client"
        );

        Ok(Self {
            http: RwLock::new(Some(http)),
            update_url,
        })
    }

    /// Build the JSON body adding one document.
    fn add_body(document: &IndexDocument, commit_within: Option<Duration>) -> Value {
        let mut add = json!({ "doc": document });
        if let Some(within) = commit_within {
            add["commitWithin"] = json!(within.as_millis() as u64);
        }
        json!({ "add": add })
    }

    /// Build the JSON body of an explicit commit.
    fn commit_body() -> Value {
        json!({ "commit": {} })
    }

    /// Interpret an update handler response.
    ///
    /// Non-2xx statuses are request errors carrying the status code; a 2xx
    /// response that is unreadable or reports a non-zero status is a server
    /// error. Latency is Solr's `QTime` when present.
    fn classify_response(
        status: u16,
        body: &str,
        measured: Duration,
    ) -> Result<UpdateResponse, StoreError> {
        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|v| v["error"]["msg"].as_str().map(str::to_string))
                .unwrap_or_else(|| body.to_string());
            return Err(StoreError::malformed(status, message));
        }

        let parsed: Value = serde_json::from_str(body)
            .map_err(|e| StoreError::server(format!("Unreadable response: {}", e)))?;

        let header = &parsed["responseHeader"];
        match header["status"].as_i64() {
            Some(0) | None => {}
            Some(code) => {
                return Err(StoreError::server(format!(
                    "Update handler reported status {}",
                    code
                )))
            }
        }

        Ok(match header["QTime"].as_u64() {
            Some(qtime) => UpdateResponse::from_millis(qtime),
            None => UpdateResponse::new(measured),
        })
    }

    fn http(&self) -> Result<Client, StoreError> {
        self.http
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| StoreError::communication("client closed"))
    }

    fn post(&self, body: &Value) -> Result<UpdateResponse, StoreError> {
        let http = self.http()?;
        let start = Instant::now();

        let response = http.post(self.update_url.clone()).json(body).send()?;
        let status = response.status().as_u16();
        let text = response.text()?;

        let result = Self::classify_response(status, &text, start.elapsed());
        if let Err(ref e) = result {
            error!(status = status, body = %text, error = %e, "Solr update request failed");
        }
        result
    }
}

impl DocumentStore for SolrClient {
    fn upsert(
        &self,
        document: &IndexDocument,
        commit_within: Option<Duration>,
    ) -> Result<UpdateResponse, StoreError> {
        let response = self.post(&Self::add_body(document, commit_within))?;
        debug!(fields = document.len(), "Document sent to Solr");
        Ok(response)
    }

    fn commit(&self) -> Result<UpdateResponse, StoreError> {
        self.post(&Self::commit_body())
    }

    fn close(&self) -> Result<(), StoreError> {
        let client = self
            .http
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match client {
            Some(_) => {
                debug!("Solr client closed");
                Ok(())
            }
            None => Err(StoreError::communication("client already closed")),
        }
    }
}
