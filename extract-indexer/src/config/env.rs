//! Environment variable parsing.
//!
//! Every function takes a lookup closure instead of reading the process
//! environment, so it can be driven from a map in tests. Unset and empty
//! variables fall back to the defaults.

use std::time::Duration;

use extract_sink::SinkConfig;
use extract_sink_repository::{SolrConfig, DEFAULT_SOLR_URL};

use crate::IndexingError;

/// Variable lookup, usually `|key| std::env::var(key).ok()`.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Value of `key`, treating an empty value as unset.
pub(crate) fn non_empty(lookup: Lookup<'_>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn parse_bool(lookup: Lookup<'_>, key: &str, default: bool) -> Result<bool, IndexingError> {
    match non_empty(lookup, key) {
        None => Ok(default),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(IndexingError::config(format!(
                "{} must be a boolean, got {:?}",
                key, value
            ))),
        },
    }
}

fn parse_number(lookup: Lookup<'_>, key: &str, default: u64) -> Result<u64, IndexingError> {
    match non_empty(lookup, key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| {
            IndexingError::config(format!(
                "{} must be a non-negative integer, got {:?}",
                key, value
            ))
        }),
    }
}

/// Comma-separated list, skipping empty entries.
pub(crate) fn parse_list(lookup: Lookup<'_>, key: &str) -> Vec<String> {
    non_empty(lookup, key)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Optional field name. Set but empty disables the field.
fn parse_optional_field(lookup: Lookup<'_>, key: &str, default: Option<String>) -> Option<String> {
    match lookup(key) {
        None => default,
        Some(value) if value.trim().is_empty() => None,
        Some(value) => Some(value.trim().to_string()),
    }
}

/// `key=value` pairs separated by commas.
fn parse_tags(value: &str) -> Result<Vec<(String, String)>, IndexingError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(IndexingError::config(format!(
                "SINK_TAGS entries must be key=value, got {:?}",
                pair
            ))),
        })
        .collect()
}

/// Solr connection settings.
///
/// - `SOLR_URL`: core URL (default: http://127.0.0.1:8983/solr/extract)
/// - `SOLR_TIMEOUT_SECS`: request timeout in seconds (default: 0, no timeout)
pub fn solr_config(lookup: Lookup<'_>) -> Result<SolrConfig, IndexingError> {
    let url = non_empty(lookup, "SOLR_URL").unwrap_or_else(|| DEFAULT_SOLR_URL.to_string());
    let secs = parse_number(lookup, "SOLR_TIMEOUT_SECS", 0)?;

    Ok(SolrConfig::new(&url)?.with_timeout(Duration::from_secs(secs)))
}

/// Sink settings.
///
/// - `SINK_TEXT_FIELD`, `SINK_PATH_FIELD`: field names (default: content, path)
/// - `SINK_ID_FIELD`, `SINK_METADATA_PREFIX`: default id, metadata_; empty disables
/// - `SINK_ID_ALGORITHM`: digest for ids, e.g. SHA-256 (default: no ids)
/// - `SINK_COMMIT_INTERVAL`: writes per commit (default: 0, never)
/// - `SINK_COMMIT_WITHIN`: auto-commit hint, e.g. 30s or 5m (default: none)
/// - `SINK_ATOMIC_WRITES`, `SINK_UTC_DATES`: booleans (default: false)
/// - `SINK_OUTPUT_METADATA`: boolean (default: true)
/// - `SINK_TAGS`: fixed fields as key=value,key=value
pub fn sink_config(lookup: Lookup<'_>) -> Result<SinkConfig, IndexingError> {
    let defaults = SinkConfig::default();
    let mut config = SinkConfig::default();

    if let Some(field) = non_empty(lookup, "SINK_TEXT_FIELD") {
        config = config.with_text_field(field);
    }
    if let Some(field) = non_empty(lookup, "SINK_PATH_FIELD") {
        config = config.with_path_field(field);
    }

    config = config
        .with_id_field(parse_optional_field(lookup, "SINK_ID_FIELD", defaults.id_field))
        .with_metadata_field_prefix(parse_optional_field(
            lookup,
            "SINK_METADATA_PREFIX",
            defaults.metadata_field_prefix,
        ))
        .with_id_algorithm(non_empty(lookup, "SINK_ID_ALGORITHM").as_deref())?;

    let interval = parse_number(lookup, "SINK_COMMIT_INTERVAL", 0)?;
    let interval = usize::try_from(interval)
        .map_err(|_| IndexingError::config("SINK_COMMIT_INTERVAL is too large"))?;
    config = config.with_commit_interval(interval);

    if let Some(within) = non_empty(lookup, "SINK_COMMIT_WITHIN") {
        config = config.with_commit_within_duration(&within)?;
    }

    config = config
        .with_atomic_writes(parse_bool(lookup, "SINK_ATOMIC_WRITES", defaults.atomic_writes)?)
        .with_utc_dates(parse_bool(lookup, "SINK_UTC_DATES", defaults.utc_dates)?)
        .with_output_metadata(parse_bool(
            lookup,
            "SINK_OUTPUT_METADATA",
            defaults.output_metadata,
        )?);

    if let Some(tags) = non_empty(lookup, "SINK_TAGS") {
        for (name, value) in parse_tags(&tags)? {
            config = config.with_tag(name, value);
        }
    }

    Ok(config)
}
