//! Configuration types for the sink.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{SinkError, UnsupportedDigestError};
use crate::identity::DigestAlgorithm;
use extract_sink_shared::WriteMode;

/// Default field receiving the extracted text.
pub const DEFAULT_TEXT_FIELD: &str = "content";

/// Default field receiving the output path.
pub const DEFAULT_PATH_FIELD: &str = "path";

/// Default field receiving the generated id.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Default prefix of metadata fields.
pub const DEFAULT_METADATA_FIELD_PREFIX: &str = "metadata_";

/// Field mapping and batching configuration of a sink.
///
/// Set once before the sink is built; the sink never changes it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Field receiving the extracted text.
    pub text_field: String,
    /// Field receiving the output path.
    pub path_field: String,
    /// Field receiving the generated id. No id is written when `None`.
    pub id_field: Option<String>,
    /// Prefix prepended to normalized metadata field names.
    pub metadata_field_prefix: Option<String>,
    /// Digest used to derive ids. No id is written when `None`.
    pub id_algorithm: Option<DigestAlgorithm>,
    /// Commit after this many successful writes. `0` disables batching.
    pub commit_interval: usize,
    /// Store-side auto-commit hint, in seconds. `0` disables the hint.
    pub commit_within: u64,
    /// Wrap field values in "set" partial-update instructions.
    pub atomic_writes: bool,
    /// Mark well-known date fields as UTC.
    pub utc_dates: bool,
    /// Write extracted metadata fields.
    pub output_metadata: bool,
    /// Fixed fields written to every document.
    pub tags: Option<BTreeMap<String, String>>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            text_field: DEFAULT_TEXT_FIELD.to_string(),
            path_field: DEFAULT_PATH_FIELD.to_string(),
            id_field: Some(DEFAULT_ID_FIELD.to_string()),
            metadata_field_prefix: Some(DEFAULT_METADATA_FIELD_PREFIX.to_string()),
            id_algorithm: None,
            commit_interval: 0,
            commit_within: 0,
            atomic_writes: false,
            utc_dates: false,
            output_metadata: true,
            tags: None,
        }
    }
}

impl SinkConfig {
    pub fn with_text_field(mut self, field: impl Into<String>) -> Self {
        self.text_field = field.into();
        self
    }

    pub fn with_path_field(mut self, field: impl Into<String>) -> Self {
        self.path_field = field.into();
        self
    }

    pub fn with_id_field(mut self, field: Option<String>) -> Self {
        self.id_field = field;
        self
    }

    pub fn with_metadata_field_prefix(mut self, prefix: Option<String>) -> Self {
        self.metadata_field_prefix = prefix;
        self
    }

    /// Set the id digest by name, validating it against the available
    /// algorithms. `None` disables id generation.
    pub fn with_id_algorithm(mut self, name: Option<&str>) -> Result<Self, UnsupportedDigestError> {
        self.id_algorithm = name.map(str::parse::<DigestAlgorithm>).transpose()?;
        Ok(self)
    }

    pub fn with_commit_interval(mut self, interval: usize) -> Self {
        self.commit_interval = interval;
        self
    }

    pub fn with_commit_within(mut self, seconds: u64) -> Self {
        self.commit_within = seconds;
        self
    }

    /// Set the auto-commit hint from a duration string such as `"30s"`,
    /// `"5m"` or `"1h"`. Fractions of a second round up, so a non-zero
    /// duration never disables the hint.
    pub fn with_commit_within_duration(self, duration: &str) -> Result<Self, SinkError> {
        let duration = parse_duration(duration)?;
        let seconds = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
        Ok(self.with_commit_within(seconds))
    }

    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    pub fn with_utc_dates(mut self, utc_dates: bool) -> Self {
        self.utc_dates = utc_dates;
        self
    }

    pub fn with_output_metadata(mut self, output: bool) -> Self {
        self.output_metadata = output;
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn write_mode(&self) -> WriteMode {
        WriteMode::from_atomic(self.atomic_writes)
    }

    /// The auto-commit hint to send with each document, if enabled.
    pub fn commit_within(&self) -> Option<Duration> {
        (self.commit_within > 0).then(|| Duration::from_secs(self.commit_within))
    }

    /// Id field and algorithm, when both are configured.
    pub fn id_settings(&self) -> Option<(&str, DigestAlgorithm)> {
        match (&self.id_field, self.id_algorithm) {
            (Some(field), Some(algorithm)) => Some((field.as_str(), algorithm)),
            _ => None,
        }
    }
}

/// Parse a human readable duration: an integer followed by an optional unit
/// (`ms`, `s`, `m`, `h`, `d` or their long forms). A bare number is seconds.
pub fn parse_duration(input: &str) -> Result<Duration, SinkError> {
    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split);

    if digits.is_empty() {
        return Err(SinkError::config(format!("Invalid duration: {:?}", input)));
    }

    let value: u64 = digits
        .parse()
        .map_err(|_| SinkError::config(format!("Invalid duration: {:?}", input)))?;

    let unit_secs: u64 = match unit.trim().to_ascii_lowercase().as_str() {
        "ms" | "millis" | "milliseconds" => return Ok(Duration::from_millis(value)),
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "h" | "hr" | "hour" | "hours" => 60 * 60,
        "d" | "day" | "days" => 24 * 60 * 60,
        other => {
            return Err(SinkError::config(format!(
                "Invalid duration unit {:?} in {:?}",
                other, input
            )))
        }
    };

    value
        .checked_mul(unit_secs)
        .map(Duration::from_secs)
        .ok_or_else(|| SinkError::config(format!("Duration out of range: {:?}", input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SinkConfig::default();
        assert_eq!(config.text_field, "content");
        assert_eq!(config.path_field, "path");
        assert_eq!(config.id_field.as_deref(), Some("id"));
        assert_eq!(config.metadata_field_prefix.as_deref(), Some("metadata_"));
        assert!(config.id_algorithm.is_none());
        assert_eq!(config.commit_interval, 0);
        assert!(config.commit_within().is_none());
        assert_eq!(config.write_mode(), WriteMode::Direct);
        assert!(config.output_metadata);
        assert!(config.id_settings().is_none());
    }

    #[test]
    fn test_id_algorithm_validated_on_set() {
        let config = SinkConfig::default().with_id_algorithm(Some("sha-256")).unwrap();
        assert_eq!(config.id_algorithm, Some(DigestAlgorithm::Sha256));
        assert_eq!(config.id_settings(), Some(("id", DigestAlgorithm::Sha256)));

        let err = SinkConfig::default().with_id_algorithm(Some("ROT13")).unwrap_err();
        assert_eq!(err.algorithm, "ROT13");

        let config = config.with_id_algorithm(None).unwrap();
        assert!(config.id_algorithm.is_none());
    }

    #[test]
    fn test_id_settings_requires_field() {
        let config = SinkConfig::default()
            .with_id_algorithm(Some("MD5"))
            .unwrap()
            .with_id_field(None);
        assert!(config.id_settings().is_none());
    }

    #[test]
    fn test_commit_within_duration() {
        let config = SinkConfig::default().with_commit_within_duration("5m").unwrap();
        assert_eq!(config.commit_within, 300);
        assert_eq!(config.commit_within(), Some(Duration::from_secs(300)));

        assert!(SinkConfig::default().with_commit_within_duration("soon").is_err());
    }

    #[test]
    fn test_commit_within_rounds_fractions_up() {
        let config = SinkConfig::default()
            .with_commit_within_duration("500ms")
            .unwrap();
        assert_eq!(config.commit_within(), Some(Duration::from_secs(1)));

        let config = config.with_commit_within_duration("1500ms").unwrap();
        assert_eq!(config.commit_within, 2);

        let config = config.with_commit_within_duration("0s").unwrap();
        assert!(config.commit_within().is_none());
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("2 min").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1H").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("1d").unwrap(), Duration::from_secs(86_400));
        assert_eq!(parse_duration("1500ms").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        for input in ["", "s", "-5s", "5 fortnights", "1.5h"] {
            assert!(
                matches!(parse_duration(input), Err(SinkError::Config(_))),
                "{}",
                input
            );
        }
        assert!(parse_duration("99999999999999999999d").is_err());
    }

    #[test]
    fn test_tags() {
        let config = SinkConfig::default()
            .with_tag("project", "leaks")
            .with_tag("batch", "7");
        let tags = config.tags.unwrap();
        assert_eq!(tags.get("project").map(String::as_str), Some("leaks"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SinkConfig = serde_json::from_str(
            r#"{"text_field": "body", "id_algorithm": "SHA-1", "commit_interval": 10}"#,
        )
        .unwrap();

        assert_eq!(config.text_field, "body");
        assert_eq!(config.path_field, "path");
        assert_eq!(config.id_algorithm, Some(DigestAlgorithm::Sha1));
        assert_eq!(config.commit_interval, 10);
    }

    #[test]
    fn test_deserialize_rejects_unknown_algorithm() {
        let result: Result<SinkConfig, _> =
            serde_json::from_str(r#"{"id_algorithm": "CRC32"}"#);
        assert!(result.is_err());
    }
}
