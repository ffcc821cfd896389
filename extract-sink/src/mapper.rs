//! Mapping of extracted metadata into index fields.

use extract_sink_shared::{IndexDocument, Metadata, WriteMode};

use crate::config::SinkConfig;
use crate::fields::normalize_name;

/// Metadata field whose values are de-duplicated. Extractors repeat it,
/// notably for RTF files.
pub const CONTENT_TYPE_FIELD: &str = "Content-Type";

/// Metadata fields holding dates, eligible for UTC marking.
pub const DATE_FIELDS: &[&str] = &[
    "dcterms:created",
    "dcterms:modified",
    "meta:save-date",
    "meta:creation-date",
    "modified",
    "date",
    "Last-Modified",
    "Last-Save-Date",
    "Creation-Date",
];

/// Writes fields into an [`IndexDocument`] according to the configured write
/// mode, metadata prefix and date handling.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    mode: WriteMode,
    prefix: Option<String>,
    utc_dates: bool,
}

impl FieldMapper {
    pub fn new(mode: WriteMode, prefix: Option<String>, utc_dates: bool) -> Self {
        Self {
            mode,
            prefix,
            utc_dates,
        }
    }

    pub fn from_config(config: &SinkConfig) -> Self {
        Self::new(
            config.write_mode(),
            config.metadata_field_prefix.clone(),
            config.utc_dates,
        )
    }

    /// Replacing write, honoring the write mode.
    pub fn set(&self, document: &mut IndexDocument, name: &str, value: impl Into<String>) {
        document.set_field(name, self.mode.wrap(value));
    }

    /// Additive write, honoring the write mode.
    pub fn add(&self, document: &mut IndexDocument, name: &str, value: impl Into<String>) {
        document.add_field(name, self.mode.wrap(value));
    }

    /// Write every metadata field, in the order the extractor reported them.
    pub fn set_metadata_fields(&self, document: &mut IndexDocument, metadata: &Metadata) {
        for (name, values) in metadata.iter() {
            if name == CONTENT_TYPE_FIELD && values.len() > 1 {
                let distinct = distinct(values);
                self.set_metadata_field(document, name, &distinct);
            } else {
                self.set_metadata_field(document, name, values);
            }
        }
    }

    fn set_metadata_field(&self, document: &mut IndexDocument, name: &str, values: &[String]) {
        let field = normalize_name(name, self.prefix.as_deref());
        let is_date = self.utc_dates && DATE_FIELDS.contains(&name);

        for value in values {
            let value = if is_date && !value.ends_with('Z') {
                format!("{}Z", value)
            } else {
                value.clone()
            };

            if values.len() > 1 {
                self.add(document, &field, value);
            } else {
                self.set(document, &field, value);
            }
        }
    }
}

/// Distinct values, keeping first occurrences in order.
fn distinct(values: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract_sink_shared::FieldValue;

    fn plain(v: &str) -> FieldValue {
        FieldValue::Plain(v.to_string())
    }

    fn direct(utc_dates: bool) -> FieldMapper {
        FieldMapper::new(WriteMode::Direct, None, utc_dates)
    }

    #[test]
    fn test_content_type_deduplicated_in_order() {
        let metadata = Metadata::new()
            .with("Content-Type", "text/plain")
            .with("Content-Type", "text/plain")
            .with("Content-Type", "text/plain; charset=utf-8");
        let mut doc = IndexDocument::new();

        direct(false).set_metadata_fields(&mut doc, &metadata);

        assert_eq!(
            doc.get("content_type"),
            &[plain("text/plain"), plain("text/plain; charset=utf-8")]
        );
    }

    #[test]
    fn test_other_fields_keep_duplicates() {
        let metadata = Metadata::new().with("keywords", "a").with("keywords", "a");
        let mut doc = IndexDocument::new();

        direct(false).set_metadata_fields(&mut doc, &metadata);

        assert_eq!(doc.get("keywords"), &[plain("a"), plain("a")]);
    }

    #[test]
    fn test_single_value_replaces() {
        let metadata = Metadata::new().with("dc:title", "Report");
        let mut doc = IndexDocument::new();
        doc.add_field("dc_title", plain("stale"));

        direct(false).set_metadata_fields(&mut doc, &metadata);

        assert_eq!(doc.get("dc_title"), &[plain("Report")]);
    }

    #[test]
    fn test_utc_dates_appends_z() {
        let metadata = Metadata::new()
            .with("dcterms:created", "2015-03-01T10:00:00")
            .with("Last-Modified", "2015-03-02T11:00:00Z")
            .with("dc:title", "2015-03-01T10:00:00");
        let mut doc = IndexDocument::new();

        direct(true).set_metadata_fields(&mut doc, &metadata);

        assert_eq!(doc.get("dcterms_created"), &[plain("2015-03-01T10:00:00Z")]);
        assert_eq!(doc.get("last_modified"), &[plain("2015-03-02T11:00:00Z")]);
        assert_eq!(doc.get("dc_title"), &[plain("2015-03-01T10:00:00")]);
    }

    #[test]
    fn test_every_date_field_is_marked() {
        for name in DATE_FIELDS {
            let metadata = Metadata::new().with(*name, "2020-01-01T00:00:00");
            let mut doc = IndexDocument::new();

            direct(true).set_metadata_fields(&mut doc, &metadata);

            let field = normalize_name(name, None);
            assert_eq!(doc.get(&field), &[plain("2020-01-01T00:00:00Z")], "{}", name);
        }
    }

    #[test]
    fn test_utc_dates_disabled_leaves_values() {
        let metadata = Metadata::new().with("meta:save-date", "2015-03-01T10:00:00");
        let mut doc = IndexDocument::new();

        direct(false).set_metadata_fields(&mut doc, &metadata);

        assert_eq!(doc.get("meta_save_date"), &[plain("2015-03-01T10:00:00")]);
    }

    #[test]
    fn test_multi_valued_dates_each_marked() {
        let metadata = Metadata::new()
            .with("date", "2015-01-01T00:00:00")
            .with("date", "2016-01-01T00:00:00Z");
        let mut doc = IndexDocument::new();

        direct(true).set_metadata_fields(&mut doc, &metadata);

        assert_eq!(
            doc.get("date"),
            &[plain("2015-01-01T00:00:00Z"), plain("2016-01-01T00:00:00Z")]
        );
    }

    #[test]
    fn test_prefix_and_atomic_mode() {
        let mapper = FieldMapper::new(WriteMode::Atomic, Some("metadata_".to_string()), false);
        let metadata = Metadata::new()
            .with("Author", "Jane")
            .with("keywords", "a")
            .with("keywords", "b");
        let mut doc = IndexDocument::new();

        mapper.set_metadata_fields(&mut doc, &metadata);

        assert_eq!(
            doc.get("metadata_author"),
            &[FieldValue::Set("Jane".to_string())]
        );
        assert_eq!(
            doc.get("metadata_keywords"),
            &[FieldValue::Set("a".to_string()), FieldValue::Set("b".to_string())]
        );
    }

    #[test]
    fn test_colliding_names_last_wins() {
        let metadata = Metadata::new().with("dc:title", "first").with("dc-title", "second");
        let mut doc = IndexDocument::new();

        direct(false).set_metadata_fields(&mut doc, &metadata);

        assert_eq!(doc.get("dc_title"), &[plain("second")]);
    }
}
