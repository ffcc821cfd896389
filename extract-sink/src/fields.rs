//! Field name normalization.

/// Normalize a metadata field name into a safe index field name.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, the result is
/// lower-cased (ASCII only, so independent of locale) and `prefix` is
/// prepended when given. Distinct names may collapse to the same field.
pub fn normalize_name(name: &str, prefix: Option<&str>) -> String {
    let normalized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    match prefix {
        Some(prefix) => format!("{}{}", prefix, normalized),
        None => normalized,
    }
}
