//! Scanner options.
//!
//! The indexer does not walk the filesystem itself; these options are carried
//! for the upstream scanner, and `path_base` configures the sink's path filter.

use std::path::PathBuf;

use extract_sink::BasePathFilter;

use super::env::{non_empty, parse_bool, parse_list, Lookup};
use crate::IndexingError;

/// File selection options of the upstream scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Glob patterns a file must match to be scanned.
    pub include_patterns: Vec<String>,
    /// Glob patterns excluding files from the scan.
    pub exclude_patterns: Vec<String>,
    pub follow_symlinks: bool,
    pub exclude_hidden_files: bool,
    /// Include OS metadata files such as `.DS_Store` or `Thumbs.db`.
    pub include_os_files: bool,
    /// Base directory stripped from paths before indexing.
    pub path_base: Option<PathBuf>,
}

impl ScannerOptions {
    /// Read the options.
    ///
    /// - `SCANNER_INCLUDE_PATTERNS`, `SCANNER_EXCLUDE_PATTERNS`: comma-separated globs
    /// - `SCANNER_FOLLOW_SYMLINKS`, `SCANNER_EXCLUDE_HIDDEN_FILES`,
    ///   `SCANNER_INCLUDE_OS_FILES`: booleans (default: false)
    /// - `SCANNER_PATH_BASE`: base directory (default: none)
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, IndexingError> {
        Ok(Self {
            include_patterns: parse_list(lookup, "SCANNER_INCLUDE_PATTERNS"),
            exclude_patterns: parse_list(lookup, "SCANNER_EXCLUDE_PATTERNS"),
            follow_symlinks: parse_bool(lookup, "SCANNER_FOLLOW_SYMLINKS", false)?,
            exclude_hidden_files: parse_bool(lookup, "SCANNER_EXCLUDE_HIDDEN_FILES", false)?,
            include_os_files: parse_bool(lookup, "SCANNER_INCLUDE_OS_FILES", false)?,
            path_base: non_empty(lookup, "SCANNER_PATH_BASE").map(PathBuf::from),
        })
    }

    /// The sink path filter for the configured base, if any.
    pub fn path_filter(&self) -> Option<BasePathFilter> {
        self.path_base.clone().map(BasePathFilter::new)
    }
}
