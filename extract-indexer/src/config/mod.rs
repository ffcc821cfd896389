//! Configuration and dependency wiring for the extract indexer.

mod dependencies;
mod env;
mod scanner;

pub use dependencies::Dependencies;
pub use env::{sink_config, solr_config, Lookup};
pub use scanner::ScannerOptions;
