//! Output path rewriting.
//!
//! The filtered path is what the index sees, both as the path field value and
//! as the input to id generation.

use std::path::{Path, PathBuf};

/// Rewrites a source path into the path written to the index.
pub trait PathFilter: Send + Sync {
    fn filter(&self, path: &Path) -> PathBuf;
}

/// Leaves paths unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPathFilter;

impl PathFilter for IdentityPathFilter {
    fn filter(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

/// Strips a base directory from paths under it.
///
/// With a base of `/home/user/`, `/home/user/data/a.pdf` becomes
/// `data/a.pdf`. Paths outside the base are left unchanged.
#[derive(Debug, Clone)]
pub struct BasePathFilter {
    base: PathBuf,
}

impl BasePathFilter {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl PathFilter for BasePathFilter {
    fn filter(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(&self.base) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => path.to_path_buf(),
        }
    }
}
