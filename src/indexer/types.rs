//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::MatcherError;

#[derive(Error, Debug)]
pub enum IndexerError {
    /// The configured patterns could not be compiled
    #[error(transparent)]
    Matcher(#[from] MatcherError),
    /// The workspace root is not a directory
    #[error("Not a directory: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Outcome of a workspace scan.
#[derive(Debug, Default)]
pub struct IndexSummary {
    /// Catalogs that were loaded, sorted by path.
    pub loaded: Vec<PathBuf>,
    /// Catalogs that failed to load, sorted by path.
    pub failed: Vec<CatalogError>,
}

impl IndexSummary {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
