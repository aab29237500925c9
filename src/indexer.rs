//! Workspace indexing of catalog files.
pub mod types;
pub mod workspace;

pub use types::{
    IndexSummary,
    IndexerError,
};
pub use workspace::WorkspaceIndexer;
