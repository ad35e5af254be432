//! Search error types

use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Search-specific error types
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Specification error: {0}")]
    Spec(#[from] causeway_core::Error),

    #[error("Search worker failed: {0}")]
    Worker(String),

    #[error("Block boundary mismatch: block ends at '{left}' but the next starts at '{right}'")]
    BoundaryMismatch { left: String, right: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
