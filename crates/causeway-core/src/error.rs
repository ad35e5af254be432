//! Error types for Causeway Core

use thiserror::Error;

/// Result type alias using Causeway's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Causeway error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    #[error("Topic '{topic}' references unknown node '{node}'")]
    DanglingNodeRef { topic: String, node: String },

    #[error("Target path '{0}' has an empty path description")]
    EmptyPath(String),

    #[error("Target path '{target}' has a block with {steps} step(s); at least 2 are required")]
    ShortBlock { target: String, steps: usize },

    #[error("Invalid pattern step: {0}")]
    InvalidPatternStep(String),

    #[error("Validation error: {0}")]
    Validation(#[from] crate::limits::ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
