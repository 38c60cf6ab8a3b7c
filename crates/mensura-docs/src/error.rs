//! Error types for documentation generation.

use thiserror::Error;

/// Errors raised while producing documentation.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The OpenAPI document could not be serialized.
    #[error("Failed to serialize OpenAPI document: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for documentation generation.
pub type DocsResult<T> = Result<T, DocsError>;
