//! Test error types.

use thiserror::Error;

/// Errors raised while building a request or reading a response.
#[derive(Debug, Error)]
pub enum TestError {
    /// The request could not be built.
    #[error("Request build error: {0}")]
    RequestBuild(String),

    /// A header name or value was rejected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The response body could not be read.
    #[error("Body read error: {0}")]
    BodyRead(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Form encoding failed.
    #[error("Form error: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),

    /// The application could not be assembled.
    #[error("Application error: {0}")]
    App(String),
}
