//! Server error types.

use std::io;

use mensura_core::CatalogError;
use mensura_docs::DocsError;
use thiserror::Error;

/// Errors raised while assembling or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured address is not a socket address.
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    /// The listener could not be bound.
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The unit catalog could not be built.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The access guard configuration was rejected.
    #[error("Invalid access guard: {0}")]
    InvalidGuard(String),

    /// The API documentation could not be generated.
    #[error(transparent)]
    Docs(#[from] DocsError),

    /// I/O error while serving.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ServerError {
    /// Creates a bind error.
    pub fn bind(addr: impl Into<String>, source: io::Error) -> Self {
        Self::Bind {
            addr: addr.into(),
            source,
        }
    }
}

/// Result type alias using [`ServerError`].
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ServerError::InvalidAddress("nowhere".to_string());
        assert_eq!(err.to_string(), "Invalid address 'nowhere'");

        let err = ServerError::bind(
            "127.0.0.1:80",
            io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        );
        assert!(err.to_string().contains("Failed to bind to 127.0.0.1:80"));

        let err: ServerError = CatalogError::Empty.into();
        assert_eq!(err.to_string(), "The unit registry defines no units");
    }
}
