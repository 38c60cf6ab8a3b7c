//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax error or schema mismatch.
    #[error("failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON syntax error or schema mismatch.
    #[error("failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A value is well-formed but unusable.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field path, e.g. `server.http_addr`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An environment override could not be applied.
    #[error("failed to parse environment variable {var}: {reason}")]
    EnvParseError {
        /// Variable name.
        var: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The configuration file has an extension other than `.toml` or `.json`.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

impl ConfigError {
    /// Creates a [`ConfigError::FileNotFound`].
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates a [`ConfigError::ReadError`].
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a [`ConfigError::InvalidValue`].
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`ConfigError::EnvParseError`].
    pub fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error() {
        let err = ConfigError::file_not_found("/etc/mensura/mensura.toml");
        assert!(err.to_string().contains("/etc/mensura/mensura.toml"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::invalid_value("server.mount_prefix", "must start with '/'");
        assert_eq!(
            err.to_string(),
            "invalid configuration value for server.mount_prefix: must start with '/'"
        );
    }

    #[test]
    fn test_env_parse_error() {
        let err = ConfigError::env_parse_error("MENSURA__DOCS__ENABLED", "expected boolean");
        assert!(err.to_string().contains("MENSURA__DOCS__ENABLED"));
        assert!(err.to_string().contains("expected boolean"));
    }
}
