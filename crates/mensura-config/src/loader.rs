//! Layered configuration loading.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. A TOML or JSON file
//! 3. `.env` in the working directory (via `dotenvy`)
//! 4. Environment variables `MENSURA__SECTION__KEY`
//!
//! ```rust,ignore
//! use mensura_config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .with_optional_file("mensura.toml")?
//!     .with_dotenv()
//!     .with_env_prefix("MENSURA")
//!     .load()?;
//! ```

use std::env;
use std::fs;
use std::path::Path;

use crate::{ConfigError, LogFormat, MensuraConfig};

/// Builds a [`MensuraConfig`] from layered sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: MensuraConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Starts from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from [`MensuraConfig::development`].
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = MensuraConfig::development();
        self
    }

    /// Replaces the configuration with the contents of `path`.
    ///
    /// The format follows the extension (`.toml` or `.json`); sections and
    /// fields the file omits keep their defaults.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        self.config = Self::parse_file(&content, path)?;

        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), skipping a missing file.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Replaces the configuration with `content` in `format` (`toml` or `json`).
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        Ok(self)
    }

    /// Loads `.env` into the process environment, if present.
    #[must_use]
    pub fn with_dotenv(self) -> Self {
        let _ = dotenvy::dotenv();
        self
    }

    /// Applies `PREFIX__SECTION__KEY` variables at [`load`](Self::load).
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Applies environment overrides and validates.
    pub fn load(mut self) -> Result<MensuraConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            let vars: Vec<(String, String)> = env::vars()
                .filter(|(k, _)| k.starts_with(&prefix))
                .collect();
            for (key, value) in vars {
                self.apply_env_var(&key, &value, &prefix)?;
            }
        }

        self.config.validate()?;
        Ok(self.config)
    }

    fn parse_file(content: &str, path: &Path) -> Result<MensuraConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(rest) = key.strip_prefix(prefix).and_then(|k| k.strip_prefix("__")) else {
            // MENSURA_FOO and friends belong to someone else
            return Ok(());
        };
        let parts: Vec<&str> = rest.split("__").collect();
        let config = &mut self.config;

        match parts.as_slice() {
            ["SERVER", "HTTP_ADDR"] => config.server.http_addr = value.to_string(),
            ["SERVER", "MOUNT_PREFIX"] => config.server.mount_prefix = value.to_string(),
            ["SERVER", "SHUTDOWN_TIMEOUT_SECS"] => {
                config.server.shutdown_timeout_secs = parse_number(key, value)?;
            }
            ["SERVER", "REQUEST_TIMEOUT_MS"] => {
                config.server.request_timeout_ms = parse_number(key, value)?;
            }
            ["SERVER", "MAX_BODY_BYTES"] => {
                config.server.max_body_bytes = parse_number(key, value)?;
            }
            ["SERVER", "TRUST_REQUEST_ID"] => {
                config.server.trust_request_id = parse_flag(key, value)?;
            }

            ["ASSETS", "STATIC_DIR"] => {
                config.assets.static_dir = (!value.is_empty()).then(|| value.to_string());
            }
            ["ASSETS", "CACHE_CONTROL"] => config.assets.cache_control = value.to_string(),

            ["GUARD", "MARKER_HEADER"] => config.guard.marker_header = value.to_string(),
            ["GUARD", "ALLOW_LIST"] => {
                config.guard.allow_list = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }

            ["DOCS", "ENABLED"] => config.docs.enabled = parse_flag(key, value)?,
            ["DOCS", "TITLE"] => config.docs.title = value.to_string(),

            ["TELEMETRY", "SERVICE_NAME"] => config.telemetry.service_name = value.to_string(),
            ["TELEMETRY", "LOGGING", "ENABLED"] => {
                config.telemetry.logging.enabled = parse_flag(key, value)?;
            }
            ["TELEMETRY", "LOGGING", "LEVEL"] => {
                config.telemetry.logging.level = value.to_string();
            }
            ["TELEMETRY", "LOGGING", "FORMAT"] => {
                config.telemetry.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["TELEMETRY", "LOGGING", "INCLUDE_LOCATION"] => {
                config.telemetry.logging.include_location = parse_flag(key, value)?;
            }
            ["TELEMETRY", "METRICS", "ENABLED"] => {
                config.telemetry.metrics.enabled = parse_flag(key, value)?;
            }

            _ => return Err(ConfigError::env_parse_error(key, "unknown configuration key")),
        }

        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::env_parse_error(key, "expected boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn apply(pairs: &[(&str, &str)]) -> Result<MensuraConfig, ConfigError> {
        let mut loader = ConfigLoader::new();
        for (key, value) in pairs {
            loader.apply_env_var(key, value, "MENSURA")?;
        }
        Ok(loader.config)
    }

    #[test]
    fn test_loads_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
http_addr = "0.0.0.0:9000"
mount_prefix = "/hx"
trust_request_id = true

[guard]
allow_list = ["/docs"]

[telemetry.logging]
format = "pretty"
"#
        )
        .unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert_eq!(config.server.http_addr, "0.0.0.0:9000");
        assert_eq!(config.server.mount_prefix, "/hx");
        assert!(config.server.trust_request_id);
        assert_eq!(config.guard.allow_list, vec!["/docs"]);
        assert_eq!(config.guard.marker_header, "HX-Request");
        assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_loads_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"docs": {{"enabled": false, "title": "Units"}}}}"#).unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert!(!config.docs.enabled);
        assert_eq!(config.docs.title, "Units");
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        let err = ConfigLoader::new().with_file("/nonexistent/mensura.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));

        assert!(ConfigLoader::new()
            .with_optional_file("/nonexistent/mensura.toml")
            .is_ok());

        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_unknown_field_in_file_rejected() {
        let err = ConfigLoader::new()
            .with_string("[server]\nport = 80\n", "toml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn test_invalid_file_values_fail_validation() {
        let err = ConfigLoader::new()
            .with_string(r#"{"server": {"mount_prefix": "hx"}}"#, "json")
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let config = apply(&[
            ("MENSURA__SERVER__HTTP_ADDR", "0.0.0.0:8080"),
            ("MENSURA__SERVER__MOUNT_PREFIX", "/hx"),
            ("MENSURA__SERVER__MAX_BODY_BYTES", "1024"),
            ("MENSURA__SERVER__TRUST_REQUEST_ID", "yes"),
            ("MENSURA__ASSETS__STATIC_DIR", ""),
            ("MENSURA__GUARD__ALLOW_LIST", "/docs, /openapi.json"),
            ("MENSURA__DOCS__ENABLED", "off"),
            ("MENSURA__TELEMETRY__LOGGING__FORMAT", "Pretty"),
            ("MENSURA__TELEMETRY__METRICS__ENABLED", "0"),
        ])
        .unwrap();

        assert_eq!(config.server.http_addr, "0.0.0.0:8080");
        assert_eq!(config.server.mount_prefix, "/hx");
        assert_eq!(config.server.max_body_bytes, 1024);
        assert!(config.server.trust_request_id);
        assert_eq!(config.assets.static_dir, None);
        assert_eq!(config.guard.allow_list, vec!["/docs", "/openapi.json"]);
        assert!(!config.docs.enabled);
        assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
        assert!(!config.telemetry.metrics.enabled);
    }

    #[test]
    fn test_env_parse_errors() {
        let err = apply(&[("MENSURA__SERVER__REQUEST_TIMEOUT_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { .. }));

        let err = apply(&[("MENSURA__DOCS__ENABLED", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { .. }));

        let err = apply(&[("MENSURA__SERVER__PORT", "80")]).unwrap_err();
        assert!(err.to_string().contains("unknown configuration key"));
    }

    #[test]
    fn test_foreign_variables_ignored() {
        assert!(apply(&[("MENSURA_HOME", "/opt/mensura")]).is_ok());
    }
}
