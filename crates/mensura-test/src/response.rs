//! Collected responses with assertion helpers.

use std::fmt;

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use http_body_util::BodyExt;
use mensura_middleware::stages::REQUEST_ID_HEADER;
use mensura_middleware::Response;
use serde::de::DeserializeOwned;

use crate::error::TestError;

/// A response whose body has been read.
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    /// Reads the body of an application response.
    pub async fn from_http(response: Response) -> Result<Self, TestError> {
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| TestError::BodyRead(e.to_string()))?
            .to_bytes();

        Ok(Self {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }

    /// Creates a response from parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// The status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The status code as a number.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// The headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A header value.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers.get(name.as_ref())
    }

    /// A header value as text.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// `Content-Type`, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE.as_str())
    }

    /// The id the request id stage assigned.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header_str(REQUEST_ID_HEADER)
    }

    /// The raw body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body as UTF-8 text.
    pub fn text(&self) -> Result<String, TestError> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| TestError::BodyRead(format!("Invalid UTF-8: {e}")))
    }

    /// The body deserialized from JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// The body as a JSON value.
    pub fn json_value(&self) -> Result<serde_json::Value, TestError> {
        self.json()
    }

    /// `error.code` of a JSON error envelope.
    #[must_use]
    pub fn error_code(&self) -> Option<String> {
        let value = self.json_value().ok()?;
        json_path(&value, "error.code")?.as_str().map(String::from)
    }

    /// Asserts the status code.
    ///
    /// # Panics
    ///
    /// Panics on mismatch, printing the body.
    pub fn assert_status_code(&self, expected: u16) -> &Self {
        assert_eq!(
            self.status.as_u16(),
            expected,
            "Expected status {expected}, got {}: {}",
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// Asserts a header value.
    ///
    /// # Panics
    ///
    /// Panics when the header is missing or differs.
    pub fn assert_header(&self, name: impl AsRef<str>, expected: impl AsRef<str>) -> &Self {
        let name = name.as_ref();
        let expected = expected.as_ref();
        let actual = self
            .header_str(name)
            .unwrap_or_else(|| panic!("Header '{name}' not found"));
        assert_eq!(actual, expected, "Header '{name}'");
        self
    }

    /// Asserts that `Content-Type` starts with `expected`.
    ///
    /// # Panics
    ///
    /// Panics when `Content-Type` is missing or differs.
    pub fn assert_content_type(&self, expected: impl AsRef<str>) -> &Self {
        let expected = expected.as_ref();
        let actual = self.content_type().unwrap_or("<none>");
        assert!(
            actual.starts_with(expected),
            "Content-Type: expected '{expected}', got '{actual}'"
        );
        self
    }

    /// Asserts that the body contains `expected`.
    ///
    /// # Panics
    ///
    /// Panics when it does not.
    pub fn assert_body_contains(&self, expected: impl AsRef<str>) -> &Self {
        let expected = expected.as_ref();
        let body = String::from_utf8_lossy(&self.body);
        assert!(
            body.contains(expected),
            "Body should contain '{expected}', got: {body}"
        );
        self
    }

    /// Asserts the whole body.
    ///
    /// # Panics
    ///
    /// Panics on mismatch.
    pub fn assert_body_eq(&self, expected: impl AsRef<str>) -> &Self {
        assert_eq!(String::from_utf8_lossy(&self.body), expected.as_ref(), "Body mismatch");
        self
    }

    /// Asserts a field of a JSON body, addressed as `a.b.0`.
    ///
    /// # Panics
    ///
    /// Panics when the body is not JSON, the path is missing or the value differs.
    pub fn assert_json_field(&self, path: impl AsRef<str>, expected: &serde_json::Value) -> &Self {
        let path = path.as_ref();
        let json = match self.json_value() {
            Ok(json) => json,
            Err(e) => panic!("Body is not JSON ({e}): {}", String::from_utf8_lossy(&self.body)),
        };
        let actual = json_path(&json, path)
            .unwrap_or_else(|| panic!("JSON path '{path}' not found in {json}"));
        assert_eq!(actual, expected, "JSON field '{path}'");
        self
    }

    /// Asserts a JSON error envelope with `code`.
    ///
    /// # Panics
    ///
    /// Panics when the body is not an envelope or the code differs.
    pub fn assert_error_code(&self, code: &str) -> &Self {
        assert_eq!(
            self.error_code().as_deref(),
            Some(code),
            "Error code mismatch, body: {}",
            String::from_utf8_lossy(&self.body)
        );
        self
    }
}

impl fmt::Debug for TestResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

fn json_path<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(value, |current, segment| match segment.parse::<usize>() {
            Ok(index) => current.get(index),
            Err(_) => current.get(segment),
        })
}
