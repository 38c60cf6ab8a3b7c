//! Request body and query decoding.
//!
//! Malformed input (missing fields, a non-numeric quantity, bad JSON) is an
//! [`ExtractionError`], answered with `422`.

use std::fmt;

use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Where the malformed input was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    /// The query string.
    Query,
    /// A form-encoded body.
    Form,
    /// A JSON body.
    Json,
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Form => write!(f, "form"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

/// Input that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {location} input: {message}")]
pub struct ExtractionError {
    location: ExtractionSource,
    message: String,
}

impl ExtractionError {
    /// Creates an error.
    pub fn new(location: ExtractionSource, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }

    /// Where the input came from.
    #[must_use]
    pub fn location(&self) -> ExtractionSource {
        self.location
    }

    /// `422 Unprocessable Entity`.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    /// Machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self.location {
            ExtractionSource::Query => "INVALID_QUERY",
            ExtractionSource::Form => "INVALID_FORM",
            ExtractionSource::Json => "INVALID_JSON",
        }
    }
}

/// Decodes an `application/x-www-form-urlencoded` body.
pub fn form<T: DeserializeOwned>(body: &Bytes) -> Result<T, ExtractionError> {
    if body.is_empty() {
        return Err(ExtractionError::new(ExtractionSource::Form, "empty request body"));
    }
    serde_urlencoded::from_bytes(body)
        .map_err(|e| ExtractionError::new(ExtractionSource::Form, e.to_string()))
}

/// Decodes a JSON body.
pub fn json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ExtractionError> {
    if body.is_empty() {
        return Err(ExtractionError::new(ExtractionSource::Json, "empty request body"));
    }
    serde_json::from_slice(body).map_err(|e| ExtractionError::new(ExtractionSource::Json, e.to_string()))
}

/// Query of `GET /suggestions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SuggestionQuery {
    /// Partial source unit name.
    #[serde(default)]
    pub from_unit: Option<String>,
    /// Partial target unit name.
    #[serde(default)]
    pub to_unit: Option<String>,
}

impl SuggestionQuery {
    /// Decodes a query string; an absent query decodes like an empty one.
    ///
    /// A repeated key keeps its last value and unrelated keys are ignored, so
    /// any well-formed query yields a suggestion list.
    ///
    /// ```
    /// use mensura_server::extract::SuggestionQuery;
    ///
    /// let q = SuggestionQuery::parse(Some("from_unit=met&from_unit=sec")).unwrap();
    /// assert_eq!(q.search(), ("from_unit", Some("sec")));
    /// ```
    pub fn parse(query: Option<&str>) -> Result<Self, ExtractionError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.unwrap_or(""))
            .map_err(|e| ExtractionError::new(ExtractionSource::Query, e.to_string()))?;

        Ok(pairs
            .into_iter()
            .fold(Self::default(), |mut q, (key, value)| {
                match key.as_str() {
                    "from_unit" => q.from_unit = Some(value),
                    "to_unit" => q.to_unit = Some(value),
                    _ => {}
                }
                q
            }))
    }

    /// The field to search on and its value.
    ///
    /// A non-empty `from_unit` wins; otherwise `to_unit`, which may itself be
    /// empty or absent.
    ///
    /// ```
    /// use mensura_server::extract::SuggestionQuery;
    ///
    /// let q = SuggestionQuery { from_unit: Some(String::new()), to_unit: Some("met".into()) };
    /// assert_eq!(q.search(), ("to_unit", Some("met")));
    /// ```
    #[must_use]
    pub fn search(&self) -> (&'static str, Option<&str>) {
        match self.from_unit.as_deref() {
            Some(from) if !from.is_empty() => ("from_unit", Some(from)),
            _ => match self.to_unit.as_deref() {
                Some(to) => ("to_unit", Some(to)),
                None => ("from_unit", self.from_unit.as_deref()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensura_core::ConversionRequest;

    #[test]
    fn test_form_request() {
        let body = Bytes::from_static(b"quantity=2.5&from_unit=nautical+mile&to_unit=meter");
        let request: ConversionRequest = form(&body).unwrap();
        assert_eq!(request, ConversionRequest::new(2.5, "nautical mile", "meter"));
    }

    #[test]
    fn test_malformed_form() {
        let err = form::<ConversionRequest>(&Bytes::from_static(b"quantity=abc&from_unit=m&to_unit=m"))
            .unwrap_err();
        assert_eq!(err.location(), ExtractionSource::Form);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "INVALID_FORM");

        let err = form::<ConversionRequest>(&Bytes::from_static(b"quantity=1&from_unit=m"))
            .unwrap_err();
        assert!(err.to_string().contains("to_unit"));

        assert!(form::<ConversionRequest>(&Bytes::new()).is_err());
    }

    #[test]
    fn test_json_request() {
        let body = Bytes::from_static(br#"{"quantity": 1, "from_unit": "meter", "to_unit": "foot"}"#);
        let request: ConversionRequest = json(&body).unwrap();
        assert_eq!(request, ConversionRequest::new(1.0, "meter", "foot"));

        let err = json::<ConversionRequest>(&Bytes::from_static(br#"{"quantity": "one"}"#))
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_JSON");
    }

    #[test]
    fn test_suggestion_query_precedence() {
        fn parse(raw: Option<&str>) -> (&'static str, Option<String>) {
            let q = SuggestionQuery::parse(raw).unwrap();
            let (field, value) = q.search();
            (field, value.map(String::from))
        }

        assert_eq!(parse(Some("from_unit=met&to_unit=sec")), ("from_unit", Some("met".into())));
        assert_eq!(parse(Some("from_unit=&to_unit=sec")), ("to_unit", Some("sec".into())));
        assert_eq!(parse(Some("to_unit=degree+Celsius")), ("to_unit", Some("degree Celsius".into())));
        assert_eq!(parse(None), ("from_unit", None));
        assert_eq!(parse(Some("from_unit=")), ("from_unit", Some(String::new())));
    }

    #[test]
    fn test_repeated_query_keys_keep_last_value() {
        let q = SuggestionQuery::parse(Some("from_unit=met&from_unit=x")).unwrap();
        assert_eq!(q.search(), ("from_unit", Some("x")));

        let q = SuggestionQuery::parse(Some("to_unit=a&to_unit=&from_unit=")).unwrap();
        assert_eq!(q.search(), ("to_unit", Some("")));
    }

    #[test]
    fn test_unrelated_query_keys_ignored() {
        let q = SuggestionQuery::parse(Some("page=2&to_unit=foot&_=1700000000")).unwrap();
        assert_eq!(q, SuggestionQuery { from_unit: None, to_unit: Some("foot".into()) });
    }
}
