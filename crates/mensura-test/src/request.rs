//! Test request building.

use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, Uri};
use http_body_util::Full;
use serde::Serialize;

use crate::error::TestError;

/// Header the access guard looks for unless configured otherwise.
pub const DEFAULT_MARKER_HEADER: &str = "HX-Request";

/// A fully built request.
#[derive(Debug, Clone)]
pub struct TestRequest {
    /// HTTP method
    pub method: Method,
    /// Request URI
    pub uri: Uri,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Bytes,
}

impl TestRequest {
    /// Starts a GET request.
    pub fn get(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::GET, uri)
    }

    /// Starts a POST request.
    pub fn post(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::POST, uri)
    }

    /// Starts a HEAD request.
    pub fn head(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::HEAD, uri)
    }

    /// Converts into the request type the application handles.
    pub fn into_http_request(self) -> Result<http::Request<Full<Bytes>>, TestError> {
        let mut request = http::Request::builder()
            .method(self.method)
            .uri(self.uri)
            .body(Full::new(self.body))
            .map_err(|e| TestError::RequestBuild(e.to_string()))?;
        *request.headers_mut() = self.headers;
        Ok(request)
    }
}

/// Builder for [`TestRequest`].
///
/// Errors from header values or body encoding are kept until
/// [`build`](Self::build), so calls chain without `?`.
#[derive(Debug)]
#[must_use]
pub struct TestRequestBuilder {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Option<Bytes>,
    error: Option<TestError>,
}

impl TestRequestBuilder {
    /// Creates a builder.
    pub fn new(method: Method, uri: impl AsRef<str>) -> Self {
        Self {
            method,
            uri: uri.as_ref().to_string(),
            headers: HeaderMap::new(),
            body: None,
            error: None,
        }
    }

    /// Sets a header, replacing any previous value.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = HeaderName::try_from(name.as_ref());
        let value = HeaderValue::try_from(value.as_ref());
        match (name, value) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            (Err(e), _) => self.fail(TestError::InvalidHeader(e.to_string())),
            (_, Err(e)) => self.fail(TestError::InvalidHeader(e.to_string())),
        }
        self
    }

    /// Adds the marker header fragment requests carry.
    pub fn marker(self) -> Self {
        self.header(DEFAULT_MARKER_HEADER, "true")
    }

    /// Sets `Content-Type`.
    pub fn content_type(self, content_type: impl AsRef<str>) -> Self {
        self.header(header::CONTENT_TYPE.as_str(), content_type)
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a JSON body and `Content-Type: application/json`.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.body = Some(Bytes::from(bytes)),
            Err(e) => self.fail(e.into()),
        }
        self.content_type("application/json")
    }

    /// Sets a form-urlencoded body, as the converter page submits it.
    ///
    /// ```
    /// use mensura_test::TestRequest;
    ///
    /// let request = TestRequest::post("/convert")
    ///     .form(&[("quantity", "1"), ("from_unit", "meter"), ("to_unit", "foot")])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(&request.body[..], b"quantity=1&from_unit=meter&to_unit=foot");
    /// ```
    pub fn form<T: Serialize>(mut self, value: &T) -> Self {
        match serde_urlencoded::to_string(value) {
            Ok(encoded) => self.body = Some(Bytes::from(encoded)),
            Err(e) => self.fail(e.into()),
        }
        self.content_type("application/x-www-form-urlencoded")
    }

    /// Builds the request, reporting the first error met while building.
    pub fn build(self) -> Result<TestRequest, TestError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let uri: Uri = self
            .uri
            .parse()
            .map_err(|e| TestError::RequestBuild(format!("Invalid URI: {e}")))?;

        Ok(TestRequest {
            method: self.method,
            uri,
            headers: self.headers,
            body: self.body.unwrap_or_default(),
        })
    }

    fn fail(&mut self, error: TestError) {
        self.error.get_or_insert(error);
    }
}
