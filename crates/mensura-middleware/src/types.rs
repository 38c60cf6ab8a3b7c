//! Request and response types shared by the pipeline and the handlers.

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use http_body_util::Full;
use serde::Serialize;

/// A request with its body fully collected.
pub type Request = http::Request<Full<Bytes>>;

/// A response with an in-memory body.
pub type Response = http::Response<Full<Bytes>>;

/// Content type of HTML pages and fragments.
pub const TEXT_HTML: &str = "text/html; charset=utf-8";

/// Content type of plain-text bodies.
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Content type of JSON bodies.
pub const APPLICATION_JSON: &str = "application/json";

/// Constructors for the response shapes Mensura produces.
pub trait ResponseExt {
    /// A `text/plain` response.
    fn error(status: StatusCode, message: &str) -> Response;

    /// A JSON error envelope: `{"error": {"code": .., "message": ..}}`.
    fn json_error(status: StatusCode, code: &str, message: &str) -> Response;

    /// An HTML page or fragment.
    fn html(status: StatusCode, body: impl Into<String>) -> Response;

    /// A JSON document.
    fn json<T: Serialize>(status: StatusCode, value: &T) -> Response;
}

impl ResponseExt for Response {
    fn error(status: StatusCode, message: &str) -> Response {
        with_body(status, TEXT_PLAIN, Bytes::from(message.to_string()))
    }

    fn json_error(status: StatusCode, code: &str, message: &str) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": code,
                "message": message
            }
        });
        with_body(status, APPLICATION_JSON, Bytes::from(body.to_string()))
    }

    fn html(status: StatusCode, body: impl Into<String>) -> Response {
        with_body(status, TEXT_HTML, Bytes::from(body.into()))
    }

    fn json<T: Serialize>(status: StatusCode, value: &T) -> Response {
        match serde_json::to_vec(value) {
            Ok(body) => with_body(status, APPLICATION_JSON, Bytes::from(body)),
            Err(e) => Self::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERIALIZATION_ERROR",
                &e.to_string(),
            ),
        }
    }
}

fn with_body(status: StatusCode, content_type: &'static str, body: Bytes) -> Response {
    let mut response = http::Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
