//! Request id assignment.
//!
//! Every response carries an `x-request-id` header. By default a new UUID v7
//! is generated for each request; [`RequestIdMiddleware::trust_incoming`]
//! reuses a valid id sent by the client instead.

use crate::context::{MiddlewareContext, RequestId};
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{Request, Response};
use http::HeaderValue;
use uuid::Uuid;

/// The header name for request id propagation.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates or adopts request ids.
#[derive(Debug, Clone, Default)]
pub struct RequestIdMiddleware {
    trust_incoming: bool,
}

impl RequestIdMiddleware {
    /// Always generates a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts a well-formed incoming `x-request-id` when present.
    #[must_use]
    pub fn trust_incoming() -> Self {
        Self {
            trust_incoming: true,
        }
    }

    fn extract_request_id(&self, request: &Request) -> Option<RequestId> {
        if !self.trust_incoming {
            return None;
        }

        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(RequestId::from_uuid)
    }
}

impl Middleware for RequestIdMiddleware {
    fn name(&self) -> &'static str {
        "request_id"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut MiddlewareContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            let request_id = self
                .extract_request_id(&request)
                .unwrap_or_else(RequestId::new);
            ctx.set_request_id(request_id);

            let mut response = next.run(ctx, request).await;

            if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                response.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            response
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{Request as HttpRequest, Response as HttpResponse, StatusCode};
    use http_body_util::Full;

    fn convert_request(request_id: Option<&str>) -> Request {
        let mut builder = HttpRequest::builder().uri("/json/convert");
        if let Some(id) = request_id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        builder.body(Full::new(Bytes::new())).unwrap()
    }

    fn ok_handler(
    ) -> impl FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, Response> {
        |_ctx, _req| {
            Box::pin(async {
                HttpResponse::builder()
                    .status(StatusCode::OK)
                    .body(Full::new(Bytes::from("OK")))
                    .unwrap()
            })
        }
    }

    async fn response_id(middleware: &RequestIdMiddleware, incoming: Option<&str>) -> (String, MiddlewareContext) {
        let mut ctx = MiddlewareContext::new();
        let response = middleware
            .process(&mut ctx, convert_request(incoming), Next::handler(ok_handler()))
            .await;
        let id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        (id, ctx)
    }

    #[tokio::test]
    async fn test_generates_request_id_when_missing() {
        let (header_id, ctx) = response_id(&RequestIdMiddleware::new(), None).await;
        assert!(Uuid::parse_str(&header_id).is_ok());
        assert_eq!(ctx.request_id().to_string(), header_id);
    }

    #[tokio::test]
    async fn test_ignores_incoming_id_when_not_trusted() {
        let incoming = "01234567-89ab-7def-8123-456789abcdef";
        let (header_id, _) = response_id(&RequestIdMiddleware::new(), Some(incoming)).await;
        assert_ne!(header_id, incoming);
    }

    #[tokio::test]
    async fn test_uses_incoming_id_when_trusted() {
        let incoming = "01234567-89ab-7def-8123-456789abcdef";
        let (header_id, ctx) = response_id(&RequestIdMiddleware::trust_incoming(), Some(incoming)).await;
        assert_eq!(header_id, incoming);
        assert_eq!(ctx.request_id().to_string(), incoming);
    }

    #[tokio::test]
    async fn test_ignores_invalid_incoming_id() {
        let (header_id, _) =
            response_id(&RequestIdMiddleware::trust_incoming(), Some("not-a-valid-uuid")).await;
        assert_ne!(header_id, "not-a-valid-uuid");
        assert!(Uuid::parse_str(&header_id).is_ok());
    }
}
