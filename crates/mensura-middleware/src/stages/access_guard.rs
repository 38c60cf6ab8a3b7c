//! Marker-header access guard.
//!
//! Fragment routes are meant to be requested by the page's own scripts,
//! which send a marker header (`HX-Request`). A request without it is
//! answered with `403 Cannot process this request`, unless its path is on
//! the allow-list. This keeps casual navigation away from fragment URLs; it
//! is not authentication.

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{Request, Response, ResponseExt};
use http::header::{HeaderName, InvalidHeaderName};
use http::StatusCode;
use mensura_telemetry::metrics::record_guard_rejection;

/// Body of the 403 response.
pub const ACCESS_DENIED_MESSAGE: &str = "Cannot process this request";

/// Strips `prefix` from `path` by whole path segments.
///
/// An empty prefix strips nothing. Returns `None` when `path` is not under
/// `prefix`: `/hxdocs` is not under `/hx`.
///
/// ```
/// use mensura_middleware::stages::strip_mount_prefix;
///
/// assert_eq!(strip_mount_prefix("/hx/docs", "/hx"), Some("/docs"));
/// assert_eq!(strip_mount_prefix("/hx", "/hx"), Some("/"));
/// assert_eq!(strip_mount_prefix("/hxdocs", "/hx"), None);
/// assert_eq!(strip_mount_prefix("/docs", ""), Some("/docs"));
/// ```
#[must_use]
pub fn strip_mount_prefix<'p>(path: &'p str, prefix: &str) -> Option<&'p str> {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return Some(path);
    }

    match path.strip_prefix(prefix)? {
        "" => Some("/"),
        rest if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

/// Rejects requests that lack the marker header and are not allow-listed.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    marker_header: HeaderName,
    allow_list: Vec<String>,
    mount_prefix: String,
}

impl AccessGuard {
    /// Creates a guard keyed on `marker_header` with an empty allow-list.
    pub fn new(marker_header: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            marker_header: HeaderName::from_bytes(marker_header.as_bytes())?,
            allow_list: Vec::new(),
            mount_prefix: String::new(),
        })
    }

    /// Adds paths, relative to the mount prefix, that pass without the header.
    #[must_use]
    pub fn allow<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Sets the deployment mount prefix, e.g. `/hx`.
    #[must_use]
    pub fn mount_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.mount_prefix = prefix.into();
        self
    }

    /// The header whose presence admits a request.
    #[must_use]
    pub fn marker_header(&self) -> &HeaderName {
        &self.marker_header
    }

    /// Returns `true` when `path` passes without the marker header.
    #[must_use]
    pub fn is_allow_listed(&self, path: &str) -> bool {
        strip_mount_prefix(path, &self.mount_prefix)
            .is_some_and(|relative| self.allow_list.iter().any(|entry| entry == relative))
    }

    /// Returns `true` when `request` may proceed.
    #[must_use]
    pub fn admits(&self, request: &Request) -> bool {
        request.headers().contains_key(&self.marker_header)
            || self.is_allow_listed(request.uri().path())
    }
}

impl Middleware for AccessGuard {
    fn name(&self) -> &'static str {
        "access_guard"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut MiddlewareContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            if self.admits(&request) {
                return next.run(ctx, request).await;
            }

            let route = ctx.route().unwrap_or("unmatched");
            tracing::debug!(
                request_id = %ctx.request_id(),
                path = %request.uri().path(),
                route,
                header = %self.marker_header,
                "Request rejected without marker header"
            );
            record_guard_rejection(route);
            Response::error(StatusCode::FORBIDDEN, ACCESS_DENIED_MESSAGE)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{Request as HttpRequest, Response as HttpResponse};
    use http_body_util::{BodyExt, Full};

    fn guard() -> AccessGuard {
        AccessGuard::new("HX-Request")
            .unwrap()
            .allow(["/docs", "/redoc", "/openapi.json"])
            .mount_prefix("/hx")
    }

    fn request(path: &str, marker: Option<&str>) -> Request {
        let mut builder = HttpRequest::builder().uri(path);
        if let Some(value) = marker {
            builder = builder.header("hx-request", value);
        }
        builder.body(Full::new(Bytes::new())).unwrap()
    }

    async fn run(guard: &AccessGuard, request: Request) -> (StatusCode, String) {
        let mut ctx = MiddlewareContext::new();
        let next = Next::handler(|_ctx, _req| {
            Box::pin(async {
                HttpResponse::builder()
                    .status(StatusCode::OK)
                    .body(Full::new(Bytes::from("fragment")))
                    .unwrap()
            })
        });
        let response = guard.process(&mut ctx, request, next).await;
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_strip_mount_prefix() {
        assert_eq!(strip_mount_prefix("/hx/suggestions", "/hx"), Some("/suggestions"));
        assert_eq!(strip_mount_prefix("/hx/suggestions", "/hx/"), Some("/suggestions"));
        assert_eq!(strip_mount_prefix("/hx", "/hx"), Some("/"));
        assert_eq!(strip_mount_prefix("/hxx/docs", "/hx"), None);
        assert_eq!(strip_mount_prefix("/other/docs", "/hx"), None);
        assert_eq!(strip_mount_prefix("/docs", "/"), Some("/docs"));
    }

    #[test]
    fn test_invalid_marker_header() {
        assert!(AccessGuard::new("not a header").is_err());
    }

    #[tokio::test]
    async fn test_marker_header_admits_any_value() {
        let guard = guard();
        for value in ["true", "", "false"] {
            let (status, body) = run(&guard, request("/hx/suggestions", Some(value))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "fragment");
        }
    }

    #[tokio::test]
    async fn test_missing_marker_is_forbidden() {
        let (status, body) = run(&guard(), request("/hx/suggestions", None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, ACCESS_DENIED_MESSAGE);
    }

    #[tokio::test]
    async fn test_allow_list_bypasses_marker() {
        let guard = guard();
        for path in ["/hx/docs", "/hx/redoc", "/hx/openapi.json"] {
            let (status, _) = run(&guard, request(path, None)).await;
            assert_eq!(status, StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn test_allow_list_matches_whole_paths_only() {
        let guard = guard();
        for path in ["/hx/docs/extra", "/hxdocs", "/docs", "/hx/doc"] {
            let (status, _) = run(&guard, request(path, None)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{path}");
        }
    }

    #[tokio::test]
    async fn test_rejection_carries_text_plain() {
        let mut ctx = MiddlewareContext::new();
        ctx.set_route("convert");
        let next = Next::handler(|_ctx, _req| {
            Box::pin(async { HttpResponse::new(Full::new(Bytes::new())) })
        });
        let response = guard().process(&mut ctx, request("/hx/convert", None), next).await;
        assert_eq!(
            response.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
