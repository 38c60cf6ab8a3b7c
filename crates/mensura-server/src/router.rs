//! Route table.
//!
//! Paths are matched after the mount prefix has been removed. Fragment
//! routes and the documentation routes are guarded; everything else passes
//! the guard-free pipeline.

use http::Method;

/// Every route Mensura serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `GET /`
    Index,
    /// `GET /suggestions`
    Suggestions,
    /// `POST /convert`
    Convert,
    /// `POST /json/convert`
    JsonConvert,
    /// `GET /docs`
    SwaggerUi,
    /// `GET /redoc`
    ReDoc,
    /// `GET /openapi.json`
    OpenApi,
    /// `GET|HEAD /static/{path}`
    Static,
    /// `GET /health`
    Health,
    /// `GET /ready`
    Ready,
    /// `GET /metrics`
    Metrics,
}

impl Route {
    /// Name used in logs and metric labels.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Suggestions => "suggestions",
            Self::Convert => "convert",
            Self::JsonConvert => "json_convert",
            Self::SwaggerUi => "docs",
            Self::ReDoc => "redoc",
            Self::OpenApi => "openapi",
            Self::Static => "static",
            Self::Health => "health",
            Self::Ready => "ready",
            Self::Metrics => "metrics",
        }
    }

    /// Whether the access guard runs in front of this route.
    #[must_use]
    pub const fn guarded(self) -> bool {
        matches!(
            self,
            Self::Suggestions | Self::Convert | Self::SwaggerUi | Self::ReDoc | Self::OpenApi
        )
    }

    fn allows(self, method: &Method) -> bool {
        match self {
            Self::Convert | Self::JsonConvert => method == Method::POST,
            Self::Index | Self::Static => method == Method::GET || method == Method::HEAD,
            _ => method == Method::GET,
        }
    }

    fn allowed_methods(self) -> &'static str {
        match self {
            Self::Convert | Self::JsonConvert => "POST",
            Self::Index | Self::Static => "GET, HEAD",
            _ => "GET",
        }
    }
}

/// Outcome of [`Router::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The path and method match a route.
    Matched(Route),
    /// The path exists but not for this method; carries the `Allow` value.
    MethodNotAllowed(&'static str),
    /// No route has this path.
    NotFound,
}

/// Maps a method and a prefix-relative path to a [`Route`].
///
/// ```
/// use http::Method;
/// use mensura_server::{Resolution, Route, Router};
///
/// let router = Router::new(true, true);
/// assert_eq!(router.resolve(&Method::POST, "/convert"), Resolution::Matched(Route::Convert));
/// assert_eq!(router.resolve(&Method::GET, "/convert"), Resolution::MethodNotAllowed("POST"));
/// assert_eq!(router.resolve(&Method::GET, "/nope"), Resolution::NotFound);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Router {
    docs: bool,
    assets: bool,
}

impl Router {
    /// Creates a router; `docs` and `assets` switch the optional routes on.
    #[must_use]
    pub const fn new(docs: bool, assets: bool) -> Self {
        Self { docs, assets }
    }

    /// Resolves a request.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution {
        let route = match path {
            "/" => Route::Index,
            "/suggestions" => Route::Suggestions,
            "/convert" => Route::Convert,
            "/json/convert" => Route::JsonConvert,
            "/docs" if self.docs => Route::SwaggerUi,
            "/redoc" if self.docs => Route::ReDoc,
            "/openapi.json" if self.docs => Route::OpenApi,
            "/health" => Route::Health,
            "/ready" => Route::Ready,
            "/metrics" => Route::Metrics,
            p if self.assets && static_path(p).is_some() => Route::Static,
            _ => return Resolution::NotFound,
        };

        if route.allows(method) {
            Resolution::Matched(route)
        } else {
            Resolution::MethodNotAllowed(route.allowed_methods())
        }
    }
}

/// The asset path of a `/static/...` request, without the `/static` segment.
#[must_use]
pub fn static_path(path: &str) -> Option<&str> {
    path.strip_prefix("/static")
        .filter(|rest| rest.starts_with('/') && rest.len() > 1)
}
