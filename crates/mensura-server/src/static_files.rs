//! Read-only static assets under `/static`.
//!
//! Paths are resolved inside a root directory: `..` segments, hidden files
//! and symlinks leading outside the root are refused. Responses carry
//! `ETag`, `Last-Modified` and `Cache-Control`, and conditional requests
//! are answered with `304`.

use std::collections::hash_map::DefaultHasher;
use std::fs::Metadata;
use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::{HeaderMap, Method, StatusCode};
use http_body_util::Full;
use mensura_middleware::Response;
use thiserror::Error;

/// Errors raised while serving an asset.
#[derive(Debug, Error)]
pub enum StaticFileError {
    /// No such file.
    #[error("File not found: {0}")]
    NotFound(String),

    /// The path tried to leave the root or name a hidden file.
    #[error("Forbidden path: {0}")]
    Forbidden(String),

    /// Anything but `GET` or `HEAD`.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StaticFileError {
    /// Status code for the error response.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code for the JSON error body.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::Io(_) => "INTERNAL_ERROR",
        }
    }
}

/// Serves files from one directory.
///
/// ```
/// use mensura_server::StaticFiles;
///
/// let files = StaticFiles::new("static").cache_control("public, max-age=60");
/// assert_eq!(files.root().to_str(), Some("static"));
/// ```
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    cache_control: Option<String>,
}

impl StaticFiles {
    /// Serves files below `root`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cache_control: None,
        }
    }

    /// Sets the `Cache-Control` value sent with every asset.
    #[must_use]
    pub fn cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Answers a request for `request_path`, relative to the root.
    pub fn handle(
        &self,
        request_path: &str,
        headers: &HeaderMap,
        method: &Method,
    ) -> Result<Response, StaticFileError> {
        if method != Method::GET && method != Method::HEAD {
            return Err(StaticFileError::MethodNotAllowed);
        }

        let path = self.resolve_path(request_path)?;
        if !path.is_file() {
            return Err(StaticFileError::NotFound(request_path.to_string()));
        }

        let metadata = std::fs::metadata(&path)?;
        let modified = metadata.modified().ok();
        let etag = etag(&metadata, &path);

        if is_fresh(headers, etag.as_deref(), modified) {
            return Ok(self.not_modified(etag.as_deref()));
        }

        let body = if method == Method::HEAD {
            Bytes::new()
        } else {
            Bytes::from(std::fs::read(&path)?)
        };

        let mut response = Response::new(Full::new(body));
        let response_headers = response.headers_mut();
        response_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(mime_type(&path)),
        );
        response_headers.insert(header::CONTENT_LENGTH, HeaderValue::from(metadata.len()));
        self.insert_cache_headers(response_headers, etag.as_deref());
        if let Some(modified) = modified {
            if let Ok(value) = HeaderValue::from_str(&httpdate::fmt_http_date(modified)) {
                response_headers.insert(header::LAST_MODIFIED, value);
            }
        }

        Ok(response)
    }

    fn resolve_path(&self, request_path: &str) -> Result<PathBuf, StaticFileError> {
        let relative = request_path.trim_start_matches('/');

        for component in Path::new(relative).components() {
            match component {
                Component::Normal(name) => {
                    if name.to_str().is_some_and(|n| n.starts_with('.')) {
                        return Err(StaticFileError::Forbidden(request_path.to_string()));
                    }
                }
                Component::CurDir => {}
                _ => return Err(StaticFileError::Forbidden(request_path.to_string())),
            }
        }

        let canonical = self
            .root
            .join(relative)
            .canonicalize()
            .map_err(|_| StaticFileError::NotFound(request_path.to_string()))?;
        let root = self.root.canonicalize()?;

        if canonical.starts_with(&root) {
            Ok(canonical)
        } else {
            Err(StaticFileError::Forbidden(request_path.to_string()))
        }
    }

    fn insert_cache_headers(&self, headers: &mut HeaderMap, etag: Option<&str>) {
        if let Some(value) = etag.and_then(|e| HeaderValue::from_str(e).ok()) {
            headers.insert(header::ETAG, value);
        }
        if let Some(value) = self
            .cache_control
            .as_deref()
            .and_then(|c| HeaderValue::from_str(c).ok())
        {
            headers.insert(header::CACHE_CONTROL, value);
        }
    }

    fn not_modified(&self, etag: Option<&str>) -> Response {
        let mut response = Response::new(Full::new(Bytes::new()));
        *response.status_mut() = StatusCode::NOT_MODIFIED;
        self.insert_cache_headers(response.headers_mut(), etag);
        response
    }
}

/// Weak validator from mtime, size and path.
fn etag(metadata: &Metadata, path: &Path) -> Option<String> {
    let modified = metadata
        .modified()
        .ok()?
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()?;
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);

    Some(format!(
        "\"{:x}-{:x}-{:x}\"",
        modified.as_secs(),
        metadata.len(),
        hasher.finish() & 0xffff
    ))
}

/// `If-None-Match` wins over `If-Modified-Since` when both are sent.
fn is_fresh(headers: &HeaderMap, etag: Option<&str>, modified: Option<SystemTime>) -> bool {
    if let Some(if_none_match) = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
    {
        return if_none_match.trim() == "*"
            || etag.is_some_and(|etag| if_none_match.split(',').any(|t| t.trim() == etag));
    }

    let since = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| httpdate::parse_http_date(v).ok());

    match (since, modified) {
        (Some(since), Some(modified)) => {
            let secs = |t: SystemTime| {
                t.duration_since(SystemTime::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .ok()
            };
            matches!((secs(modified), secs(since)), (Some(m), Some(s)) if m <= s)
        }
        _ => false,
    }
}

fn mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "webmanifest" => "application/manifest+json",
        _ => "application/octet-stream",
    }
}
