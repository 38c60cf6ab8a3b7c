//! The assembled application: shared state, routes and pipelines.
//!
//! [`App::handle`] turns a request with a collected body into a response
//! without touching the network, so the whole application can be driven
//! in memory.

use std::sync::Arc;

use bytes::Bytes;
use mensura_config::MensuraConfig;
use mensura_core::{ConversionEngine, UnitCatalog};
use mensura_docs::{OpenApiGenerator, ReDoc, SwaggerUi};
use mensura_middleware::stages::{
    strip_mount_prefix, AccessGuard, RequestIdMiddleware, TelemetryMiddleware,
};
use mensura_middleware::{Middleware, MiddlewareContext, Pipeline, Request, Response};
use mensura_units::UnitSystem;

use crate::error::{ServerError, ServerResult};
use crate::handlers;
use crate::health::{HealthCheck, ReadinessCheck};
use crate::html;
use crate::router::{Resolution, Router};
use crate::static_files::StaticFiles;

/// Pre-rendered documentation responses.
#[derive(Debug)]
pub(crate) struct DocsPages {
    pub(crate) swagger: Bytes,
    pub(crate) redoc: Bytes,
    pub(crate) openapi: Bytes,
}

/// Read-only state shared by every request.
#[derive(Debug)]
pub(crate) struct AppState {
    pub(crate) catalog: UnitCatalog,
    pub(crate) engine: ConversionEngine,
    pub(crate) index_html: Bytes,
    pub(crate) docs: Option<DocsPages>,
    pub(crate) static_files: Option<StaticFiles>,
    pub(crate) health: HealthCheck,
    pub(crate) readiness: ReadinessCheck,
    pub(crate) mount_prefix: String,
}

/// The Mensura application.
///
/// ```
/// use std::sync::Arc;
/// use mensura_config::MensuraConfig;
/// use mensura_server::App;
/// use mensura_units::UnitRegistry;
///
/// let app = App::new(&MensuraConfig::default(), Arc::new(UnitRegistry::new().unwrap())).unwrap();
/// assert!(app.catalog().contains("meter"));
/// ```
#[derive(Debug)]
pub struct App {
    state: Arc<AppState>,
    router: Router,
    public: Pipeline,
    guarded: Pipeline,
}

impl App {
    /// Builds the catalog, the engine and both pipelines.
    ///
    /// Fails when the unit system yields no catalog, the marker header is
    /// not a header name, or the OpenAPI document cannot be serialized.
    pub fn new(config: &MensuraConfig, system: Arc<dyn UnitSystem>) -> ServerResult<Self> {
        let catalog = UnitCatalog::from_system(system.as_ref())?;
        let engine = ConversionEngine::new(system);
        let prefix = config.server.mount_prefix.trim_end_matches('/').to_string();
        let version = env!("CARGO_PKG_VERSION");

        let docs = if config.docs.enabled {
            let spec_url = format!("{prefix}/openapi.json");
            let openapi = OpenApiGenerator::new()
                .title(&config.docs.title)
                .version(version)
                .server(&prefix)
                .marker_header(&config.guard.marker_header)
                .generate_json()?;
            Some(DocsPages {
                swagger: Bytes::from(SwaggerUi::new(&spec_url, &config.docs.title).html()),
                redoc: Bytes::from(ReDoc::new(&spec_url, &config.docs.title).html()),
                openapi: Bytes::from(openapi),
            })
        } else {
            None
        };

        let static_files = config.assets.static_dir.as_ref().map(|dir| {
            if !std::path::Path::new(dir).is_dir() {
                tracing::warn!(dir = %dir, "Static asset directory does not exist");
            }
            StaticFiles::new(dir).cache_control(&config.assets.cache_control)
        });

        let unit_count = catalog.len();
        let readiness = ReadinessCheck::new().add_check("unit_catalog", move || unit_count > 0);

        let guard = AccessGuard::new(&config.guard.marker_header)
            .map_err(|e| ServerError::InvalidGuard(e.to_string()))?
            .allow(config.guard.allow_list.iter().cloned())
            .mount_prefix(&prefix);

        let request_id: Arc<dyn Middleware> = if config.server.trust_request_id {
            Arc::new(RequestIdMiddleware::trust_incoming())
        } else {
            Arc::new(RequestIdMiddleware::new())
        };
        let telemetry: Arc<dyn Middleware> =
            Arc::new(TelemetryMiddleware::new(&config.telemetry.service_name));

        let public = Pipeline::builder()
            .shared_stage(Arc::clone(&request_id))
            .shared_stage(Arc::clone(&telemetry))
            .build();
        let guarded = Pipeline::builder()
            .shared_stage(request_id)
            .shared_stage(telemetry)
            .stage(guard)
            .build();

        tracing::info!(
            units = catalog.len(),
            mount_prefix = %prefix,
            docs = docs.is_some(),
            assets = static_files.is_some(),
            "Application assembled"
        );

        let router = Router::new(docs.is_some(), static_files.is_some());
        let state = AppState {
            index_html: Bytes::from(html::index_page(&config.docs.title, &prefix)),
            catalog,
            engine,
            docs,
            static_files,
            health: HealthCheck::new(&config.telemetry.service_name, version).units(unit_count),
            readiness,
            mount_prefix: prefix,
        };

        Ok(Self {
            state: Arc::new(state),
            router,
            public,
            guarded,
        })
    }

    /// The unit catalog.
    #[must_use]
    pub fn catalog(&self) -> &UnitCatalog {
        &self.state.catalog
    }

    /// The readiness probe; clearing it makes `/ready` answer `503`.
    #[must_use]
    pub fn readiness(&self) -> &ReadinessCheck {
        &self.state.readiness
    }

    /// The mount prefix, without a trailing slash.
    #[must_use]
    pub fn mount_prefix(&self) -> &str {
        &self.state.mount_prefix
    }

    /// Routes `request` through its pipeline and handler.
    pub async fn handle(&self, request: Request) -> Response {
        let mut ctx = MiddlewareContext::new();
        let resolution = strip_mount_prefix(request.uri().path(), &self.state.mount_prefix)
            .map_or(Resolution::NotFound, |path| {
                self.router.resolve(request.method(), path)
            });

        match resolution {
            Resolution::Matched(route) => {
                ctx.set_route(route.name());
                let pipeline = if route.guarded() {
                    &self.guarded
                } else {
                    &self.public
                };
                let state = Arc::clone(&self.state);
                pipeline
                    .process(ctx, request, move |_ctx, request| {
                        handlers::dispatch(state, route, request)
                    })
                    .await
            }
            Resolution::MethodNotAllowed(allow) => {
                ctx.set_route("method_not_allowed");
                self.public
                    .process(ctx, request, move |_ctx, _request| {
                        Box::pin(async move { handlers::method_not_allowed(allow) })
                    })
                    .await
            }
            Resolution::NotFound => {
                ctx.set_route("not_found");
                self.public
                    .process(ctx, request, |_ctx, request| {
                        let path = request.uri().path().to_string();
                        Box::pin(async move { handlers::not_found(&path) })
                    })
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode};
    use http_body_util::{BodyExt, Full};
    use mensura_units::UnitRegistry;

    fn app_with(mutate: impl FnOnce(&mut MensuraConfig)) -> App {
        let mut config = MensuraConfig::default();
        config.assets.static_dir = None;
        mutate(&mut config);
        App::new(&config, Arc::new(UnitRegistry::new().unwrap())).unwrap()
    }

    fn request(method: Method, uri: &str, marker: bool, body: &str) -> Request {
        let mut builder = http::Request::builder().method(method).uri(uri);
        if marker {
            builder = builder.header("HX-Request", "true");
        }
        if !body.is_empty() {
            builder = builder.header("content-type", "application/x-www-form-urlencoded");
        }
        builder.body(Full::new(Bytes::from(body.to_string()))).unwrap()
    }

    async fn text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_is_unguarded() {
        let app = app_with(|_| {});
        let response = app.handle(request(Method::GET, "/", false, "")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(text(response).await.contains("hx-post=\"/convert\""));
    }

    #[tokio::test]
    async fn test_fragment_routes_require_marker() {
        let app = app_with(|_| {});
        let response = app
            .handle(request(Method::GET, "/suggestions?from_unit=met", false, ""))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(text(response).await, "Cannot process this request");

        let response = app
            .handle(request(Method::GET, "/suggestions?from_unit=met", true, ""))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(text(response).await.contains("<option value=\"meter\">"));
    }

    #[tokio::test]
    async fn test_convert_fragment() {
        let app = app_with(|_| {});
        let response = app
            .handle(request(
                Method::POST,
                "/convert",
                true,
                "quantity=1&from_unit=meter&to_unit=centimeter",
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(text(response).await.contains(">100.0000</output>"));
    }

    #[tokio::test]
    async fn test_mount_prefix() {
        let app = app_with(|c| c.server.mount_prefix = "/hx".into());
        assert_eq!(app.mount_prefix(), "/hx");

        let response = app.handle(request(Method::GET, "/hx", false, "")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(text(response).await.contains("hx-get=\"/hx/suggestions\""));

        let response = app.handle(request(Method::GET, "/hx/docs", false, "")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.handle(request(Method::GET, "/docs", false, "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_docs_disabled() {
        let app = app_with(|c| c.docs.enabled = false);
        let response = app.handle(request(Method::GET, "/openapi.json", true, "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_path_and_method() {
        let app = app_with(|_| {});
        let response = app.handle(request(Method::GET, "/nowhere", true, "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_str(&text(response).await).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let response = app.handle(request(Method::GET, "/convert", true, "")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[http::header::ALLOW], "POST");
    }

    #[tokio::test]
    async fn test_readiness_follows_flag() {
        let app = app_with(|_| {});
        let response = app.handle(request(Method::GET, "/ready", false, "")).await;
        assert_eq!(response.status(), StatusCode::OK);

        app.readiness().set_ready(false);
        let response = app.handle(request(Method::GET, "/ready", false, "")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_invalid_marker_header() {
        let mut config = MensuraConfig::default();
        config.guard.marker_header = "HX Request".into();
        let err = App::new(&config, Arc::new(UnitRegistry::new().unwrap())).unwrap_err();
        assert!(matches!(err, ServerError::InvalidGuard(_)));
    }
}
