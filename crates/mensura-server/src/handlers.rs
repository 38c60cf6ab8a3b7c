//! Route handlers.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use mensura_core::{ConversionRequest, RoundedDecimal};
use mensura_middleware::stages::strip_mount_prefix;
use mensura_middleware::types::{APPLICATION_JSON, TEXT_HTML};
use mensura_middleware::{BoxFuture, Request, Response, ResponseExt};
use mensura_telemetry::metrics::{record_conversion, record_suggestion};
use mensura_telemetry::render_metrics;
use serde::Serialize;
use serde_json::value::RawValue;

use crate::app::AppState;
use crate::extract::{self, SuggestionQuery};
use crate::html;
use crate::router::{static_path, Route};

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Runs the handler for `route`.
pub(crate) fn dispatch(
    state: Arc<AppState>,
    route: Route,
    request: Request,
) -> BoxFuture<'static, Response> {
    Box::pin(async move {
        match route {
            Route::Index => with_content_type(StatusCode::OK, TEXT_HTML, state.index_html.clone()),
            Route::Suggestions => suggestions(&state, &request),
            Route::Convert => convert(&state, request).await,
            Route::JsonConvert => json_convert(&state, request).await,
            Route::SwaggerUi | Route::ReDoc | Route::OpenApi => docs(&state, route),
            Route::Static => static_file(&state, &request),
            Route::Health => Response::json(StatusCode::OK, &state.health.status()),
            Route::Ready => ready(&state),
            Route::Metrics => metrics(),
        }
    })
}

fn suggestions(state: &AppState, request: &Request) -> Response {
    let query = match SuggestionQuery::parse(request.uri().query()) {
        Ok(query) => query,
        Err(e) => return Response::html(e.status_code(), html::extraction_error_fragment(&e)),
    };

    let (field, value) = query.search();
    let suggestions = state.catalog.suggest(value);
    record_suggestion(field, !suggestions.is_empty());

    Response::html(StatusCode::OK, html::suggestions_fragment(&suggestions.names()))
}

/// The HTML binding: 200, 422 or 500 with a fragment.
async fn convert(state: &AppState, request: Request) -> Response {
    let body = body_bytes(request).await;
    let conversion_request: ConversionRequest = match extract::form(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected conversion form");
            record_conversion(e.code());
            return Response::html(e.status_code(), html::extraction_error_fragment(&e));
        }
    };

    match state.engine.convert(&conversion_request) {
        Ok(conversion) => {
            record_conversion("ok");
            Response::html(StatusCode::OK, html::result_fragment(&conversion))
        }
        Err(e) => {
            log_conversion_error(&e);
            record_conversion(e.code());
            Response::html(e.status_code(), html::conversion_error_fragment(&e))
        }
    }
}

/// The JSON binding: every failure is a 422.
async fn json_convert(state: &AppState, request: Request) -> Response {
    let body = body_bytes(request).await;
    let conversion_request: ConversionRequest = match extract::json(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected conversion JSON");
            record_conversion(e.code());
            return Response::json_error(e.status_code(), e.code(), &e.to_string());
        }
    };

    match state.engine.convert(&conversion_request) {
        Ok(conversion) => {
            record_conversion("ok");
            json_result(&conversion.result)
        }
        Err(e) => {
            log_conversion_error(&e);
            record_conversion(e.code());
            Response::json_error(StatusCode::UNPROCESSABLE_ENTITY, e.code(), &e.to_string())
        }
    }
}

/// `{"result": n}` with `n` written digit for digit, e.g. `100.0000`.
fn json_result(result: &RoundedDecimal) -> Response {
    #[derive(Serialize)]
    struct ConversionBody {
        result: Box<RawValue>,
    }

    match RawValue::from_string(result.to_string()) {
        Ok(result) => Response::json(StatusCode::OK, &ConversionBody { result }),
        Err(e) => Response::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "SERIALIZATION_ERROR",
            &e.to_string(),
        ),
    }
}

fn log_conversion_error(error: &mensura_core::ConversionError) {
    if error.kind() == mensura_core::ErrorKind::Internal {
        tracing::warn!(error = %error, code = error.code(), "Conversion failed");
    } else {
        tracing::debug!(error = %error, code = error.code(), "Conversion rejected");
    }
}

fn docs(state: &AppState, route: Route) -> Response {
    let Some(docs) = state.docs.as_ref() else {
        return not_found_response();
    };

    match route {
        Route::SwaggerUi => with_content_type(StatusCode::OK, TEXT_HTML, docs.swagger.clone()),
        Route::ReDoc => with_content_type(StatusCode::OK, TEXT_HTML, docs.redoc.clone()),
        _ => with_content_type(StatusCode::OK, APPLICATION_JSON, docs.openapi.clone()),
    }
}

fn static_file(state: &AppState, request: &Request) -> Response {
    let path = strip_mount_prefix(request.uri().path(), &state.mount_prefix).and_then(static_path);
    let (Some(files), Some(path)) = (state.static_files.as_ref(), path) else {
        return not_found_response();
    };

    match files.handle(path, request.headers(), request.method()) {
        Ok(response) => response,
        Err(e) => {
            if e.status_code().is_server_error() {
                tracing::warn!(error = %e, path, "Static asset failed");
            }
            Response::json_error(e.status_code(), e.code(), &e.to_string())
        }
    }
}

fn ready(state: &AppState) -> Response {
    let status = state.readiness.status();
    let code = if status.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    Response::json(code, &status)
}

fn metrics() -> Response {
    match render_metrics() {
        Some(text) => with_content_type(StatusCode::OK, PROMETHEUS_TEXT, text),
        None => Response::json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Metrics are disabled"),
    }
}

/// 404 for a path no route serves.
pub(crate) fn not_found(path: &str) -> Response {
    Response::json_error(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        &format!("No route for {path}"),
    )
}

fn not_found_response() -> Response {
    Response::json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Not found")
}

/// 405 with an `Allow` header.
pub(crate) fn method_not_allowed(allow: &'static str) -> Response {
    let mut response = Response::json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "METHOD_NOT_ALLOWED",
        &format!("Allowed methods: {allow}"),
    );
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(allow));
    response
}

fn with_content_type(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Response {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

async fn body_bytes(request: Request) -> Bytes {
    match request.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(never) => match never {},
    }
}
