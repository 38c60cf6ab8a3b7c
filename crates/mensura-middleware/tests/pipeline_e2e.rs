//! End-to-end pipeline tests: request id, telemetry and the access guard
//! working together in their production order.

use bytes::Bytes;
use http::{Request as HttpRequest, Response as HttpResponse, StatusCode};
use http_body_util::{BodyExt, Full};
use mensura_middleware::{
    context::MiddlewareContext,
    pipeline::Pipeline,
    stages::{AccessGuard, RequestIdMiddleware, TelemetryMiddleware, REQUEST_ID_HEADER},
    types::Request,
    BoxFuture,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Response = HttpResponse<Full<Bytes>>;

fn guarded_pipeline() -> Pipeline {
    Pipeline::builder()
        .stage(RequestIdMiddleware::new())
        .stage(TelemetryMiddleware::new("mensura-test"))
        .stage(
            AccessGuard::new("HX-Request")
                .unwrap()
                .allow(["/docs", "/redoc", "/openapi.json"]),
        )
        .build()
}

fn make_request(path: &str, marker: bool) -> Request {
    let mut builder = HttpRequest::builder().method("GET").uri(path);
    if marker {
        builder = builder.header("HX-Request", "true");
    }
    builder.body(Full::new(Bytes::new())).unwrap()
}

fn counting_handler(
    calls: Arc<AtomicUsize>,
) -> impl FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, Response> {
    move |_ctx, _req| {
        calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async {
            HttpResponse::builder()
                .status(StatusCode::OK)
                .body(Full::new(Bytes::from("<ul></ul>")))
                .unwrap()
        })
    }
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_marked_request_reaches_handler() {
    let pipeline = guarded_pipeline();
    let calls = Arc::new(AtomicUsize::new(0));

    let mut ctx = MiddlewareContext::new();
    ctx.set_route("suggestions");
    let response = pipeline
        .process(ctx, make_request("/suggestions", true), counting_handler(Arc::clone(&calls)))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(body_text(response).await, "<ul></ul>");
}

#[tokio::test]
async fn test_unmarked_request_is_rejected_before_handler() {
    let pipeline = guarded_pipeline();
    let calls = Arc::new(AtomicUsize::new(0));

    let response = pipeline
        .process(
            MiddlewareContext::new(),
            make_request("/suggestions", false),
            counting_handler(Arc::clone(&calls)),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    // outer stages still decorate the rejection
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(body_text(response).await, "Cannot process this request");
}

#[tokio::test]
async fn test_docs_are_allow_listed() {
    let pipeline = guarded_pipeline();
    for path in ["/docs", "/redoc", "/openapi.json"] {
        let calls = Arc::new(AtomicUsize::new(0));
        let response = pipeline
            .process(
                MiddlewareContext::new(),
                make_request(path, false),
                counting_handler(Arc::clone(&calls)),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn test_each_request_gets_a_distinct_id() {
    let pipeline = guarded_pipeline();
    let mut ids = Vec::new();
    for _ in 0..3 {
        let response = pipeline
            .process(
                MiddlewareContext::new(),
                make_request("/convert", true),
                counting_handler(Arc::new(AtomicUsize::new(0))),
            )
            .await;
        ids.push(
            response.headers()[REQUEST_ID_HEADER]
                .to_str()
                .unwrap()
                .to_string(),
        );
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}
