//! Mount prefix, static assets, probes and unknown routes.

use std::fs;

use mensura::config::MensuraConfig;
use mensura_test::TestClient;
use serde_json::json;

fn config() -> MensuraConfig {
    let mut config = MensuraConfig::default();
    config.assets.static_dir = None;
    config
}

#[tokio::test]
async fn routes_move_under_mount_prefix() {
    let mut config = config();
    config.server.mount_prefix = "/hx".into();
    let client = TestClient::with_config(&config).unwrap();

    client
        .get("/hx/")
        .send()
        .await
        .assert_status_code(200)
        .assert_body_contains("hx-get=\"/hx/suggestions\"")
        .assert_body_contains("href=\"/hx/static/mensura.css\"");

    client
        .get("/hx/suggestions?from_unit=furlong")
        .marker()
        .send()
        .await
        .assert_status_code(200);

    client.get("/hx/docs").send().await.assert_status_code(200);
    client
        .get("/hx/openapi.json")
        .send()
        .await
        .assert_json_field("servers.0.url", &json!("/hx"));

    client.get("/").send().await.assert_status_code(404);
    client.get("/hxdocs").send().await.assert_status_code(404);
    client.get("/docs").send().await.assert_status_code(404);
}

#[tokio::test]
async fn docs_can_be_disabled() {
    let mut config = config();
    config.docs.enabled = false;
    let client = TestClient::with_config(&config).unwrap();

    for path in ["/docs", "/redoc", "/openapi.json"] {
        client.get(path).send().await.assert_status_code(404);
    }
}

#[tokio::test]
async fn static_assets_are_served_with_validators() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("mensura.css"), "body { margin: 0 }").unwrap();
    fs::write(dir.path().join(".secret"), "hidden").unwrap();

    let mut config = config();
    config.assets.static_dir = Some(dir.path().display().to_string());
    let client = TestClient::with_config(&config).unwrap();

    let response = client.get("/static/mensura.css").send().await;
    response
        .assert_status_code(200)
        .assert_content_type("text/css")
        .assert_header("cache-control", "public, max-age=3600")
        .assert_body_eq("body { margin: 0 }");

    let etag = response.header_str("etag").unwrap().to_string();
    client
        .get("/static/mensura.css")
        .header("If-None-Match", &etag)
        .send()
        .await
        .assert_status_code(304);

    client
        .head("/static/mensura.css")
        .send()
        .await
        .assert_status_code(200)
        .assert_body_eq("");

    client.get("/static/missing.js").send().await.assert_status_code(404);
    client.get("/static/.secret").send().await.assert_status_code(403);
}

#[tokio::test]
async fn static_route_absent_without_directory() {
    TestClient::with_config(&config())
        .unwrap()
        .get("/static/mensura.css")
        .send()
        .await
        .assert_status_code(404);
}

#[tokio::test]
async fn probes() {
    let client = TestClient::with_config(&config()).unwrap();

    client
        .get("/health")
        .send()
        .await
        .assert_status_code(200)
        .assert_json_field("status", &json!("healthy"))
        .assert_json_field("service", &json!("mensura"));

    client
        .get("/ready")
        .send()
        .await
        .assert_status_code(200)
        .assert_json_field("checks.unit_catalog", &json!(true));

    client.app().readiness().set_ready(false);
    client
        .get("/ready")
        .send()
        .await
        .assert_status_code(503)
        .assert_json_field("ready", &json!(false));
}

#[tokio::test]
async fn unknown_routes_and_methods() {
    let client = TestClient::with_config(&config()).unwrap();

    client
        .get("/nowhere")
        .send()
        .await
        .assert_status_code(404)
        .assert_content_type("application/json")
        .assert_error_code("NOT_FOUND");

    client
        .get("/json/convert")
        .send()
        .await
        .assert_status_code(405)
        .assert_header("allow", "POST")
        .assert_error_code("METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn incoming_request_id_echoed_only_when_trusted() {
    const INCOMING: &str = "01890a5d-ac96-774b-bcce-b302099a8057";

    let untrusted = TestClient::with_config(&config()).unwrap();
    let response = untrusted
        .get("/health")
        .header("x-request-id", INCOMING)
        .send()
        .await;
    assert_ne!(response.request_id(), Some(INCOMING));
    assert!(response.request_id().is_some());

    let mut trusting = config();
    trusting.server.trust_request_id = true;
    let client = TestClient::with_config(&trusting).unwrap();

    let response = client
        .get("/health")
        .header("x-request-id", INCOMING)
        .send()
        .await;
    assert_eq!(response.request_id(), Some(INCOMING));

    let response = client
        .get("/health")
        .header("x-request-id", "not-a-uuid")
        .send()
        .await;
    assert_ne!(response.request_id(), Some("not-a-uuid"));
}
