//! The marker-header guard as seen from outside the application.

use mensura::config::MensuraConfig;
use mensura_test::TestClient;

fn client() -> TestClient {
    TestClient::with_defaults().unwrap()
}

#[tokio::test]
async fn fragment_routes_reject_requests_without_marker() {
    let client = client();

    for response in [
        client.get("/suggestions?from_unit=met").send().await,
        client
            .post("/convert")
            .form(&[("quantity", "1"), ("from_unit", "meter"), ("to_unit", "foot")])
            .send()
            .await,
    ] {
        response
            .assert_status_code(403)
            .assert_content_type("text/plain")
            .assert_body_eq("Cannot process this request");
        assert!(response.request_id().is_some());
    }
}

#[tokio::test]
async fn marker_value_is_not_inspected() {
    client()
        .get("/suggestions?from_unit=met")
        .header("HX-Request", "")
        .send()
        .await
        .assert_status_code(200);
}

#[tokio::test]
async fn public_routes_ignore_the_guard() {
    let client = client();
    client.get("/").send().await.assert_status_code(200);
    client.get("/health").send().await.assert_status_code(200);
    client
        .post("/json/convert")
        .json(&serde_json::json!({"quantity": 1, "from_unit": "meter", "to_unit": "foot"}))
        .send()
        .await
        .assert_status_code(200);
}

#[tokio::test]
async fn documentation_is_allow_listed() {
    let client = client();
    client
        .get("/docs")
        .send()
        .await
        .assert_status_code(200)
        .assert_content_type("text/html")
        .assert_body_contains("swagger-ui");
    client
        .get("/redoc")
        .send()
        .await
        .assert_status_code(200)
        .assert_body_contains("Redoc.init");
    client
        .get("/openapi.json")
        .send()
        .await
        .assert_status_code(200)
        .assert_json_field("openapi", &serde_json::json!("3.1.0"));
}

#[tokio::test]
async fn allow_list_matches_whole_paths() {
    // /docs is allow-listed, /docs/extra is not and does not exist
    client()
        .get("/docs/extra")
        .send()
        .await
        .assert_status_code(404);
}

#[tokio::test]
async fn emptied_allow_list_guards_documentation() {
    let mut config = MensuraConfig::default();
    config.assets.static_dir = None;
    config.guard.allow_list.clear();
    let client = TestClient::with_config(&config).unwrap();

    client.get("/openapi.json").send().await.assert_status_code(403);
    client
        .get("/openapi.json")
        .marker()
        .send()
        .await
        .assert_status_code(200);
}

#[tokio::test]
async fn custom_marker_header() {
    let mut config = MensuraConfig::default();
    config.assets.static_dir = None;
    config.guard.marker_header = "X-Fragment".into();
    let client = TestClient::with_config(&config).unwrap();

    client
        .get("/suggestions")
        .header("HX-Request", "true")
        .send()
        .await
        .assert_status_code(403);
    client
        .get("/suggestions")
        .header("X-Fragment", "1")
        .send()
        .await
        .assert_status_code(200);
}
