//! Both conversion bindings: the HTML form and JSON.

use mensura_test::TestClient;
use serde_json::json;

fn client() -> TestClient {
    TestClient::with_defaults().unwrap().with_default_header("HX-Request", "true")
}

async fn convert(quantity: &str, from: &str, to: &str) -> mensura_test::TestResponse {
    client()
        .post("/convert")
        .form(&[("quantity", quantity), ("from_unit", from), ("to_unit", to)])
        .send()
        .await
}

#[tokio::test]
async fn form_conversion_renders_result_fragment() {
    convert("1", "meter", "centimeter")
        .await
        .assert_status_code(200)
        .assert_content_type("text/html")
        .assert_body_contains(">100.0000</output>");
}

#[tokio::test]
async fn display_names_with_spaces_are_accepted() {
    convert("1", "nautical mile", "meter")
        .await
        .assert_status_code(200)
        .assert_body_contains(">1852.0000</output>");
}

#[tokio::test]
async fn results_are_rounded_to_four_places() {
    convert("1", "inch", "foot")
        .await
        .assert_status_code(200)
        .assert_body_contains(">0.0833</output>");
}

#[tokio::test]
async fn temperature_offsets_apply() {
    convert("100", "degree Celsius", "degree Fahrenheit")
        .await
        .assert_status_code(200)
        .assert_body_contains(">212.0000</output>");
}

#[tokio::test]
async fn unknown_unit_is_422_fragment() {
    convert("1", "furlongz", "meter")
        .await
        .assert_status_code(422)
        .assert_body_contains("data-code=\"UNKNOWN_UNIT\" data-field=\"from_unit\"")
        .assert_body_contains("Error: Unknown source unit &#x27;furlongz&#x27;");

    convert("1", "meter", "furlongz")
        .await
        .assert_status_code(422)
        .assert_body_contains("data-field=\"to_unit\"");
}

#[tokio::test]
async fn incompatible_dimensions_is_422_fragment() {
    convert("1", "second", "meter")
        .await
        .assert_status_code(422)
        .assert_body_contains("data-code=\"INCOMPATIBLE_DIMENSIONS\"");
}

#[tokio::test]
async fn internal_failure_is_500_fragment() {
    convert("1", "degree Celsius / second", "kelvin / second")
        .await
        .assert_status_code(500)
        .assert_body_contains("data-code=\"CONVERSION_ERROR\"");
}

#[tokio::test]
async fn malformed_form_is_422() {
    convert("lots", "meter", "foot")
        .await
        .assert_status_code(422)
        .assert_body_contains("data-code=\"INVALID_FORM\"");

    client()
        .post("/convert")
        .form(&[("quantity", "1"), ("from_unit", "meter")])
        .send()
        .await
        .assert_status_code(422);
}

#[tokio::test]
async fn json_conversion_returns_number() {
    client()
        .post("/json/convert")
        .json(&json!({"quantity": 2.5, "from_unit": "kilometer", "to_unit": "meter"}))
        .send()
        .await
        .assert_status_code(200)
        .assert_content_type("application/json")
        .assert_json_field("result", &json!(2500.0))
        .assert_body_eq(r#"{"result":2500.0000}"#);
}

#[tokio::test]
async fn json_result_keeps_four_places() {
    client()
        .post("/json/convert")
        .json(&json!({"quantity": 1, "from_unit": "inch", "to_unit": "foot"}))
        .send()
        .await
        .assert_status_code(200)
        .assert_body_eq(r#"{"result":0.0833}"#);
}

#[tokio::test]
async fn json_failures_are_all_422() {
    let cases = [
        (json!({"quantity": 1, "from_unit": "furlongz", "to_unit": "meter"}), "UNKNOWN_UNIT"),
        (json!({"quantity": 1, "from_unit": "second", "to_unit": "meter"}), "INCOMPATIBLE_DIMENSIONS"),
        (
            json!({"quantity": 1, "from_unit": "degree Celsius / second", "to_unit": "kelvin / second"}),
            "CONVERSION_ERROR",
        ),
        (json!({"quantity": "one", "from_unit": "meter", "to_unit": "foot"}), "INVALID_JSON"),
    ];

    for (body, code) in cases {
        client()
            .post("/json/convert")
            .json(&body)
            .send()
            .await
            .assert_status_code(422)
            .assert_error_code(code);
    }
}

#[tokio::test]
async fn json_binding_needs_no_marker() {
    TestClient::with_defaults()
        .unwrap()
        .post("/json/convert")
        .json(&json!({"quantity": 0, "from_unit": "meter", "to_unit": "foot"}))
        .send()
        .await
        .assert_status_code(200)
        .assert_json_field("result", &json!(0.0));
}
