//! Unit suggestions for the two autocomplete inputs.

use mensura_test::{TestClient, TestResponse};

async fn suggest(query: &str) -> TestResponse {
    TestClient::with_defaults()
        .unwrap()
        .get(format!("/suggestions{query}"))
        .marker()
        .send()
        .await
}

fn options(response: &TestResponse) -> Vec<String> {
    response
        .text()
        .unwrap()
        .lines()
        .map(|line| {
            line.trim_start_matches("<option value=\"")
                .split('"')
                .next()
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

#[tokio::test]
async fn matches_are_case_sensitive_substrings() {
    let response = suggest("?from_unit=mile").await;
    response.assert_status_code(200).assert_content_type("text/html");
    let names = options(&response);
    assert!(names.contains(&"mile".to_string()));
    assert!(names.contains(&"nautical mile".to_string()));
    assert!(names.iter().all(|name| name.contains("mile")));

    let names = options(&suggest("?from_unit=Mile").await);
    assert!(!names.contains(&"mile".to_string()));
}

#[tokio::test]
async fn at_most_ten_in_catalog_order() {
    let names = options(&suggest("?from_unit=e").await);
    assert_eq!(names.len(), 10);
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn empty_query_lists_first_names() {
    let first = options(&suggest("").await);
    assert_eq!(first.len(), 10);
    assert_eq!(options(&suggest("?from_unit=").await), first);
}

#[tokio::test]
async fn from_unit_wins_over_to_unit() {
    let names = options(&suggest("?from_unit=furlong&to_unit=parsec").await);
    assert_eq!(names, vec!["furlong"]);
}

#[tokio::test]
async fn empty_from_unit_falls_back_to_to_unit() {
    let names = options(&suggest("?from_unit=&to_unit=parsec").await);
    assert!(names.contains(&"parsec".to_string()));
    assert!(names.iter().all(|name| name.contains("parsec")));
}

#[tokio::test]
async fn no_match_yields_sentinel() {
    suggest("?from_unit=zzzz")
        .await
        .assert_status_code(200)
        .assert_body_eq("<option value=\"No units found\">No units found</option>\n");
}

#[tokio::test]
async fn query_is_percent_decoded() {
    let names = options(&suggest("?to_unit=nautical%20mi").await);
    assert_eq!(names, vec!["nautical mile"]);
}

#[tokio::test]
async fn repeated_key_uses_last_value() {
    let response = suggest("?from_unit=met&from_unit=furlong").await;
    response.assert_status_code(200);
    assert_eq!(options(&response), vec!["furlong"]);
}
