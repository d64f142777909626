use super::common::*;
use axum::http::StatusCode;
use serde_json::json;
use wiremock::MockServer;

const REQUIRED_FIELDS: &[(&str, &str)] = &[
    ("/api/osint/score", "url is required"),
    ("/api/growth/signals", "url is required"),
    ("/api/tech/health", "url is required"),
    ("/api/jobs/intelligence", "url is required"),
    ("/api/business/intelligence", "company_name or domain is required"),
    ("/api/scrape/contacts", "url is required"),
    ("/api/whois/lookup", "domain is required"),
    ("/api/tech/detect", "url is required"),
    ("/api/sitemap/parse", "url is required"),
    ("/api/metadata/extract", "url is required"),
    ("/api/osint/competitors", "url is required"),
    ("/api/osint/keywords", "url is required"),
    ("/api/keywords/discover", "keyword is required"),
    ("/api/profile/aggregate", "domain is required"),
    ("/api/dork/search", "query is required"),
    ("/api/osint/github", "company is required"),
    ("/api/osint/feeds", "url is required"),
];

#[tokio::test]
async fn missing_fields_are_rejected_before_any_fetch() {
    let server = MockServer::start().await;

    for (route, message) in REQUIRED_FIELDS {
        for body in ["", "{}", "null"] {
            let (status, payload) = post_json(router_for(&server), route, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{route} with {body:?}");
            assert_eq!(payload, json!({ "error": message }), "{route}");
        }
    }

    assert_eq!(requests_seen(&server).await, 0);
}

#[tokio::test]
async fn blank_fields_count_as_missing() {
    let server = MockServer::start().await;
    let (status, payload) =
        post_json(router_for(&server), "/api/osint/score", r#"{"url":"   "}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["error"], "url is required");
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let server = MockServer::start().await;
    let (status, payload) = post_json(router_for(&server), "/api/tech/detect", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = payload["error"].as_str().expect("error message");
    assert!(message.starts_with("request body is not valid JSON"));
}

#[tokio::test]
async fn unreachable_lead_target_is_a_server_error_without_score() {
    let server = MockServer::start().await;
    let body = json!({ "url": REFUSED }).to_string();

    let (status, payload) = post_json(router_for(&server), "/api/osint/score", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = payload["error"].as_str().expect("error message");
    assert!(message.starts_with("Lead scoring failed: "), "{message}");
    assert!(payload.get("score").is_none());
}

#[tokio::test]
async fn unreachable_health_target_is_scored_not_failed() {
    let server = MockServer::start().await;
    let body = json!({ "url": REFUSED }).to_string();

    let (status, payload) = post_json(router_for(&server), "/api/tech/health", &body).await;

    assert_eq!(status, StatusCode::OK);
    // No SSL (25) and load error (20).
    assert_eq!(payload["health_score"], 55);
    assert_eq!(payload["health_level"], "Fair - Several issues detected");
    assert_eq!(payload["opportunity"], "High priority for IT services");
    let issues = payload["critical_issues"].as_array().expect("issues");
    assert_eq!(issues.len(), 2);
    assert!(issues[1]
        .as_str()
        .is_some_and(|issue| issue.starts_with("Error loading site: ")));
}

#[tokio::test]
async fn lead_route_scores_the_fetched_page() {
    let server = MockServer::start().await;
    serve_page(
        &server,
        "/",
        "<html><body><p>We are hiring.</p><p>Enterprise and premium plans.</p></body></html>",
    )
    .await;
    let body = json!({ "url": server.uri() }).to_string();

    let (status, payload) = post_json(router_for(&server), "/api/osint/score", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["score"], 40);
    assert_eq!(payload["tier"], "Medium");
    assert_eq!(payload["intent_level"], "Medium - Some engagement potential");
    assert_eq!(
        payload["signals"],
        json!(["Active hiring detected", "Premium/enterprise positioning"])
    );
    assert_eq!(payload["recommendation"], "Monitor");
}

#[tokio::test]
async fn keyword_discovery_needs_no_network() {
    let server = MockServer::start().await;
    let (status, payload) = post_json(
        router_for(&server),
        "/api/keywords/discover",
        r#"{"keyword":"  CRM "}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["input_keyword"], "crm");
    assert_eq!(payload["synonyms"], json!(["crm"]));
    assert_eq!(payload["total_expanded"], 18);
    assert_eq!(requests_seen(&server).await, 0);
}
