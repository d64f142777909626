use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::FetchConfig;
use crate::scoring::{ReferenceYears, ScoringConfig};
use crate::workflows::{intel_router, IntelService};

pub(super) const YEAR: i32 = 2025;

/// Points every third-party base at the mock server.
pub(super) fn service_for(server: &MockServer) -> Arc<IntelService> {
    let fetch = FetchConfig {
        search_base_url: server.uri(),
        github_base_url: server.uri(),
        ad_library_base_url: server.uri(),
        ..FetchConfig::default()
    };
    let scoring = ScoringConfig::new(ReferenceYears::new(YEAR));
    Arc::new(IntelService::new(&fetch, scoring).expect("service builds"))
}

pub(super) fn router_for(server: &MockServer) -> Router {
    intel_router(service_for(server))
}

pub(super) async fn serve_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

pub(super) async fn serve_head(server: &MockServer, route: &str) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// HEAD on `route` answers with a permanent redirect to the home page.
pub(super) async fn redirect_head_home(server: &MockServer, route: &str) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/"))
        .mount(server)
        .await;
    serve_head(server, "/").await;
}

/// A target nothing listens on.
pub(super) const REFUSED: &str = "http://127.0.0.1:9";

pub(super) async fn post_json(router: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let payload = serde_json::from_slice(&bytes).expect("json payload");
    (status, payload)
}

pub(super) async fn requests_seen(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map_or(0, |requests| requests.len())
}
