//! End-to-end scoring through the public service facade: evidence is served by a
//! mock site and the resulting score cards are checked against the built-in catalogs.

use lead_dork::config::FetchConfig;
use lead_dork::scoring::{Domain, ReferenceYears, ScoringConfig, SignalKind, TierTable};
use lead_dork::workflows::{IntelError, IntelService};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LEAD_PAGE: &str =
    "<html><body><p>We are hiring.</p><p>Enterprise and premium plans.</p></body></html>";

fn service(scoring: ScoringConfig) -> IntelService {
    IntelService::new(&FetchConfig::default(), scoring).expect("service builds")
}

fn default_scoring() -> ScoringConfig {
    ScoringConfig::new(ReferenceYears::new(2025))
}

async fn site_with_home(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn lead_scorecard_reflects_page_signals() {
    let server = site_with_home(LEAD_PAGE).await;

    let card = service(default_scoring())
        .scorecard(Domain::Lead, &server.uri())
        .await
        .expect("lead scored");

    assert_eq!(card.domain, Domain::Lead);
    assert_eq!(card.score, 40);
    assert_eq!(card.tier.label, "Medium");
    assert_eq!(card.tier.to_string(), "Medium - Some engagement potential");
    assert_eq!(
        card.notes(SignalKind::Signal),
        vec!["Active hiring detected", "Premium/enterprise positioning"]
    );
    assert_eq!(card.recommendations, vec!["Monitor"]);
}

#[tokio::test]
async fn tier_overrides_relabel_the_same_score() {
    let server = site_with_home(LEAD_PAGE).await;
    let table = TierTable::parse("30=Warm:Worth a call,0=Cold").expect("valid table");
    let scoring = default_scoring().with_tiers(Domain::Lead, table);

    let card = service(scoring)
        .scorecard(Domain::Lead, &server.uri())
        .await
        .expect("lead scored");

    assert_eq!(card.score, 40);
    assert_eq!(card.tier.label, "Warm");
    assert_eq!(card.tier.detail, "Worth a call");
}

#[tokio::test]
async fn unreachable_sites_still_get_a_health_score() {
    let card = service(default_scoring())
        .scorecard(Domain::TechnicalHealth, "http://127.0.0.1:9")
        .await
        .expect("health never fails on transport errors");

    assert_eq!(card.score, 55);
    assert_eq!(card.tier.label, "Fair");
    assert_eq!(card.notes(SignalKind::Issue).len(), 2);
}

#[tokio::test]
async fn unreachable_sites_cannot_be_lead_scored() {
    let err = service(default_scoring())
        .scorecard(Domain::Lead, "http://127.0.0.1:9")
        .await
        .expect_err("lead scoring needs the home page");

    assert!(matches!(err, IntelError::Fatal { .. }));
    assert!(err.to_string().starts_with("Lead scoring failed: "));
}

#[tokio::test]
async fn blank_targets_are_rejected_before_fetching() {
    let err = service(default_scoring())
        .scorecard(Domain::Growth, "   ")
        .await
        .expect_err("blank target");

    assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
}
