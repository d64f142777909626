use super::recon::{
    CompetitorReport, ContactsReport, DiscoveryReport, DorkReport, FeedsReport, GithubReport,
    KeywordReport, MetadataReport, ProfileReport, SitemapReport, TechReport, WhoisReport,
};
use super::request::parse_body;
use super::scored::{BusinessReport, GrowthReport, HealthReport, JobsReport, LeadReport};
use super::{IntelError, IntelService};
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;

type Service = State<Arc<IntelService>>;

/// Every analysis endpoint. Bodies are JSON; an empty body counts as `{}`.
pub fn intel_router(service: Arc<IntelService>) -> Router {
    Router::new()
        .route("/api/osint/score", post(lead_score))
        .route("/api/growth/signals", post(growth_signals))
        .route("/api/tech/health", post(tech_health))
        .route("/api/jobs/intelligence", post(job_intelligence))
        .route("/api/business/intelligence", post(business_intelligence))
        .route("/api/scrape/contacts", post(scrape_contacts))
        .route("/api/whois/lookup", post(whois_lookup))
        .route("/api/tech/detect", post(detect_tech))
        .route("/api/sitemap/parse", post(sitemap_urls))
        .route("/api/metadata/extract", post(extract_metadata))
        .route("/api/osint/competitors", post(analyze_competitors))
        .route("/api/osint/keywords", post(analyze_keywords))
        .route("/api/keywords/discover", post(discover_keywords))
        .route("/api/profile/aggregate", post(aggregate_profile))
        .route("/api/dork/search", post(dork_search))
        .route("/api/osint/github", post(github_osint))
        .route("/api/osint/feeds", post(discover_feeds))
        .with_state(service)
}

async fn lead_score(State(service): Service, body: Bytes) -> Result<Json<LeadReport>, IntelError> {
    Ok(Json(service.lead_score(parse_body(&body)?).await?))
}

async fn growth_signals(
    State(service): Service,
    body: Bytes,
) -> Result<Json<GrowthReport>, IntelError> {
    Ok(Json(service.growth_signals(parse_body(&body)?).await?))
}

async fn tech_health(State(service): Service, body: Bytes) -> Result<Json<HealthReport>, IntelError> {
    Ok(Json(service.tech_health(parse_body(&body)?).await?))
}

async fn job_intelligence(
    State(service): Service,
    body: Bytes,
) -> Result<Json<JobsReport>, IntelError> {
    Ok(Json(service.job_intelligence(parse_body(&body)?).await?))
}

async fn business_intelligence(
    State(service): Service,
    body: Bytes,
) -> Result<Json<BusinessReport>, IntelError> {
    Ok(Json(service.business_intelligence(parse_body(&body)?).await?))
}

async fn scrape_contacts(
    State(service): Service,
    body: Bytes,
) -> Result<Json<ContactsReport>, IntelError> {
    Ok(Json(service.scrape_contacts(parse_body(&body)?).await?))
}

async fn whois_lookup(State(service): Service, body: Bytes) -> Result<Json<WhoisReport>, IntelError> {
    Ok(Json(service.whois_lookup(parse_body(&body)?).await?))
}

async fn detect_tech(State(service): Service, body: Bytes) -> Result<Json<TechReport>, IntelError> {
    Ok(Json(service.detect_tech(parse_body(&body)?).await?))
}

async fn sitemap_urls(State(service): Service, body: Bytes) -> Result<Json<SitemapReport>, IntelError> {
    Ok(Json(service.sitemap_urls(parse_body(&body)?).await?))
}

async fn extract_metadata(
    State(service): Service,
    body: Bytes,
) -> Result<Json<MetadataReport>, IntelError> {
    Ok(Json(service.extract_metadata(parse_body(&body)?).await?))
}

async fn analyze_competitors(
    State(service): Service,
    body: Bytes,
) -> Result<Json<CompetitorReport>, IntelError> {
    Ok(Json(service.analyze_competitors(parse_body(&body)?).await?))
}

async fn analyze_keywords(
    State(service): Service,
    body: Bytes,
) -> Result<Json<KeywordReport>, IntelError> {
    Ok(Json(service.analyze_keywords(parse_body(&body)?).await?))
}

async fn discover_keywords(
    State(service): Service,
    body: Bytes,
) -> Result<Json<DiscoveryReport>, IntelError> {
    Ok(Json(service.discover_keywords(parse_body(&body)?)?))
}

async fn aggregate_profile(
    State(service): Service,
    body: Bytes,
) -> Result<Json<ProfileReport>, IntelError> {
    Ok(Json(service.aggregate_profile(parse_body(&body)?).await?))
}

async fn dork_search(State(service): Service, body: Bytes) -> Result<Json<DorkReport>, IntelError> {
    Ok(Json(service.dork_search(parse_body(&body)?).await?))
}

async fn github_osint(State(service): Service, body: Bytes) -> Result<Json<GithubReport>, IntelError> {
    Ok(Json(service.github_osint(parse_body(&body)?).await?))
}

async fn discover_feeds(State(service): Service, body: Bytes) -> Result<Json<FeedsReport>, IntelError> {
    Ok(Json(service.discover_feeds(parse_body(&body)?).await?))
}
