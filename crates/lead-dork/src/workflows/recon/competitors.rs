use super::pattern;
use crate::evidence::html::{dedupe, select};
use crate::workflows::request::{normalize_target, require, TargetRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use regex::Regex;
use scraper::Html;
use serde::Serialize;
use std::sync::LazyLock;

const MAX_ENTRIES: usize = 10;
const PARTNER_HINTS: [&str; 4] = ["partner", "client", "customer", "logo"];

pattern!(RE_SALESFORCE, r"(?i)salesforce");
pattern!(RE_HUBSPOT, r"(?i)hubspot");
pattern!(RE_SLACK, r"(?i)slack");
pattern!(RE_ZOOM, r"(?i)zoom");
pattern!(RE_TEAMS, r"(?i)teams\.microsoft");
pattern!(RE_WORKSPACE, r"(?i)workspace\.google");
pattern!(RE_STRIPE, r"(?i)stripe");
pattern!(RE_PAYPAL, r"(?i)paypal");

static INTEGRATIONS: [(&str, &LazyLock<Option<Regex>>); 8] = [
    ("Salesforce", &RE_SALESFORCE),
    ("HubSpot", &RE_HUBSPOT),
    ("Slack", &RE_SLACK),
    ("Zoom", &RE_ZOOM),
    ("Microsoft Teams", &RE_TEAMS),
    ("Google Workspace", &RE_WORKSPACE),
    ("Stripe", &RE_STRIPE),
    ("PayPal", &RE_PAYPAL),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorReport {
    pub url: String,
    pub integrations: Vec<&'static str>,
    pub potential_partners: Vec<String>,
    pub integration_count: usize,
}

impl IntelService {
    pub async fn analyze_competitors(
        &self,
        request: TargetRequest,
    ) -> Result<CompetitorReport, IntelError> {
        let target = normalize_target(&require(request.url.as_deref(), "url")?)?;
        let page = self
            .fetch_primary("Competitor analysis", &target, timeouts::COMPETITORS)
            .await?;

        let integrations = integrations(&page.body);
        Ok(CompetitorReport {
            url: target.to_string(),
            integration_count: integrations.len(),
            integrations,
            potential_partners: partner_logos(&page.body),
        })
    }
}

fn integrations(body: &str) -> Vec<&'static str> {
    INTEGRATIONS
        .iter()
        .filter(|(_, pattern)| pattern.as_ref().is_some_and(|regex| regex.is_match(body)))
        .map(|(name, _)| *name)
        .take(MAX_ENTRIES)
        .collect()
}

/// Image alt texts that look like partner or customer logos.
fn partner_logos(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let alts = select(&document, "img[alt]")
        .into_iter()
        .filter_map(|img| img.value().attr("alt"))
        .map(|alt| alt.trim().to_lowercase())
        .filter(|alt| PARTNER_HINTS.iter().any(|hint| alt.contains(hint)));

    let mut partners = dedupe(alts);
    partners.truncate(MAX_ENTRIES);
    partners
}
