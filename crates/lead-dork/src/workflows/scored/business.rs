use crate::evidence::sitemap::parse_sitemap;
use crate::evidence::{probe, probe_first, Evidence, Fact, ProbeMethod, ProbeOutcome, ProbeStatus};
use crate::scoring::catalog::business::{
    AD_PRESENCE, FUNDING, PRESS_PATHS, PRODUCT_LAUNCHES, PROFILE,
};
use crate::scoring::catalog::{
    AD_LIBRARY, LANDING, LANDING_SECONDS, PRESS, SEARCH, SITEMAP_LASTMOD,
};
use crate::scoring::ScoreCard;
use crate::workflows::request::{candidates, normalize_target, origin, DomainRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use serde::Serialize;
use url::Url;

/// Status and notes for one business-intelligence category.
#[derive(Debug, Clone, Serialize)]
pub struct SignalGroup {
    pub status: &'static str,
    pub signals: Vec<String>,
}

impl SignalGroup {
    fn from_card(card: &ScoreCard, group: &str, rule: &str, found: &'static str) -> Self {
        Self {
            status: if card.matched(rule) { found } else { "not_found" },
            signals: card.group_notes(group),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BusinessReport {
    pub funding: SignalGroup,
    pub product_launches: SignalGroup,
    pub ad_presence: SignalGroup,
    pub business_score: u8,
    pub business_level: String,
    pub opportunities: Vec<String>,
    /// Sources that refused the request, as opposed to returning nothing.
    pub blocked_sources: Vec<&'static str>,
}

pub(crate) struct BusinessEvidence {
    pub evidence: Evidence,
    pub blocked_sources: Vec<&'static str>,
}

impl IntelService {
    pub async fn business_intelligence(
        &self,
        request: DomainRequest,
    ) -> Result<BusinessReport, IntelError> {
        let company = non_blank(request.company_name.as_deref());
        let domain = non_blank(request.domain.as_deref());
        if company.is_none() && domain.is_none() {
            return Err(IntelError::MissingField("company_name or domain"));
        }

        let BusinessEvidence {
            evidence,
            blocked_sources,
        } = self.business_evidence(company, domain).await?;
        let card = self.engine.score(&PROFILE, &evidence, company);

        Ok(BusinessReport {
            funding: SignalGroup::from_card(&card, FUNDING, "funding", "likely_funded"),
            product_launches: SignalGroup::from_card(&card, PRODUCT_LAUNCHES, "launches", "active"),
            ad_presence: SignalGroup::from_card(&card, AD_PRESENCE, "ads", "detected"),
            business_score: card.score,
            business_level: card.tier.to_string(),
            opportunities: card.recommendations.clone(),
            blocked_sources,
        })
    }

    pub(crate) async fn business_evidence(
        &self,
        company: Option<&str>,
        domain: Option<&str>,
    ) -> Result<BusinessEvidence, IntelError> {
        let site = domain.map(normalize_target).transpose()?;
        let target = match (&site, company) {
            (Some(site), _) => site.clone(),
            (None, company) => self.endpoints.search(company.unwrap_or_default(), "10"),
        };

        let mut evidence = Evidence::new(target);
        let mut blocked = Vec::new();

        if let Some(company) = company {
            let query = format!("{company} funding raised investment");
            let url = self.endpoints.search(&query, "10");
            match probe(&self.fetcher, &url, ProbeMethod::Get, timeouts::BUSINESS_SEARCH).await {
                ProbeOutcome::Found(page) => evidence.insert_page(SEARCH, page),
                ProbeOutcome::Blocked { .. } => blocked.push(SEARCH),
                _ => {}
            }
        }

        if let Some(site) = &site {
            let press = probe_first(
                &self.fetcher,
                &candidates(site, PRESS_PATHS),
                ProbeMethod::Get,
                timeouts::BUSINESS_PRESS,
            )
            .await;
            match press.page {
                Some(page) => evidence.insert_page(PRESS, page),
                None if press.status == ProbeStatus::Blocked => blocked.push(PRESS),
                None => {}
            }

            if let Some(lastmod) = self.sitemap_lastmod(site).await {
                evidence.insert_fact(SITEMAP_LASTMOD, Fact::Items(lastmod));
            }
        }

        if let Some(company) = company {
            let url = self.endpoints.ad_library(company);
            match probe(&self.fetcher, &url, ProbeMethod::Get, timeouts::AD_LIBRARY).await {
                ProbeOutcome::Found(page) => {
                    evidence.insert_page(AD_LIBRARY, page);
                    if let Some(site) = &site {
                        if let Some(landing) = self.fetch_optional(site, timeouts::LANDING).await {
                            evidence.insert_fact(
                                LANDING_SECONDS,
                                Fact::Number(landing.elapsed.as_secs_f64()),
                            );
                            evidence.insert_page(LANDING, landing);
                        }
                    }
                }
                ProbeOutcome::Blocked { .. } => blocked.push(AD_LIBRARY),
                _ => {}
            }
        }

        Ok(BusinessEvidence {
            evidence,
            blocked_sources: blocked,
        })
    }

    async fn sitemap_lastmod(&self, site: &Url) -> Option<Vec<String>> {
        let url = origin(site).join("/sitemap.xml").ok()?;
        let page = self
            .fetch_optional(&url, timeouts::BUSINESS_SITEMAP)
            .await
            .filter(|page| page.is_success())?;
        Some(parse_sitemap(&page.body).last_modified)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
