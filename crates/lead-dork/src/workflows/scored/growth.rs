use crate::evidence::sitemap::parse_sitemap;
use crate::evidence::{
    probe_each, probe_first, Evidence, Fact, ProbeMethod, ProbeStatus, PRIMARY,
};
use crate::scoring::catalog::growth::{CAREERS_PATHS, PROFILE, SUBDOMAINS};
use crate::scoring::catalog::{ACTIVE_SUBDOMAINS, CAREERS_PAGE, SITEMAP_URLS};
use crate::scoring::{Domain, SignalKind};
use crate::workflows::request::{candidates, normalize_target, origin, require, TargetRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, Serialize)]
pub struct GrowthReport {
    pub url: String,
    pub growth_score: u8,
    pub growth_level: String,
    pub signals: Vec<String>,
    pub active_subdomains: Vec<String>,
    pub recommendation: String,
}

pub(crate) struct GrowthEvidence {
    pub evidence: Evidence,
    pub active_subdomains: Vec<String>,
}

impl IntelService {
    pub async fn growth_signals(&self, request: TargetRequest) -> Result<GrowthReport, IntelError> {
        let target = normalize_target(&require(request.url.as_deref(), "url")?)?;
        let GrowthEvidence {
            evidence,
            active_subdomains,
        } = self.growth_evidence(&target).await?;
        let card = self.engine.score(&PROFILE, &evidence, None);

        Ok(GrowthReport {
            url: target.to_string(),
            growth_score: card.score,
            growth_level: card.tier.to_string(),
            signals: card.notes(SignalKind::Signal),
            active_subdomains,
            recommendation: card.recommendation().unwrap_or_default().to_string(),
        })
    }

    pub(crate) async fn growth_evidence(&self, target: &Url) -> Result<GrowthEvidence, IntelError> {
        let page = self
            .fetch_primary(Domain::Growth.label(), target, timeouts::GROWTH_PAGE)
            .await?;
        let mut evidence = Evidence::new(target.clone()).with_page(PRIMARY, page);

        let active_subdomains = self.active_subdomains(target).await;
        evidence.insert_fact(
            ACTIVE_SUBDOMAINS,
            Fact::Items(active_subdomains.clone()),
        );

        let careers = probe_first(
            &self.fetcher,
            &candidates(target, CAREERS_PATHS),
            ProbeMethod::HeadDirect,
            timeouts::CAREERS_PROBE,
        )
        .await;
        evidence.insert_fact(CAREERS_PAGE, Fact::Flag(careers.page.is_some()));

        if let Some(count) = self.sitemap_size(target).await {
            evidence.insert_fact(SITEMAP_URLS, Fact::Number(count as f64));
        }

        Ok(GrowthEvidence {
            evidence,
            active_subdomains,
        })
    }

    async fn active_subdomains(&self, target: &Url) -> Vec<String> {
        let Some(host) = target.host_str() else {
            return Vec::new();
        };
        let port = target.port().map(|port| format!(":{port}")).unwrap_or_default();

        let (names, probes): (Vec<&str>, Vec<Url>) = SUBDOMAINS
            .iter()
            .filter_map(|sub| {
                let url = Url::parse(&format!("https://{sub}.{host}{port}")).ok()?;
                Some((*sub, url))
            })
            .unzip();

        probe_each(&self.fetcher, probes, ProbeMethod::Head, timeouts::SUBDOMAIN_PROBE)
            .await
            .into_iter()
            .zip(names)
            .filter(|((_, outcome), _)| outcome.status() == ProbeStatus::Found)
            .map(|(_, sub)| sub.to_string())
            .collect()
    }

    async fn sitemap_size(&self, target: &Url) -> Option<usize> {
        let url = origin(target).join("/sitemap.xml").ok()?;
        let page = self
            .fetch_optional(&url, timeouts::GROWTH_SITEMAP)
            .await
            .filter(|page| page.is_success())?;
        Some(parse_sitemap(&page.body).locations.len())
    }
}
