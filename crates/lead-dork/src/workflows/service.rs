use super::IntelError;
use crate::config::FetchConfig;
use crate::evidence::{FetchError, Page, PageFetcher};
use crate::scoring::{ScoringConfig, SignalEngine};
use std::time::Duration;
use url::Url;

/// Per-call timeouts. Existence probes are short, primary fetches long.
pub(crate) mod timeouts {
    use std::time::Duration;

    pub const LEAD: Duration = Duration::from_secs(20);
    pub const GROWTH_PAGE: Duration = Duration::from_secs(15);
    pub const SUBDOMAIN_PROBE: Duration = Duration::from_secs(3);
    pub const CAREERS_PROBE: Duration = Duration::from_secs(5);
    pub const GROWTH_SITEMAP: Duration = Duration::from_secs(10);
    pub const HEALTH: Duration = Duration::from_secs(30);
    pub const JOBS: Duration = Duration::from_secs(10);
    pub const BUSINESS_SEARCH: Duration = Duration::from_secs(10);
    pub const BUSINESS_PRESS: Duration = Duration::from_secs(8);
    pub const BUSINESS_SITEMAP: Duration = Duration::from_secs(8);
    pub const AD_LIBRARY: Duration = Duration::from_secs(10);
    pub const LANDING: Duration = Duration::from_secs(10);
    pub const CONTACTS: Duration = Duration::from_secs(15);
    pub const WHOIS: Duration = Duration::from_secs(10);
    pub const TECH: Duration = Duration::from_secs(15);
    pub const SITEMAP: Duration = Duration::from_secs(10);
    pub const METADATA: Duration = Duration::from_secs(15);
    pub const COMPETITORS: Duration = Duration::from_secs(15);
    pub const KEYWORDS: Duration = Duration::from_secs(15);
    pub const PROFILE_PAGE: Duration = Duration::from_secs(15);
    pub const PROFILE_SEARCH: Duration = Duration::from_secs(10);
    pub const PROFILE_PROBE: Duration = Duration::from_secs(5);
    pub const DORK: Duration = Duration::from_secs(15);
    pub const GITHUB: Duration = Duration::from_secs(15);
    pub const FEED_PROBE: Duration = Duration::from_secs(5);
    pub const FEED_PAGE: Duration = Duration::from_secs(10);
}

/// Third-party bases queried by lookups, parsed once at startup.
#[derive(Debug, Clone)]
pub(crate) struct Endpoints {
    pub search: Url,
    pub github: Url,
    pub ad_library: Url,
    pub whois_api_key: Option<String>,
}

impl Endpoints {
    pub(crate) fn from_config(config: &FetchConfig) -> Result<Self, IntelError> {
        let parse = |raw: &str| Url::parse(raw).map_err(|_| IntelError::Endpoint(raw.to_string()));
        Ok(Self {
            search: parse(&config.search_base_url)?,
            github: parse(&config.github_base_url)?,
            ad_library: parse(&config.ad_library_base_url)?,
            whois_api_key: config.whois_api_key.clone(),
        })
    }

    fn build(base: &Url, path: &str, query: &[(&str, &str)]) -> Url {
        let mut url = base.clone();
        url.set_path(path);
        url.set_query(None);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    pub fn search(&self, query: &str, num: &str) -> Url {
        Self::build(
            &self.search,
            "/search",
            &[("q", query), ("num", num), ("hl", "en")],
        )
    }

    pub fn github_repositories(&self, query: &str) -> Url {
        Self::build(
            &self.github,
            "/search",
            &[("q", query), ("type", "repositories")],
        )
    }

    pub fn github_link(&self, href: &str) -> String {
        let mut base = self.github.clone();
        base.set_path("");
        base.set_query(None);
        format!("{}{}", base.as_str().trim_end_matches('/'), href)
    }

    pub fn ad_library(&self, company: &str) -> Url {
        Self::build(
            &self.ad_library,
            "/ads/library/",
            &[
                ("active_status", "all"),
                ("ad_type", "all"),
                ("country", "ALL"),
                ("q", company),
            ],
        )
    }
}

/// Entry point for every analysis: owns the HTTP client and scoring engine.
pub struct IntelService {
    pub(crate) fetcher: PageFetcher,
    pub(crate) engine: SignalEngine,
    pub(crate) endpoints: Endpoints,
}

impl IntelService {
    pub fn new(fetch: &FetchConfig, scoring: ScoringConfig) -> Result<Self, IntelError> {
        let fetcher = PageFetcher::new(&fetch.user_agent)?;
        Ok(Self {
            fetcher,
            engine: SignalEngine::new(scoring),
            endpoints: Endpoints::from_config(fetch)?,
        })
    }

    pub fn engine(&self) -> &SignalEngine {
        &self.engine
    }

    /// Fetch the page a request is about. Failure here is fatal for `operation`.
    pub(crate) async fn fetch_primary(
        &self,
        operation: &'static str,
        url: &Url,
        timeout: Duration,
    ) -> Result<Page, IntelError> {
        self.fetcher
            .get(url, timeout)
            .await
            .map_err(|source| IntelError::fatal(operation, source))
    }

    /// Fetch a secondary page, degrading any failure to absence.
    pub(crate) async fn fetch_optional(&self, url: &Url, timeout: Duration) -> Option<Page> {
        match self.fetcher.get(url, timeout).await {
            Ok(page) => Some(page),
            Err(err) => {
                log_degraded(url, &err);
                None
            }
        }
    }
}

pub(crate) fn log_degraded(url: &Url, err: &FetchError) {
    tracing::debug!(%url, error = %err, "sub-fetch degraded to absence");
}
