use super::github::{repository_links, Repository};
use super::{find_all, find_first, pattern, RE_EMAIL};
use crate::evidence::html::{dedupe, select};
use crate::evidence::{probe, probe_first, ProbeMethod, ProbeOutcome, ProbeStatus};
use crate::workflows::request::{bare_domain, candidates, normalize_target, require, DomainRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use scraper::Html;
use serde::Serialize;
use url::Url;

const MAX_EMAILS: usize = 5;
const MAX_REPOSITORIES: usize = 3;
const CAREERS_PATHS: [&str; 4] = ["/careers", "/jobs", "/about/careers", "/company/careers"];
const PRESS_PATHS: [&str; 5] = ["/press", "/news", "/media", "/newsroom", "/blog"];
const SOURCE_WEIGHT: u8 = 20;

pattern!(
    RE_LINKEDIN_COMPANY,
    r"https?://(?:www\.)?linkedin\.com/company/[\w-]+"
);
pattern!(RE_TWITTER_PROFILE, r"https?://(?:www\.)?twitter\.com/\w+");

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebsiteSource {
    pub status: WebsiteStatus,
    pub emails: Vec<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkSource {
    pub status: ProbeStatus,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GithubSource {
    pub status: ProbeStatus,
    pub repos: Vec<Repository>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSources {
    pub website: WebsiteSource,
    /// Only searched when a company name was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<LinkSource>,
    pub github: GithubSource,
    pub careers: LinkSource,
    pub press: LinkSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedData {
    pub total_emails: usize,
    pub linkedin_found: bool,
    pub github_repos: usize,
    pub has_careers_page: bool,
    pub has_press_page: bool,
    pub completeness: u8,
}

impl EnrichedData {
    fn summarize(sources: &ProfileSources) -> Self {
        let linkedin_found = sources
            .linkedin
            .as_ref()
            .is_some_and(|source| source.status == ProbeStatus::Found);
        let found = [
            sources.website.status == WebsiteStatus::Success,
            linkedin_found,
            sources.github.status == ProbeStatus::Found,
            sources.careers.status == ProbeStatus::Found,
            sources.press.status == ProbeStatus::Found,
        ];

        Self {
            total_emails: sources.website.emails.len(),
            linkedin_found,
            github_repos: sources.github.repos.len(),
            has_careers_page: sources.careers.status == ProbeStatus::Found,
            has_press_page: sources.press.status == ProbeStatus::Found,
            completeness: found.iter().filter(|hit| **hit).count() as u8 * SOURCE_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub company: String,
    pub domain: String,
    pub sources: ProfileSources,
    pub enriched_data: EnrichedData,
}

impl IntelService {
    /// Merge what the website, search, GitHub and common paths reveal about a company.
    ///
    /// Every source degrades independently; the report is always produced.
    pub async fn aggregate_profile(&self, request: DomainRequest) -> Result<ProfileReport, IntelError> {
        let raw = require(request.domain.as_deref(), "domain")?;
        let company_name = request
            .company_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let host = bare_domain(&raw);
        let domain = host.strip_prefix("www.").unwrap_or(&host).to_string();
        let scheme = if raw.trim().to_ascii_lowercase().starts_with("http://") {
            "http"
        } else {
            "https"
        };
        let site = normalize_target(&format!("{scheme}://{domain}"))?;

        let website = self.website_source(&site, &domain).await;
        let linkedin = match company_name.as_deref() {
            Some(company) => Some(self.linkedin_source(company).await),
            None => None,
        };
        let github = self
            .github_source(company_name.as_deref().unwrap_or(&domain))
            .await;
        let careers = self.path_source(&site, &CAREERS_PATHS).await;
        let press = self.path_source(&site, &PRESS_PATHS).await;

        let sources = ProfileSources {
            website,
            linkedin,
            github,
            careers,
            press,
        };
        Ok(ProfileReport {
            company: company_name.unwrap_or_else(|| domain.clone()),
            domain,
            enriched_data: EnrichedData::summarize(&sources),
            sources,
        })
    }

    async fn website_source(&self, site: &Url, domain: &str) -> WebsiteSource {
        match self.fetcher.get(site, timeouts::PROFILE_PAGE).await {
            Ok(page) => website_findings(&page.body, domain),
            Err(err) => WebsiteSource {
                status: WebsiteStatus::Failed,
                emails: Vec::new(),
                linkedin: None,
                twitter: None,
                error: Some(err.to_string()),
            },
        }
    }

    async fn linkedin_source(&self, company: &str) -> LinkSource {
        let url = self
            .endpoints
            .search(&format!("site:linkedin.com/company {company}"), "10");
        match probe(&self.fetcher, &url, ProbeMethod::Get, timeouts::PROFILE_SEARCH).await {
            ProbeOutcome::Found(page) => {
                let url = linkedin_company_links(&page.body).into_iter().next();
                LinkSource {
                    status: if url.is_some() {
                        ProbeStatus::Found
                    } else {
                        ProbeStatus::NotFound
                    },
                    url,
                }
            }
            outcome => LinkSource {
                status: outcome.status(),
                url: None,
            },
        }
    }

    async fn github_source(&self, query: &str) -> GithubSource {
        let url = self.endpoints.github_repositories(query);
        match probe(&self.fetcher, &url, ProbeMethod::Get, timeouts::PROFILE_SEARCH).await {
            ProbeOutcome::Found(page) => {
                let repos = repository_links(&self.endpoints, &page.body, MAX_REPOSITORIES);
                GithubSource {
                    status: if repos.is_empty() {
                        ProbeStatus::NotFound
                    } else {
                        ProbeStatus::Found
                    },
                    repos,
                }
            }
            outcome => GithubSource {
                status: outcome.status(),
                repos: Vec::new(),
            },
        }
    }

    async fn path_source(&self, site: &Url, paths: &[&str]) -> LinkSource {
        let hit = probe_first(
            &self.fetcher,
            &candidates(site, paths),
            ProbeMethod::HeadDirect,
            timeouts::PROFILE_PROBE,
        )
        .await;
        LinkSource {
            status: hit.status,
            url: hit.page.map(|page| page.requested_url.to_string()),
        }
    }
}

fn website_findings(body: &str, domain: &str) -> WebsiteSource {
    let markup = body.to_lowercase();
    let mut emails: Vec<String> = dedupe(find_all(&RE_EMAIL, &markup))
        .into_iter()
        .filter(|email| email.contains(domain))
        .collect();
    emails.truncate(MAX_EMAILS);

    WebsiteSource {
        status: WebsiteStatus::Success,
        emails,
        linkedin: find_first(&RE_LINKEDIN_COMPANY, &markup),
        twitter: find_first(&RE_TWITTER_PROFILE, &markup),
        error: None,
    }
}

fn linkedin_company_links(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    select(&document, "a[href]")
        .into_iter()
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.contains("linkedin.com/company/"))
        .map(str::to_string)
        .collect()
}
