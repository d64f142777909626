use crate::evidence::html::{compact_ws, select, text_content};
use crate::workflows::request::{require, CompanyRequest};
use crate::workflows::service::{timeouts, Endpoints};
use crate::workflows::{IntelError, IntelService};
use scraper::Html;
use serde::Serialize;

const MAX_REPOSITORIES: usize = 5;
const INSIGHTS: [&str; 2] = [
    "Found public repositories mentioning company",
    "Check repos for tech stack and employees",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GithubReport {
    pub company: String,
    pub repos: Vec<Repository>,
    pub insights: Vec<&'static str>,
}

impl IntelService {
    pub async fn github_osint(&self, request: CompanyRequest) -> Result<GithubReport, IntelError> {
        let company = require(request.company.as_deref(), "company")?;
        let url = self
            .endpoints
            .github_repositories(&format!("{company} in:readme"));
        let page = self.fetch_primary("GitHub OSINT", &url, timeouts::GITHUB).await?;

        let repos = repository_links(&self.endpoints, &page.body, MAX_REPOSITORIES);
        let insights = if repos.is_empty() {
            Vec::new()
        } else {
            INSIGHTS.to_vec()
        };

        Ok(GithubReport {
            company,
            repos,
            insights,
        })
    }
}

/// Repository anchors of a GitHub search page; only the first `limit` are inspected.
pub(super) fn repository_links(endpoints: &Endpoints, body: &str, limit: usize) -> Vec<Repository> {
    let document = Html::parse_document(body);
    select(&document, "a.v-align-middle")
        .into_iter()
        .take(limit)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            // `/owner/repo`
            if !href.starts_with('/') || href.split('/').count() < 3 {
                return None;
            }
            Some(Repository {
                name: compact_ws(&text_content(anchor)),
                url: endpoints.github_link(href),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;

    #[test]
    fn repository_anchors_need_owner_and_name() {
        let endpoints = Endpoints::from_config(&FetchConfig::default()).unwrap();
        let body = r#"
            <a class="v-align-middle" href="/acme/widgets"> acme/<em>widgets</em> </a>
            <a class="v-align-middle" href="https://elsewhere.example/x">offsite</a>
            <a class="v-align-middle" href="/acme">owner only</a>
            <a class="v-align-middle" href="/acme/gears">acme/gears</a>
            <a class="other" href="/acme/ignored">ignored</a>"#;

        let repos = repository_links(&endpoints, body, 5);
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].url, "https://github.com/acme/widgets");
        assert_eq!(repos[1].name, "acme/gears");

        assert_eq!(repository_links(&endpoints, body, 1).len(), 1);
    }
}
