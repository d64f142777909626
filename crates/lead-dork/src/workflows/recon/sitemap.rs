use crate::evidence::sitemap::parse_sitemap;
use crate::evidence::{probe_first, ProbeMethod};
use crate::workflows::request::{candidates, normalize_target, require, TargetRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use serde::Serialize;

const SITEMAP_PATHS: [&str; 3] = ["/sitemap.xml", "/sitemap_index.xml", "/sitemap-index.xml"];
const MAX_URLS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapReport {
    pub url: String,
    pub urls: Vec<String>,
    pub total: usize,
}

impl IntelService {
    /// A missing or unparseable sitemap is an empty listing, never an error.
    pub async fn sitemap_urls(&self, request: TargetRequest) -> Result<SitemapReport, IntelError> {
        let target = normalize_target(&require(request.url.as_deref(), "url")?)?;
        let hit = probe_first(
            &self.fetcher,
            &candidates(&target, &SITEMAP_PATHS),
            ProbeMethod::Get,
            timeouts::SITEMAP,
        )
        .await;

        let mut urls = match hit.page {
            Some(page) => parse_sitemap(&page.body).locations,
            None => Vec::new(),
        };
        let total = urls.len();
        urls.truncate(MAX_URLS);

        Ok(SitemapReport {
            url: target.to_string(),
            urls,
            total,
        })
    }
}
