use crate::evidence::html::select;
use crate::evidence::{probe_each, ProbeMethod, ProbeOutcome};
use crate::workflows::request::{candidates, normalize_target, require, TargetRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use scraper::Html;
use serde::Serialize;
use url::Url;

const FEED_PATHS: [&str; 8] = [
    "/feed",
    "/rss",
    "/feed.xml",
    "/rss.xml",
    "/atom.xml",
    "/blog/feed",
    "/blog/rss",
    "/feeds/posts/default",
];
const FEED_LINKS: &str = r#"link[type="application/rss+xml"], link[type="application/atom+xml"]"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feed {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedsReport {
    pub feeds: Vec<Feed>,
    pub total: usize,
}

impl IntelService {
    /// Probe conventional feed paths, then read `<link>` declarations.
    pub async fn discover_feeds(&self, request: TargetRequest) -> Result<FeedsReport, IntelError> {
        let target = normalize_target(&require(request.url.as_deref(), "url")?)?;

        let outcomes = probe_each(
            &self.fetcher,
            candidates(&target, &FEED_PATHS),
            ProbeMethod::Head,
            timeouts::FEED_PROBE,
        )
        .await;
        let mut feeds: Vec<Feed> = outcomes
            .into_iter()
            .filter(|(_, outcome)| matches!(outcome, ProbeOutcome::Found(_)))
            .map(|(url, _)| Feed {
                url: url.to_string(),
                kind: "RSS/Atom".to_string(),
                status: Some("Active".to_string()),
                title: None,
            })
            .collect();

        if let Some(page) = self.fetch_optional(&target, timeouts::FEED_PAGE).await {
            for feed in declared_feeds(&target, &page.body) {
                if !feeds.iter().any(|known| known.url == feed.url) {
                    feeds.push(feed);
                }
            }
        }

        Ok(FeedsReport {
            total: feeds.len(),
            feeds,
        })
    }
}

fn declared_feeds(base: &Url, body: &str) -> Vec<Feed> {
    let document = Html::parse_document(body);
    select(&document, FEED_LINKS)
        .into_iter()
        .filter_map(|link| {
            let element = link.value();
            let href = element.attr("href").filter(|href| !href.is_empty())?;
            let url = base.join(href).ok()?;
            Some(Feed {
                url: url.to_string(),
                kind: element.attr("type").unwrap_or("RSS").to_string(),
                status: None,
                title: Some(element.attr("title").unwrap_or("Feed").to_string()),
            })
        })
        .collect()
}
