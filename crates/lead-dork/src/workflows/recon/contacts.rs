use super::{find_all, find_first, pattern, RE_EMAIL};
use crate::evidence::html::{dedupe, visible_text};
use crate::workflows::request::{normalize_target, require, TargetRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use regex::Regex;
use scraper::Html;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const MAX_CONTACTS: usize = 10;

pattern!(
    RE_PHONE,
    r"(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}"
);
pattern!(
    RE_LINKEDIN,
    r#"https?://(?:www\.)?linkedin\.com/(?:company|in)/[^\s<>"]+"#
);
pattern!(RE_TWITTER, r#"https?://(?:www\.)?(?:twitter|x)\.com/[^\s<>"]+"#);
pattern!(RE_FACEBOOK, r#"https?://(?:www\.)?facebook\.com/[^\s<>"]+"#);
pattern!(RE_INSTAGRAM, r#"https?://(?:www\.)?instagram\.com/[^\s<>"]+"#);
pattern!(RE_YOUTUBE, r#"https?://(?:www\.)?youtube\.com/[^\s<>"]+"#);
pattern!(RE_GITHUB, r#"https?://(?:www\.)?github\.com/[^\s<>"]+"#);

static SOCIAL: [(&str, &LazyLock<Option<Regex>>); 6] = [
    ("LinkedIn", &RE_LINKEDIN),
    ("Twitter", &RE_TWITTER),
    ("Facebook", &RE_FACEBOOK),
    ("Instagram", &RE_INSTAGRAM),
    ("YouTube", &RE_YOUTUBE),
    ("GitHub", &RE_GITHUB),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactsReport {
    pub url: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub social_links: BTreeMap<&'static str, String>,
}

impl IntelService {
    pub async fn scrape_contacts(&self, request: TargetRequest) -> Result<ContactsReport, IntelError> {
        let target = normalize_target(&require(request.url.as_deref(), "url")?)?;
        let page = self
            .fetch_primary("Contact scraping", &target, timeouts::CONTACTS)
            .await?;

        let mut report = extract_contacts(&page.body);
        report.url = target.to_string();
        Ok(report)
    }
}

fn extract_contacts(body: &str) -> ContactsReport {
    let text = visible_text(&Html::parse_document(body));

    let mut emails = dedupe(find_all(&RE_EMAIL, &text));
    emails.truncate(MAX_CONTACTS);
    let mut phones = dedupe(find_all(&RE_PHONE, &text));
    phones.truncate(MAX_CONTACTS);

    // Profile links usually live in hrefs, not in the text.
    let haystack = format!("{text} {body}");
    let social_links = SOCIAL
        .iter()
        .filter_map(|(platform, pattern)| {
            find_first(pattern, &haystack).map(|link| (*platform, link))
        })
        .collect();

    ContactsReport {
        url: String::new(),
        emails,
        phones,
        social_links,
    }
}
