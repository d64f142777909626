use crate::evidence::html::{select, text_content};
use crate::evidence::{probe, ProbeMethod, ProbeOutcome};
use crate::workflows::request::{require, QueryRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::HashSet;

const MAX_RESULTS: usize = 15;
const SNIPPET_CHARS: usize = 200;
const TITLE_CHARS: usize = 100;
const RESULT_BLOCKS: &str = "div.g, div[data-sokoban-container]";
const SNIPPETS: &str = "div.VwiC3b, div.IsZvec, span.aCOpRe, div[data-sncf]";
const FALLBACK_LINKS: &str = r#"a[href^="http"]:not([href*="google.com"])"#;
const FOREIGN_HOSTS: [&str; 3] = ["google.", "gstatic.", "youtube."];
const NOTE: &str = "Results may be limited due to search engine anti-scraping. \
                    For best results, use the query directly in the search engine.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DorkReport {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total: usize,
    pub google_url: String,
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntelService {
    /// Run a search query and extract organic results.
    ///
    /// A refused search is reported in the payload with `blocked: true` and
    /// the direct search URL, not as a failure.
    pub async fn dork_search(&self, request: QueryRequest) -> Result<DorkReport, IntelError> {
        let query = require(request.query.as_deref(), "query")?;
        let search_url = self.endpoints.search(&query, "20");

        let refusal = match probe(&self.fetcher, &search_url, ProbeMethod::Get, timeouts::DORK).await {
            ProbeOutcome::Found(page) if page.status == 200 => {
                let results = extract_results(&page.body);
                return Ok(DorkReport {
                    query,
                    total: results.len(),
                    results: results.into_iter().take(MAX_RESULTS).collect(),
                    google_url: search_url.to_string(),
                    blocked: false,
                    note: Some(NOTE),
                    error: None,
                });
            }
            ProbeOutcome::Found(page) => format!("Status: {}", page.status),
            ProbeOutcome::Absent { status } => format!("Status: {status}"),
            ProbeOutcome::Blocked { reason } => reason.to_string(),
            ProbeOutcome::Failed(source) => return Err(IntelError::fatal("Dorking", source)),
        };

        Ok(DorkReport {
            query,
            results: Vec::new(),
            total: 0,
            google_url: search_url.to_string(),
            blocked: true,
            note: None,
            error: Some(format!(
                "Search engine blocked the request ({refusal}). Try using the query directly in the search engine."
            )),
        })
    }
}

/// Unique result links in page order.
fn extract_results(body: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(body);
    let mut results = organic_results(&document);
    if results.is_empty() {
        results = fallback_results(&document);
    }

    let mut seen = HashSet::new();
    results.retain(|result| seen.insert(result.url.clone()));
    results
}

fn organic_results(document: &Html) -> Vec<SearchResult> {
    let (Ok(title), Ok(link), Ok(snippet)) = (
        Selector::parse("h3"),
        Selector::parse("a[href]"),
        Selector::parse(SNIPPETS),
    ) else {
        return Vec::new();
    };

    select(document, RESULT_BLOCKS)
        .into_iter()
        .filter_map(|block| {
            let url = block.select(&link).next()?.value().attr("href")?;
            if !url.starts_with("http") || url.starts_with("https://www.google") {
                return None;
            }
            Some(SearchResult {
                title: block
                    .select(&title)
                    .next()
                    .map_or_else(|| "No title".to_string(), text_of),
                url: url.to_string(),
                snippet: block
                    .select(&snippet)
                    .next()
                    .map(|s| truncate_chars(&text_of(s), SNIPPET_CHARS))
                    .unwrap_or_default(),
            })
        })
        .collect()
}

fn fallback_results(document: &Html) -> Vec<SearchResult> {
    let Ok(heading) = Selector::parse("h3, h2, h1") else {
        return Vec::new();
    };

    select(document, FALLBACK_LINKS)
        .into_iter()
        .filter_map(|anchor| {
            let url = anchor.value().attr("href")?;
            if FOREIGN_HOSTS.iter().any(|host| url.contains(host)) {
                return None;
            }
            let title = anchor.select(&heading).next().unwrap_or(anchor);
            Some(SearchResult {
                title: truncate_chars(&text_of(title), TITLE_CHARS),
                url: url.to_string(),
                snippet: String::new(),
            })
        })
        .take(MAX_RESULTS)
        .collect()
}

fn text_of(element: ElementRef<'_>) -> String {
    text_content(element).trim().to_string()
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organic_blocks_yield_titles_and_snippets() {
        let body = r#"<div class="g">
                <a href="https://acme.io/pricing"><h3>Acme pricing</h3></a>
                <div class="VwiC3b">Plans for teams</div>
            </div>
            <div class="g"><a href="https://www.google.com/preferences">settings</a></div>
            <div data-sokoban-container="x"><a href="https://acme.io/pricing"><h3>Again</h3></a></div>
            <div class="g"><a href="https://globex.example/">no heading</a></div>"#;

        let results = extract_results(body);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Acme pricing");
        assert_eq!(results[0].snippet, "Plans for teams");
        assert_eq!(results[1].title, "No title");
        assert_eq!(results[1].url, "https://globex.example/");
    }

    #[test]
    fn plain_links_are_used_when_no_blocks_match() {
        let body = r#"<a href="https://acme.io/a"><h2>First</h2></a>
            <a href="https://www.google.com/x">google</a>
            <a href="https://fonts.gstatic.com/y">static</a>
            <a href="https://acme.io/b">Second</a>
            <a href="/relative">relative</a>"#;

        let results = extract_results(body);

        let urls: Vec<_> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://acme.io/a", "https://acme.io/b"]);
        assert_eq!(results[0].title, "First");
        assert_eq!(results[1].title, "Second");
    }

    #[test]
    fn snippets_are_truncated_by_characters() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }
}
