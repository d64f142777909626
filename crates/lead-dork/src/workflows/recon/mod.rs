//! Reconnaissance lookups that return structured findings without a score.

mod competitors;
mod contacts;
mod dork;
mod feeds;
mod github;
mod keywords;
mod metadata;
mod profile;
mod sitemap;
mod tech;
mod whois;

pub use competitors::CompetitorReport;
pub use contacts::ContactsReport;
pub use dork::{DorkReport, SearchResult};
pub use feeds::{Feed, FeedsReport};
pub use github::{GithubReport, Repository};
pub use keywords::{DiscoveryReport, KeywordDetail, KeywordReport};
pub use metadata::{MetadataReport, PageMetadata};
pub use profile::{
    EnrichedData, GithubSource, LinkSource, ProfileReport, ProfileSources, WebsiteSource,
    WebsiteStatus,
};
pub use sitemap::SitemapReport;
pub use tech::{TechReport, TechStack};
pub use whois::WhoisReport;

use regex::Regex;
use std::sync::LazyLock;

macro_rules! pattern {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: std::sync::LazyLock<Option<regex::Regex>> =
            std::sync::LazyLock::new(|| regex::Regex::new($regex).ok());
    };
}
pub(crate) use pattern;

pattern!(RE_EMAIL, r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b");

/// Every match of a static pattern, in document order.
pub(crate) fn find_all(pattern: &LazyLock<Option<Regex>>, haystack: &str) -> Vec<String> {
    match pattern.as_ref() {
        Some(regex) => regex
            .find_iter(haystack)
            .map(|m| m.as_str().to_string())
            .collect(),
        None => Vec::new(),
    }
}

pub(crate) fn find_first(pattern: &LazyLock<Option<Regex>>, haystack: &str) -> Option<String> {
    pattern
        .as_ref()
        .and_then(|regex| regex.find(haystack))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    pattern!(RE_BROKEN, r"([unclosed");

    #[test]
    fn broken_patterns_match_nothing() {
        assert!(find_all(&RE_BROKEN, "anything").is_empty());
        assert!(find_first(&RE_BROKEN, "anything").is_none());
    }

    #[test]
    fn emails_are_found_in_order() {
        let found = find_all(&RE_EMAIL, "mail sales@acme.io or ops@acme.io today");
        assert_eq!(found, vec!["sales@acme.io", "ops@acme.io"]);
    }
}
