//! Fetched artifacts used as scoring input.
//!
//! An [`Evidence`] bundle is assembled per request from one or more fetched
//! pages plus derived facts (probe results, sitemap sizes, load timings).
//! It is never cached; it lives for exactly one evaluation.

mod fetch;
pub mod html;
mod probe;
pub mod sitemap;

pub use fetch::{FetchError, PageFetcher};
pub use probe::{probe, probe_each, probe_first, FirstHit, ProbeMethod, ProbeOutcome, ProbeStatus};

use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Name of the page fetched from the caller's target URL.
pub const PRIMARY: &str = "primary";

/// One fetched HTTP response.
#[derive(Debug, Clone)]
pub struct Page {
    pub requested_url: Url,
    pub final_url: Url,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub elapsed: Duration,
}

impl Page {
    /// Build a page directly, as if `url` answered with `status` and `body`.
    pub fn new(url: Url, status: u16, body: impl Into<String>) -> Self {
        Self {
            requested_url: url.clone(),
            final_url: url,
            status,
            headers: BTreeMap::new(),
            body: body.into(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn with_final_url(mut self, final_url: Url) -> Self {
        self.final_url = final_url;
        self
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Derived measurement attached to an evidence bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum Fact {
    Number(f64),
    Flag(bool),
    Items(Vec<String>),
}

/// Why the primary page could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    TimedOut,
    Failed(String),
}

impl From<&FetchError> for FetchFailure {
    fn from(err: &FetchError) -> Self {
        if err.is_timeout() {
            FetchFailure::TimedOut
        } else {
            FetchFailure::Failed(err.to_string())
        }
    }
}

/// Everything known about one target during a single evaluation.
#[derive(Debug, Clone)]
pub struct Evidence {
    target: Url,
    pages: BTreeMap<&'static str, Page>,
    facts: BTreeMap<&'static str, Fact>,
    failure: Option<FetchFailure>,
}

impl Evidence {
    pub fn new(target: Url) -> Self {
        Self {
            target,
            pages: BTreeMap::new(),
            facts: BTreeMap::new(),
            failure: None,
        }
    }

    pub fn with_page(mut self, name: &'static str, page: Page) -> Self {
        self.insert_page(name, page);
        self
    }

    pub fn with_fact(mut self, name: &'static str, fact: Fact) -> Self {
        self.insert_fact(name, fact);
        self
    }

    pub fn with_failure(mut self, failure: FetchFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn insert_page(&mut self, name: &'static str, page: Page) {
        self.pages.insert(name, page);
    }

    pub fn insert_fact(&mut self, name: &'static str, fact: Fact) {
        self.facts.insert(name, fact);
    }

    pub fn record_failure(&mut self, failure: FetchFailure) {
        self.failure = Some(failure);
    }

    /// The URL the caller asked about, after scheme normalization.
    pub fn target(&self) -> &Url {
        &self.target
    }

    pub fn page(&self, name: &str) -> Option<&Page> {
        self.pages.get(name)
    }

    pub fn pages(&self) -> impl Iterator<Item = (&'static str, &Page)> {
        self.pages.iter().map(|(name, page)| (*name, page))
    }

    pub fn fact(&self, name: &str) -> Option<&Fact> {
        self.facts.get(name)
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        self.failure.as_ref()
    }
}
