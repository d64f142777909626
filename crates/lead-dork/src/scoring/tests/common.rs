use std::time::Duration;

use url::Url;

use crate::evidence::{Evidence, Page, PRIMARY};
use crate::scoring::{ReferenceYears, ScoringConfig, SignalEngine};

pub(super) const YEAR: i32 = 2025;

pub(super) fn engine() -> SignalEngine {
    SignalEngine::new(ScoringConfig::new(ReferenceYears::new(YEAR)))
}

pub(super) fn url(raw: &str) -> Url {
    Url::parse(raw).expect("valid test url")
}

pub(super) fn page(raw_url: &str, body: &str) -> Page {
    Page::new(url(raw_url), 200, body).with_elapsed(Duration::from_millis(250))
}

/// Evidence with only a primary page fetched from `raw_url`.
pub(super) fn primary(raw_url: &str, body: &str) -> Evidence {
    Evidence::new(url(raw_url)).with_page(PRIMARY, page(raw_url, body))
}

pub(super) fn lead_page() -> &'static str {
    r#"<html><head><title>Acme</title></head><body>
        <p>We are hiring engineers.</p>
        <time datetime="2025-01-04">Jan 4</time>
        <a href="https://linkedin.com/company/acme">in</a>
        <a href="https://twitter.com/acme">tw</a>
        <a href="https://facebook.com/acme">fb</a>
        <form action="/subscribe"><input name="email"></form>
        <p>sales@acme.io support@acme.io press@acme.io</p>
        <p>Built with React, a public API and one platform.</p>
        <p>Enterprise plans with dedicated support.</p>
    </body></html>"#
}
