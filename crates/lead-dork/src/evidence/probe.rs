use super::{FetchError, Page, PageFetcher};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    Get,
    Head,
    /// HEAD that reports a redirect as-is instead of following it.
    HeadDirect,
}

/// Result of one existence probe. Failures never propagate past this type.
#[derive(Debug)]
pub enum ProbeOutcome {
    Found(Page),
    Absent { status: u16 },
    Blocked { reason: &'static str },
    Failed(FetchError),
}

impl ProbeOutcome {
    pub fn status(&self) -> ProbeStatus {
        match self {
            ProbeOutcome::Found(_) => ProbeStatus::Found,
            ProbeOutcome::Absent { .. } => ProbeStatus::NotFound,
            ProbeOutcome::Blocked { .. } => ProbeStatus::Blocked,
            ProbeOutcome::Failed(_) => ProbeStatus::Error,
        }
    }

    pub fn into_page(self) -> Option<Page> {
        match self {
            ProbeOutcome::Found(page) => Some(page),
            _ => None,
        }
    }
}

/// Caller-facing summary of a probe, distinguishing refusal from absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Found,
    NotFound,
    Blocked,
    Error,
}

impl ProbeStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::NotFound => "not_found",
            Self::Blocked => "blocked",
            Self::Error => "error",
        }
    }
}

/// Outcome of an ordered, short-circuiting probe sequence.
#[derive(Debug)]
pub struct FirstHit {
    pub page: Option<Page>,
    pub status: ProbeStatus,
}

pub async fn probe(
    fetcher: &PageFetcher,
    url: &Url,
    method: ProbeMethod,
    timeout: Duration,
) -> ProbeOutcome {
    let result = match method {
        ProbeMethod::Get => fetcher.get(url, timeout).await,
        ProbeMethod::Head => fetcher.head(url, timeout).await,
        ProbeMethod::HeadDirect => fetcher.head_direct(url, timeout).await,
    };

    let outcome = match result {
        Ok(page) => classify(page),
        Err(err) => ProbeOutcome::Failed(err),
    };

    debug!(%url, status = outcome.status().label(), "probe finished");
    outcome
}

/// Try candidates in order and stop at the first success.
pub async fn probe_first(
    fetcher: &PageFetcher,
    candidates: &[Url],
    method: ProbeMethod,
    timeout: Duration,
) -> FirstHit {
    let mut status = ProbeStatus::NotFound;
    for url in candidates {
        match probe(fetcher, url, method, timeout).await {
            ProbeOutcome::Found(page) => {
                return FirstHit {
                    page: Some(page),
                    status: ProbeStatus::Found,
                }
            }
            ProbeOutcome::Blocked { .. } => status = ProbeStatus::Blocked,
            ProbeOutcome::Failed(_) if status == ProbeStatus::NotFound => {
                status = ProbeStatus::Error
            }
            _ => {}
        }
    }

    FirstHit { page: None, status }
}

/// Probe every candidate independently, sequentially.
pub async fn probe_each(
    fetcher: &PageFetcher,
    candidates: Vec<Url>,
    method: ProbeMethod,
    timeout: Duration,
) -> Vec<(Url, ProbeOutcome)> {
    let mut outcomes = Vec::with_capacity(candidates.len());
    for url in candidates {
        let outcome = probe(fetcher, &url, method, timeout).await;
        outcomes.push((url, outcome));
    }
    outcomes
}

fn classify(page: Page) -> ProbeOutcome {
    if let Some(reason) = detect_block(page.status, &page.final_url, &page.body) {
        return ProbeOutcome::Blocked { reason };
    }

    if page.is_success() {
        ProbeOutcome::Found(page)
    } else {
        ProbeOutcome::Absent {
            status: page.status,
        }
    }
}

/// Recognize rate limiting and bot challenges.
fn detect_block(status: u16, url: &Url, body: &str) -> Option<&'static str> {
    if status == 429 {
        return Some("rate limited (HTTP 429)");
    }
    if status == 403 {
        return Some("access forbidden (HTTP 403)");
    }

    let url_lc = url.as_str().to_ascii_lowercase();
    let body_lc = body.to_ascii_lowercase();

    if url_lc.contains("/sorry/") || body_lc.contains("/sorry/index") {
        return Some("challenge redirect (/sorry/) detected");
    }
    if body_lc.contains("g-recaptcha") || body_lc.contains("recaptcha/api") {
        return Some("reCAPTCHA challenge marker detected");
    }
    if body_lc.contains("unusual traffic from your computer network") {
        return Some("unusual traffic interstitial detected");
    }
    if body_lc.contains("verify you are human") || body_lc.contains("verify you are a human") {
        return Some("human-verification challenge detected");
    }

    None
}
