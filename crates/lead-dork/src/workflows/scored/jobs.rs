use crate::evidence::{probe_first, Evidence, Page, ProbeMethod};
use crate::scoring::catalog::jobs::{CAREERS_PATHS, POSITION_WORDS, PROFILE, ROLE_GROUP, SIGNAL_GROUP};
use crate::scoring::catalog::CAREERS;
use crate::workflows::request::{candidates, normalize_target, require, TargetRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use serde::Serialize;
use url::Url;

const MAX_POSITIONS: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct JobsReport {
    pub url: String,
    pub jobs_found: bool,
    pub total_positions: usize,
    pub tech_roles: Vec<String>,
    pub hiring_signals: Vec<String>,
    pub opportunity_score: u8,
    pub opportunity_level: String,
    pub pitch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub careers_url: Option<String>,
}

pub(crate) struct JobsEvidence {
    pub evidence: Evidence,
    pub careers_url: Option<Url>,
}

impl IntelService {
    /// Unreachable sites yield a zero score rather than an error.
    pub async fn job_intelligence(&self, request: TargetRequest) -> Result<JobsReport, IntelError> {
        let target = normalize_target(&require(request.url.as_deref(), "url")?)?;
        let JobsEvidence {
            evidence,
            careers_url,
        } = self.jobs_evidence(&target).await;
        let card = self.engine.score(&PROFILE, &evidence, None);

        let tech_roles = card.group_notes(ROLE_GROUP);
        let mut hiring_signals = Vec::new();
        if !tech_roles.is_empty() {
            hiring_signals.push(format!("Hiring for {} tech roles", tech_roles.len()));
        }
        hiring_signals.extend(card.group_notes(SIGNAL_GROUP));

        Ok(JobsReport {
            url: target.to_string(),
            jobs_found: !tech_roles.is_empty(),
            total_positions: evidence.page(CAREERS).map_or(0, estimate_positions),
            tech_roles,
            hiring_signals,
            opportunity_score: card.score,
            opportunity_level: card.tier.to_string(),
            pitch: card.recommendation().unwrap_or_default().to_string(),
            careers_url: careers_url.map(String::from),
        })
    }

    pub(crate) async fn jobs_evidence(&self, target: &Url) -> JobsEvidence {
        let mut evidence = Evidence::new(target.clone());

        let hit = probe_first(
            &self.fetcher,
            &candidates(target, CAREERS_PATHS),
            ProbeMethod::Get,
            timeouts::JOBS,
        )
        .await;

        let careers_url = match hit.page {
            Some(page) => {
                let url = page.requested_url.clone();
                evidence.insert_page(CAREERS, page);
                Some(url)
            }
            None => {
                if let Some(page) = self.fetch_optional(target, timeouts::JOBS).await {
                    evidence.insert_page(CAREERS, page);
                }
                None
            }
        };

        JobsEvidence {
            evidence,
            careers_url,
        }
    }
}

/// Half the job-word mentions, capped.
fn estimate_positions(page: &Page) -> usize {
    let body = page.body.to_lowercase();
    let mentions: usize = POSITION_WORDS
        .iter()
        .map(|word| body.matches(word).count())
        .sum();
    (mentions / 2).min(MAX_POSITIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_estimated_from_job_words() {
        let url = Url::parse("https://acme.io/careers").unwrap();
        let page = Page::new(url.clone(), 200, "Open role: engineer. Another job opening.");
        // role, job, opening
        assert_eq!(estimate_positions(&page), 1);

        let busy = Page::new(url, 200, "job ".repeat(500));
        assert_eq!(estimate_positions(&busy), MAX_POSITIONS);
    }
}
