//! Workflows that collect evidence and run it through the scoring engine.

mod business;
mod growth;
mod health;
mod jobs;
mod lead;

pub use business::{BusinessReport, SignalGroup};
pub use growth::GrowthReport;
pub use health::HealthReport;
pub use jobs::JobsReport;
pub use lead::LeadReport;

use super::request::{bare_domain, normalize_target};
use super::{IntelError, IntelService};
use crate::scoring::{Domain, ScoreCard};

impl IntelService {
    /// Collect evidence for `raw_target` and score it in one domain.
    pub async fn scorecard(&self, domain: Domain, raw_target: &str) -> Result<ScoreCard, IntelError> {
        let target = normalize_target(raw_target)?;
        let evidence = match domain {
            Domain::Lead => self.lead_evidence(&target).await?,
            Domain::Growth => self.growth_evidence(&target).await?.evidence,
            Domain::TechnicalHealth => self.health_evidence(&target).await,
            Domain::JobOpportunity => self.jobs_evidence(&target).await.evidence,
            Domain::Business => {
                let domain_name = bare_domain(target.as_str());
                self.business_evidence(None, Some(domain_name.as_str()))
                    .await?
                    .evidence
            }
        };
        Ok(self.engine.score(domain.profile(), &evidence, None))
    }
}
