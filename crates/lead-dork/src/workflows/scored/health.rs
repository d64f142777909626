use crate::evidence::{Evidence, Fact, FetchFailure, PRIMARY};
use crate::scoring::catalog::health::PROFILE;
use crate::scoring::catalog::LOAD_SECONDS;
use crate::scoring::SignalKind;
use crate::workflows::request::{normalize_target, require, TargetRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use serde::Serialize;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub url: String,
    pub health_score: u8,
    pub health_level: String,
    pub critical_issues: Vec<String>,
    pub warnings: Vec<String>,
    pub opportunity: String,
}

impl IntelService {
    /// Never fails on fetch errors; they become penalties instead.
    pub async fn tech_health(&self, request: TargetRequest) -> Result<HealthReport, IntelError> {
        let target = normalize_target(&require(request.url.as_deref(), "url")?)?;
        let evidence = self.health_evidence(&target).await;
        let card = self.engine.score(&PROFILE, &evidence, None);

        Ok(HealthReport {
            url: target.to_string(),
            health_score: card.score,
            health_level: card.tier.to_string(),
            critical_issues: card.notes(SignalKind::Issue),
            warnings: card.notes(SignalKind::Warning),
            opportunity: card.recommendation().unwrap_or_default().to_string(),
        })
    }

    pub(crate) async fn health_evidence(&self, target: &Url) -> Evidence {
        let mut evidence = Evidence::new(target.clone());
        match self.fetcher.get(target, timeouts::HEALTH).await {
            Ok(page) => {
                evidence.insert_fact(LOAD_SECONDS, Fact::Number(page.elapsed.as_secs_f64()));
                evidence.insert_page(PRIMARY, page);
            }
            Err(err) => {
                debug!(url = %target, error = %err, "health target could not be loaded");
                evidence.record_failure(FetchFailure::from(&err));
            }
        }
        evidence
    }
}
