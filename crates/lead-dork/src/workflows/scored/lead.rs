use crate::evidence::{Evidence, PRIMARY};
use crate::scoring::catalog::lead::PROFILE;
use crate::scoring::{Domain, ScoreCard, SignalKind};
use crate::workflows::request::{normalize_target, require, TargetRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, Serialize)]
pub struct LeadReport {
    pub url: String,
    pub score: u8,
    pub tier: String,
    pub intent_level: String,
    pub signals: Vec<String>,
    pub recommendation: String,
}

impl LeadReport {
    fn from_card(target: &Url, card: &ScoreCard) -> Self {
        Self {
            url: target.to_string(),
            score: card.score,
            tier: card.tier.label.clone(),
            intent_level: card.tier.to_string(),
            signals: card.notes(SignalKind::Signal),
            recommendation: card.recommendation().unwrap_or_default().to_string(),
        }
    }
}

impl IntelService {
    pub async fn lead_score(&self, request: TargetRequest) -> Result<LeadReport, IntelError> {
        let target = normalize_target(&require(request.url.as_deref(), "url")?)?;
        let evidence = self.lead_evidence(&target).await?;
        let card = self.engine.score(&PROFILE, &evidence, None);
        Ok(LeadReport::from_card(&target, &card))
    }

    pub(crate) async fn lead_evidence(&self, target: &Url) -> Result<Evidence, IntelError> {
        let page = self
            .fetch_primary(Domain::Lead.label(), target, timeouts::LEAD)
            .await?;
        Ok(Evidence::new(target.clone()).with_page(PRIMARY, page))
    }
}
