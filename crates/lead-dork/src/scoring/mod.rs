//! Signal-weighted scoring: rule evaluation, aggregation, tiering and
//! recommendations, driven entirely by per-domain rule tables.

pub mod catalog;
mod config;
mod policy;
mod recommend;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{EvaluationContext, ReferenceYears, ScoringConfig};
pub use policy::{aggregate, clamp_score, AggregationPolicy, TierBand, TierTable, TierTableError};
pub use recommend::RecommendationPolicy;
pub use rules::{evaluate, Field, Predicate, SignalKind, SignalMatch, SignalRule, Weight};

use crate::evidence::Evidence;
use serde::Serialize;

/// The analysis domains that produce a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Lead,
    Growth,
    TechnicalHealth,
    JobOpportunity,
    Business,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Lead,
        Domain::Growth,
        Domain::TechnicalHealth,
        Domain::JobOpportunity,
        Domain::Business,
    ];

    /// Suffix of the `APP_TIERS_*` override variable.
    pub const fn env_key(self) -> &'static str {
        match self {
            Domain::Lead => "LEAD",
            Domain::Growth => "GROWTH",
            Domain::TechnicalHealth => "HEALTH",
            Domain::JobOpportunity => "JOBS",
            Domain::Business => "BUSINESS",
        }
    }

    /// Human label used in fatal error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Domain::Lead => "Lead scoring",
            Domain::Growth => "Growth signals detection",
            Domain::TechnicalHealth => "Health check",
            Domain::JobOpportunity => "Job intelligence",
            Domain::Business => "Business intelligence",
        }
    }

    pub fn profile(self) -> &'static DomainProfile {
        match self {
            Domain::Lead => &catalog::lead::PROFILE,
            Domain::Growth => &catalog::growth::PROFILE,
            Domain::TechnicalHealth => &catalog::health::PROFILE,
            Domain::JobOpportunity => &catalog::jobs::PROFILE,
            Domain::Business => &catalog::business::PROFILE,
        }
    }

    pub fn default_tiers(self) -> TierTable {
        policy::builtin(self.profile().tiers)
    }
}

/// Everything that defines one analysis domain.
#[derive(Debug)]
pub struct DomainProfile {
    pub domain: Domain,
    pub rules: &'static [SignalRule],
    pub policy: AggregationPolicy,
    /// Built-in `(floor, label, detail)` bands, highest first.
    pub tiers: &'static [(u8, &'static str, &'static str)],
    pub recommendations: RecommendationPolicy,
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub domain: Domain,
    pub score: u8,
    pub tier: TierBand,
    pub matches: Vec<SignalMatch>,
    pub recommendations: Vec<String>,
}

impl ScoreCard {
    /// Notes of matched rules of the given kind, in rule order.
    pub fn notes(&self, kind: SignalKind) -> Vec<String> {
        self.matches
            .iter()
            .filter(|m| m.matched && m.kind == kind)
            .filter_map(|m| m.note.clone())
            .collect()
    }

    pub fn group_notes(&self, group: &str) -> Vec<String> {
        self.matches
            .iter()
            .filter(|m| m.matched && m.group == group)
            .filter_map(|m| m.note.clone())
            .collect()
    }

    pub fn matched(&self, rule: &str) -> bool {
        self.matches.iter().any(|m| m.matched && m.rule == rule)
    }

    pub fn recommendation(&self) -> Option<&str> {
        self.recommendations.first().map(String::as_str)
    }
}

/// Stateless evaluator that applies a domain profile to evidence.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: ScoringConfig,
}

impl SignalEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(
        &self,
        profile: &DomainProfile,
        evidence: &Evidence,
        subject: Option<&str>,
    ) -> ScoreCard {
        let mut context = EvaluationContext::new(self.config.years());
        if let Some(subject) = subject {
            context = context.with_subject(subject);
        }

        let matches = evaluate(evidence, profile.rules, &context);
        let score = aggregate(&matches, profile.policy);
        let tier = self.config.tiers(profile.domain).classify(score).clone();
        let recommendations = profile.recommendations.recommend(score, &tier, &matches);

        ScoreCard {
            domain: profile.domain,
            score,
            tier,
            matches,
            recommendations,
        }
    }
}
