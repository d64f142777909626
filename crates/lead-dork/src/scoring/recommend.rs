use super::policy::TierBand;
use super::rules::SignalMatch;

/// How a domain turns its score, tier and matches into advisory text.
#[derive(Debug, Clone, Copy)]
pub enum RecommendationPolicy {
    /// Tier label to text. Unknown labels fall back to the band itself.
    ByTier(&'static [(&'static str, &'static str)]),
    /// Descending score floors to text.
    ByScore(&'static [(u8, &'static str)]),
    /// One line for each matched rule id listed, in table order.
    PerSignal(&'static [(&'static str, &'static str)]),
}

impl RecommendationPolicy {
    pub fn recommend(&self, score: u8, tier: &TierBand, matches: &[SignalMatch]) -> Vec<String> {
        match self {
            RecommendationPolicy::ByTier(table) => {
                let text = table
                    .iter()
                    .find(|(label, _)| *label == tier.label)
                    .map(|(_, text)| text.to_string())
                    .unwrap_or_else(|| tier.to_string());
                vec![text]
            }
            RecommendationPolicy::ByScore(table) => table
                .iter()
                .find(|(floor, _)| score >= *floor)
                .map(|(_, text)| vec![text.to_string()])
                .unwrap_or_default(),
            RecommendationPolicy::PerSignal(table) => table
                .iter()
                .filter(|(rule, _)| matches.iter().any(|m| m.matched && m.rule == *rule))
                .map(|(_, text)| text.to_string())
                .collect(),
        }
    }
}
