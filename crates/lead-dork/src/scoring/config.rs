use super::policy::TierTable;
use super::Domain;
use std::collections::BTreeMap;

/// The "current" and "previous" calendar years used by recency checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceYears {
    current: i32,
}

impl ReferenceYears {
    pub fn new(current: i32) -> Self {
        Self { current }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn previous(&self) -> i32 {
        self.current - 1
    }

    /// Both years as strings, current first.
    pub fn labels(&self) -> [String; 2] {
        [self.current.to_string(), self.previous().to_string()]
    }

    /// Rendered as `previous-current`.
    pub fn span(&self) -> String {
        format!("{}-{}", self.previous(), self.current)
    }
}

/// Engine-wide configuration: reference years and tier overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    years: ReferenceYears,
    tier_overrides: BTreeMap<Domain, TierTable>,
}

impl ScoringConfig {
    pub fn new(years: ReferenceYears) -> Self {
        Self {
            years,
            tier_overrides: BTreeMap::new(),
        }
    }

    pub fn with_tiers(mut self, domain: Domain, table: TierTable) -> Self {
        self.tier_overrides.insert(domain, table);
        self
    }

    pub fn years(&self) -> ReferenceYears {
        self.years
    }

    /// Override if configured, otherwise the built-in table.
    pub fn tiers(&self, domain: Domain) -> TierTable {
        self.tier_overrides
            .get(&domain)
            .cloned()
            .unwrap_or_else(|| domain.default_tiers())
    }
}

/// Inputs that are not evidence but still influence predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationContext {
    pub years: ReferenceYears,
    pub subject: Option<String>,
}

impl EvaluationContext {
    pub fn new(years: ReferenceYears) -> Self {
        Self {
            years,
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}
