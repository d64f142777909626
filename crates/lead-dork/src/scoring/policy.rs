use super::rules::SignalMatch;
use serde::Serialize;
use std::fmt;

/// How matched points combine into a 0..=100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationPolicy {
    /// Start at 0 and add points.
    Accretive,
    /// Start at 100 and subtract points.
    Decretive,
}

impl AggregationPolicy {
    fn origin(self) -> i64 {
        match self {
            AggregationPolicy::Accretive => 0,
            AggregationPolicy::Decretive => 100,
        }
    }
}

pub fn aggregate(matches: &[SignalMatch], policy: AggregationPolicy) -> u8 {
    let points: i64 = matches
        .iter()
        .filter(|m| m.matched)
        .map(|m| i64::from(m.points))
        .sum();

    let raw = match policy {
        AggregationPolicy::Accretive => policy.origin() + points,
        AggregationPolicy::Decretive => policy.origin() - points,
    };
    clamp_score(raw)
}

pub fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

/// One band of a tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierBand {
    pub floor: u8,
    pub label: String,
    pub detail: String,
}

impl TierBand {
    pub fn new(floor: u8, label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            floor,
            label: label.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for TierBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}", self.label)
        } else {
            write!(f, "{} - {}", self.label, self.detail)
        }
    }
}

/// Bands ordered by strictly descending floor, ending at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    bands: Vec<TierBand>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TierTableError {
    #[error("tier table has no bands")]
    Empty,
    #[error("tier floor {floor} does not descend below the previous floor {previous}")]
    NotDescending { previous: u8, floor: u8 },
    #[error("lowest tier floor is {0}, expected 0")]
    NoZeroFloor(u8),
    #[error("tier floor {0} exceeds 100")]
    FloorOutOfRange(u8),
    #[error("malformed tier entry '{0}', expected floor=Label[:detail]")]
    Malformed(String),
}

impl TierTable {
    pub fn new(bands: Vec<TierBand>) -> Result<Self, TierTableError> {
        let last = bands.last().ok_or(TierTableError::Empty)?;
        if last.floor != 0 {
            return Err(TierTableError::NoZeroFloor(last.floor));
        }

        for band in &bands {
            if band.floor > 100 {
                return Err(TierTableError::FloorOutOfRange(band.floor));
            }
        }

        for pair in bands.windows(2) {
            if pair[1].floor >= pair[0].floor {
                return Err(TierTableError::NotDescending {
                    previous: pair[0].floor,
                    floor: pair[1].floor,
                });
            }
        }

        Ok(Self { bands })
    }

    /// Parse `70=High:Strong buying signals,40=Medium,0=Low`.
    pub fn parse(raw: &str) -> Result<Self, TierTableError> {
        let mut bands = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (floor, rest) = entry
                .split_once('=')
                .ok_or_else(|| TierTableError::Malformed(entry.to_string()))?;
            let floor: u8 = floor
                .trim()
                .parse()
                .map_err(|_| TierTableError::Malformed(entry.to_string()))?;
            let (label, detail) = rest.split_once(':').unwrap_or((rest, ""));
            let label = label.trim();
            if label.is_empty() {
                return Err(TierTableError::Malformed(entry.to_string()));
            }
            bands.push(TierBand::new(floor, label, detail.trim()));
        }
        Self::new(bands)
    }

    /// Highest band whose floor the score reaches.
    pub fn classify(&self, score: u8) -> &TierBand {
        self.bands
            .iter()
            .find(|band| score >= band.floor)
            .unwrap_or_else(|| self.lowest())
    }

    pub fn bands(&self) -> &[TierBand] {
        &self.bands
    }

    fn lowest(&self) -> &TierBand {
        // Construction guarantees at least one band.
        &self.bands[self.bands.len() - 1]
    }
}

/// Shorthand for the built-in tables.
pub(crate) fn builtin(bands: &[(u8, &str, &str)]) -> TierTable {
    TierTable {
        bands: bands
            .iter()
            .map(|(floor, label, detail)| TierBand::new(*floor, *label, *detail))
            .collect(),
    }
}
