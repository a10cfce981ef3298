//! Numeric fallback score used when no classifier answer is available

use serde::{Deserialize, Serialize};

use crate::models::FeatureRecord;

const LONG_URL_THRESHOLD: usize = 100;
const MANY_DOTS_THRESHOLD: usize = 4;

/// Indicator weights in percentage points; they sum to 100.
/// Integer points keep the score exact at the 0.5 boundary.
const LONG_URL_POINTS: u32 = 30;
const MANY_DOTS_POINTS: u32 = 20;
const NO_HTTPS_POINTS: u32 = 20;
const UNUSUAL_CHARS_POINTS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Indicator {
    LongUrl,
    ManyDots,
    NoHttps,
    UnusualHostChars,
}

impl Indicator {
    pub fn points(&self) -> u32 {
        match self {
            Indicator::LongUrl => LONG_URL_POINTS,
            Indicator::ManyDots => MANY_DOTS_POINTS,
            Indicator::NoHttps => NO_HTTPS_POINTS,
            Indicator::UnusualHostChars => UNUSUAL_CHARS_POINTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicScore {
    pub score: f64,
    pub indicators: Vec<Indicator>,
}

/// Additive lexical score over four independent indicators
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, features: &FeatureRecord) -> HeuristicScore {
        let mut indicators = Vec::new();

        if features.length_url > LONG_URL_THRESHOLD {
            indicators.push(Indicator::LongUrl);
        }
        if features.nb_dots > MANY_DOTS_THRESHOLD {
            indicators.push(Indicator::ManyDots);
        }
        if !features.has_https {
            indicators.push(Indicator::NoHttps);
        }
        if features.unusual_chars {
            indicators.push(Indicator::UnusualHostChars);
        }

        let points: u32 = indicators.iter().map(Indicator::points).sum();

        HeuristicScore {
            score: f64::from(points.min(100)) / 100.0,
            indicators,
        }
    }
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new()
    }
}
