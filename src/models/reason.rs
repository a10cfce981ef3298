use serde::{Deserialize, Serialize};

/// Which policy rule produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    TrustedDomain,
    IpLiteralHost,
    BrandLookalike,
    ModelPrediction,
    HeuristicFallback,
}

impl Reason {
    pub fn describe(&self) -> &'static str {
        match self {
            Reason::TrustedDomain => "Domain is on the trusted list",
            Reason::IpLiteralHost => "Host is an IP address",
            Reason::BrandLookalike => "Domain resembles a trusted brand",
            Reason::ModelPrediction => "Classifier prediction",
            Reason::HeuristicFallback => "Lexical heuristic (classifier unavailable)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::TrustedDomain => "TRUSTED_DOMAIN",
            Reason::IpLiteralHost => "IP_LITERAL_HOST",
            Reason::BrandLookalike => "BRAND_LOOKALIKE",
            Reason::ModelPrediction => "MODEL_PREDICTION",
            Reason::HeuristicFallback => "HEURISTIC_FALLBACK",
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse band of a phishing probability, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskBand {
    pub fn from_probability(probability: f64) -> Self {
        let percent = probability * 100.0;
        if percent >= 80.0 {
            RiskBand::Critical
        } else if percent >= 60.0 {
            RiskBand::High
        } else if percent >= 30.0 {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskBand::Critical => "🔴",
            RiskBand::High => "🟠",
            RiskBand::Moderate => "🟡",
            RiskBand::Low => "🟢",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_serializes_as_tag() {
        let json = serde_json::to_string(&Reason::HeuristicFallback).unwrap();
        assert_eq!(json, "\"HEURISTIC_FALLBACK\"");
        assert_eq!(Reason::IpLiteralHost.to_string(), "IP_LITERAL_HOST");
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(RiskBand::from_probability(0.01), RiskBand::Low);
        assert_eq!(RiskBand::from_probability(0.3), RiskBand::Moderate);
        assert_eq!(RiskBand::from_probability(0.7), RiskBand::High);
        assert_eq!(RiskBand::from_probability(1.0), RiskBand::Critical);
    }
}
