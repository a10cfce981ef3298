use super::features::FeatureRecord;
use super::reason::{Reason, RiskBand};
use crate::utils::DetectorError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub url: String,
    pub domain: String,
    pub is_phishing: bool,
    /// Probability of the phishing class, in [0, 1]
    pub probability: f64,
    pub reason: Reason,
    pub features: FeatureRecord,
}

impl Verdict {
    pub fn safe_probability(&self) -> f64 {
        1.0 - self.probability
    }

    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_probability(self.probability)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f, "                URL PHISHING REPORT")?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f)?;
        writeln!(f, "URL:    {}", self.url)?;
        writeln!(f, "Domain: {}", self.domain)?;
        writeln!(f)?;
        writeln!(f, "═══ VERDICT ═══")?;

        if self.is_phishing {
            writeln!(f, "🔴 SUSPICIOUS URL")?;
            writeln!(f, "Phishing probability: {:.2}%", self.probability * 100.0)?;
        } else {
            writeln!(f, "🟢 URL APPEARS SAFE")?;
            writeln!(f, "Safe probability: {:.2}%", self.safe_probability() * 100.0)?;
        }
        let band = self.risk_band();
        writeln!(f, "Risk: {} {:?}", band.emoji(), band)?;
        writeln!(f, "Reason: {} ({})", self.reason.describe(), self.reason)?;

        let features = &self.features;
        writeln!(f)?;
        writeln!(f, "═══ URL CHARACTERISTICS ═══")?;
        writeln!(f, "Length: {}", features.length_url)?;
        writeln!(f, "Digits in URL: {:.2}%", features.ratio_digits_url * 100.0)?;
        writeln!(f, "IP address host: {}", yes_no(features.ip))?;
        writeln!(f, "Dots: {}", features.nb_dots)?;
        writeln!(f, "Hyphens: {}", features.nb_hyphens)?;
        writeln!(f, "Subdomains: {}", features.subdomain_count)?;
        writeln!(f, "HTTPS: {}", yes_no(features.has_https))?;
        writeln!(f, "Trusted domain: {}", yes_no(features.is_trusted_domain))?;
        writeln!(f, "Resembles trusted domain: {}", yes_no(features.similar_to_trusted))?;

        writeln!(f)?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;

        Ok(())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Result of analyzing one input: a verdict, or an explicit refusal.
///
/// An input that cannot be decomposed into URL parts is never reported as benign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Classified(Verdict),
    Unanalyzable { url: String, error: String },
}

impl Outcome {
    pub fn from_result(url: &str, result: Result<Verdict, DetectorError>) -> Self {
        match result {
            Ok(verdict) => Outcome::Classified(verdict),
            Err(e) => Outcome::Unanalyzable {
                url: url.to_string(),
                error: e.to_string(),
            },
        }
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Outcome::Classified(verdict) => Some(verdict),
            Outcome::Unanalyzable { .. } => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Classified(verdict) => write!(f, "{}", verdict),
            Outcome::Unanalyzable { url, error } => {
                writeln!(f, "❌ Cannot analyze this input: {}", url)?;
                writeln!(f, "   {}", error)
            }
        }
    }
}
