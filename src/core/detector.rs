use crate::analyzers::TrustList;
use crate::config::DetectorConfig;
use crate::core::policy;
use crate::core::Classifier;
use crate::features::FeatureExtractor;
use crate::models::{FeatureRecord, Outcome, Verdict};
use crate::utils::Result;

/// Decision engine: feature extraction, trust overrides and classifier fusion.
///
/// Holds only immutable configuration, so a single detector can serve
/// concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct PhishingDetector {
    extractor: FeatureExtractor,
}

impl PhishingDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            extractor: FeatureExtractor::from_config(config),
        }
    }

    pub fn with_extractor(extractor: FeatureExtractor) -> Self {
        Self { extractor }
    }

    pub fn trust(&self) -> &TrustList {
        self.extractor.trust()
    }

    pub fn extract(&self, url: &str) -> Result<(FeatureRecord, String)> {
        self.extractor.extract(url)
    }

    /// Classify a URL.
    ///
    /// `classifier` is `None` when no model is loaded. Classifier failures are
    /// absorbed into per-rule defaults; only extraction failures are returned.
    pub fn classify(&self, url: &str, classifier: Option<&dyn Classifier>) -> Result<Verdict> {
        let (features, domain) = self.extractor.extract(url)?;

        let decision = policy::evaluate(&features, classifier);

        tracing::info!(
            "{} -> {} ({:.1}%, {})",
            domain,
            if decision.is_phishing { "PHISHING" } else { "BENIGN" },
            decision.probability * 100.0,
            decision.reason
        );

        Ok(Verdict {
            url: url.to_string(),
            domain,
            is_phishing: decision.is_phishing,
            probability: decision.probability,
            reason: decision.reason,
            features,
        })
    }

    /// Like [`classify`](Self::classify), but an unparseable input becomes an
    /// explicit [`Outcome::Unanalyzable`] instead of an error.
    pub fn analyze(&self, url: &str, classifier: Option<&dyn Classifier>) -> Outcome {
        Outcome::from_result(url, self.classify(url, classifier))
    }
}

impl Default for PhishingDetector {
    fn default() -> Self {
        Self::with_extractor(FeatureExtractor::default())
    }
}
