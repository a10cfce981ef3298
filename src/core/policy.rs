//! Ordered decision table. The first rule that applies decides the verdict.

use crate::analyzers::HeuristicScorer;
use crate::core::Classifier;
use crate::models::{FeatureRecord, Reason};
use crate::utils::{DetectorError, Result};

pub const TRUSTED_PROBABILITY: f64 = 0.01;

pub const IP_BOOST: f64 = 1.2;
pub const IP_DEFAULT_PROBABILITY: f64 = 0.9;

pub const LOOKALIKE_BOOST: f64 = 1.15;
pub const LOOKALIKE_DEFAULT_PROBABILITY: f64 = 0.7;

/// Probabilities strictly above this are phishing
pub const PHISHING_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub is_phishing: bool,
    pub probability: f64,
    pub reason: Reason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Exact allowlist match; the classifier is not consulted
    TrustedDomain,
    /// Dotted-quad host; always phishing, classifier probability boosted
    IpLiteralHost,
    /// Brand token in an untrusted domain; probability boosted, label by threshold
    BrandLookalike,
    /// Classifier label and probability, or the lexical heuristic if it fails
    ModelOrFallback,
}

/// Rules in priority order
pub const POLICY: [Rule; 4] = [
    Rule::TrustedDomain,
    Rule::IpLiteralHost,
    Rule::BrandLookalike,
    Rule::ModelOrFallback,
];

impl Rule {
    pub fn applies(&self, features: &FeatureRecord) -> bool {
        match self {
            Rule::TrustedDomain => features.is_trusted_domain,
            Rule::IpLiteralHost => features.ip,
            Rule::BrandLookalike => features.similar_to_trusted,
            Rule::ModelOrFallback => true,
        }
    }

    pub fn decide(&self, features: &FeatureRecord, classifier: Option<&dyn Classifier>) -> Decision {
        match self {
            Rule::TrustedDomain => Decision {
                is_phishing: false,
                probability: TRUSTED_PROBABILITY,
                reason: Reason::TrustedDomain,
            },
            Rule::IpLiteralHost => {
                let probability =
                    boosted_probability(features, classifier, IP_BOOST, IP_DEFAULT_PROBABILITY);
                Decision {
                    is_phishing: true,
                    probability,
                    reason: Reason::IpLiteralHost,
                }
            }
            Rule::BrandLookalike => {
                let probability = boosted_probability(
                    features,
                    classifier,
                    LOOKALIKE_BOOST,
                    LOOKALIKE_DEFAULT_PROBABILITY,
                );
                Decision {
                    is_phishing: probability > PHISHING_THRESHOLD,
                    probability,
                    reason: Reason::BrandLookalike,
                }
            }
            Rule::ModelOrFallback => match model_prediction(features, classifier) {
                Ok((is_phishing, probability)) => Decision {
                    is_phishing,
                    probability,
                    reason: Reason::ModelPrediction,
                },
                Err(e) => {
                    tracing::warn!("Classifier failed, using heuristic fallback: {}", e);
                    let heuristic = HeuristicScorer::new().score(features);
                    tracing::debug!(indicators = ?heuristic.indicators, "Heuristic score {}", heuristic.score);
                    Decision {
                        is_phishing: heuristic.score > PHISHING_THRESHOLD,
                        probability: heuristic.score,
                        reason: Reason::HeuristicFallback,
                    }
                }
            },
        }
    }
}

/// Run the policy: the first applicable rule decides
pub fn evaluate(features: &FeatureRecord, classifier: Option<&dyn Classifier>) -> Decision {
    let rule = POLICY
        .into_iter()
        .find(|rule| rule.applies(features))
        .unwrap_or(Rule::ModelOrFallback);

    tracing::debug!(?rule, "Policy rule matched");

    rule.decide(features, classifier)
}

fn boosted_probability(
    features: &FeatureRecord,
    classifier: Option<&dyn Classifier>,
    factor: f64,
    default: f64,
) -> f64 {
    match phishing_probability(features, classifier) {
        Ok(raw) => (raw * factor).min(1.0),
        Err(e) => {
            tracing::warn!("Classifier failed, using default probability {}: {}", default, e);
            default
        }
    }
}

fn model_prediction(
    features: &FeatureRecord,
    classifier: Option<&dyn Classifier>,
) -> Result<(bool, f64)> {
    let label = require(classifier)?.predict(features)?;
    let probability = phishing_probability(features, classifier)?;
    Ok((label, probability))
}

fn phishing_probability(features: &FeatureRecord, classifier: Option<&dyn Classifier>) -> Result<f64> {
    let probability = require(classifier)?.predict_proba(features)?;
    // NaN fails the range check too
    if !(0.0..=1.0).contains(&probability) {
        return Err(DetectorError::ClassifierInference(format!(
            "probability {} outside [0, 1]",
            probability
        )));
    }
    Ok(probability)
}

fn require(classifier: Option<&dyn Classifier>) -> Result<&dyn Classifier> {
    classifier.ok_or_else(|| DetectorError::ClassifierUnavailable("no classifier loaded".into()))
}
