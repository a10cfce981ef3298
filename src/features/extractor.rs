use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use super::url_parts::{self, UrlParts};
use crate::analyzers::TrustList;
use crate::config::{DetectorConfig, PHISH_KEYWORDS};
use crate::models::FeatureRecord;
use crate::utils::Result;

/// Four dot-separated digit groups at the start of the host. Not an IPv4 validator.
static DOTTED_QUAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+").expect("valid regex"));

static UNUSUAL_HOST_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9.\-]").expect("valid regex"));

/// Lexical feature extractor. Pure string inspection, no network access.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    trust: Arc<TrustList>,
    phish_keywords: Vec<String>,
}

impl FeatureExtractor {
    pub fn new(trust: Arc<TrustList>, phish_keywords: Vec<String>) -> Self {
        Self {
            trust,
            phish_keywords: phish_keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(
            Arc::new(TrustList::from_config(config)),
            config.phish_keywords.clone(),
        )
    }

    pub fn trust(&self) -> &TrustList {
        &self.trust
    }

    /// Extract features from a URL.
    ///
    /// Returns the record and the network location (host plus optional port)
    /// as written in the input, less any tab, CR or LF. Whole-URL counts are
    /// taken over the raw input.
    pub fn extract(&self, url: &str) -> Result<(FeatureRecord, String)> {
        let cleaned = url_parts::sanitize(url);
        let parts = UrlParts::split(&cleaned)?;
        let domain = parts.netloc;

        let record = FeatureRecord {
            length_url: url.chars().count(),
            length_hostname: domain.chars().count(),
            ip: DOTTED_QUAD.is_match(domain),
            nb_dots: url.matches('.').count(),
            nb_hyphens: url.matches('-').count(),
            nb_at: url.matches('@').count(),
            nb_qm: url.matches('?').count(),
            nb_and: url.matches('&').count(),
            nb_eq: url.matches('=').count(),
            nb_slash: url.matches('/').count(),
            nb_www: url.contains("www"),
            nb_com: url.contains(".com"),
            https_token: url.contains("https"),
            ratio_digits_url: digit_ratio(url),
            ratio_digits_host: digit_ratio(domain),
            phish_hints: self.has_phish_hint(url),
            google_index: 0,
            is_trusted_domain: self.trust.is_trusted(domain),
            similar_to_trusted: self.trust.resembles_trusted(domain),
            has_https: url.starts_with("https"),
            unusual_chars: UNUSUAL_HOST_CHAR.is_match(domain),
            subdomain_count: domain.split('.').count() - 1,
        };

        tracing::debug!(domain, ?record, "Extracted URL features");

        Ok((record, domain.to_string()))
    }

    fn has_phish_hint(&self, url: &str) -> bool {
        let lowered = url.to_lowercase();
        self.phish_keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(
            TrustList::builtin(),
            PHISH_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        )
    }
}

/// Fraction of characters that are ASCII digits; 0 for an empty string
fn digit_ratio(s: &str) -> f64 {
    let total = s.chars().count();
    if total == 0 {
        return 0.0;
    }
    let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
    digits as f64 / total as f64
}
