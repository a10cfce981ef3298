//! Detector configuration: trusted domains, brand tokens and phishing keywords
//!
//! Every list has a built-in default; a JSON file may override any of them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::{DetectorError, Result};

/// Known-safe registered domains (apex plus common `www.` variants)
pub const TRUSTED_DOMAINS: &[&str] = &[
    "google.com", "www.google.com",
    "facebook.com", "www.facebook.com",
    "youtube.com", "www.youtube.com",
    "amazon.com", "www.amazon.com",
    "twitter.com", "www.twitter.com",
    "instagram.com", "www.instagram.com",
    "linkedin.com", "www.linkedin.com",
    "microsoft.com", "www.microsoft.com",
    "apple.com", "www.apple.com",
    "netflix.com", "www.netflix.com",
    "github.com", "www.github.com",
    "wikipedia.org", "www.wikipedia.org",
    "yahoo.com", "www.yahoo.com",
    "paypal.com", "www.paypal.com",
    "whatsapp.com", "www.whatsapp.com",
    "gmail.com", "mail.google.com",
    "outlook.com", "www.outlook.com",
];

/// Brand names commonly impersonated by look-alike domains
pub const BRAND_TOKENS: &[&str] = &[
    "google", "facebook", "amazon", "microsoft", "apple", "paypal", "netflix", "twitter",
];

/// Words that phishing URLs tend to carry somewhere in host, path or query
pub const PHISH_KEYWORDS: &[&str] = &["secure", "account", "webscr", "login", "signin"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub trusted_domains: Vec<String>,
    pub brand_tokens: Vec<String>,
    pub phish_keywords: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            trusted_domains: owned(TRUSTED_DOMAINS),
            brand_tokens: owned(BRAND_TOKENS),
            phish_keywords: owned(PHISH_KEYWORDS),
        }
    }
}

impl DetectorConfig {
    /// Load a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading detector config from {:?}", path);

        let config: DetectorConfig = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        config.validate()?;

        tracing::debug!(
            "Config loaded: {} trusted domains, {} brand tokens, {} keywords",
            config.trusted_domains.len(),
            config.brand_tokens.len(),
            config.phish_keywords.len()
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.trusted_domains.iter().any(|d| d.trim().is_empty()) {
            return Err(DetectorError::Config("empty trusted domain entry".into()));
        }
        // An empty token would be a substring of every domain
        if self.brand_tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(DetectorError::Config("empty brand token".into()));
        }
        if self.phish_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(DetectorError::Config("empty phishing keyword".into()));
        }
        Ok(())
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
