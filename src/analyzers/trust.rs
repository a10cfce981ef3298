//! Trusted-domain allowlist and brand look-alike check

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::DetectorConfig;

/// Default trust list, built once from the built-in configuration
static DEFAULT_TRUST: Lazy<Arc<TrustList>> =
    Lazy::new(|| Arc::new(TrustList::from_config(&DetectorConfig::default())));

/// Immutable allowlist plus the brand tokens that look-alikes imitate.
///
/// All entries are stored lower-cased; lookups lower-case the query.
#[derive(Debug, Clone)]
pub struct TrustList {
    domains: HashSet<String>,
    brand_tokens: Vec<String>,
}

impl TrustList {
    pub fn new<D, B>(domains: D, brand_tokens: B) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .collect(),
            brand_tokens: brand_tokens
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(&config.trusted_domains, &config.brand_tokens)
    }

    /// Shared handle to the built-in list
    pub fn builtin() -> Arc<TrustList> {
        Arc::clone(&DEFAULT_TRUST)
    }

    /// Exact, case-insensitive membership
    pub fn is_trusted(&self, domain: &str) -> bool {
        self.domains.contains(&domain.to_lowercase())
    }

    /// A brand token occurs inside a domain that is not itself trusted.
    ///
    /// Digits and symbols in the domain that stand in for a letter are read as
    /// that letter, so `paypa1-secure.com` matches `paypal`. Letters are never
    /// rewritten: `paypai.net` is not a look-alike. Real brand subdomains
    /// missing from the list (`accounts.google.co.id`) are flagged too; this
    /// over-trigger is accepted.
    pub fn resembles_trusted(&self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        if self.domains.contains(&domain) {
            return false;
        }
        self.matched_brand(&domain).is_some()
    }

    /// First brand token found in the domain, as written or with digit
    /// substitutions read back as letters
    pub fn matched_brand(&self, domain: &str) -> Option<&str> {
        let lowered = domain.to_lowercase();
        let folded = fold_substitutes(&lowered);
        self.brand_tokens
            .iter()
            .find(|token| lowered.contains(token.as_str()) || folded.contains(token.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Map non-letters commonly typed in place of a letter onto that letter.
/// Letters pass through unchanged.
fn fold_substitutes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '0' => 'o',
            '1' | '|' => 'l',
            '3' => 'e',
            '4' => 'a',
            '5' | '$' => 's',
            '7' => 't',
            '8' => 'b',
            _ => c,
        })
        .collect()
}

impl Default for TrustList {
    fn default() -> Self {
        Self::from_config(&DetectorConfig::default())
    }
}
