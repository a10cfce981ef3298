use serde::{Deserialize, Serialize};

/// Number of columns in a feature vector
pub const FEATURE_COUNT: usize = 22;

/// Lexical features of one URL, in the column order classifiers were trained on.
///
/// Counts and substring flags are computed over the whole URL string; the
/// host-level fields use the network location (host plus optional port).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub length_url: usize,
    pub length_hostname: usize,
    /// Host starts with a dotted-quad pattern (loose, no octet range check)
    pub ip: bool,
    pub nb_dots: usize,
    pub nb_hyphens: usize,
    pub nb_at: usize,
    pub nb_qm: usize,
    pub nb_and: usize,
    pub nb_eq: usize,
    pub nb_slash: usize,
    pub nb_www: bool,
    pub nb_com: bool,
    /// "https" anywhere in the URL, query included
    pub https_token: bool,
    pub ratio_digits_url: f64,
    pub ratio_digits_host: f64,
    pub phish_hints: bool,
    /// Reserved column, always 0
    pub google_index: u8,
    pub is_trusted_domain: bool,
    pub similar_to_trusted: bool,
    pub has_https: bool,
    pub unusual_chars: bool,
    pub subdomain_count: usize,
}

impl FeatureRecord {
    pub const COLUMNS: [&'static str; FEATURE_COUNT] = [
        "length_url",
        "length_hostname",
        "ip",
        "nb_dots",
        "nb_hyphens",
        "nb_at",
        "nb_qm",
        "nb_and",
        "nb_eq",
        "nb_slash",
        "nb_www",
        "nb_com",
        "https_token",
        "ratio_digits_url",
        "ratio_digits_host",
        "phish_hints",
        "google_index",
        "is_trusted_domain",
        "similar_to_trusted",
        "has_https",
        "unusual_chars",
        "subdomain_count",
    ];

    /// Numeric vector in `COLUMNS` order; booleans become 0.0 / 1.0
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.length_url as f64,
            self.length_hostname as f64,
            flag(self.ip),
            self.nb_dots as f64,
            self.nb_hyphens as f64,
            self.nb_at as f64,
            self.nb_qm as f64,
            self.nb_and as f64,
            self.nb_eq as f64,
            self.nb_slash as f64,
            flag(self.nb_www),
            flag(self.nb_com),
            flag(self.https_token),
            self.ratio_digits_url,
            self.ratio_digits_host,
            flag(self.phish_hints),
            self.google_index as f64,
            flag(self.is_trusted_domain),
            flag(self.similar_to_trusted),
            flag(self.has_https),
            flag(self.unusual_chars),
            self.subdomain_count as f64,
        ]
    }

    /// Position of a named column, if it exists
    pub fn column_index(name: &str) -> Option<usize> {
        Self::COLUMNS.iter().position(|c| *c == name)
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
