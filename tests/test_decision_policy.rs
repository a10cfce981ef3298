use phishing_detector::*;

/// Classifier answering every query with a fixed label and probability
struct Fixed {
    label: bool,
    probability: f64,
}

impl Classifier for Fixed {
    fn predict(&self, _features: &FeatureRecord) -> Result<bool> {
        Ok(self.label)
    }

    fn predict_proba(&self, _features: &FeatureRecord) -> Result<f64> {
        Ok(self.probability)
    }
}

/// Classifier that raises on every call
struct Failing;

impl Classifier for Failing {
    fn predict(&self, _features: &FeatureRecord) -> Result<bool> {
        Err(DetectorError::ClassifierInference("model exploded".into()))
    }

    fn predict_proba(&self, _features: &FeatureRecord) -> Result<f64> {
        Err(DetectorError::ClassifierInference("model exploded".into()))
    }
}

const FORCED_PHISHING: Fixed = Fixed {
    label: true,
    probability: 1.0,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_extraction_is_deterministic() {
    let detector = PhishingDetector::default();
    for url in [
        "http://www.google.com",
        "http://192.168.0.5/secure-login",
        "https://accounts.google.co.id/signin?continue=https%3A%2F%2Fmail",
        "",
    ] {
        let first = detector.extract(url).unwrap();
        let second = detector.extract(url).unwrap();
        assert_eq!(first, second, "{}", url);
    }
}

#[test]
fn test_trusted_domains_override_classifier() {
    let detector = PhishingDetector::default();
    for domain in phishing_detector::config::TRUSTED_DOMAINS {
        let url = format!("http://{}/login", domain);
        let verdict = detector.classify(&url, Some(&FORCED_PHISHING)).unwrap();
        assert!(!verdict.is_phishing, "{}", domain);
        assert_eq!(verdict.probability, 0.01);
        assert_eq!(verdict.reason, Reason::TrustedDomain);
    }
}

#[test]
fn test_scenario_trusted_google() {
    let detector = PhishingDetector::default();
    let verdict = detector.classify("http://www.google.com", None).unwrap();

    assert_eq!(verdict.url, "http://www.google.com");
    assert_eq!(verdict.domain, "www.google.com");
    assert!(!verdict.is_phishing);
    assert_eq!(verdict.probability, 0.01);
    assert_eq!(verdict.reason, Reason::TrustedDomain);
    assert!(verdict.features.is_trusted_domain);
}

#[test]
fn test_scenario_ip_host_without_classifier() {
    let detector = PhishingDetector::default();
    let verdict = detector
        .classify("http://192.168.0.5/secure-login", None)
        .unwrap();

    assert!(verdict.is_phishing);
    assert_eq!(verdict.probability, 0.9);
    assert_eq!(verdict.reason, Reason::IpLiteralHost);
}

#[test]
fn test_ip_host_is_always_phishing_and_capped() {
    let detector = PhishingDetector::default();

    let low = Fixed {
        label: false,
        probability: 0.05,
    };
    let verdict = detector.classify("http://192.168.1.1/login", Some(&low)).unwrap();
    assert!(verdict.is_phishing);
    assert!(approx(verdict.probability, 0.06));

    let verdict = detector
        .classify("http://192.168.1.1/login", Some(&FORCED_PHISHING))
        .unwrap();
    assert!(verdict.is_phishing);
    assert_eq!(verdict.probability, 1.0);
}

#[test]
fn test_scenario_brand_lookalike() {
    let detector = PhishingDetector::default();
    let half = Fixed {
        label: false,
        probability: 0.5,
    };
    let verdict = detector.classify("http://paypa1-secure.com", Some(&half)).unwrap();

    assert_eq!(verdict.reason, Reason::BrandLookalike);
    assert!(approx(verdict.probability, 0.575));
    assert!(verdict.is_phishing);
}

#[test]
fn test_lookalike_boost_is_capped() {
    let detector = PhishingDetector::default();
    let verdict = detector
        .classify("http://paypal-secure.com", Some(&FORCED_PHISHING))
        .unwrap();
    assert_eq!(verdict.reason, Reason::BrandLookalike);
    assert_eq!(verdict.probability, 1.0);
}

#[test]
fn test_lookalike_boosted_to_exactly_half_is_benign() {
    let detector = PhishingDetector::default();
    let model = Fixed {
        label: true,
        probability: 0.5 / 1.15,
    };
    let verdict = detector.classify("http://paypal-help.net/", Some(&model)).unwrap();

    assert_eq!(verdict.reason, Reason::BrandLookalike);
    assert_eq!(verdict.probability, 0.5);
    assert!(!verdict.is_phishing);
}

#[test]
fn test_letter_swapped_host_goes_to_model() {
    let detector = PhishingDetector::default();
    let model = Fixed {
        label: false,
        probability: 0.45,
    };
    for url in ["http://snappie.com/", "http://googie.org/", "http://paypai.net/"] {
        let verdict = detector.classify(url, Some(&model)).unwrap();
        assert!(!verdict.features.similar_to_trusted, "{}", url);
        assert_eq!(verdict.reason, Reason::ModelPrediction, "{}", url);
        assert_eq!(verdict.probability, 0.45);
        assert!(!verdict.is_phishing);
    }
}

#[test]
fn test_lookalike_default_without_classifier() {
    let detector = PhishingDetector::default();
    let verdict = detector.classify("http://amazon-billing.info", None).unwrap();
    assert_eq!(verdict.reason, Reason::BrandLookalike);
    assert_eq!(verdict.probability, 0.7);
    assert!(verdict.is_phishing);
}

#[test]
fn test_unlisted_brand_subdomain_over_triggers() {
    let detector = PhishingDetector::default();
    let benign = Fixed {
        label: false,
        probability: 0.1,
    };
    let verdict = detector
        .classify("https://accounts.google.co.id/", Some(&benign))
        .unwrap();
    assert_eq!(verdict.reason, Reason::BrandLookalike);
    assert!(!verdict.is_phishing);
}

#[test]
fn test_scenario_heuristic_full_score() {
    // 6 dots, no https, one unusual host character, 130 characters long
    let prefix = "http://a.b.c.d.e.f_g.net/";
    let url = format!("{}{}", prefix, "x".repeat(130 - prefix.len()));
    assert_eq!(url.len(), 130);

    let detector = PhishingDetector::default();
    let verdict = detector.classify(&url, None).unwrap();

    assert_eq!(verdict.features.nb_dots, 6);
    assert!(verdict.features.unusual_chars);
    assert!(!verdict.features.https_token);
    assert_eq!(verdict.probability, 1.0);
    assert!(verdict.is_phishing);
    assert_eq!(verdict.reason, Reason::HeuristicFallback);
}

#[test]
fn test_heuristic_half_is_not_phishing() {
    // No https (0.2) + unusual host char from the port (0.3)
    let detector = PhishingDetector::default();
    let verdict = detector.classify("http://example.org:8080/", Some(&Failing)).unwrap();

    assert_eq!(verdict.reason, Reason::HeuristicFallback);
    assert_eq!(verdict.probability, 0.5);
    assert!(!verdict.is_phishing);
}

#[test]
fn test_failing_classifier_never_propagates() {
    let detector = PhishingDetector::default();
    let cases = [
        ("http://www.google.com", Reason::TrustedDomain, 0.01),
        ("http://10.0.0.8/", Reason::IpLiteralHost, 0.9),
        ("http://netflix-renew.com/", Reason::BrandLookalike, 0.7),
        ("https://example.org/", Reason::HeuristicFallback, 0.0),
    ];

    for (url, reason, probability) in cases {
        let verdict = detector.classify(url, Some(&Failing)).unwrap();
        assert_eq!(verdict.reason, reason, "{}", url);
        assert_eq!(verdict.probability, probability, "{}", url);
    }
}

#[test]
fn test_model_prediction_is_unboosted() {
    let detector = PhishingDetector::default();
    let model = Fixed {
        label: true,
        probability: 0.8,
    };
    let verdict = detector.classify("https://example.org/", Some(&model)).unwrap();

    assert_eq!(verdict.reason, Reason::ModelPrediction);
    assert_eq!(verdict.probability, 0.8);
    assert!(verdict.is_phishing);
}

#[test]
fn test_malformed_url_is_unanalyzable() {
    let detector = PhishingDetector::default();

    let err = detector.classify("http://[2001:db8::1/", None).unwrap_err();
    assert!(matches!(err, DetectorError::Extraction { .. }));

    let outcome = detector.analyze("http://[2001:db8::1/", Some(&FORCED_PHISHING));
    assert!(outcome.verdict().is_none());

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "unanalyzable");
}

#[test]
fn test_verdict_json_shape() {
    let detector = PhishingDetector::default();
    let outcome = detector.analyze("http://192.168.0.5/secure-login", None);

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "classified");
    assert_eq!(json["reason"], "IP_LITERAL_HOST");
    assert_eq!(json["domain"], "192.168.0.5");
    assert_eq!(json["features"]["google_index"], 0);
    assert_eq!(json["features"]["ip"], true);
}

#[test]
fn test_detector_shared_across_threads() {
    let detector = std::sync::Arc::new(PhishingDetector::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let detector = std::sync::Arc::clone(&detector);
            std::thread::spawn(move || {
                let url = format!("http://10.0.0.{}/", i);
                detector.classify(&url, Some(&Failing)).unwrap().is_phishing
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
