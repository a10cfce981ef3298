pub mod config;
pub mod core;
pub mod models;
pub mod analyzers;
pub mod classifiers;
pub mod features;
pub mod utils;

pub use config::DetectorConfig;
pub use core::{Classifier, PhishingDetector};
pub use models::{FeatureRecord, Outcome, Reason, Verdict};
pub use utils::{DetectorError, Result};
