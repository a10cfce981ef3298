pub mod traits;
pub mod policy;
pub mod detector;

pub use traits::Classifier;
pub use policy::{Decision, Rule, POLICY};
pub use detector::PhishingDetector;
