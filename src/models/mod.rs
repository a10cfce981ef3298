pub mod features;
pub mod reason;
pub mod analysis;

pub use features::{FeatureRecord, FEATURE_COUNT};
pub use reason::{Reason, RiskBand};
pub use analysis::{Outcome, Verdict};
