use crate::models::FeatureRecord;
use crate::utils::Result;

/// Core abstraction: a trained model that scores one feature record.
///
/// Implementations read the record positionally through
/// [`FeatureRecord::to_vector`], whose order is [`FeatureRecord::COLUMNS`].
/// Both queries are read-only, so one instance may serve concurrent callers.
pub trait Classifier: Send + Sync {
    /// Predicted label: `true` for phishing
    fn predict(&self, features: &FeatureRecord) -> Result<bool>;

    /// Probability of the phishing class, in [0, 1]
    fn predict_proba(&self, features: &FeatureRecord) -> Result<f64>;
}
