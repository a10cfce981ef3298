//! Tree-ensemble classifier exported to JSON.
//!
//! ```json
//! {
//!   "kind": "random_forest",
//!   "feature_names": ["ip", "nb_dots"],
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
//!         { "value": 0.1 },
//!         { "value": 0.95 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! A split sends `x <= threshold` left. `feature` indexes `feature_names`,
//! which are matched to [`FeatureRecord::COLUMNS`] by name at query time.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::Classifier;
use crate::models::FeatureRecord;
use crate::utils::{DetectorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsembleKind {
    /// Leaves hold phishing probabilities; trees are averaged
    RandomForest,
    /// Leaves hold log-odds contributions; summed then squashed
    GradientBoosting,
}

impl EnsembleKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            EnsembleKind::RandomForest => "Random Forest",
            EnsembleKind::GradientBoosting => "Gradient Boosting",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    kind: EnsembleKind,
    feature_names: Vec<String>,
    trees: Vec<Tree>,
    #[serde(default)]
    base_score: f64,
    #[serde(default = "default_learning_rate")]
    learning_rate: f64,
}

fn default_learning_rate() -> f64 {
    1.0
}

impl TreeEnsemble {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading tree ensemble from {:?}", path);

        let model: TreeEnsemble = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        model.validate()?;

        tracing::info!(
            "{} loaded: {} trees over {} features",
            model.kind.display_name(),
            model.trees.len(),
            model.feature_names.len()
        );

        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let model: TreeEnsemble = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn kind(&self) -> EnsembleKind {
        self.kind
    }

    /// Structural checks that guarantee every traversal terminates in a leaf
    fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(DetectorError::Model("ensemble has no trees".into()));
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(DetectorError::Model(format!("tree {} has no nodes", t)));
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                match node {
                    Node::Split {
                        feature,
                        left,
                        right,
                        threshold,
                    } => {
                        if *feature >= self.feature_names.len() {
                            return Err(DetectorError::Model(format!(
                                "tree {} node {}: feature index {} out of range",
                                t, i, feature
                            )));
                        }
                        // Children strictly after the parent rules out cycles
                        for child in [*left, *right] {
                            if child <= i || child >= tree.nodes.len() {
                                return Err(DetectorError::Model(format!(
                                    "tree {} node {}: invalid child index {}",
                                    t, i, child
                                )));
                            }
                        }
                        if !threshold.is_finite() {
                            return Err(DetectorError::Model(format!(
                                "tree {} node {}: non-finite threshold",
                                t, i
                            )));
                        }
                    }
                    Node::Leaf { value } => {
                        let valid = match self.kind {
                            EnsembleKind::RandomForest => (0.0..=1.0).contains(value),
                            EnsembleKind::GradientBoosting => value.is_finite(),
                        };
                        if !valid {
                            return Err(DetectorError::Model(format!(
                                "tree {} node {}: invalid leaf value {}",
                                t, i, value
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Model input in the model's own column order
    fn model_input(&self, features: &FeatureRecord) -> Result<Vec<f64>> {
        let vector = features.to_vector();
        self.feature_names
            .iter()
            .map(|name| {
                FeatureRecord::column_index(name)
                    .map(|i| vector[i])
                    .ok_or_else(|| {
                        DetectorError::ClassifierInference(format!(
                            "model expects unknown feature '{}'",
                            name
                        ))
                    })
            })
            .collect()
    }

    fn leaf_value(tree: &Tree, input: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &tree.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if input[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

impl Classifier for TreeEnsemble {
    fn predict(&self, features: &FeatureRecord) -> Result<bool> {
        Ok(self.predict_proba(features)? > 0.5)
    }

    fn predict_proba(&self, features: &FeatureRecord) -> Result<f64> {
        let input = self.model_input(features)?;
        let sum: f64 = self.trees.iter().map(|t| Self::leaf_value(t, &input)).sum();

        let probability = match self.kind {
            EnsembleKind::RandomForest => sum / self.trees.len() as f64,
            EnsembleKind::GradientBoosting => {
                let raw = self.base_score + self.learning_rate * sum;
                1.0 / (1.0 + (-raw).exp())
            }
        };

        Ok(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureExtractor;

    const FOREST: &str = r#"{
        "kind": "random_forest",
        "feature_names": ["ip", "nb_dots"],
        "trees": [
            { "nodes": [
                { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
                { "value": 0.2 },
                { "value": 1.0 }
            ] },
            { "nodes": [
                { "feature": 1, "threshold": 3.0, "left": 1, "right": 2 },
                { "value": 0.0 },
                { "value": 0.8 }
            ] }
        ]
    }"#;

    fn features(url: &str) -> FeatureRecord {
        FeatureExtractor::default().extract(url).unwrap().0
    }

    #[test]
    fn test_forest_averages_leaves() {
        let model = TreeEnsemble::from_json(FOREST).unwrap();
        assert_eq!(model.kind().display_name(), "Random Forest");

        // ip = 0 -> 0.2, dots = 1 -> 0.0
        let p = model.predict_proba(&features("http://example.org/")).unwrap();
        assert!((p - 0.1).abs() < 1e-12);
        assert!(!model.predict(&features("http://example.org/")).unwrap());

        // ip = 1 -> 1.0, dots = 3 -> 0.0
        let p = model.predict_proba(&features("http://10.1.2.3/")).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
        // 0.5 is not above the threshold
        assert!(!model.predict(&features("http://10.1.2.3/")).unwrap());
    }

    #[test]
    fn test_gradient_boosting_sigmoid() {
        let json = r#"{
            "kind": "gradient_boosting",
            "feature_names": ["has_https"],
            "base_score": 0.0,
            "learning_rate": 0.5,
            "trees": [
                { "nodes": [
                    { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
                    { "value": 4.0 },
                    { "value": -4.0 }
                ] }
            ]
        }"#;
        let model = TreeEnsemble::from_json(json).unwrap();

        let p = model.predict_proba(&features("http://example.org/")).unwrap();
        let expected = 1.0 / (1.0 + (-2.0f64).exp());
        assert!((p - expected).abs() < 1e-12);
        assert!(model.predict(&features("http://example.org/")).unwrap());

        let p = model.predict_proba(&features("https://example.org/")).unwrap();
        assert!(p < 0.5);
    }

    #[test]
    fn test_unknown_feature_is_inference_error() {
        let json = r#"{
            "kind": "random_forest",
            "feature_names": ["page_rank"],
            "trees": [ { "nodes": [ { "value": 0.5 } ] } ]
        }"#;
        let model = TreeEnsemble::from_json(json).unwrap();
        let err = model.predict_proba(&features("http://example.org/")).unwrap_err();
        assert!(matches!(err, DetectorError::ClassifierInference(_)));
    }

    #[test]
    fn test_backward_child_rejected() {
        let json = r#"{
            "kind": "random_forest",
            "feature_names": ["ip"],
            "trees": [ { "nodes": [
                { "feature": 0, "threshold": 0.5, "left": 0, "right": 1 },
                { "value": 0.5 }
            ] } ]
        }"#;
        assert!(matches!(
            TreeEnsemble::from_json(json),
            Err(DetectorError::Model(_))
        ));
    }

    #[test]
    fn test_forest_leaf_must_be_probability() {
        let json = r#"{
            "kind": "random_forest",
            "feature_names": [],
            "trees": [ { "nodes": [ { "value": 2.0 } ] } ]
        }"#;
        assert!(TreeEnsemble::from_json(json).is_err());
    }
}
