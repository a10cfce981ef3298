//! Classifier loading: find a trained model on disk and wrap it as a [`Classifier`]

pub mod tree_ensemble;

#[cfg(feature = "ml-inference")]
pub mod onnx;

pub use tree_ensemble::{EnsembleKind, TreeEnsemble};

#[cfg(feature = "ml-inference")]
pub use onnx::OnnxClassifier;

use std::path::Path;

use crate::core::Classifier;
use crate::utils::Result;

pub const RANDOM_FOREST_FILE: &str = "random_forest_model.json";
pub const GRADIENT_BOOSTING_FILE: &str = "gradient_boosting_model.json";

/// A loaded model and the name to show for it
pub struct LoadedClassifier {
    pub name: String,
    pub classifier: Box<dyn Classifier>,
}

impl LoadedClassifier {
    pub fn new(name: impl Into<String>, classifier: Box<dyn Classifier>) -> Self {
        Self {
            name: name.into(),
            classifier,
        }
    }

    pub fn as_classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

impl std::fmt::Debug for LoadedClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedClassifier").field("name", &self.name).finish()
    }
}

/// Probe `models_dir` for a model, in order: random forest, gradient
/// boosting, then (with `ml-inference`) an ONNX model.
///
/// `Ok(None)` means no model file exists; a file that exists but fails to
/// load is an error.
pub fn load_classifier<P: AsRef<Path>>(models_dir: P) -> Result<Option<LoadedClassifier>> {
    let models_dir = models_dir.as_ref();

    for file in [RANDOM_FOREST_FILE, GRADIENT_BOOSTING_FILE] {
        let path = models_dir.join(file);
        if path.exists() {
            let model = TreeEnsemble::from_file(&path)?;
            let name = model.kind().display_name();
            return Ok(Some(LoadedClassifier::new(name, Box::new(model))));
        }
    }

    if let Some(loaded) = load_onnx(models_dir)? {
        return Ok(Some(loaded));
    }

    tracing::warn!("No model found in {:?}", models_dir);
    Ok(None)
}

#[cfg(feature = "ml-inference")]
fn load_onnx(models_dir: &Path) -> Result<Option<LoadedClassifier>> {
    if !models_dir.join(onnx::MODEL_FILE).exists() {
        return Ok(None);
    }
    let model = OnnxClassifier::new(models_dir)?;
    let name = model.model_type().to_string();
    Ok(Some(LoadedClassifier::new(name, Box::new(model))))
}

#[cfg(not(feature = "ml-inference"))]
fn load_onnx(_models_dir: &Path) -> Result<Option<LoadedClassifier>> {
    Ok(None)
}
