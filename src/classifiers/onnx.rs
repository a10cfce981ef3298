use ndarray::{Array2, CowArray, IxDyn};
use ort::{Environment, GraphOptimizationLevel, Session, SessionBuilder, Value};
use std::path::Path;
use std::sync::Arc;

use crate::core::Classifier;
use crate::models::FeatureRecord;
use crate::utils::{DetectorError, Result};

pub const MODEL_FILE: &str = "phishing_model.onnx";
pub const METADATA_FILE: &str = "model_metadata.json";

#[derive(Debug, serde::Deserialize)]
struct ModelMetadata {
    feature_names: Vec<String>,
    #[serde(default)]
    model_type: Option<String>,
}

/// ONNX-exported binary classifier with outputs `[label, probabilities]`
pub struct OnnxClassifier {
    model: Arc<Session>,
    /// Record column feeding each model input position
    columns: Vec<usize>,
    model_type: String,
}

impl OnnxClassifier {
    pub fn new<P: AsRef<Path>>(models_dir: P) -> Result<Self> {
        let models_dir = models_dir.as_ref();

        tracing::info!("Loading ONNX model from {:?}", models_dir);

        let metadata_path = models_dir.join(METADATA_FILE);
        if !metadata_path.exists() {
            return Err(DetectorError::Model(format!(
                "Model metadata not found at {:?}",
                metadata_path
            )));
        }

        let metadata: ModelMetadata =
            serde_json::from_str(&std::fs::read_to_string(metadata_path)?)?;

        let columns = metadata
            .feature_names
            .iter()
            .map(|name| {
                FeatureRecord::column_index(name).ok_or_else(|| {
                    DetectorError::Model(format!("model expects unknown feature '{}'", name))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("Model metadata loaded: {} features", columns.len());

        let environment = Arc::new(
            Environment::builder()
                .with_name("phishing-detector")
                .build()?,
        );

        let model_path = models_dir.join(MODEL_FILE);
        if !model_path.exists() {
            return Err(DetectorError::Model(format!(
                "Model not found at {:?}",
                model_path
            )));
        }

        let model = Arc::new(
            SessionBuilder::new(&environment)?
                .with_optimization_level(GraphOptimizationLevel::Level1)?
                .with_model_from_file(model_path)?,
        );

        tracing::info!("ONNX model loaded successfully");

        Ok(Self {
            model,
            columns,
            model_type: metadata.model_type.unwrap_or_else(|| "ONNX".to_string()),
        })
    }

    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    fn run_inference(&self, features: &FeatureRecord) -> Result<(bool, f64)> {
        let vector = features.to_vector();
        let input: Vec<f32> = self.columns.iter().map(|&i| vector[i] as f32).collect();

        let input = Array2::from_shape_vec((1, self.columns.len()), input)
            .map_err(|e| DetectorError::ClassifierInference(format!("Shape error: {}", e)))?;
        let input_cow: CowArray<f32, IxDyn> = CowArray::from(input.into_dyn());

        let input_value = Value::from_array(self.model.allocator(), &input_cow).map_err(|e| {
            DetectorError::ClassifierInference(format!("Failed to create input: {}", e))
        })?;

        let outputs = self.model.run(vec![input_value]).map_err(|e| {
            DetectorError::ClassifierInference(format!("Model inference failed: {}", e))
        })?;

        if outputs.len() < 2 {
            return Err(DetectorError::ClassifierInference(format!(
                "expected label and probability outputs, got {}",
                outputs.len()
            )));
        }

        let label_output = outputs[0].try_extract::<i64>().map_err(|e| {
            DetectorError::ClassifierInference(format!("Failed to extract label: {}", e))
        })?;
        let probs_output = outputs[1].try_extract::<f32>().map_err(|e| {
            DetectorError::ClassifierInference(format!("Failed to extract probabilities: {}", e))
        })?;

        let label = label_output
            .view()
            .iter()
            .next()
            .copied()
            .ok_or_else(|| DetectorError::ClassifierInference("empty label output".into()))?;

        let probs_view = probs_output.view();
        let phishing = probs_view
            .iter()
            .nth(1)
            .copied()
            .ok_or_else(|| DetectorError::ClassifierInference("missing class 1 probability".into()))?;

        Ok((label == 1, f64::from(phishing)))
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureRecord) -> Result<bool> {
        Ok(self.run_inference(features)?.0)
    }

    fn predict_proba(&self, features: &FeatureRecord) -> Result<f64> {
        Ok(self.run_inference(features)?.1)
    }
}
