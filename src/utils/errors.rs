use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Cannot analyze URL {url:?}: {reason}")]
    Extraction { url: String, reason: String },

    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Classifier inference failed: {0}")]
    ClassifierInference(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "ml-inference")]
    #[error("ONNX error: {0}")]
    OnnxError(#[from] ort::OrtError),
}

impl DetectorError {
    pub fn extraction(url: &str, reason: impl Into<String>) -> Self {
        DetectorError::Extraction {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DetectorError>;
