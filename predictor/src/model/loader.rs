use crate::error::{PredictorError, PredictorResult};
use crate::model::linear::LinearClassifier;
use crate::model::onnx::OnnxClassifier;
use crate::model::traits::Classifier;
use std::path::Path;
use std::sync::Arc;

/// Load a classifier artifact, picking the format from the file extension
///
/// `.onnx` runs through ONNX Runtime, `.json` is a [`LinearClassifier`].
pub fn load_classifier(path: &str) -> PredictorResult<Arc<dyn Classifier>> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(PredictorError::Model(format!(
            "Model file not found: {}",
            path
        )));
    }

    match path_obj.extension().and_then(|ext| ext.to_str()) {
        Some("onnx") => Ok(Arc::new(OnnxClassifier::load(path)?)),
        Some("json") => Ok(Arc::new(LinearClassifier::load(path_obj)?)),
        other => Err(PredictorError::Model(format!(
            "Unsupported model format: {}",
            other.unwrap_or("<none>")
        ))),
    }
}

/// The classifier loaded at start-up, or the record that loading failed
#[derive(Clone, Default)]
pub struct ModelHandle {
    classifier: Option<Arc<dyn Classifier>>,
}

impl ModelHandle {
    /// Load from `path`; a failure is logged and leaves the handle empty
    pub fn load(path: &str) -> Self {
        match load_classifier(path) {
            Ok(classifier) => {
                tracing::info!("Loaded {} model from {}", classifier.kind(), path);
                Self::ready(classifier)
            }
            Err(e) => {
                tracing::error!("Error loading model from {}: {}", path, e);
                Self::unavailable()
            }
        }
    }

    pub fn ready(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier: Some(classifier),
        }
    }

    pub fn unavailable() -> Self {
        Self { classifier: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn classifier(&self) -> PredictorResult<&dyn Classifier> {
        self.classifier
            .as_deref()
            .ok_or(PredictorError::ModelNotLoaded)
    }
}
