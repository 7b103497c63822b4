use crate::error::{PredictorError, PredictorResult};
use crate::features::FeatureVector;
use crate::model::traits::Classifier;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Classifier returning a fixed distribution, for tests
///
/// Records every feature vector it is asked to score.
#[derive(Clone)]
pub struct StubClassifier {
    probabilities: Vec<f64>,
    classes: Option<Vec<String>>,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<FeatureVector>>>,
}

impl StubClassifier {
    pub fn new(probabilities: Vec<f64>) -> Self {
        Self {
            probabilities,
            classes: None,
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Uniform distribution over `n` classes
    pub fn uniform(n: usize) -> Self {
        Self::new(vec![1.0 / n as f64; n])
    }

    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes = Some(classes.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Feature vectors scored so far, oldest first
    pub fn seen(&self) -> Vec<FeatureVector> {
        self.seen.lock().unwrap().clone()
    }
}

impl Classifier for StubClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> PredictorResult<Vec<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(features.clone());
        Ok(self.probabilities.clone())
    }

    fn classes(&self) -> Option<&[String]> {
        self.classes.as_deref()
    }

    fn kind(&self) -> &'static str {
        "stub"
    }
}

/// Classifier that fails every call, for error-path tests
pub struct FailingClassifier {
    message: String,
}

impl FailingClassifier {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl Classifier for FailingClassifier {
    fn predict_proba(&self, _features: &FeatureVector) -> PredictorResult<Vec<f64>> {
        Err(PredictorError::Prediction(self.message.clone()))
    }

    fn kind(&self) -> &'static str {
        "failing"
    }
}
