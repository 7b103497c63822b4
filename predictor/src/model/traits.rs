use crate::error::{PredictorError, PredictorResult};
use crate::features::FeatureVector;

/// Predicted class index and the full distribution from one model invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: usize,
    pub probabilities: Vec<f64>,
}

/// A trained classifier loaded from an artifact
///
/// Implementations are read-only after loading and shared across requests.
pub trait Classifier: Send + Sync {
    /// Probability per class, in the artifact's class order
    fn predict_proba(&self, features: &FeatureVector) -> PredictorResult<Vec<f64>>;

    /// Most likely class index
    fn predict(&self, features: &FeatureVector) -> PredictorResult<usize> {
        Ok(self.classify(features)?.label)
    }

    /// Label and probabilities from a single invocation
    fn classify(&self, features: &FeatureVector) -> PredictorResult<Classification> {
        let probabilities = self.predict_proba(features)?;
        let label = argmax(&probabilities).ok_or_else(|| {
            PredictorError::Prediction("Classifier returned no probabilities".to_string())
        })?;
        Ok(Classification {
            label,
            probabilities,
        })
    }

    /// Class names embedded in the artifact, if any
    fn classes(&self) -> Option<&[String]> {
        None
    }

    /// Short format name used in logs
    fn kind(&self) -> &'static str;
}

/// Index of the largest value; the first one wins ties
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
