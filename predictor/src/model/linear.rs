use crate::error::{PredictorError, PredictorResult};
use crate::features::FeatureVector;
use crate::model::traits::Classifier;
use serde::Deserialize;
use std::path::Path;

/// Multinomial linear classifier stored as JSON
///
/// `probabilities = softmax(weights · x + intercepts)`, one weight row per
/// class. This is the shape a scikit-learn `LogisticRegression` exports with
/// `coef_`, `intercept_` and `classes_`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    #[serde(default)]
    classes: Option<Vec<String>>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearClassifier {
    pub fn new(
        weights: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
        classes: Option<Vec<String>>,
    ) -> PredictorResult<Self> {
        let model = Self {
            classes,
            weights,
            intercepts,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json(contents: &str) -> PredictorResult<Self> {
        let model: Self = serde_json::from_str(contents)?;
        model.validate()?;
        Ok(model)
    }

    pub fn load(path: impl AsRef<Path>) -> PredictorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn n_features(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    pub fn n_classes(&self) -> usize {
        self.weights.len()
    }

    fn validate(&self) -> PredictorResult<()> {
        if self.weights.is_empty() || self.n_features() == 0 {
            return Err(PredictorError::Model(
                "Linear model has no weights".to_string(),
            ));
        }
        if self.weights.iter().any(|row| row.len() != self.n_features()) {
            return Err(PredictorError::Model(
                "Linear model weight rows differ in length".to_string(),
            ));
        }
        if self.intercepts.len() != self.n_classes() {
            return Err(PredictorError::Model(format!(
                "Linear model has {} intercepts for {} classes",
                self.intercepts.len(),
                self.n_classes()
            )));
        }
        if let Some(classes) = &self.classes {
            if classes.len() != self.n_classes() {
                return Err(PredictorError::Model(format!(
                    "Linear model names {} classes but has {}",
                    classes.len(),
                    self.n_classes()
                )));
            }
        }
        let all_finite = self
            .weights
            .iter()
            .flatten()
            .chain(self.intercepts.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(PredictorError::Model(
                "Linear model contains non-finite coefficients".to_string(),
            ));
        }
        Ok(())
    }
}

impl Classifier for LinearClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> PredictorResult<Vec<f64>> {
        let x = features.values();
        if x.len() != self.n_features() {
            return Err(PredictorError::Prediction(format!(
                "Expected {} features, got {}",
                self.n_features(),
                x.len()
            )));
        }

        let logits: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect();

        Ok(softmax(&logits))
    }

    fn classes(&self) -> Option<&[String]> {
        self.classes.as_deref()
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
