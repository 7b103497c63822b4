use crate::config::Config;
use crate::error::{PredictorError, PredictorResult};
use crate::features::{assemble, Conditions, HistorySynthesizer};
use crate::model::{Classification, Classifier};
use crate::profile::Profile;
use crate::recommend::recommend;
use crate::risk::class_risks;
use common::{BatchResult, DiseaseRisk, FieldReading, PredictionResponse, SensorReading, Treatment};
use serde_json::Value;
use std::collections::BTreeMap;

/// Everything the service says about one reading
#[derive(Debug, Clone)]
pub struct Assessment {
    pub predicted_class: usize,
    pub predicted_label: String,
    pub overall_risk: f64,
    pub risk_level: String,
    pub disease_risks: Vec<DiseaseRisk>,
    pub treatments: Vec<Treatment>,
    pub sensor_data: BTreeMap<String, f64>,
    /// Current readings the assessment was based on
    pub conditions: Conditions,
}

impl Assessment {
    pub fn into_response(self, timestamp: String) -> PredictionResponse {
        PredictionResponse {
            overall_risk: self.overall_risk,
            risk_level: self.risk_level,
            predicted_class: self.predicted_class,
            predicted_disease: self.predicted_label,
            disease_risks: self.disease_risks,
            treatments: self.treatments,
            sensor_data: self.sensor_data,
            timestamp,
        }
    }
}

/// Reading → features → classifier → risk → recommendations
#[derive(Debug, Clone)]
pub struct Pipeline {
    profile: Profile,
    class_labels: Option<Vec<String>>,
    history: HistorySynthesizer,
}

impl Pipeline {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            class_labels: None,
            history: HistorySynthesizer::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut pipeline =
            Self::new(Profile::for_kind(config.profile)).with_history_seed(config.history_seed);
        if let Some(labels) = &config.class_labels {
            pipeline = pipeline.with_class_labels(labels.clone());
        }
        pipeline
    }

    pub fn with_class_labels(mut self, labels: Vec<String>) -> Self {
        self.class_labels = Some(labels);
        self
    }

    pub fn with_history_seed(mut self, seed: Option<u64>) -> Self {
        self.history = HistorySynthesizer::new(seed);
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Class names, first match wins: artifact, configuration, profile default
    fn labels(&self, classifier: &dyn Classifier) -> Vec<String> {
        if let Some(classes) = classifier.classes() {
            return classes.to_vec();
        }
        if let Some(labels) = &self.class_labels {
            return labels.clone();
        }
        self.profile
            .default_classes
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    pub fn assess(
        &self,
        classifier: &dyn Classifier,
        reading: &SensorReading,
    ) -> PredictorResult<Assessment> {
        let mut rng = self.history.rng();
        let assembled = assemble(&self.profile.schema, reading, &mut rng)?;

        let classification = classifier.classify(&assembled.vector)?;
        validate(&classification)?;

        let labels = self.labels(classifier);
        let predicted_label = labels
            .get(classification.label)
            .cloned()
            .unwrap_or_else(|| classification.label.to_string());

        let (overall_risk, level) = self.profile.scoring.assess(&classification);
        let locale = self.profile.locale;
        let disease_risks = class_risks(&classification.probabilities, &labels, locale);
        let treatments = recommend(
            &self.profile.rules,
            level,
            &assembled.conditions,
            &disease_risks,
        );

        Ok(Assessment {
            predicted_class: classification.label,
            predicted_label,
            overall_risk,
            risk_level: level.label(locale).to_string(),
            disease_risks,
            treatments,
            sensor_data: assembled.snapshot,
            conditions: assembled.conditions,
        })
    }

    /// Score one untyped batch entry; failures stay local to the entry
    pub fn assess_field(&self, classifier: &dyn Classifier, entry: Value) -> BatchResult {
        let (field_id, field_name) = FieldReading::identify(&entry);
        let outcome = FieldReading::from_entry(entry)
            .map_err(PredictorError::from)
            .and_then(|field| self.assess(classifier, &field.reading));

        match outcome {
            Ok(assessment) => BatchResult {
                field_id,
                field_name,
                risk_level: Some(assessment.risk_level),
                risk_score: Some(assessment.overall_risk),
                prediction: Some(assessment.predicted_label),
                error: None,
            },
            Err(e) => {
                tracing::warn!("Batch item {} failed: {}", field_id, e);
                BatchResult {
                    field_id,
                    field_name,
                    risk_level: None,
                    risk_score: None,
                    prediction: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn validate(classification: &Classification) -> PredictorResult<()> {
    let probabilities = &classification.probabilities;
    if probabilities.is_empty() {
        return Err(PredictorError::Prediction(
            "Classifier returned no probabilities".to_string(),
        ));
    }
    if probabilities
        .iter()
        .any(|p| !p.is_finite() || *p < 0.0 || *p > 1.0)
    {
        return Err(PredictorError::Prediction(
            "Classifier returned probabilities outside [0, 1]".to_string(),
        ));
    }
    if classification.label >= probabilities.len() {
        return Err(PredictorError::Prediction(format!(
            "Predicted class {} out of range for {} classes",
            classification.label,
            probabilities.len()
        )));
    }
    Ok(())
}
