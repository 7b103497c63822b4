use crate::error::CommonError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Raw sensor values for one field, keyed by name
///
/// Values arrive as loosely typed JSON: numbers, numeric strings and
/// booleans are all accepted and coerced on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorReading {
    values: Map<String, Value>,
}

impl SensorReading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Whether a non-null value is present under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|value| !value.is_null())
    }

    /// Read `key` as a number
    ///
    /// Absent and `null` values read as `None`. Booleans read as 1 or 0.
    pub fn number(&self, key: &str) -> Result<Option<f64>, CommonError> {
        let Some(value) = self.values.get(key) else {
            return Ok(None);
        };

        let parsed = match value {
            Value::Null => return Ok(None),
            Value::Number(n) => n.as_f64(),
            Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Array(_) | Value::Object(_) => None,
        };

        match parsed {
            Some(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(CommonError::InvalidValue {
                field: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Urgency of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// One advisory in a prediction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub action: String,
}

/// Probability and severity for a single class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRisk {
    pub name: String,
    /// Percentage, one decimal
    pub probability: f64,
    pub severity: String,
}

/// Response body of the single prediction endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub overall_risk: f64,
    pub risk_level: String,
    pub predicted_class: usize,
    pub predicted_disease: String,
    pub disease_risks: Vec<DiseaseRisk>,
    pub treatments: Vec<Treatment>,
    pub sensor_data: BTreeMap<String, f64>,
    pub timestamp: String,
}

/// A reading tagged with the field it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldReading {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub reading: SensorReading,
}

impl FieldReading {
    /// Parse one untyped batch entry
    pub fn from_entry(entry: Value) -> Result<Self, CommonError> {
        if !entry.is_object() {
            return Err(CommonError::InvalidValue {
                field: "field".to_string(),
                value: entry.to_string(),
            });
        }
        serde_json::from_value(entry).map_err(|e| CommonError::InvalidValue {
            field: "field".to_string(),
            value: e.to_string(),
        })
    }

    /// Best-effort `id` and `name` of an entry, whether or not it parses
    pub fn identify(entry: &Value) -> (Value, Option<String>) {
        let id = entry.get("id").cloned().unwrap_or(Value::Null);
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        (id, name)
    }
}

/// Entries stay untyped so one malformed field cannot reject the batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub fields: Vec<Value>,
}

/// Outcome for one field of a batch
///
/// Either the risk fields or `error` are populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub field_id: Value,
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<BatchResult>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub profile: String,
    pub model_loaded: bool,
    pub timestamp: String,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
