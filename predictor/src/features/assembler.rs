use crate::error::{PredictorError, PredictorResult};
use crate::features::history::synthetic_daily_mean;
use crate::features::schema::{FeatureSchema, FeatureSource, Sensor};
use crate::risk::round1;
use common::SensorReading;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

/// Fixed-order numeric input for a classifier
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Vec<&'static str>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(columns: Vec<&'static str>, values: Vec<f64>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| *c == column)
            .map(|i| self.values[i])
    }

    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}

/// Current readings the recommendation rules look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
}

#[derive(Debug, Clone)]
pub struct AssembledFeatures {
    pub vector: FeatureVector,
    pub conditions: Conditions,
    /// Resolved fields plus the 24h means, echoed back to the caller
    pub snapshot: BTreeMap<String, f64>,
}

/// Build the feature vector for `reading` according to `schema`
///
/// Required fields are checked before any value is parsed, so a request
/// missing a field always reports the first missing one in schema order.
/// A derived column takes a caller-supplied value under its own name over
/// the derived one.
pub fn assemble<R: Rng + ?Sized>(
    schema: &FeatureSchema,
    reading: &SensorReading,
    rng: &mut R,
) -> PredictorResult<AssembledFeatures> {
    if let Some(missing) = schema.required_fields().find(|key| !reading.contains(key)) {
        return Err(PredictorError::MissingField(missing.to_string()));
    }

    let mut resolved: HashMap<&'static str, f64> = HashMap::with_capacity(schema.fields.len());
    let mut snapshot = BTreeMap::new();
    for field in schema.fields {
        let value = match reading.number(field.key)? {
            Some(value) => value,
            None => field
                .default
                .ok_or_else(|| PredictorError::MissingField(field.key.to_string()))?,
        };
        resolved.insert(field.key, value);
        snapshot.insert(field.key.to_string(), value);
    }

    let current = |sensor: Sensor| lookup(&resolved, schema.sensors.key(sensor));
    let conditions = Conditions {
        temperature: current(Sensor::Temperature)?,
        humidity: current(Sensor::Humidity)?,
        soil_moisture: current(Sensor::SoilMoisture)?,
    };

    let mut values = Vec::with_capacity(schema.len());
    for column in schema.columns {
        let supplied = match column.source {
            FeatureSource::Field(_) => None,
            _ => reading.number(column.name)?,
        };

        let value = match (column.source, supplied) {
            (FeatureSource::Field(key), _) => lookup(&resolved, key)?,
            (FeatureSource::DailyMean(sensor), supplied) => {
                let mean = match supplied {
                    Some(mean) => mean,
                    None => synthetic_daily_mean(current(sensor)?, sensor.noise_std_dev(), rng),
                };
                snapshot.insert(column.name.to_string(), round1(mean));
                mean
            }
            (_, Some(value)) => value,
            (FeatureSource::Change(sensor), None) => {
                let key = schema.sensors.key(sensor);
                match reading.number(&format!("previous_{}", key))? {
                    Some(previous) => current(sensor)? - previous,
                    None => 0.0,
                }
            }
            (FeatureSource::HeatSoilRatio, None) => {
                conditions.temperature / (conditions.soil_moisture + 1.0)
            }
        };

        if !value.is_finite() {
            return Err(PredictorError::InvalidInput(format!(
                "Feature {} is not a finite number",
                column.name
            )));
        }
        values.push(value);
    }

    Ok(AssembledFeatures {
        vector: FeatureVector::new(schema.column_names(), values),
        conditions,
        snapshot,
    })
}

/// Value of a declared field; a schema naming an undeclared one is a bug
fn lookup(resolved: &HashMap<&'static str, f64>, key: &str) -> PredictorResult<f64> {
    resolved.get(key).copied().ok_or_else(|| {
        PredictorError::Internal(format!("Feature schema references undeclared field {}", key))
    })
}
