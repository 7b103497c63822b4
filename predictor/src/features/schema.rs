//! Feature schemas
//!
//! A schema is the column contract with a trained artifact: which request
//! fields exist, their defaults, and the exact order of the columns the
//! classifier was fitted on.

/// Sensors with a role in derived features and recommendation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    Temperature,
    Humidity,
    SoilMoisture,
}

impl Sensor {
    /// Spread of the hourly noise used for the synthetic 24h mean
    pub fn noise_std_dev(self) -> f64 {
        match self {
            Sensor::Temperature => 1.0,
            Sensor::Humidity | Sensor::SoilMoisture => 2.0,
        }
    }
}

/// A request field; `default == None` makes it required
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub default: Option<f64>,
}

impl FieldSpec {
    pub const fn required(key: &'static str) -> Self {
        Self { key, default: None }
    }

    pub const fn optional(key: &'static str, default: f64) -> Self {
        Self {
            key,
            default: Some(default),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureSource {
    /// Resolved request field
    Field(&'static str),
    /// Synthetic 24h mean around the current reading
    DailyMean(Sensor),
    /// Current minus `previous_<key>`, or 0 without a previous reading
    Change(Sensor),
    /// `temperature / (soil_moisture + 1)`
    HeatSoilRatio,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub source: FeatureSource,
}

impl Column {
    pub const fn new(name: &'static str, source: FeatureSource) -> Self {
        Self { name, source }
    }

    pub const fn field(key: &'static str) -> Self {
        Self::new(key, FeatureSource::Field(key))
    }
}

/// Request keys holding each sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorKeys {
    pub temperature: &'static str,
    pub humidity: &'static str,
    pub soil_moisture: &'static str,
}

impl SensorKeys {
    pub fn key(&self, sensor: Sensor) -> &'static str {
        match sensor {
            Sensor::Temperature => self.temperature,
            Sensor::Humidity => self.humidity,
            Sensor::SoilMoisture => self.soil_moisture,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    pub fields: &'static [FieldSpec],
    pub sensors: SensorKeys,
    pub columns: &'static [Column],
}

const DISEASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("temperature_C"),
    FieldSpec::required("humidity_percent"),
    FieldSpec::required("soil_moisture_percent"),
];

const DISEASE_COLUMNS: &[Column] = &[
    Column::field("temperature_C"),
    Column::field("humidity_percent"),
    Column::field("soil_moisture_percent"),
    Column::new("temp_24h_mean", FeatureSource::DailyMean(Sensor::Temperature)),
    Column::new("humidity_24h_mean", FeatureSource::DailyMean(Sensor::Humidity)),
    Column::new(
        "soil_moisture_24h_mean",
        FeatureSource::DailyMean(Sensor::SoilMoisture),
    ),
    Column::new("temp_change_6h", FeatureSource::Change(Sensor::Temperature)),
    Column::new(
        "soil_moisture_change_6h",
        FeatureSource::Change(Sensor::SoilMoisture),
    ),
    Column::new("humidity_change_6h", FeatureSource::Change(Sensor::Humidity)),
    Column::new("heat_soil_ratio", FeatureSource::HeatSoilRatio),
];

const FIELD_RISK_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("temperature", 25.0),
    FieldSpec::optional("humidity", 70.0),
    FieldSpec::optional("soil_moisture", 50.0),
    FieldSpec::optional("soil_ph", 6.5),
    FieldSpec::optional("rainfall", 0.0),
    FieldSpec::optional("growth_stage", 1.0),
    FieldSpec::optional("crop_age", 30.0),
    FieldSpec::optional("field_size", 1.0),
    FieldSpec::optional("previous_disease", 0.0),
    FieldSpec::optional("fertilizer_applied", 0.0),
];

const FIELD_RISK_COLUMNS: &[Column] = &[
    Column::field("temperature"),
    Column::field("humidity"),
    Column::field("soil_moisture"),
    Column::field("soil_ph"),
    Column::field("rainfall"),
    Column::field("growth_stage"),
    Column::field("crop_age"),
    Column::field("field_size"),
    Column::field("previous_disease"),
    Column::field("fertilizer_applied"),
];

impl FeatureSchema {
    /// Rice disease classifier: three required readings plus derived columns
    pub fn disease() -> Self {
        Self {
            fields: DISEASE_FIELDS,
            sensors: SensorKeys {
                temperature: "temperature_C",
                humidity: "humidity_percent",
                soil_moisture: "soil_moisture_percent",
            },
            columns: DISEASE_COLUMNS,
        }
    }

    /// Field risk classifier: ten raw readings, all defaulted
    pub fn field_risk() -> Self {
        Self {
            fields: FIELD_RISK_FIELDS,
            sensors: SensorKeys {
                temperature: "temperature",
                humidity: "humidity",
                soil_moisture: "soil_moisture",
            },
            columns: FIELD_RISK_COLUMNS,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.default.is_none())
            .map(|f| f.key)
    }
}
