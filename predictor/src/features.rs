// Module declarations for feature assembly
pub mod assembler;
pub mod history;
pub mod schema;

// Re-exports for convenience
pub use assembler::{assemble, AssembledFeatures, Conditions, FeatureVector};
pub use history::{synthetic_daily_mean, HistorySynthesizer};
pub use schema::{Column, FeatureSchema, FeatureSource, FieldSpec, Sensor, SensorKeys};
