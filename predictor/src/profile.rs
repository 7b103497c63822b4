//! Pipeline profiles
//!
//! A profile bundles everything that differs between deployed classifiers:
//! feature schema, scoring, label language, recommendation text and default
//! class names. The rest of the pipeline is shared.

use crate::error::PredictorError;
use crate::features::FeatureSchema;
use crate::recommend::{RecommendationRules, ENGLISH, INDONESIAN};
use crate::risk::{Locale, Scoring};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Multi-class rice disease model
    Disease,
    /// Low / high / medium field risk model
    FieldRisk,
}

impl ProfileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileKind::Disease => "disease",
            ProfileKind::FieldRisk => "field-risk",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disease" => Ok(ProfileKind::Disease),
            "field-risk" | "field_risk" => Ok(ProfileKind::FieldRisk),
            other => Err(PredictorError::InvalidInput(format!(
                "Unknown pipeline profile: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub kind: ProfileKind,
    pub schema: FeatureSchema,
    pub scoring: Scoring,
    pub locale: Locale,
    pub rules: RecommendationRules,
    pub default_classes: &'static [&'static str],
}

impl Profile {
    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Disease => Self::disease(),
            ProfileKind::FieldRisk => Self::field_risk(),
        }
    }

    pub fn disease() -> Self {
        Self {
            kind: ProfileKind::Disease,
            schema: FeatureSchema::disease(),
            scoring: Scoring::DEFAULT_THRESHOLDS,
            locale: Locale::Indonesian,
            rules: RecommendationRules::new(&INDONESIAN),
            default_classes: &["Blast", "Brown Spot", "Kresek", "Tungro"],
        }
    }

    pub fn field_risk() -> Self {
        Self {
            kind: ProfileKind::FieldRisk,
            schema: FeatureSchema::field_risk(),
            scoring: Scoring::PredictedClass,
            locale: Locale::English,
            rules: RecommendationRules::new(&ENGLISH),
            default_classes: &["0", "1", "2"],
        }
    }
}
