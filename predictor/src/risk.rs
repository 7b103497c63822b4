//! Mapping classifier probabilities to risk scores and tiers

use crate::model::Classification;
use common::DiseaseRisk;

/// Language of user-facing labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Indonesian,
    English,
}

/// Ordinal risk, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Indonesian, RiskLevel::VeryLow) => "sangat rendah",
            (Locale::Indonesian, RiskLevel::Low) => "rendah",
            (Locale::Indonesian, RiskLevel::Medium) => "sedang",
            (Locale::Indonesian, RiskLevel::High) => "tinggi",
            (Locale::English, RiskLevel::VeryLow) => "very low",
            (Locale::English, RiskLevel::Low) => "low",
            (Locale::English, RiskLevel::Medium) => "medium",
            (Locale::English, RiskLevel::High) => "high",
        }
    }
}

/// How a profile turns a classification into an overall score and tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scoring {
    /// Score is the mean class probability; tier from score thresholds
    MeanProbability { medium_from: f64, high_from: f64 },
    /// Score is the predicted class's probability; tier from the class index
    PredictedClass,
}

impl Scoring {
    pub const DEFAULT_THRESHOLDS: Scoring = Scoring::MeanProbability {
        medium_from: 15.0,
        high_from: 35.0,
    };

    pub fn assess(&self, classification: &Classification) -> (f64, RiskLevel) {
        match *self {
            Scoring::MeanProbability {
                medium_from,
                high_from,
            } => {
                let score = mean_risk_percent(&classification.probabilities);
                (score, tier_from_score(score, medium_from, high_from))
            }
            Scoring::PredictedClass => {
                let p = classification
                    .probabilities
                    .get(classification.label)
                    .copied()
                    .unwrap_or(0.0);
                (round1(p * 100.0), tier_from_class(classification.label))
            }
        }
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean class probability as a percentage, one decimal
pub fn mean_risk_percent(probabilities: &[f64]) -> f64 {
    if probabilities.is_empty() {
        return 0.0;
    }
    let mean = probabilities.iter().sum::<f64>() / probabilities.len() as f64;
    round1(mean * 100.0)
}

pub fn tier_from_score(score: f64, medium_from: f64, high_from: f64) -> RiskLevel {
    if score < medium_from {
        RiskLevel::Low
    } else if score < high_from {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Class 0 is healthy, class 1 is the at-risk class, anything else sits between
pub fn tier_from_class(class: usize) -> RiskLevel {
    match class {
        0 => RiskLevel::Low,
        1 => RiskLevel::High,
        _ => RiskLevel::Medium,
    }
}

/// Severity of one class from its probability percentage
pub fn severity(percent: f64) -> RiskLevel {
    if percent < 10.0 {
        RiskLevel::VeryLow
    } else if percent < 25.0 {
        RiskLevel::Low
    } else if percent < 50.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Per-class risks for every class with non-zero probability, in class order
pub fn class_risks(probabilities: &[f64], labels: &[String], locale: Locale) -> Vec<DiseaseRisk> {
    probabilities
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let percent = p * 100.0;
            if percent <= 0.0 {
                return None;
            }
            Some(DiseaseRisk {
                name: labels.get(i).cloned().unwrap_or_else(|| i.to_string()),
                probability: round1(percent),
                severity: severity(percent).label(locale).to_string(),
            })
        })
        .collect()
}
