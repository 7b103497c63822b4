//! Canned treatment advice selected by threshold rules

use crate::features::Conditions;
use crate::risk::RiskLevel;
use common::{DiseaseRisk, Priority, Treatment};

/// A fixed advisory template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advisory {
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Priority,
    pub action: &'static str,
}

/// Advisory for a named disease class
///
/// Priority is raised to high when the class probability exceeds
/// `escalate_above`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiseaseAdvisory {
    pub disease: &'static str,
    pub advisory: Advisory,
    pub escalate_above: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Catalog {
    pub irrigation: Advisory,
    pub drainage: Advisory,
    pub cooling: Advisory,
    pub warming: Advisory,
    /// Only catalogs with a humidity advisory check humidity
    pub humidity: Option<Advisory>,
    /// Only catalogs with a high-risk advisory react to the tier
    pub high_risk: Option<Advisory>,
    pub routine: Advisory,
    pub diseases: &'static [DiseaseAdvisory],
}

pub static INDONESIAN: Catalog = Catalog {
    irrigation: Advisory {
        title: "Irigasi Diperlukan",
        description: "Kelembapan tanah berada di bawah tingkat optimal. Jadwalkan irigasi dalam 24 jam.",
        priority: Priority::High,
        action: "Tingkatkan penyiraman sebesar 20%",
    },
    drainage: Advisory {
        title: "Drainase Diperlukan",
        description: "Kelembapan tanah terlalu tinggi. Periksa sistem drainase.",
        priority: Priority::Medium,
        action: "Perbaiki drainase dan kurangi penyiraman",
    },
    cooling: Advisory {
        title: "Pendinginan Tanaman",
        description: "Suhu terlalu tinggi dapat menyebabkan stres pada tanaman.",
        priority: Priority::Medium,
        action: "Tingkatkan penyiraman dan berikan naungan",
    },
    warming: Advisory {
        title: "Pemanasan Tanaman",
        description: "Suhu terlalu rendah dapat memperlambat pertumbuhan.",
        priority: Priority::Low,
        action: "Gunakan mulsa atau rumah kaca mini",
    },
    humidity: None,
    high_risk: None,
    routine: Advisory {
        title: "Pemantauan Rutin",
        description: "Kondisi tanaman dalam keadaan baik. Lanjutkan pemantauan rutin.",
        priority: Priority::Low,
        action: "Pertahankan jadwal perawatan saat ini",
    },
    diseases: &[
        DiseaseAdvisory {
            disease: "Blast",
            advisory: Advisory {
                title: "Pengendalian Penyakit Blast",
                description: "Risiko penyakit blast terdeteksi. Lakukan tindakan pencegahan.",
                priority: Priority::Medium,
                action: "Gunakan fungisida berbasis tembaga",
            },
            escalate_above: Some(30.0),
        },
        DiseaseAdvisory {
            disease: "Brown Spot",
            advisory: Advisory {
                title: "Pengendalian Brown Spot",
                description: "Risiko penyakit brown spot terdeteksi.",
                priority: Priority::Medium,
                action: "Gunakan fungisida sistemik",
            },
            escalate_above: None,
        },
        DiseaseAdvisory {
            disease: "Kresek",
            advisory: Advisory {
                title: "Pengendalian Kresek",
                description: "Risiko penyakit kresek terdeteksi.",
                priority: Priority::Medium,
                action: "Gunakan bakterisida dan perbaiki drainase",
            },
            escalate_above: Some(25.0),
        },
        DiseaseAdvisory {
            disease: "Tungro",
            advisory: Advisory {
                title: "Pengendalian Tungro",
                description: "Risiko penyakit tungro terdeteksi.",
                priority: Priority::Medium,
                action: "Kontrol vektor dan gunakan varietas tahan",
            },
            escalate_above: Some(25.0),
        },
    ],
};

pub static ENGLISH: Catalog = Catalog {
    irrigation: Advisory {
        title: "Irrigation Needed",
        description: "Soil moisture is below the optimal level. Schedule irrigation within 24 hours.",
        priority: Priority::High,
        action: "Increase watering by 20%",
    },
    drainage: Advisory {
        title: "Drainage Needed",
        description: "Soil moisture is too high. Inspect the drainage system.",
        priority: Priority::Medium,
        action: "Clear drainage channels and reduce watering",
    },
    cooling: Advisory {
        title: "Heat Stress Mitigation",
        description: "High temperature can stress the crop.",
        priority: Priority::Medium,
        action: "Increase watering and provide shade",
    },
    warming: Advisory {
        title: "Cold Protection",
        description: "Low temperature can slow crop growth.",
        priority: Priority::Low,
        action: "Apply mulch or use row covers",
    },
    humidity: Some(Advisory {
        title: "High Humidity",
        description: "Sustained high humidity favours fungal infection.",
        priority: Priority::Medium,
        action: "Improve air circulation and inspect leaves for lesions",
    }),
    high_risk: Some(Advisory {
        title: "Preventive Inspection",
        description: "The model rates this field at high disease risk.",
        priority: Priority::High,
        action: "Scout the field within 48 hours and prepare a preventive spray",
    }),
    routine: Advisory {
        title: "Routine Monitoring",
        description: "Crop conditions look good. Continue routine monitoring.",
        priority: Priority::Low,
        action: "Keep the current care schedule",
    },
    diseases: &[
        DiseaseAdvisory {
            disease: "Blast",
            advisory: Advisory {
                title: "Blast Control",
                description: "Blast risk detected. Take preventive measures.",
                priority: Priority::Medium,
                action: "Apply a copper-based fungicide",
            },
            escalate_above: Some(30.0),
        },
        DiseaseAdvisory {
            disease: "Brown Spot",
            advisory: Advisory {
                title: "Brown Spot Control",
                description: "Brown spot risk detected.",
                priority: Priority::Medium,
                action: "Apply a systemic fungicide",
            },
            escalate_above: None,
        },
        DiseaseAdvisory {
            disease: "Kresek",
            advisory: Advisory {
                title: "Bacterial Leaf Blight Control",
                description: "Bacterial leaf blight (kresek) risk detected.",
                priority: Priority::Medium,
                action: "Apply a bactericide and improve drainage",
            },
            escalate_above: Some(25.0),
        },
        DiseaseAdvisory {
            disease: "Tungro",
            advisory: Advisory {
                title: "Tungro Control",
                description: "Tungro risk detected.",
                priority: Priority::Medium,
                action: "Control leafhopper vectors and plant resistant varieties",
            },
            escalate_above: Some(25.0),
        },
    ],
};

/// Thresholds and text for the recommendation rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationRules {
    pub soil_dry_below: f64,
    pub soil_wet_above: f64,
    pub hot_above: f64,
    pub cold_below: f64,
    pub humid_above: f64,
    /// Class probability (percent) a disease must exceed to get advice
    pub disease_cutoff: f64,
    pub catalog: &'static Catalog,
}

impl RecommendationRules {
    pub fn new(catalog: &'static Catalog) -> Self {
        Self {
            soil_dry_below: 40.0,
            soil_wet_above: 70.0,
            hot_above: 30.0,
            cold_below: 20.0,
            humid_above: 80.0,
            disease_cutoff: 15.0,
            catalog,
        }
    }
}

/// Ordered treatment list for one assessment
///
/// Rules run in a fixed order and each adds at most one item, except the
/// per-disease rule which adds one per qualifying class. When nothing fires
/// the list holds the routine monitoring item alone. Ids are list positions.
pub fn recommend(
    rules: &RecommendationRules,
    level: RiskLevel,
    conditions: &Conditions,
    risks: &[DiseaseRisk],
) -> Vec<Treatment> {
    let catalog = rules.catalog;
    let mut advice: Vec<Advisory> = Vec::new();

    if conditions.soil_moisture < rules.soil_dry_below {
        advice.push(catalog.irrigation);
    } else if conditions.soil_moisture > rules.soil_wet_above {
        advice.push(catalog.drainage);
    }

    if conditions.temperature > rules.hot_above {
        advice.push(catalog.cooling);
    } else if conditions.temperature < rules.cold_below {
        advice.push(catalog.warming);
    }

    if let Some(humidity) = catalog.humidity {
        if conditions.humidity > rules.humid_above {
            advice.push(humidity);
        }
    }

    if let Some(high_risk) = catalog.high_risk {
        if level == RiskLevel::High {
            advice.push(high_risk);
        }
    }

    for risk in risks.iter().filter(|r| r.probability > rules.disease_cutoff) {
        let Some(known) = catalog.diseases.iter().find(|d| d.disease == risk.name) else {
            continue;
        };
        let mut advisory = known.advisory;
        if known
            .escalate_above
            .is_some_and(|limit| risk.probability > limit)
        {
            advisory.priority = Priority::High;
        }
        advice.push(advisory);
    }

    if advice.is_empty() {
        advice.push(catalog.routine);
    }

    advice
        .into_iter()
        .enumerate()
        .map(|(i, a)| Treatment {
            id: i as u32 + 1,
            title: a.title.to_string(),
            description: a.description.to_string(),
            priority: a.priority,
            action: a.action.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(temperature: f64, humidity: f64, soil_moisture: f64) -> Conditions {
        Conditions {
            temperature,
            humidity,
            soil_moisture,
        }
    }

    fn risk(name: &str, probability: f64) -> DiseaseRisk {
        DiseaseRisk {
            name: name.to_string(),
            probability,
            severity: String::new(),
        }
    }

    fn titles(treatments: &[Treatment]) -> Vec<&str> {
        treatments.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_dry_soil_needs_irrigation() {
        let rules = RecommendationRules::new(&INDONESIAN);
        let out = recommend(&rules, RiskLevel::Low, &conditions(25.0, 60.0, 39.9), &[]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Irigasi Diperlukan");
        assert_eq!(out[0].priority, Priority::High);
    }

    #[test]
    fn test_wet_soil_needs_drainage() {
        let rules = RecommendationRules::new(&INDONESIAN);
        let out = recommend(&rules, RiskLevel::Low, &conditions(25.0, 60.0, 70.1), &[]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Drainase Diperlukan");
        assert_eq!(out[0].priority, Priority::Medium);
    }

    #[test]
    fn test_soil_rules_are_exclusive() {
        let rules = RecommendationRules::new(&ENGLISH);
        for soil in [0.0, 20.0, 39.9, 40.0, 55.0, 70.0, 70.1, 95.0] {
            let out = recommend(&rules, RiskLevel::Low, &conditions(25.0, 60.0, soil), &[]);
            let soil_items = out
                .iter()
                .filter(|t| t.title == "Irrigation Needed" || t.title == "Drainage Needed")
                .count();
            assert!(soil_items <= 1, "soil {} produced {} items", soil, soil_items);
        }
    }

    #[test]
    fn test_routine_when_nothing_fires() {
        let rules = RecommendationRules::new(&INDONESIAN);
        let out = recommend(&rules, RiskLevel::Low, &conditions(25.0, 60.0, 50.0), &[]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
        assert_eq!(out[0].title, "Pemantauan Rutin");
        assert_eq!(out[0].priority, Priority::Low);
    }

    #[test]
    fn test_boundaries_do_not_fire() {
        let rules = RecommendationRules::new(&ENGLISH);
        let out = recommend(&rules, RiskLevel::Medium, &conditions(30.0, 80.0, 40.0), &[]);
        assert_eq!(titles(&out), vec!["Routine Monitoring"]);

        let out = recommend(&rules, RiskLevel::Medium, &conditions(20.0, 50.0, 70.0), &[]);
        assert_eq!(titles(&out), vec!["Routine Monitoring"]);
    }

    #[test]
    fn test_hot_dry_reading_order() {
        let rules = RecommendationRules::new(&INDONESIAN);
        let out = recommend(&rules, RiskLevel::Medium, &conditions(32.0, 85.0, 35.0), &[]);

        assert_eq!(
            titles(&out),
            vec!["Irigasi Diperlukan", "Pendinginan Tanaman"]
        );
        assert_eq!(out[0].id, 1);
        assert_eq!(out[1].id, 2);
    }

    #[test]
    fn test_cold_reading_warming() {
        let rules = RecommendationRules::new(&INDONESIAN);
        let out = recommend(&rules, RiskLevel::Low, &conditions(18.0, 60.0, 50.0), &[]);

        assert_eq!(titles(&out), vec!["Pemanasan Tanaman"]);
        assert_eq!(out[0].priority, Priority::Low);
    }

    #[test]
    fn test_humidity_rule_only_with_catalog_entry() {
        let reading = conditions(25.0, 92.0, 50.0);

        let id = recommend(&RecommendationRules::new(&INDONESIAN), RiskLevel::Low, &reading, &[]);
        assert_eq!(titles(&id), vec!["Pemantauan Rutin"]);

        let en = recommend(&RecommendationRules::new(&ENGLISH), RiskLevel::Low, &reading, &[]);
        assert_eq!(titles(&en), vec!["High Humidity"]);
    }

    #[test]
    fn test_high_tier_adds_inspection() {
        let rules = RecommendationRules::new(&ENGLISH);
        let out = recommend(&rules, RiskLevel::High, &conditions(25.0, 60.0, 50.0), &[]);

        assert_eq!(titles(&out), vec!["Preventive Inspection"]);
        assert_eq!(out[0].priority, Priority::High);
    }

    #[test]
    fn test_disease_escalation() {
        let rules = RecommendationRules::new(&INDONESIAN);
        let risks = vec![
            risk("Blast", 31.0),
            risk("Brown Spot", 60.0),
            risk("Kresek", 20.0),
            risk("Tungro", 15.0),
        ];

        let out = recommend(&rules, RiskLevel::Medium, &conditions(25.0, 60.0, 50.0), &risks);

        assert_eq!(
            titles(&out),
            vec![
                "Pengendalian Penyakit Blast",
                "Pengendalian Brown Spot",
                "Pengendalian Kresek"
            ]
        );
        assert_eq!(out[0].priority, Priority::High);
        assert_eq!(out[1].priority, Priority::Medium);
        assert_eq!(out[2].priority, Priority::Medium);
        assert_eq!(out.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_class_names_ignored() {
        let rules = RecommendationRules::new(&ENGLISH);
        let risks = vec![risk("0", 70.0), risk("1", 30.0)];

        let out = recommend(&rules, RiskLevel::Low, &conditions(25.0, 60.0, 50.0), &risks);
        assert_eq!(titles(&out), vec!["Routine Monitoring"]);
    }
}
