use crate::profile::ProfileKind;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub model_path: String,
    pub profile: ProfileKind,
    /// Overrides the profile's class names when the artifact carries none
    pub class_labels: Option<Vec<String>>,
    /// Makes the synthetic 24h means reproducible
    pub history_seed: Option<u64>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()?,
            model_path: env::var("MODEL_PATH").unwrap_or_else(|_| "model.onnx".to_string()),
            profile: env::var("PIPELINE_PROFILE")
                .unwrap_or_else(|_| "disease".to_string())
                .parse()?,
            class_labels: env::var("CLASS_LABELS").ok().map(|raw| parse_labels(&raw)),
            history_seed: env::var("HISTORY_SEED")
                .ok()
                .map(|seed| seed.parse())
                .transpose()?,
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("PORT");
        env::remove_var("MODEL_PATH");
        env::remove_var("PIPELINE_PROFILE");
        env::remove_var("CLASS_LABELS");
        env::remove_var("HISTORY_SEED");
        env::remove_var("RUST_LOG");
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.model_path, "model.onnx");
        assert_eq!(config.profile, ProfileKind::Disease);
        assert_eq!(config.class_labels, None);
        assert_eq!(config.history_seed, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom() {
        env::set_var("PORT", "9090");
        env::set_var("MODEL_PATH", "/models/field_risk.json");
        env::set_var("PIPELINE_PROFILE", "field-risk");
        env::set_var("CLASS_LABELS", "healthy, at risk ,,watch");
        env::set_var("HISTORY_SEED", "42");
        env::set_var("RUST_LOG", "debug");

        let config = Config::from_env().unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.model_path, "/models/field_risk.json");
        assert_eq!(config.profile, ProfileKind::FieldRisk);
        assert_eq!(
            config.class_labels,
            Some(vec![
                "healthy".to_string(),
                "at risk".to_string(),
                "watch".to_string()
            ])
        );
        assert_eq!(config.history_seed, Some(42));
        assert_eq!(config.log_level, "debug");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_invalid_port() {
        clear_env();
        env::set_var("PORT", "invalid");

        let result = Config::from_env();
        assert!(result.is_err());

        env::remove_var("PORT");
    }

    #[test]
    #[serial]
    fn test_config_unknown_profile() {
        clear_env();
        env::set_var("PIPELINE_PROFILE", "orchard");

        let result = Config::from_env();
        assert!(result.is_err());

        env::remove_var("PIPELINE_PROFILE");
    }

    #[test]
    #[serial]
    fn test_config_invalid_seed() {
        clear_env();
        env::set_var("HISTORY_SEED", "-1");

        let result = Config::from_env();
        assert!(result.is_err());

        env::remove_var("HISTORY_SEED");
    }
}
