use anyhow::{Context, Result};
/// Test utilities for integration tests
/// Writes classifier artifacts and builds sample requests
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

pub const DISEASE_CLASSES: [&str; 4] = ["Blast", "Brown Spot", "Kresek", "Tungro"];
pub const DISEASE_FEATURES: usize = 10;
pub const FIELD_RISK_FEATURES: usize = 10;

/// A classifier artifact on disk, removed when dropped
pub struct ModelFixture {
    dir: TempDir,
    path: PathBuf,
}

impl ModelFixture {
    /// Write a linear (softmax) artifact
    pub fn linear(
        weights: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
        classes: Option<&[&str]>,
    ) -> Result<Self> {
        let mut artifact = json!({
            "weights": weights,
            "intercepts": intercepts,
        });
        if let Some(classes) = classes {
            artifact["classes"] = json!(classes);
        }
        Self::raw("model.json", artifact.to_string().as_bytes())
    }

    /// Linear artifact whose distribution is uniform for every input
    pub fn uniform(n_features: usize, n_classes: usize) -> Result<Self> {
        Self::linear(
            vec![vec![0.0; n_features]; n_classes],
            vec![0.0; n_classes],
            None,
        )
    }

    /// Linear artifact that always favours `class`, ignoring the features
    pub fn favouring(n_features: usize, n_classes: usize, class: usize) -> Result<Self> {
        let mut intercepts = vec![0.0; n_classes];
        intercepts[class] = 4.0;
        Self::linear(vec![vec![0.0; n_features]; n_classes], intercepts, None)
    }

    /// Disease model favouring Blast, with class names embedded
    pub fn disease() -> Result<Self> {
        let mut intercepts = vec![0.0; DISEASE_CLASSES.len()];
        intercepts[0] = 1.0;
        Self::linear(
            vec![vec![0.0; DISEASE_FEATURES]; DISEASE_CLASSES.len()],
            intercepts,
            Some(&DISEASE_CLASSES[..]),
        )
    }

    /// Write arbitrary bytes under `file_name`, e.g. a corrupt artifact
    pub fn raw(file_name: &str, contents: &[u8]) -> Result<Self> {
        let dir = TempDir::new().context("Failed to create temp dir")?;
        let path = dir.path().join(file_name);
        std::fs::write(&path, contents)
            .context(format!("Failed to write artifact {}", path.display()))?;
        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &str {
        self.path.to_str().unwrap_or_default()
    }

    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }
}

/// Reading that triggers irrigation (soil < 40) and cooling (temp > 30)
pub fn hot_dry_reading() -> Value {
    json!({
        "temperature_C": 32,
        "humidity_percent": 85,
        "soil_moisture_percent": 35
    })
}

/// Reading inside every comfort band
pub fn comfortable_reading() -> Value {
    json!({
        "temperature_C": 25,
        "humidity_percent": 60,
        "soil_moisture_percent": 55
    })
}

/// Poll `GET {base_url}/health` until it answers or the timeout passes
pub async fn wait_for_health(base_url: &str, timeout: Duration) -> Result<Value> {
    let client = reqwest::Client::new();
    let url = format!("{}/health", base_url);
    let start = std::time::Instant::now();

    loop {
        if let Ok(response) = client.get(&url).send().await {
            if response.status().is_success() {
                return response
                    .json()
                    .await
                    .context("Health endpoint returned invalid JSON");
            }
        }

        if start.elapsed() > timeout {
            anyhow::bail!("Server at {} not healthy after {:?}", base_url, timeout);
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
