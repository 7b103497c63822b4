/// Integration tests for the HTTP surface
/// These spin up the real server on an ephemeral port with a fixture model
///
/// Run with: cargo test --test integration_http
use predictor::model::ModelHandle;
use predictor::{server, AppState, Pipeline, Profile};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{
    comfortable_reading, hot_dry_reading, wait_for_health, ModelFixture, FIELD_RISK_FEATURES,
};
use tokio::net::TcpListener;

/// Start a server with the given profile and model, returning its base URL
async fn spawn_server(profile: Profile, model: ModelHandle) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    let pipeline = Pipeline::new(profile).with_history_seed(Some(7));
    let state = AppState::new(Arc::new(pipeline), model);
    tokio::spawn(async move {
        let _ = server::serve(listener, state).await;
    });

    let base_url = format!("http://{}", addr);
    wait_for_health(&base_url, Duration::from_secs(5))
        .await
        .expect("Server never became healthy");
    base_url
}

#[tokio::test]
async fn test_health_reports_loaded_model() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = ModelFixture::disease()?;
    let base_url = spawn_server(Profile::disease(), ModelHandle::load(fixture.path())).await;

    let health: Value = reqwest::get(format!("{}/api/health", base_url))
        .await?
        .json()
        .await?;

    assert_eq!(health["status"], "healthy");
    assert_eq!(health["model_loaded"], true);
    assert_eq!(health["profile"], "disease");

    let ready = reqwest::get(format!("{}/ready", base_url)).await?;
    assert_eq!(ready.status(), reqwest::StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_predict_hot_dry_field() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = ModelFixture::disease()?;
    let base_url = spawn_server(Profile::disease(), ModelHandle::load(fixture.path())).await;

    let response = reqwest::Client::new()
        .post(format!("{}/predict", base_url))
        .json(&hot_dry_reading())
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await?;
    assert_eq!(body["predicted_disease"], "Blast");
    assert_eq!(body["overall_risk"], 25.0);
    assert_eq!(body["risk_level"], "sedang");
    assert_eq!(body["treatments"][0]["title"], "Irigasi Diperlukan");
    assert_eq!(body["treatments"][0]["id"], 1);
    assert_eq!(body["treatments"][1]["title"], "Pendinginan Tanaman");
    assert_eq!(body["treatments"][1]["id"], 2);
    assert_eq!(body["sensor_data"]["temperature_C"], 32.0);
    assert!(body["timestamp"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_predict_missing_field() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = ModelFixture::disease()?;
    let base_url = spawn_server(Profile::disease(), ModelHandle::load(fixture.path())).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/predict-disease-risk", base_url))
        .json(&json!({"temperature_C": 28, "humidity_percent": 70}))
        .send()
        .await?;

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Missing required field: soil_moisture_percent");

    Ok(())
}

#[tokio::test]
async fn test_batch_predict() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = ModelFixture::disease()?;
    let base_url = spawn_server(Profile::disease(), ModelHandle::load(fixture.path())).await;
    let client = reqwest::Client::new();

    let empty: Value = client
        .post(format!("{}/api/batch-predict", base_url))
        .json(&json!({"fields": []}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(empty["results"], json!([]));

    let mut north = comfortable_reading();
    north["id"] = json!(1);
    north["name"] = json!("North");
    let body: Value = client
        .post(format!("{}/api/batch-predict", base_url))
        .json(&json!({"fields": [north, {"id": 2, "temperature_C": 30}]}))
        .send()
        .await?
        .json()
        .await?;

    let results = body["results"].as_array().expect("results is an array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["field_id"], 1);
    assert_eq!(results[0]["field_name"], "North");
    assert_eq!(results[0]["risk_level"], "sedang");
    assert_eq!(results[0]["prediction"], "Blast");
    assert_eq!(results[1]["field_id"], 2);
    assert_eq!(
        results[1]["error"],
        "Missing required field: humidity_percent"
    );

    Ok(())
}

#[tokio::test]
async fn test_corrupt_artifact_serves_without_model() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = ModelFixture::raw("model.onnx", b"definitely not onnx")?;
    let base_url = spawn_server(Profile::disease(), ModelHandle::load(fixture.path())).await;

    let health: Value = reqwest::get(format!("{}/health", base_url))
        .await?
        .json()
        .await?;
    assert_eq!(health["model_loaded"], false);

    let ready = reqwest::get(format!("{}/ready", base_url)).await?;
    assert_eq!(ready.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let response = reqwest::Client::new()
        .post(format!("{}/predict", base_url))
        .json(&hot_dry_reading())
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Model not loaded");

    Ok(())
}

#[tokio::test]
async fn test_field_risk_profile_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = ModelFixture::favouring(FIELD_RISK_FEATURES, 3, 1)?;
    let base_url = spawn_server(Profile::field_risk(), ModelHandle::load(fixture.path())).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{}/api/predict-disease-risk", base_url))
        .json(&json!({}))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["predicted_class"], 1);
    assert_eq!(body["risk_level"], "high");
    assert_eq!(body["overall_risk"], 96.5);
    assert_eq!(body["treatments"][0]["title"], "Preventive Inspection");
    assert_eq!(body["sensor_data"]["soil_ph"], 6.5);

    Ok(())
}
