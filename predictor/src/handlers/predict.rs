use crate::error::{PredictorError, PredictorResult};
use crate::handlers::timestamp;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use common::{PredictionResponse, SensorReading};

/// Predict disease risk for one sensor reading
///
/// Process:
/// 1. Refuse early when no model is loaded
/// 2. Assemble features, checking required fields
/// 3. Classify once and derive risk tier and treatments
#[axum::debug_handler]
pub async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<SensorReading>, JsonRejection>,
) -> PredictorResult<Json<PredictionResponse>> {
    let classifier = state.model.classifier()?;
    let Json(reading) = payload.map_err(|e| PredictorError::InvalidInput(e.body_text()))?;

    let assessment = state.pipeline.assess(classifier, &reading)?;

    tracing::info!(
        "Prediction made: temp={}, humidity={}, soil={} -> {} ({}%), predicted {}",
        assessment.conditions.temperature,
        assessment.conditions.humidity,
        assessment.conditions.soil_moisture,
        assessment.risk_level,
        assessment.overall_risk,
        assessment.predicted_label
    );

    Ok(Json(assessment.into_response(timestamp())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FailingClassifier, ModelHandle, StubClassifier};
    use crate::pipeline::Pipeline;
    use crate::profile::Profile;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::Arc;

    fn state(model: ModelHandle) -> AppState {
        let pipeline = Pipeline::new(Profile::disease()).with_history_seed(Some(1));
        AppState::new(Arc::new(pipeline), model)
    }

    fn reading() -> SensorReading {
        SensorReading::new()
            .with("temperature_C", 32)
            .with("humidity_percent", 85)
            .with("soil_moisture_percent", 35)
    }

    #[tokio::test]
    async fn test_predict_handler_success() {
        let model = ModelHandle::ready(Arc::new(StubClassifier::new(vec![0.7, 0.1, 0.1, 0.1])));

        let response = predict_handler(State(state(model)), Ok(Json(reading())))
            .await
            .unwrap();

        assert_eq!(response.predicted_disease, "Blast");
        assert_eq!(response.overall_risk, 25.0);
        assert_eq!(response.risk_level, "sedang");
        assert!(response
            .treatments
            .iter()
            .any(|t| t.title == "Irigasi Diperlukan"));
        assert!(response
            .treatments
            .iter()
            .any(|t| t.title == "Pendinginan Tanaman"));
        assert_eq!(response.sensor_data["soil_moisture_percent"], 35.0);
    }

    #[tokio::test]
    async fn test_predict_handler_model_not_loaded() {
        let result =
            predict_handler(State(state(ModelHandle::unavailable())), Ok(Json(reading()))).await;

        let err = result.unwrap_err();
        assert!(matches!(err, PredictorError::ModelNotLoaded));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_predict_handler_missing_field() {
        let model = ModelHandle::ready(Arc::new(StubClassifier::uniform(4)));
        let reading = SensorReading::new()
            .with("humidity_percent", 85)
            .with("soil_moisture_percent", 35);

        let err = predict_handler(State(state(model)), Ok(Json(reading)))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Missing required field: temperature_C");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_handler_classifier_failure() {
        let model = ModelHandle::ready(Arc::new(FailingClassifier::new("bad input shape")));

        let err = predict_handler(State(state(model)), Ok(Json(reading())))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("bad input shape"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
