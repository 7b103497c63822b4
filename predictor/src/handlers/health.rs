use crate::handlers::timestamp;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use common::HealthResponse;

pub const SERVICE_NAME: &str = "crop-disease-predictor";

/// Health check endpoint
///
/// Always 200; `model_loaded` tells whether predictions can be served.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        profile: state.pipeline.profile().kind.to_string(),
        model_loaded: state.model.is_loaded(),
        timestamp: timestamp(),
    })
}
