use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

/// Readiness probe: only ready once a model is loaded
pub async fn ready_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.model.is_loaded() {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not_ready" })),
        )
    }
}
