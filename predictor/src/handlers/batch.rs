use crate::error::{PredictorError, PredictorResult};
use crate::handlers::timestamp;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use common::{BatchRequest, BatchResponse, BatchResult};

/// Predict risk for every field in the request
///
/// Fields are scored one after another with the single-reading pipeline. A
/// field that fails carries its own `error` and does not affect the others.
pub async fn batch_predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> PredictorResult<Json<BatchResponse>> {
    let classifier = state.model.classifier()?;
    let Json(request) = payload.map_err(|e| PredictorError::InvalidInput(e.body_text()))?;

    let total = request.fields.len();
    let results: Vec<BatchResult> = request
        .fields
        .into_iter()
        .map(|field| state.pipeline.assess_field(classifier, field))
        .collect();

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    tracing::info!("Batch prediction: {} fields, {} failed", total, failed);

    Ok(Json(BatchResponse {
        results,
        timestamp: timestamp(),
    }))
}
