use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{CommonError, ErrorBody};
use thiserror::Error;

pub type PredictorResult<T> = Result<T, PredictorError>;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("Model error: {0}")]
    Model(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PredictorError {
    pub fn status(&self) -> StatusCode {
        match self {
            PredictorError::MissingField(_) | PredictorError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CommonError> for PredictorError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::Serialization(e) => PredictorError::Json(e),
            invalid @ CommonError::InvalidValue { .. } => {
                PredictorError::InvalidInput(invalid.to_string())
            }
        }
    }
}

impl IntoResponse for PredictorError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
