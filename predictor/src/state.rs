use crate::model::ModelHandle;
use crate::pipeline::Pipeline;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// The classifier is injected here rather than held globally, so tests can
/// swap in stubs.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub model: ModelHandle,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, model: ModelHandle) -> Self {
        Self { pipeline, model }
    }
}
