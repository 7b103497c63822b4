use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the HTTP server with all routes and middleware
///
/// Both the short and the `/api` route names are served by the same
/// handlers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/health", get(handlers::health_handler))
        .route("/ready", get(handlers::ready_handler))
        .route("/predict", post(handlers::predict_handler))
        .route("/api/predict-disease-risk", post(handlers::predict_handler))
        .route("/api/batch-predict", post(handlers::batch_predict_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve on an already bound listener until the process stops
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
