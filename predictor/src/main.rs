use predictor::model::ModelHandle;
use predictor::{server, AppState, Config, Pipeline};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.clone())
        .init();

    tracing::info!("Predictor starting");
    tracing::info!("Port: {}", config.port);
    tracing::info!("Profile: {}", config.profile);
    if config.history_seed.is_some() {
        tracing::info!("Synthetic 24h means are seeded");
    }

    // A missing or corrupt artifact is not fatal
    tracing::info!("Loading model from {}", config.model_path);
    let model = ModelHandle::load(&config.model_path);
    if !model.is_loaded() {
        tracing::warn!("Serving without a model; prediction endpoints will return errors");
    }

    let pipeline = Pipeline::from_config(&config);
    let state = AppState::new(Arc::new(pipeline), model);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Predictor listening on {}", addr);

    server::serve(listener, state).await
}
