// Module declarations for HTTP handlers
pub mod batch;
pub mod health;
pub mod predict;
pub mod ready;

// Re-exports
pub use batch::batch_predict_handler;
pub use health::health_handler;
pub use predict::predict_handler;
pub use ready::ready_handler;

/// Response timestamp, RFC 3339 in UTC
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
