pub mod config;
pub mod error;
pub mod features;
pub mod handlers;
pub mod model;
pub mod pipeline;
pub mod profile;
pub mod recommend;
pub mod risk;
pub mod server;
pub mod state;

// Re-exports for convenience
pub use config::Config;
pub use error::{PredictorError, PredictorResult};
pub use pipeline::{Assessment, Pipeline};
pub use profile::{Profile, ProfileKind};
pub use state::AppState;
