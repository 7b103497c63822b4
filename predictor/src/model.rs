// Module declarations for classifier abstractions
pub mod linear;
pub mod loader;
pub mod mock;
pub mod onnx;
pub mod traits;

// Re-exports for convenience
pub use linear::LinearClassifier;
pub use loader::{load_classifier, ModelHandle};
pub use mock::{FailingClassifier, StubClassifier};
pub use onnx::OnnxClassifier;
pub use traits::{argmax, Classification, Classifier};
