use crate::error::{PredictorError, PredictorResult};
use crate::features::FeatureVector;
use crate::model::traits::{argmax, Classification, Classifier};
use ndarray::Array2;
use ort::session::Session;
use ort::value::TensorElementType;
use ort::value::TensorRef;
use std::sync::Mutex;

/// Output name skl2onnx gives the class distribution
const PROBABILITIES_OUTPUT: &str = "probabilities";

/// Output name skl2onnx gives the predicted class
const LABEL_OUTPUT: &str = "label";

/// Element type of a model output, as far as output selection cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Float32,
    Int64,
    Other,
}

impl OutputKind {
    fn from_tensor_type(ty: Option<TensorElementType>) -> Self {
        match ty {
            Some(TensorElementType::Float32) => OutputKind::Float32,
            Some(TensorElementType::Int64) => OutputKind::Int64,
            _ => OutputKind::Other,
        }
    }
}

/// Which outputs carry the distribution and the predicted class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLayout {
    pub probabilities: usize,
    pub label: Option<usize>,
}

/// Pick the probability and label outputs from `(name, kind)` pairs
///
/// Probabilities: the output named `probabilities`, else the last output.
/// Label: an `int64` output named `label`, else the first other `int64`
/// output. Without one the label falls back to the argmax.
pub fn select_outputs(outputs: &[(&str, OutputKind)]) -> PredictorResult<OutputLayout> {
    if outputs.is_empty() {
        return Err(PredictorError::Model("ONNX model has no outputs".to_string()));
    }

    let probabilities = outputs
        .iter()
        .position(|(name, _)| *name == PROBABILITIES_OUTPUT)
        .unwrap_or(outputs.len() - 1);

    let is_label = |i: usize, kind: OutputKind| i != probabilities && kind == OutputKind::Int64;
    let label = outputs
        .iter()
        .enumerate()
        .position(|(i, (name, kind))| *name == LABEL_OUTPUT && is_label(i, *kind))
        .or_else(|| {
            outputs
                .iter()
                .enumerate()
                .position(|(i, (_, kind))| is_label(i, *kind))
        });

    Ok(OutputLayout {
        probabilities,
        label,
    })
}

/// Class index from an `int64` label tensor of shape `[1]`
pub fn label_from_tensor(values: &[i64]) -> PredictorResult<usize> {
    let first = values
        .first()
        .ok_or_else(|| PredictorError::Prediction("ONNX model returned no label".to_string()))?;
    usize::try_from(*first)
        .map_err(|_| PredictorError::Prediction(format!("ONNX model returned label {}", first)))
}

/// Classifier exported to ONNX
///
/// Expects a single `float32[1, n_features]` input and a `float32`
/// probability output, as produced by skl2onnx with `zipmap=False`. The
/// predicted class comes from the `int64` label output when the graph has
/// one, otherwise from the argmax of the probabilities.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    layout: OutputLayout,
}

impl OnnxClassifier {
    pub fn load(path: &str) -> PredictorResult<Self> {
        let session = Session::builder()
            .and_then(|mut builder| builder.commit_from_file(path))
            .map_err(|e| {
                tracing::error!("Failed to load ONNX model: {}", e);
                PredictorError::Model(format!("Failed to load model: {}", e))
            })?;

        let outputs: Vec<(&str, OutputKind)> = session
            .outputs()
            .iter()
            .map(|output| {
                (
                    output.name(),
                    OutputKind::from_tensor_type(output.dtype().tensor_type()),
                )
            })
            .collect();
        let layout = select_outputs(&outputs)?;
        tracing::info!(
            "Loaded ONNX model from {} (probabilities at output {}, label at {:?})",
            path,
            layout.probabilities,
            layout.label
        );

        Ok(Self {
            session: Mutex::new(session),
            layout,
        })
    }

    /// Probabilities plus the label output's class, if the graph has one
    fn run_inference(&self, features: &FeatureVector) -> PredictorResult<(Vec<f64>, Option<usize>)> {
        let input = Array2::from_shape_vec((1, features.len()), features.to_f32())
            .map_err(|e| PredictorError::Prediction(format!("Invalid input shape: {}", e)))?;

        let input_slice = input
            .as_slice()
            .ok_or_else(|| PredictorError::Prediction("Input array not contiguous".to_string()))?;

        let input_tensor = TensorRef::from_array_view((input.shape(), input_slice))
            .map_err(|e| PredictorError::Prediction(format!("Failed to create tensor: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| PredictorError::Model(format!("Failed to lock session mutex: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| PredictorError::Prediction(format!("Inference failed: {}", e)))?;

        let (_shape, probabilities) = outputs[self.layout.probabilities]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                PredictorError::Prediction(format!("Failed to extract probabilities: {}", e))
            })?;
        let probabilities = probabilities.iter().map(|&p| f64::from(p)).collect();

        let label = match self.layout.label {
            Some(index) => {
                let (_shape, labels) = outputs[index].try_extract_tensor::<i64>().map_err(|e| {
                    PredictorError::Prediction(format!("Failed to extract label: {}", e))
                })?;
                Some(label_from_tensor(labels)?)
            }
            None => None,
        };

        Ok((probabilities, label))
    }
}

impl Classifier for OnnxClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> PredictorResult<Vec<f64>> {
        Ok(self.run_inference(features)?.0)
    }

    fn classify(&self, features: &FeatureVector) -> PredictorResult<Classification> {
        let (probabilities, label) = self.run_inference(features)?;
        let label = match label {
            Some(label) => label,
            None => argmax(&probabilities).ok_or_else(|| {
                PredictorError::Prediction("ONNX model returned no probabilities".to_string())
            })?,
        };
        Ok(Classification {
            label,
            probabilities,
        })
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
