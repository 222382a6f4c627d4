use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use log::{debug, info};
use ndarray::Array2;
use ort::session::Session;
use ort::tensor::TensorElementType;
use ort::value::{DynValue, Tensor, ValueType};

use super::error::{LoadError, ScorerError};
use super::preprocess::{Sequence, SEQUENCE_LENGTH};
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Anything that can turn a preprocessed sequence into a score.
///
/// The service only talks to the model through this trait, so tests and
/// alternative runtimes can be plugged into a [`Scorer`](crate::Scorer).
/// Implementations must be immutable after construction; they are shared
/// across request handlers without locking.
pub trait ScoringModel: Send + Sync + fmt::Debug {
    fn predict(&self, sequence: &Sequence) -> Result<f32, ScorerError>;
}

/// Element type the model expects for its index input.
///
/// Keras exports commonly keep the float32 placeholder of the
/// `Input` layer, so float inputs are accepted alongside integer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Int64,
    Int32,
    Float32,
}

/// A binary classifier exported to ONNX, run through ONNX Runtime.
///
/// The model is expected to:
/// - Accept one input of shape `[batch_size, 100]` holding vocabulary indices
/// - Produce one output of shape `[batch_size, 1]` holding the score
///
/// Only the inference graph is loaded; there is no optimizer or loss state.
#[derive(Debug)]
pub struct OnnxModel {
    session: Session,
    input_name: String,
    input_kind: InputKind,
}

impl OnnxModel {
    /// Loads and validates the model at `path`.
    ///
    /// # Errors
    /// - `NotFound` if the file does not exist
    /// - `InvalidModel` if ONNX Runtime cannot load it or its structure is unexpected
    pub fn load<P: AsRef<Path>>(path: P, config: &RuntimeConfig) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound {
                file_type: "model".to_string(),
                path: path.display().to_string(),
            });
        }

        info!("Loading model from {:?}", path);
        let session = create_session_builder(config)
            .map_err(LoadError::InvalidModel)?
            .commit_from_file(path)?;

        let (input_name, input_kind) = Self::validate_model(&session)?;
        info!(
            "Model structure validated successfully (input '{}', {:?})",
            input_name, input_kind
        );

        Ok(Self {
            session,
            input_name,
            input_kind,
        })
    }

    /// Validates that the model has the expected input/output structure
    ///
    /// # Returns
    /// The name and element type of the index input, or an error if:
    ///   - The model has no inputs or no outputs
    ///   - The first input is not a tensor of int64, int32 or float32
    ///   - The first input has a known shape other than `[batch, 100]`
    fn validate_model(session: &Session) -> Result<(String, InputKind), LoadError> {
        let input = session.inputs.first().ok_or_else(|| {
            LoadError::InvalidModel("Model must have at least 1 input for the index sequence".to_string())
        })?;
        if session.outputs.is_empty() {
            return Err(LoadError::InvalidModel(
                "Model must have at least 1 output for the score".to_string(),
            ));
        }

        let (ty, dimensions) = match &input.input_type {
            ValueType::Tensor { ty, dimensions, .. } => (ty, dimensions),
            other => {
                return Err(LoadError::InvalidModel(format!(
                    "Model input '{}' must be a tensor, found {:?}",
                    input.name, other
                )))
            }
        };

        let kind = match ty {
            TensorElementType::Int64 => InputKind::Int64,
            TensorElementType::Int32 => InputKind::Int32,
            TensorElementType::Float32 => InputKind::Float32,
            other => {
                return Err(LoadError::InvalidModel(format!(
                    "Model input '{}' has unsupported element type {:?}",
                    input.name, other
                )))
            }
        };

        // Dynamic dimensions are reported as -1.
        if !dimensions.is_empty() {
            let width_ok = dimensions.len() == 2
                && (dimensions[1] < 0 || dimensions[1] == SEQUENCE_LENGTH as i64);
            if !width_ok {
                return Err(LoadError::InvalidModel(format!(
                    "Model input '{}' must have shape [batch, {}], found {:?}",
                    input.name, SEQUENCE_LENGTH, dimensions
                )));
            }
        }

        Ok((input.name.clone(), kind))
    }

    fn input_value(&self, sequence: &Sequence) -> Result<DynValue, ScorerError> {
        let shape = (1, SEQUENCE_LENGTH);
        let row = sequence.as_slice();
        let shape_err =
            |e: ndarray::ShapeError| ScorerError::ModelError(format!("Failed to create input array: {}", e));

        let value = match self.input_kind {
            InputKind::Int64 => {
                let array = Array2::from_shape_vec(shape, row.to_vec()).map_err(shape_err)?;
                Tensor::from_array(array)?.into_dyn()
            }
            InputKind::Int32 => {
                let array = Array2::from_shape_vec(shape, row.iter().map(|&i| i as i32).collect())
                    .map_err(shape_err)?;
                Tensor::from_array(array)?.into_dyn()
            }
            InputKind::Float32 => {
                let array = Array2::from_shape_vec(shape, row.iter().map(|&i| i as f32).collect())
                    .map_err(shape_err)?;
                Tensor::from_array(array)?.into_dyn()
            }
        };
        Ok(value)
    }
}

impl ScoringModel for OnnxModel {
    /// Runs the model on a single sequence and returns `prediction[0][0]`.
    ///
    /// # Errors
    /// - `ModelError` if tensor creation or model execution fails
    /// - `PredictionError` if the output is empty or not a finite number
    fn predict(&self, sequence: &Sequence) -> Result<f32, ScorerError> {
        let mut input_tensors = HashMap::new();
        input_tensors.insert(self.input_name.as_str(), self.input_value(sequence)?);

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| ScorerError::ModelError(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            ScorerError::ModelError(format!("Failed to extract output tensor: {}", e))
        })?;
        debug!("Model output shape: {:?}", output_tensor.shape());

        read_score(output_tensor.iter())
    }
}

/// Takes the first element of the model output as the score.
fn read_score<'a>(output: impl IntoIterator<Item = &'a f32>) -> Result<f32, ScorerError> {
    let score = output
        .into_iter()
        .next()
        .copied()
        .ok_or_else(|| ScorerError::PredictionError("Model returned an empty output".into()))?;
    if !score.is_finite() {
        return Err(ScorerError::PredictionError(format!(
            "Model returned a non-finite score: {}",
            score
        )));
    }
    Ok(score)
}
